use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version stamp for cosmetic graph data (node layout, titles, pin display).
pub const CURRENT_COSMETIC_VERSION: u32 = 3;

/// Version stamp for the composite node representation.
pub const CURRENT_COMPOSITE_VERSION: u32 = 2;

/// Name of the user construction script function graph.
pub const USER_CONSTRUCTION_SCRIPT: &str = "UserConstructionScript";

pub type GraphId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphKind {
    Event,
    Function,
    Macro,
    Interface,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    pub id: GraphId,
    pub name: String,
    pub kind: GraphKind,
    pub nodes: Vec<GraphNode>,
    pub allow_deletion: bool,
    pub cosmetic_version: u32,
}

impl Graph {
    pub fn new(name: impl Into<String>, kind: GraphKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            nodes: Vec::new(),
            allow_deletion: true,
            cosmetic_version: CURRENT_COSMETIC_VERSION,
        }
    }

    pub fn add_node(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Event,
    FunctionCall,
    VariableGet,
    VariableSet,
    Composite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub title: String,
    /// Set on variable accessor nodes; names the blueprint variable they read
    /// or write.
    pub variable_name: Option<String>,
    pub composite_version: u32,
    /// Nodes must carry this to participate in undo transactions. Copy-paste
    /// paths have historically dropped it.
    pub transactional: bool,
}

impl GraphNode {
    pub fn new(kind: NodeKind, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            variable_name: None,
            composite_version: CURRENT_COMPOSITE_VERSION,
            transactional: true,
        }
    }

    /// Variable accessor node for the named blueprint variable.
    pub fn variable(kind: NodeKind, variable_name: impl Into<String>) -> Self {
        let variable_name = variable_name.into();
        let mut node = Self::new(kind, variable_name.clone());
        node.variable_name = Some(variable_name);
        node
    }
}

/// The simple construction script: the component tree an actor blueprint
/// builds on instantiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructionScript {
    pub nodes: Vec<ScsNode>,
    pub transactional: bool,
}

impl ConstructionScript {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            transactional: true,
        }
    }

    /// Keep the scene root consistent: exactly one root node. Adds a default
    /// root when there is none and demotes extras when there are several.
    /// Returns whether anything changed.
    pub fn validate_scene_root_nodes(&mut self) -> bool {
        let mut changed = false;
        let mut seen_root = false;
        for node in &mut self.nodes {
            if node.is_scene_root {
                if seen_root {
                    node.is_scene_root = false;
                    changed = true;
                }
                seen_root = true;
            }
        }
        if !seen_root {
            self.nodes.insert(0, ScsNode::scene_root("DefaultSceneRoot"));
            changed = true;
        }
        changed
    }
}

impl Default for ConstructionScript {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScsNode {
    pub id: String,
    pub variable_name: String,
    pub is_scene_root: bool,
}

impl ScsNode {
    pub fn new(variable_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            variable_name: variable_name.into(),
            is_scene_root: false,
        }
    }

    pub fn scene_root(variable_name: impl Into<String>) -> Self {
        let mut node = Self::new(variable_name);
        node.is_scene_root = true;
        node
    }
}
