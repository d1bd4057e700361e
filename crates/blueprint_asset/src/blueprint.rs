use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::class::{ClassId, WellKnownClasses};
use crate::error::Result;
use crate::graph::{ConstructionScript, Graph, GraphId, GraphKind};
use crate::registry::ClassRegistry;

/// Shared handle to a live blueprint asset. The host's asset system owns the
/// asset; editor code clones handles for the duration of an operation.
pub type BlueprintHandle = Arc<RwLock<Blueprint>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlueprintKind {
    Standard,
    Animation,
    MacroLibrary,
    FunctionLibrary,
    Interface,
}

/// Whether the asset participates in ahead-of-time native compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NativizationFlag {
    Disabled,
    /// Pulled in because an asset that nativizes depends on it.
    Dependency,
    Enabled,
}

/// One interface the blueprint implements, with the graph holding the
/// implementation if one was authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceDescription {
    pub interface: ClassId,
    pub graph: Option<GraphId>,
}

/// A visual-scripting asset. Compiling it produces `generated_class`; a
/// missing generated or skeleton class means compilation failed or never ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    pub path: String,
    pub kind: BlueprintKind,
    pub parent_class: Option<ClassId>,
    pub generated_class: Option<ClassId>,
    pub skeleton_class: Option<ClassId>,
    pub implemented_interfaces: Vec<InterfaceDescription>,
    pub nativization: NativizationFlag,
    pub graphs: HashMap<GraphId, Graph>,
    pub event_graphs: Vec<GraphId>,
    pub function_graphs: Vec<GraphId>,
    pub construction_script: Option<ConstructionScript>,
    /// Parent functions this blueprint overrides, by name.
    pub function_overrides: Vec<String>,
    /// Parent events this blueprint overrides, by name.
    pub event_overrides: Vec<String>,
    #[serde(skip)]
    pub modified: bool,
    #[serde(skip)]
    pub structurally_modified: bool,
}

impl Blueprint {
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: BlueprintKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            path: path.into(),
            kind,
            parent_class: None,
            generated_class: None,
            skeleton_class: None,
            implemented_interfaces: Vec::new(),
            nativization: NativizationFlag::Disabled,
            graphs: HashMap::new(),
            event_graphs: Vec::new(),
            function_graphs: Vec::new(),
            construction_script: None,
            function_overrides: Vec::new(),
            event_overrides: Vec::new(),
            modified: false,
            structurally_modified: false,
        }
    }

    /// Wrap the asset in a shared handle, transferring ownership to whatever
    /// asset store will hold it.
    pub fn into_handle(self) -> BlueprintHandle {
        Arc::new(RwLock::new(self))
    }

    /// Whether this asset currently resolves to a compiled type. Both the
    /// skeleton and the generated class must be present.
    pub fn has_compiled_class(&self) -> bool {
        self.skeleton_class.is_some() && self.generated_class.is_some()
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn mark_structurally_modified(&mut self) {
        self.structurally_modified = true;
        self.modified = true;
    }

    /// Only standard actor-rooted blueprints build a component tree on
    /// instantiation.
    pub fn supports_construction_script(
        &self,
        registry: &dyn ClassRegistry,
        roots: &WellKnownClasses,
    ) -> bool {
        if self.kind != BlueprintKind::Standard {
            return false;
        }
        match &self.parent_class {
            Some(parent) => registry.is_a(parent, &roots.actor),
            None => false,
        }
    }

    /// Contribute this asset's own constraints to a reparenting rule set.
    /// Most kinds add nothing; animation blueprints must stay under the
    /// animation instance root and interface blueprints under the interface
    /// root.
    pub fn reparenting_rules(
        &self,
        roots: &WellKnownClasses,
        allowed: &mut HashSet<ClassId>,
        _disallowed: &mut HashSet<ClassId>,
    ) {
        match self.kind {
            BlueprintKind::Animation => {
                allowed.insert(roots.anim_instance.clone());
            }
            BlueprintKind::Interface => {
                allowed.insert(roots.interface.clone());
            }
            _ => {}
        }
    }

    /// Add a graph, registering it in the kind-appropriate ordered list.
    pub fn add_graph(&mut self, graph: Graph) -> GraphId {
        let id = graph.id.clone();
        match graph.kind {
            GraphKind::Event => self.event_graphs.push(id.clone()),
            _ => self.function_graphs.push(id.clone()),
        }
        self.graphs.insert(id.clone(), graph);
        id
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
