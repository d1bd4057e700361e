use std::collections::HashMap;

use crate::class::{ClassId, DefaultObject};
use crate::error::{AssetError, Result};

/// Capability surface of the host's live type registry. The editor does not
/// model the class hierarchy itself; it asks these questions about classes it
/// holds ids for, loaded or not.
pub trait ClassRegistry: Send + Sync {
    fn contains(&self, class: &ClassId) -> bool;

    fn display_name(&self, class: &ClassId) -> String;

    fn is_native(&self, class: &ClassId) -> bool;

    fn is_deprecated(&self, class: &ClassId) -> bool;

    /// Inclusive ancestry test: a class is-a itself.
    fn is_a(&self, class: &ClassId, ancestor: &ClassId) -> bool;

    fn implements_interface(&self, class: &ClassId, interface: &ClassId) -> bool;

    /// The class default object, or `None` for abstract classes that have no
    /// instantiable default.
    fn default_object(&self, class: &ClassId) -> Option<DefaultObject>;

    /// Whether `class` declares or inherits a function with this name.
    fn declares_function(&self, class: &ClassId, name: &str) -> bool;

    /// Whether `class` declares or inherits an event with this name.
    fn declares_event(&self, class: &ClassId, name: &str) -> bool;
}

/// One class record in a [`ClassTable`].
#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub id: ClassId,
    pub parent: Option<ClassId>,
    pub native: bool,
    pub deprecated: bool,
    pub is_abstract: bool,
    pub interfaces: Vec<ClassId>,
    pub functions: Vec<String>,
    pub events: Vec<String>,
}

impl ClassEntry {
    pub fn root(id: impl Into<ClassId>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            native: false,
            deprecated: false,
            is_abstract: false,
            interfaces: Vec::new(),
            functions: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn new(id: impl Into<ClassId>, parent: impl Into<ClassId>) -> Self {
        let mut entry = Self::root(id);
        entry.parent = Some(parent.into());
        entry
    }

    pub fn native(mut self) -> Self {
        self.native = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn implements(mut self, interface: impl Into<ClassId>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn declares_function(mut self, name: impl Into<String>) -> Self {
        self.functions.push(name.into());
        self
    }

    pub fn declares_event(mut self, name: impl Into<String>) -> Self {
        self.events.push(name.into());
        self
    }
}

/// In-memory [`ClassRegistry`] for hosts that keep their class set resident.
/// Insertion validates the parent link so hierarchy walks always terminate.
#[derive(Debug, Default)]
pub struct ClassTable {
    classes: HashMap<ClassId, ClassEntry>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ClassEntry) -> Result<()> {
        if let Some(parent) = &entry.parent {
            if !self.classes.contains_key(parent) {
                return Err(AssetError::UnknownClass(parent.to_string()));
            }
            // Re-registering an existing class must not hang its ancestry off
            // one of its own descendants.
            let mut cursor = Some(parent.clone());
            while let Some(current) = cursor {
                if current == entry.id {
                    return Err(AssetError::CircularHierarchy(entry.id.to_string()));
                }
                cursor = self.classes.get(&current).and_then(|e| e.parent.clone());
            }
        }
        tracing::debug!(target: "blueprint_asset", "registered class {}", entry.id);
        self.classes.insert(entry.id.clone(), entry);
        Ok(())
    }

    pub fn get(&self, class: &ClassId) -> Option<&ClassEntry> {
        self.classes.get(class)
    }

    fn ancestry<'a>(&'a self, class: &ClassId) -> impl Iterator<Item = &'a ClassEntry> {
        let mut cursor = self.classes.get(class);
        std::iter::from_fn(move || {
            let entry = cursor?;
            cursor = entry.parent.as_ref().and_then(|p| self.classes.get(p));
            Some(entry)
        })
    }
}

impl ClassRegistry for ClassTable {
    fn contains(&self, class: &ClassId) -> bool {
        self.classes.contains_key(class)
    }

    fn display_name(&self, class: &ClassId) -> String {
        class.as_str().to_string()
    }

    fn is_native(&self, class: &ClassId) -> bool {
        self.classes.get(class).is_some_and(|e| e.native)
    }

    fn is_deprecated(&self, class: &ClassId) -> bool {
        self.classes.get(class).is_some_and(|e| e.deprecated)
    }

    fn is_a(&self, class: &ClassId, ancestor: &ClassId) -> bool {
        self.ancestry(class).any(|entry| &entry.id == ancestor)
    }

    fn implements_interface(&self, class: &ClassId, interface: &ClassId) -> bool {
        self.ancestry(class)
            .any(|entry| entry.interfaces.contains(interface))
    }

    fn default_object(&self, class: &ClassId) -> Option<DefaultObject> {
        let entry = self.classes.get(class)?;
        if entry.is_abstract {
            return None;
        }
        Some(DefaultObject {
            class: class.clone(),
        })
    }

    fn declares_function(&self, class: &ClassId, name: &str) -> bool {
        self.ancestry(class)
            .any(|entry| entry.functions.iter().any(|f| f == name))
    }

    fn declares_event(&self, class: &ClassId, name: &str) -> bool {
        self.ancestry(class)
            .any(|entry| entry.events.iter().any(|e| e == name))
    }
}
