use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a class in the host's live type registry. Classes themselves
/// stay host-owned; extension code only passes these around and asks the
/// registry capability questions about them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ClassId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Handle to a class default object. Abstract classes have none; everything
/// else exposes one for is-a checks against another class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultObject {
    pub class: ClassId,
}

/// The root classes editor policy refers to. Supplied by the host once at
/// startup; the ids must resolve in the host's registry.
#[derive(Debug, Clone)]
pub struct WellKnownClasses {
    pub object: ClassId,
    pub interface: ClassId,
    pub actor: ClassId,
    pub level_script_actor: ClassId,
    pub actor_component: ClassId,
    pub anim_instance: ClassId,
}
