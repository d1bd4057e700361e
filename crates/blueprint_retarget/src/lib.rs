//! Blueprint parent retargeting for the editor content browser.
//!
//! Adds a context-menu action that reassigns the parent class of blueprint
//! assets whose original parent is missing or invalid, then repairs and
//! recompiles them. The action is a repair tool, not a general reparenting
//! feature: it is only offered for blueprints that no longer resolve to a
//! compiled class.
//!
//! The extension talks to the host exclusively through the boundary traits
//! in `blueprint_asset` (class registry, dialogs, class picker, compiler,
//! undo transactions, notifications, content browser registration).

pub mod compile;
pub mod content_browser;
pub mod dialogs;
pub mod filter;
pub mod repair;
pub mod settings;
pub mod workflow;


/// Log target for everything this extension emits.
pub const LOG_TARGET: &str = "blueprint_reparent";

pub use content_browser::BlueprintRetargetModule;
pub use filter::ReparentRuleSet;
pub use repair::{ensure_up_to_date, RepairReport};
pub use workflow::{run_retarget, AssetOutcome, EditorContext, RetargetOutcome};
