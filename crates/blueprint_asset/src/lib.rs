//! Blueprint Asset Model
//!
//! The in-memory object model shared between the editor host and its
//! extensions:
//! - Blueprint assets and their graphs
//! - Class identity and hierarchy capability queries
//! - Host boundary traits (dialogs, notifications, class picker, compiler,
//!   transactions, content browser menu registration)
//!
//! Assets are owned by the host's asset system and handed out as shared
//! handles. Extension code holds those handles only for the duration of an
//! editor operation.

pub mod blueprint;
pub mod class;
pub mod compile;
pub mod error;
pub mod graph;
pub mod host;
pub mod registry;

pub use blueprint::{
    Blueprint, BlueprintHandle, BlueprintKind, InterfaceDescription, NativizationFlag,
};
pub use class::{ClassId, DefaultObject, WellKnownClasses};
pub use compile::{
    BlueprintCompiler, CompileMessage, CompileOptions, CompilerResultsLog, MessageSeverity,
};
pub use error::{AssetError, Result};
pub use graph::{
    ConstructionScript, Graph, GraphId, GraphKind, GraphNode, NodeKind, ScsNode,
    CURRENT_COMPOSITE_VERSION, CURRENT_COSMETIC_VERSION, USER_CONSTRUCTION_SCRIPT,
};
pub use host::{
    AssetData, BlueprintProvider, ClassFilterFn, ClassPicker, ClassPickerOptions, ConfirmRequest,
    ContentBrowserRegistry, Decision, DialogService, ExtenderHandle, MenuEntry,
    NotificationService, SelectionExtender, SuppressibleChoice, SuppressibleRequest,
    TransactionId, TransactionScope,
};
pub use registry::{ClassEntry, ClassRegistry, ClassTable};
