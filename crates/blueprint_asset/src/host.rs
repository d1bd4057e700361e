use std::sync::Arc;

use crate::blueprint::BlueprintHandle;
use crate::class::ClassId;

/// Outcome of a blocking confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirm,
    Cancel,
}

/// A blocking informational confirm.
#[derive(Debug, Clone)]
pub struct ConfirmRequest<'a> {
    pub title: &'a str,
    pub message: String,
    pub confirm_label: &'a str,
    pub cancel_label: &'a str,
}

/// A blocking confirm carrying a "don't ask this again" checkbox, keyed by a
/// stable warning id so the suppression can persist across sessions.
#[derive(Debug, Clone)]
pub struct SuppressibleRequest<'a> {
    pub warning_id: &'a str,
    pub title: &'a str,
    pub message: String,
    pub confirm_label: &'a str,
    pub cancel_label: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuppressibleChoice {
    pub decision: Decision,
    /// Whether the user ticked the "don't ask again" checkbox.
    pub suppress_in_future: bool,
}

/// The host's modal dialog surface. All calls block the invoking thread
/// until the user responds; the host guarantees single-threaded UI
/// reentrancy.
pub trait DialogService: Send + Sync {
    fn confirm(&self, request: &ConfirmRequest) -> Decision;

    fn confirm_suppressible(&self, request: &SuppressibleRequest) -> SuppressibleChoice;

    /// Close any transient UI menus left open by the invoking action.
    fn dismiss_transient_menus(&self);
}

pub trait NotificationService: Send + Sync {
    /// Fire-and-forget toast that expires after `expire_secs`.
    fn notify_transient(&self, message: &str, expire_secs: f32);
}

/// Setup for the host's class-selection prompt.
#[derive(Debug, Clone)]
pub struct ClassPickerOptions {
    pub tree_view: bool,
    pub show_object_root_class: bool,
    /// Only offer classes usable as blueprint bases.
    pub blueprint_bases_only: bool,
    /// Include blueprint classes that are not currently loaded.
    pub show_unloaded_blueprints: bool,
}

impl Default for ClassPickerOptions {
    fn default() -> Self {
        Self {
            tree_view: true,
            show_object_root_class: true,
            blueprint_bases_only: true,
            show_unloaded_blueprints: true,
        }
    }
}

/// Predicate the picker applies to every candidate class, loaded or not.
pub type ClassFilterFn = dyn Fn(&ClassId) -> bool;

pub trait ClassPicker: Send + Sync {
    /// Present the class-selection prompt. `None` means the user cancelled.
    fn pick_class(
        &self,
        title: &str,
        options: &ClassPickerOptions,
        filter: &ClassFilterFn,
    ) -> Option<ClassId>;
}

/// Identifier of an open undo transaction.
pub type TransactionId = u64;

/// The host's undo system. A transaction scopes a set of mutations into one
/// undoable unit; it is intent-level grouping, not rollback.
pub trait TransactionScope: Send + Sync {
    fn begin_transaction(&self, title: &str) -> TransactionId;

    fn end_transaction(&self, id: TransactionId);
}

/// Token returned by the content browser for a registered selection
/// extender. Deregistration is matched by this token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtenderHandle(pub u64);

/// One selected asset in the content browser.
#[derive(Clone)]
pub struct AssetData {
    pub name: String,
    pub path: String,
    /// Present when the asset is a blueprint; other asset types carry
    /// `None`.
    pub blueprint: Option<BlueprintHandle>,
}

/// A context-menu entry contributed by a selection extender.
pub struct MenuEntry {
    pub label: String,
    pub tooltip: String,
    pub icon: String,
    pub action: Box<dyn Fn() + Send + Sync>,
}

/// Builds a context-menu entry for the current selection, or `None` when the
/// extender has nothing to offer for it.
pub type SelectionExtender = Arc<dyn Fn(&[AssetData]) -> Option<MenuEntry> + Send + Sync>;

pub trait ContentBrowserRegistry: Send + Sync {
    fn register_selection_extender(&self, extender: SelectionExtender) -> ExtenderHandle;

    fn unregister_selection_extender(&self, handle: ExtenderHandle);
}

/// Resolves compiled classes back to the blueprint assets that produced
/// them.
pub trait BlueprintProvider: Send + Sync {
    fn blueprint_from_class(&self, class: &ClassId) -> Option<BlueprintHandle>;
}
