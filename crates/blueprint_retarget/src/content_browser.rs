use std::sync::Arc;

use blueprint_asset::{
    AssetData, Blueprint, BlueprintHandle, ContentBrowserRegistry, ExtenderHandle, MenuEntry,
    SelectionExtender,
};

use crate::workflow::{run_retarget, EditorContext};
use crate::LOG_TARGET;

pub const RETARGET_MENU_LABEL: &str = "Retarget invalid parent";
pub const RETARGET_MENU_TOOLTIP: &str =
    "Reparents a blueprint's parent class (useful when the parent class is missing or invalid)";
const RETARGET_MENU_ICON: &str = "ClassIcon.Note";

/// The action is only offered for blueprints that no longer resolve to a
/// compiled class.
pub fn needs_retarget(blueprint: &Blueprint) -> bool {
    blueprint.skeleton_class.is_none() || blueprint.generated_class.is_none()
}

/// Every selected asset must be a blueprint meeting the precondition, or the
/// menu stays out of the way entirely.
fn selection_blueprints(selection: &[AssetData]) -> Option<Vec<BlueprintHandle>> {
    if selection.is_empty() {
        return None;
    }
    let mut handles = Vec::with_capacity(selection.len());
    for asset in selection {
        let handle = asset.blueprint.clone()?;
        if !needs_retarget(&handle.read()) {
            return None;
        }
        handles.push(handle);
    }
    Some(handles)
}

/// Build the selection extender that exposes the retarget action.
pub fn make_selection_extender(ctx: EditorContext) -> SelectionExtender {
    Arc::new(move |selection: &[AssetData]| {
        let blueprints = selection_blueprints(selection)?;
        let ctx = ctx.clone();
        Some(MenuEntry {
            label: RETARGET_MENU_LABEL.to_string(),
            tooltip: RETARGET_MENU_TOOLTIP.to_string(),
            icon: RETARGET_MENU_ICON.to_string(),
            action: Box::new(move || {
                run_retarget(&ctx, &blueprints);
            }),
        })
    })
}

/// Module lifecycle glue: installs the content browser hook on startup and
/// removes it symmetrically on shutdown, matched by the stored handle. At
/// most one registration is outstanding at a time.
#[derive(Default)]
pub struct BlueprintRetargetModule {
    extender_handle: Option<ExtenderHandle>,
}

impl BlueprintRetargetModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn startup(&mut self, browser: &dyn ContentBrowserRegistry, ctx: EditorContext) {
        if self.extender_handle.is_some() {
            tracing::warn!(target: LOG_TARGET, "Content browser hook already installed");
            return;
        }
        let handle = browser.register_selection_extender(make_selection_extender(ctx));
        self.extender_handle = Some(handle);
        tracing::info!(target: LOG_TARGET, "Installed content browser retarget hook");
    }

    pub fn shutdown(&mut self, browser: &dyn ContentBrowserRegistry) {
        if let Some(handle) = self.extender_handle.take() {
            browser.unregister_selection_extender(handle);
            tracing::info!(target: LOG_TARGET, "Removed content browser retarget hook");
        }
    }
}
