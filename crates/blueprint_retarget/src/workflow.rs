use std::sync::Arc;

use blueprint_asset::{
    BlueprintCompiler, BlueprintHandle, BlueprintProvider, ClassId, ClassPicker,
    ClassPickerOptions, ClassRegistry, CompilerResultsLog, ConfirmRequest, Decision,
    DialogService, NativizationFlag, NotificationService, TransactionId, TransactionScope,
    WellKnownClasses,
};

use crate::compile::compile_blueprint;
use crate::dialogs::{SuppressibleWarning, WARNING_COMMON_INTERFACES};
use crate::filter::ReparentRuleSet;
use crate::repair::ensure_up_to_date;
use crate::settings::SettingsStore;
use crate::LOG_TARGET;

/// Host capabilities the retarget workflow runs against. Cheap to clone;
/// everything is shared.
#[derive(Clone)]
pub struct EditorContext {
    pub registry: Arc<dyn ClassRegistry>,
    pub roots: WellKnownClasses,
    pub dialogs: Arc<dyn DialogService>,
    pub notifications: Arc<dyn NotificationService>,
    pub picker: Arc<dyn ClassPicker>,
    pub compiler: Arc<dyn BlueprintCompiler>,
    pub transactions: Arc<dyn TransactionScope>,
    pub blueprints: Arc<dyn BlueprintProvider>,
    pub settings: Arc<SettingsStore>,
}

/// How one retarget invocation ended. Declines are normal outcomes, not
/// errors.
#[derive(Debug)]
pub enum RetargetOutcome {
    /// The user declined the repair-only tool warning; nothing was touched.
    DeclinedToolWarning,
    /// The class picker was cancelled; nothing was touched.
    PickerCancelled,
    /// Every asset already had the chosen parent; no transaction was
    /// opened.
    NothingToDo,
    /// The batch ran, one entry per asset that entered the per-asset phase.
    Completed(Vec<AssetOutcome>),
}

/// Result of one asset's independent branch of the workflow.
#[derive(Debug)]
pub enum AssetOutcome {
    /// The chosen class was already this asset's parent.
    AlreadyParented { name: String },
    /// The user kept the asset out at the common-interfaces warning.
    SkippedCommonInterfaces { name: String },
    /// The user kept the asset out at the data-loss warning.
    SkippedDataLoss { name: String },
    /// The parent was replaced and the asset repaired and recompiled.
    Retargeted {
        name: String,
        old_parent: Option<ClassId>,
        compile_log: CompilerResultsLog,
    },
}

/// Keeps the host undo transaction open for as long as it lives.
struct ScopedTransaction {
    host: Arc<dyn TransactionScope>,
    id: TransactionId,
}

impl ScopedTransaction {
    fn open(host: &Arc<dyn TransactionScope>, title: &str) -> Self {
        Self {
            host: host.clone(),
            id: host.begin_transaction(title),
        }
    }
}

impl Drop for ScopedTransaction {
    fn drop(&mut self) {
        self.host.end_transaction(self.id);
    }
}

/// Drive one retarget operation end to end for a batch of blueprints that
/// will share a newly chosen parent class.
pub fn run_retarget(ctx: &EditorContext, batch: &[BlueprintHandle]) -> RetargetOutcome {
    let outcome = run_retarget_inner(ctx, batch);
    // Terminal cleanup: whatever happened above, close any transient menus
    // left open by the invoking action. Once, batch-wide.
    ctx.dialogs.dismiss_transient_menus();
    outcome
}

fn run_retarget_inner(ctx: &EditorContext, batch: &[BlueprintHandle]) -> RetargetOutcome {
    let warning = ConfirmRequest {
        title: "WARNING",
        message: "This tool is ONLY intended to fix missing or invalid blueprint parents.\n\n\
                  Do not try to reparent a working blueprint with it. Assigning parent classes \
                  that changed or are unrelated may corrupt your blueprint."
            .to_string(),
        confirm_label: "Continue",
        cancel_label: "Cancel",
    };
    if ctx.dialogs.confirm(&warning) == Decision::Cancel {
        return RetargetOutcome::DeclinedToolWarning;
    }

    let chosen = match select_parent_class(ctx, batch) {
        Some(class) => class,
        None => return RetargetOutcome::PickerCancelled,
    };

    // Assets already parented to the chosen class drop out here, before any
    // transaction is opened.
    let targets: Vec<&BlueprintHandle> = batch
        .iter()
        .filter(|handle| handle.read().parent_class.as_ref() != Some(&chosen))
        .collect();
    if targets.is_empty() {
        return RetargetOutcome::NothingToDo;
    }

    // One undoable unit for the whole batch.
    let _transaction = ScopedTransaction::open(&ctx.transactions, "Retarget blueprint parents");
    let outcomes = targets
        .into_iter()
        .map(|handle| reparent_one(ctx, handle, &chosen))
        .collect();
    RetargetOutcome::Completed(outcomes)
}

/// Build the eligibility rules for the batch and put up the class picker
/// restricted to them.
fn select_parent_class(ctx: &EditorContext, batch: &[BlueprintHandle]) -> Option<ClassId> {
    let rules = ReparentRuleSet::for_batch(batch, ctx.registry.as_ref(), &ctx.roots);

    // The picker shows its custom default-class list collapsed while this
    // prompt is up; the user's preference is restored afterwards.
    let expand_before = ctx.settings.expand_class_picker_default_list();
    ctx.settings.set_expand_class_picker_default_list(false);

    let options = ClassPickerOptions::default();
    let registry = ctx.registry.clone();
    let chosen = ctx.picker.pick_class("Pick Parent Class", &options, &move |class| {
        rules.allows(registry.as_ref(), class)
    });

    ctx.settings
        .set_expand_class_picker_default_list(expand_before);
    chosen
}

fn reparent_one(ctx: &EditorContext, handle: &BlueprintHandle, chosen: &ClassId) -> AssetOutcome {
    let registry = ctx.registry.as_ref();
    let mut bp = handle.write();
    let name = bp.name.clone();

    if bp.parent_class.as_ref() == Some(chosen) {
        return AssetOutcome::AlreadyParented { name };
    }

    // Interfaces the asset implements itself and the new parent also
    // implements. The user may want to drop the local implementations
    // first.
    let common: Vec<String> = bp
        .implemented_interfaces
        .iter()
        .filter(|desc| registry.implements_interface(chosen, &desc.interface))
        .map(|desc| desc.interface.to_string())
        .collect();
    if !common.is_empty() {
        let warning = SuppressibleWarning {
            warning_id: WARNING_COMMON_INTERFACES,
            title: "Common interfaces",
            message: format!(
                "The following interfaces are already implemented. Continue reparenting?\n{}",
                common.join("\n")
            ),
            confirm_label: "Reparent",
            cancel_label: "Cancel",
        };
        if warning.show(ctx.dialogs.as_ref(), &ctx.settings) == Decision::Cancel {
            return AssetOutcome::SkippedCommonInterfaces { name };
        }
    }

    // If the chosen class diverges hierarchically from the current parent
    // (including the no-parent case), authored data may not survive. Never
    // suppressible.
    let compatible = bp.parent_class.as_ref().is_some_and(|parent| {
        registry
            .default_object(chosen)
            .is_some_and(|cdo| registry.is_a(&cdo.class, parent))
    });
    if !compatible {
        let warning = ConfirmRequest {
            title: "Reparent Blueprint",
            message: "Reparenting this blueprint may cause data loss. Continue reparenting?"
                .to_string(),
            confirm_label: "Reparent",
            cancel_label: "Cancel",
        };
        if ctx.dialogs.confirm(&warning) == Decision::Cancel {
            return AssetOutcome::SkippedDataLoss { name };
        }
    }

    tracing::warn!(
        target: LOG_TARGET,
        "Reparenting blueprint {} from {} to {}",
        bp.path,
        bp.parent_class.as_ref().map_or("[None]", |c| c.as_str()),
        chosen
    );
    let old_parent = bp.parent_class.replace(chosen.clone());

    // Repair, compile, repair: compilation may swap the generated class, so
    // the second pass runs against the fresh one.
    ensure_up_to_date(&mut bp, registry, &ctx.roots);
    bp.mark_modified();
    let compile_log = compile_blueprint(ctx.compiler.as_ref(), &mut bp);
    ensure_up_to_date(&mut bp, registry, &ctx.roots);

    let nativization = bp.nativization;
    drop(bp);

    // Nativizing an asset requires its parent to nativize too. If the new
    // parent is a blueprint that opted out, pull it in as a dependency and
    // tell the user.
    if nativization != NativizationFlag::Disabled {
        if let Some(parent_handle) = ctx.blueprints.blueprint_from_class(chosen) {
            let mut parent_bp = parent_handle.write();
            if parent_bp.nativization == NativizationFlag::Disabled {
                parent_bp.nativization = NativizationFlag::Dependency;
                ctx.notifications.notify_transient(
                    &format!(
                        "{} flagged for nativization (as a required dependency).",
                        parent_bp.name
                    ),
                    5.0,
                );
            }
        }
    }

    AssetOutcome::Retargeted {
        name,
        old_parent,
        compile_log,
    }
}
