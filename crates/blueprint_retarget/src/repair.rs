use std::collections::HashSet;

use blueprint_asset::{
    Blueprint, ClassRegistry, ConstructionScript, Graph, GraphId, GraphKind, NodeKind,
    WellKnownClasses, CURRENT_COMPOSITE_VERSION, CURRENT_COSMETIC_VERSION,
    USER_CONSTRUCTION_SCRIPT,
};

use crate::LOG_TARGET;

/// What one structural repair pass changed. All counters are zero when the
/// asset was already consistent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RepairReport {
    pub purged_graphs: usize,
    pub cosmetic_upgrades: usize,
    pub construction_script_created: bool,
    pub user_construction_graph_created: bool,
    pub scene_roots_fixed: bool,
    pub construction_script_removed: bool,
    pub variable_nodes_removed: usize,
    pub overrides_conformed: usize,
    pub interfaces_conformed: usize,
    pub composite_upgrades: usize,
    pub transactional_flags_refreshed: usize,
}

impl RepairReport {
    pub fn changed(&self) -> bool {
        self.purged_graphs > 0
            || self.cosmetic_upgrades > 0
            || self.construction_script_created
            || self.user_construction_graph_created
            || self.scene_roots_fixed
            || self.construction_script_removed
            || self.variable_nodes_removed > 0
            || self.overrides_conformed > 0
            || self.interfaces_conformed > 0
            || self.composite_upgrades > 0
            || self.transactional_flags_refreshed > 0
    }
}

/// Bring a blueprint structurally up to date with its (possibly new) parent
/// class. Idempotent: running it again on a consistent asset changes
/// nothing. Called before and after compilation, since compiling can replace
/// the generated class.
pub fn ensure_up_to_date(
    blueprint: &mut Blueprint,
    registry: &dyn ClassRegistry,
    roots: &WellKnownClasses,
) -> RepairReport {
    let mut report = RepairReport::default();

    purge_dangling_graphs(blueprint, &mut report);
    upgrade_stale_cosmetics(blueprint, &mut report);
    reconcile_construction_script(blueprint, registry, roots, &mut report);
    conform_overrides(blueprint, registry, &mut report);
    conform_interfaces(blueprint, registry, &mut report);
    upgrade_composite_nodes(blueprint, &mut report);
    refresh_transactional_flags(blueprint, &mut report);

    if report.changed() {
        tracing::debug!(target: LOG_TARGET, "Repaired blueprint {}: {:?}", blueprint.path, report);
    }
    report
}

/// Drop graph ids that no longer resolve, and graphs nothing references.
fn purge_dangling_graphs(blueprint: &mut Blueprint, report: &mut RepairReport) {
    let known: HashSet<GraphId> = blueprint.graphs.keys().cloned().collect();
    let before = blueprint.event_graphs.len() + blueprint.function_graphs.len();
    blueprint.event_graphs.retain(|id| known.contains(id));
    blueprint.function_graphs.retain(|id| known.contains(id));
    report.purged_graphs += before - blueprint.event_graphs.len() - blueprint.function_graphs.len();

    let referenced: HashSet<GraphId> = blueprint
        .event_graphs
        .iter()
        .chain(blueprint.function_graphs.iter())
        .cloned()
        .collect();
    let before = blueprint.graphs.len();
    blueprint.graphs.retain(|id, _| referenced.contains(id));
    report.purged_graphs += before - blueprint.graphs.len();
}

fn upgrade_stale_cosmetics(blueprint: &mut Blueprint, report: &mut RepairReport) {
    for graph in blueprint.graphs.values_mut() {
        if graph.cosmetic_version < CURRENT_COSMETIC_VERSION {
            graph.cosmetic_version = CURRENT_COSMETIC_VERSION;
            report.cosmetic_upgrades += 1;
        }
    }
}

fn reconcile_construction_script(
    blueprint: &mut Blueprint,
    registry: &dyn ClassRegistry,
    roots: &WellKnownClasses,
    report: &mut RepairReport,
) {
    if blueprint.supports_construction_script(registry, roots) {
        // If we don't have a construction script yet, make one.
        if blueprint.generated_class.is_some() && blueprint.construction_script.is_none() {
            blueprint.construction_script = Some(ConstructionScript::new());
            report.construction_script_created = true;
        }

        // If we should have a user construction script graph but don't yet,
        // make it.
        let has_ucs = blueprint.function_graphs.iter().any(|id| {
            blueprint
                .graphs
                .get(id)
                .is_some_and(|g| g.name == USER_CONSTRUCTION_SCRIPT)
        });
        if !has_ucs {
            let mut graph = Graph::new(USER_CONSTRUCTION_SCRIPT, GraphKind::Function);
            graph.allow_deletion = false;
            blueprint.add_graph(graph);
            report.user_construction_graph_created = true;
        }

        // Reparenting can gain or lose an inherited scene root.
        if let Some(scs) = blueprint.construction_script.as_mut() {
            if scs.validate_scene_root_nodes() {
                report.scene_roots_fixed = true;
            }
        }
    } else if let Some(scs) = blueprint.construction_script.take() {
        // The type no longer supports a construction script; remove it and
        // every variable node that referenced its components.
        for node in &scs.nodes {
            report.variable_nodes_removed += remove_variable_nodes(blueprint, &node.variable_name);
        }
        report.construction_script_removed = true;
        blueprint.mark_structurally_modified();
    }
}

fn remove_variable_nodes(blueprint: &mut Blueprint, variable_name: &str) -> usize {
    let mut removed = 0;
    for graph in blueprint.graphs.values_mut() {
        let before = graph.nodes.len();
        graph.nodes.retain(|node| {
            !(matches!(node.kind, NodeKind::VariableGet | NodeKind::VariableSet)
                && node.variable_name.as_deref() == Some(variable_name))
        });
        removed += before - graph.nodes.len();
    }
    removed
}

/// Drop function and event overrides the parent no longer declares.
fn conform_overrides(
    blueprint: &mut Blueprint,
    registry: &dyn ClassRegistry,
    report: &mut RepairReport,
) {
    let Some(parent) = blueprint.parent_class.clone() else {
        return;
    };
    let before = blueprint.function_overrides.len();
    blueprint
        .function_overrides
        .retain(|name| registry.declares_function(&parent, name));
    report.overrides_conformed += before - blueprint.function_overrides.len();

    let before = blueprint.event_overrides.len();
    blueprint
        .event_overrides
        .retain(|name| registry.declares_event(&parent, name));
    report.overrides_conformed += before - blueprint.event_overrides.len();
}

/// Drop interface implementations whose interface class no longer resolves,
/// along with their implementation graphs.
fn conform_interfaces(
    blueprint: &mut Blueprint,
    registry: &dyn ClassRegistry,
    report: &mut RepairReport,
) {
    let (kept, dropped): (Vec<_>, Vec<_>) = blueprint
        .implemented_interfaces
        .drain(..)
        .partition(|desc| registry.contains(&desc.interface));
    blueprint.implemented_interfaces = kept;

    for desc in dropped {
        if let Some(graph_id) = desc.graph {
            blueprint.graphs.remove(&graph_id);
            blueprint.event_graphs.retain(|id| id != &graph_id);
            blueprint.function_graphs.retain(|id| id != &graph_id);
        }
        report.interfaces_conformed += 1;
    }
}

fn upgrade_composite_nodes(blueprint: &mut Blueprint, report: &mut RepairReport) {
    for graph in blueprint.graphs.values_mut() {
        for node in &mut graph.nodes {
            if node.kind == NodeKind::Composite && node.composite_version < CURRENT_COMPOSITE_VERSION
            {
                node.composite_version = CURRENT_COMPOSITE_VERSION;
                report.composite_upgrades += 1;
            }
        }
    }
}

/// Restore the transactional flag on anything that lost it, so undo keeps
/// covering every node.
fn refresh_transactional_flags(blueprint: &mut Blueprint, report: &mut RepairReport) {
    for graph in blueprint.graphs.values_mut() {
        for node in &mut graph.nodes {
            if !node.transactional {
                node.transactional = true;
                report.transactional_flags_refreshed += 1;
            }
        }
    }
    if let Some(scs) = blueprint.construction_script.as_mut() {
        if !scs.transactional {
            scs.transactional = true;
            report.transactional_flags_refreshed += 1;
        }
    }
}
