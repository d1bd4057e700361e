use std::collections::HashSet;

use blueprint_asset::{BlueprintHandle, BlueprintKind, ClassId, ClassRegistry, WellKnownClasses};

/// The rule set a class-selection prompt applies to candidate parent
/// classes. Built fresh for each retarget invocation from the selected
/// assets; never persisted.
#[derive(Debug, Clone, Default)]
pub struct ReparentRuleSet {
    /// Children of these classes are eligible unless excluded by another
    /// rule. Empty means no ancestry restriction.
    pub allowed_ancestors: HashSet<ClassId>,
    /// Children of these classes are never eligible.
    pub disallowed_ancestors: HashSet<ClassId>,
    /// Classes never shown, regardless of ancestry.
    pub never_show: HashSet<ClassId>,
    /// Restrict the prompt to natively implemented classes.
    pub native_only: bool,
}

impl ReparentRuleSet {
    /// Build the rule set for a batch of blueprints being retargeted
    /// together. Contradictory batches are not an error; they just narrow
    /// the eligible set, possibly to nothing.
    pub fn for_batch(
        batch: &[BlueprintHandle],
        registry: &dyn ClassRegistry,
        roots: &WellKnownClasses,
    ) -> Self {
        let mut rules = Self::default();

        let mut has_actor = false;
        let mut has_level_script = false;
        let mut has_anim = false;
        let mut has_component = false;
        let mut all_have_parents = true;
        for handle in batch {
            let bp = handle.read();
            has_anim |= bp.kind == BlueprintKind::Animation;
            match &bp.parent_class {
                Some(parent) => {
                    has_actor |= registry.is_a(parent, &roots.actor);
                    has_level_script |= registry.is_a(parent, &roots.level_script_actor);
                    has_component |= registry.is_a(parent, &roots.actor_component);
                }
                None => all_have_parents = false,
            }
        }

        // A blueprint can never become an interface, and never re-parent
        // under a sibling that is being retargeted in the same batch.
        rules.disallowed_ancestors.insert(roots.interface.clone());
        for handle in batch {
            if let Some(generated) = &handle.read().generated_class {
                rules.disallowed_ancestors.insert(generated.clone());
            }
        }

        for handle in batch {
            handle.read().reparenting_rules(
                roots,
                &mut rules.allowed_ancestors,
                &mut rules.disallowed_ancestors,
            );
        }

        // Category policy. The branches are mutually exclusive and ordered
        // by precedence.
        if has_level_script {
            // Level script blueprints stay inside the level script
            // hierarchy, and only native bases are valid there.
            rules
                .allowed_ancestors
                .insert(roots.level_script_actor.clone());
            rules.native_only = true;
        } else if has_actor {
            rules.allowed_ancestors.insert(roots.actor.clone());
            // A non-level actor must not become a level script actor.
            rules
                .disallowed_ancestors
                .insert(roots.level_script_actor.clone());
        } else if has_anim {
            rules.allowed_ancestors.insert(roots.anim_instance.clone());
        } else if has_component {
            rules
                .allowed_ancestors
                .insert(roots.actor_component.clone());
        } else if all_have_parents {
            // An object-rooted blueprint does not jump to being
            // actor-rooted.
            rules.disallowed_ancestors.insert(roots.actor.clone());
        }

        // Don't allow making an asset its own parent.
        for handle in batch {
            if let Some(generated) = &handle.read().generated_class {
                rules.never_show.insert(generated.clone());
            }
        }

        rules
    }

    /// Eligibility predicate applied to every candidate class the prompt
    /// considers, loaded or not.
    pub fn allows(&self, registry: &dyn ClassRegistry, class: &ClassId) -> bool {
        if self.never_show.contains(class) {
            return false;
        }
        if registry.is_deprecated(class) {
            return false;
        }
        if self.native_only && !registry.is_native(class) {
            return false;
        }
        if !self.allowed_ancestors.is_empty()
            && !self
                .allowed_ancestors
                .iter()
                .any(|ancestor| registry.is_a(class, ancestor))
        {
            return false;
        }
        if self
            .disallowed_ancestors
            .iter()
            .any(|ancestor| registry.is_a(class, ancestor))
        {
            return false;
        }
        // Classes without a default object (abstract bases) cannot be
        // validated against the old parent later, so they are not offered at
        // all.
        registry.default_object(class).is_some()
    }
}
