//! Clause splitting.
//!
//! A derived clause whose literals fall into several variable-disjoint
//! components is split: one component (the master) keeps carrying the
//! clause's propositional constraint, every other component is assigned a
//! propositional name, and the master's constraint is rewired to record
//! the case distinction. Reasoning about the names propositionally, in the
//! constraint engine, replaces backtracking case splits.
//!
//! Per invocation the engine scans connectivity, names propositional
//! literals, resolves components against the store, selects the master,
//! names the remainder, and finalizes. Each invocation ends in one of
//! three terminal outcomes: no split needed, tautology (everything
//! discarded), or a produced split. The only state that persists across invocations is the
//! propositional literal cache and the component store.

use super::connectivity::connected_groups;
use super::prop_cache::PropLiteralCache;
use super::store::{ComponentStore, MergeOutcome};
use crate::constraint::{AtomId, NodeId};
use crate::inference::{Derivation, ProvenanceEvent, ProvenanceSink};
use crate::logic::{Clause, ClauseId, ClauseManager, Literal};
use std::collections::HashMap;

/// Splitting options.
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Rewrite ground unit clauses into empty clauses constrained by their
    /// cached propositional name, instead of keeping them as explicit
    /// units. On by default.
    pub name_ground_units: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig {
            name_ground_units: true,
        }
    }
}

/// Counters kept across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitterStats {
    /// Clauses that were actually split into several components
    pub split_clauses: u64,
    /// Total components produced by those splits
    pub split_components: u64,
    /// Components inserted into the store for the first time
    pub unique_components: u64,
    /// Propositional predicates named by the literal cache
    pub prop_names: u64,
}

/// The two disjoint clause collections a split call reports back.
///
/// `new_clauses` must be enqueued by the saturation loop; clauses in
/// `modified_clauses` were already known to the loop but their constraint
/// changed and they must be reconsidered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitResult {
    pub new_clauses: Vec<ClauseId>,
    pub modified_clauses: Vec<ClauseId>,
}

impl SplitResult {
    fn empty() -> Self {
        SplitResult::default()
    }

    /// True when the call produced nothing to enqueue or reconsider
    pub fn is_empty(&self) -> bool {
        self.new_clauses.is_empty() && self.modified_clauses.is_empty()
    }
}

/// The clause-splitting engine.
///
/// Owns the propositional literal cache, the component store, and the
/// component-name table; everything else (clause arena, interner,
/// constraint engine, provenance sink) is injected per call. Designed for
/// a single-threaded saturation loop: a call runs to a terminal outcome
/// without suspension points.
#[derive(Debug, Default)]
pub struct Splitter {
    config: SplitterConfig,
    store: ComponentStore,
    prop_cache: PropLiteralCache,
    /// Name owner table: a name is attached to at most one component, ever
    names: HashMap<ClauseId, AtomId>,
    stats: SplitterStats,
}

impl Splitter {
    /// Create a splitter with default options
    pub fn new() -> Self {
        Splitter::default()
    }

    /// Create a splitter with the given options
    pub fn with_config(config: SplitterConfig) -> Self {
        Splitter {
            config,
            ..Splitter::default()
        }
    }

    /// Run counters
    pub fn stats(&self) -> SplitterStats {
        SplitterStats {
            prop_names: self.prop_cache.named_predicates() as u64,
            ..self.stats
        }
    }

    /// The component store (for inspection)
    pub fn store(&self) -> &ComponentStore {
        &self.store
    }

    /// The name assigned to a component clause, if any
    pub fn component_name(&self, id: ClauseId) -> Option<AtomId> {
        self.names.get(&id).copied()
    }

    /// Split a clause into variable-disjoint components.
    ///
    /// Returns the clauses newly created by this call and the previously
    /// known clauses whose constraint changed. A clause whose constraint
    /// would collapse to the constant-true node contributes nothing; a
    /// merge that collapses the canonical empty clause's constraint to
    /// false is surfaced as a new clause so the caller sees the
    /// refutation.
    pub fn split(
        &mut self,
        clause: ClauseId,
        manager: &mut ClauseManager,
        sink: &mut dyn ProvenanceSink,
    ) -> SplitResult {
        if manager.clause(clause).len() <= 1 {
            return self.handle_no_split(clause, manager, sink);
        }

        let groups = connected_groups(manager.clause(clause));
        if groups.len() == 1 {
            return self.handle_no_split(clause, manager, sink);
        }

        self.stats.split_clauses += 1;
        self.stats.split_components += groups.len() as u64;
        log::debug!(
            "splitting {} into {} components",
            clause,
            groups.len()
        );

        let mut master_premises = vec![clause];
        let mut master_constraint = manager.clause(clause).constraint;

        // Propositional singleton components are consumed by the literal
        // cache and never become output clauses of their own.
        let mut general: Vec<Vec<usize>> = Vec::new();
        for group in groups {
            if group.len() == 1 && manager.clause(clause).literals[group[0]].is_propositional() {
                let lit = manager.clause(clause).literals[group[0]].clone();
                let (name, justification) = self.prop_cache.name_for(&lit, manager, sink);
                let atom = manager.constraints.atomic(name, lit.polarity);
                master_constraint = manager.constraints.disjunction(master_constraint, atom);
                master_premises.push(justification);
            } else {
                general.push(group);
            }
        }

        // Resolve the remaining components against the store.
        let mut fresh: Vec<ClauseId> = Vec::new();
        let mut reusable: Vec<ClauseId> = Vec::new();
        for group in &general {
            let literals: Vec<Literal> = group
                .iter()
                .map(|&i| manager.clause(clause).literals[i].clone())
                .collect();

            if let Some(existing) = self.store.retrieve_variant(&literals, manager) {
                if let Some(&name) = self.names.get(&existing) {
                    let atom = manager.constraints.atomic(name, true);
                    master_constraint =
                        manager.constraints.disjunction(master_constraint, atom);
                    if manager.constraints.is_true(master_constraint) {
                        // The split would assert nothing; drop everything
                        log::debug!("split of {} absorbed as tautology", clause);
                        return SplitResult::empty();
                    }
                    master_premises.push(existing);
                } else {
                    reusable.push(existing);
                }
            } else {
                let role = manager.clause(clause).role;
                let mut component = Clause::with_role(literals, role);
                // Vacuous until the naming pass or the master rewiring
                // conditions it.
                component.constraint = NodeId::TRUE;
                let component = manager.insert(component);
                self.store.insert(component, manager);
                self.stats.unique_components += 1;
                sink.record(ProvenanceEvent::Introduced {
                    clause: component,
                    derivation: Derivation {
                        rule_name: "TautologyIntroduction".into(),
                        premises: vec![],
                    },
                });
                fresh.push(component);
            }
        }

        // Master selection: last fresh component, else last reusable one,
        // else the canonical empty placeholder (the clause consisted of
        // propositional and already-named components only).
        let mut master_new = false;
        let master = if let Some(m) = fresh.pop() {
            master_new = true;
            m
        } else if let Some(m) = reusable.pop() {
            m
        } else {
            let role = manager.clause(clause).role;
            let mut placeholder = Clause::with_role(Vec::new(), role);
            placeholder.constraint = NodeId::TRUE;
            let placeholder = manager.insert(placeholder);
            let outcome = self.store.merge_or_insert(placeholder, manager, sink);
            if outcome.was_new {
                self.stats.unique_components += 1;
                master_new = true;
            }
            outcome.canonical
        };

        // Name every non-master component. Duplicate occurrences of the
        // same component within one call must not be named twice.
        let mut constraint_changed: HashMap<ClauseId, bool> = HashMap::new();
        for &component in fresh.iter().chain(reusable.iter()) {
            if component == master || self.names.contains_key(&component) {
                continue;
            }
            let name = manager.constraints.fresh_atom();
            self.names.insert(component, name);

            // The component is only asserted on its own once the name has
            // been falsified elsewhere; this is what lets later splits
            // reuse the name instead of re-deriving the component.
            let old = manager.clause(component).constraint;
            let negative = manager.constraints.atomic(name, false);
            let named = manager.constraints.conjunction(old, negative);
            if named != old {
                manager.set_constraint(component, named);
                sink.record(ProvenanceEvent::Naming {
                    component,
                    name,
                    old,
                    new: named,
                });
                constraint_changed.insert(component, true);
            }
            let positive = manager.constraints.atomic(name, true);
            master_constraint = manager.constraints.disjunction(master_constraint, positive);
            master_premises.push(component);
            log::trace!("component {} named {}", component, name);
        }

        // Rewire the master's constraint.
        let old_master = manager.clause(master).constraint;
        let final_constraint = manager
            .constraints
            .conjunction(old_master, master_constraint);
        if manager.constraints.is_true(final_constraint) {
            log::debug!("split of {} absorbed as tautology", clause);
            return SplitResult::empty();
        }
        let master_changed = final_constraint != old_master;
        if master_changed {
            manager.set_constraint(master, final_constraint);
        }
        sink.record(ProvenanceEvent::Split {
            master,
            old: old_master,
            new: final_constraint,
            premises: master_premises,
        });

        // Classify the touched clauses.
        let mut result = SplitResult::empty();
        if master_new {
            result.new_clauses.push(master);
        } else if master_changed {
            result.modified_clauses.push(master);
        }
        result.new_clauses.extend(fresh.iter().copied());
        // A duplicated component can sit in both lists; the two output
        // collections must stay disjoint, with "new" winning.
        for &component in &reusable {
            if component != master
                && constraint_changed.get(&component).copied().unwrap_or(false)
                && !result.new_clauses.contains(&component)
                && !result.modified_clauses.contains(&component)
            {
                result.modified_clauses.push(component);
            }
        }
        result
    }

    /// Degenerate path: the clause is a single component (or has at most
    /// one literal) and goes through the store as-is, except that a ground
    /// unit clause is first rewritten into its propositional form.
    fn handle_no_split(
        &mut self,
        clause: ClauseId,
        manager: &mut ClauseManager,
        sink: &mut dyn ProvenanceSink,
    ) -> SplitResult {
        let mut candidate = clause;

        let is_prop_unit = {
            let cl = manager.clause(clause);
            cl.len() == 1 && cl.literals[0].is_propositional()
        };
        if self.config.name_ground_units && is_prop_unit {
            let lit = manager.clause(clause).literals[0].clone();
            let (name, justification) = self.prop_cache.name_for(&lit, manager, sink);

            // All occurrences of the propositional predicate get replaced,
            // so the justification itself never joins the output clauses.
            let role = manager.clause(clause).role;
            let mut replacement = Clause::with_role(Vec::new(), role);
            replacement.constraint = manager.constraints.atomic(name, lit.polarity);
            let replacement = manager.insert(replacement);
            sink.record(ProvenanceEvent::Introduced {
                clause: replacement,
                derivation: Derivation {
                    rule_name: "Splitting".into(),
                    premises: vec![clause, justification],
                },
            });
            candidate = replacement;
        }

        let outcome = self.store.merge_or_insert(candidate, manager, sink);
        let mut result = SplitResult::empty();
        match outcome {
            MergeOutcome {
                canonical, was_new: true, ..
            } => {
                self.stats.unique_components += 1;
                result.new_clauses.push(canonical);
            }
            MergeOutcome {
                canonical,
                was_modified: true,
                ..
            } => {
                let merged = manager.clause(canonical).constraint;
                if manager.clause(canonical).is_empty() && manager.constraints.is_false(merged) {
                    // The canonical empty clause became unconditionally
                    // false: surface the refutation as a new clause so the
                    // caller puts it on the unprocessed queue.
                    let role = manager.clause(candidate).role;
                    let mut refutation = Clause::with_role(Vec::new(), role);
                    refutation.constraint = merged;
                    let refutation = manager.insert(refutation);
                    sink.record(ProvenanceEvent::Introduced {
                        clause: refutation,
                        derivation: Derivation {
                            rule_name: "Splitting".into(),
                            premises: vec![candidate, canonical],
                        },
                    });
                    log::debug!("refutation surfaced while merging {}", candidate);
                    result.new_clauses.push(refutation);
                } else {
                    result.modified_clauses.push(canonical);
                }
            }
            _ => {}
        }
        result
    }
}
