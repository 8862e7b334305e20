//! Component store: a deduplicating index over clauses up to variant
//! equivalence.
//!
//! Two clauses are variants when their literal *multisets* are identical up
//! to a bijective renaming of variables. The store keeps at most one
//! canonical clause per variant class: candidates are bucketed by a
//! renaming-invariant shape key (literal skeletons with variables collapsed
//! to a wildcard), then verified with a backtracking multiset match that
//! enforces a variable bijection.

use crate::constraint::NodeId;
use crate::inference::{ProvenanceEvent, ProvenanceSink};
use crate::logic::{ClauseId, ClauseManager, Literal, Term, VariableId};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Renaming-invariant skeleton of a term: variables collapse to `Star`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum TermShape {
    Star,
    Constant(u32),
    Function(u32, Vec<TermShape>),
}

impl TermShape {
    fn of(term: &Term) -> TermShape {
        match term {
            Term::Variable(_) => TermShape::Star,
            Term::Constant(c) => TermShape::Constant(c.id.as_u32()),
            Term::Function(f, args) => {
                TermShape::Function(f.id.as_u32(), args.iter().map(TermShape::of).collect())
            }
        }
    }
}

/// Renaming-invariant skeleton of a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct LiteralShape {
    polarity: bool,
    predicate: u32,
    args: Vec<TermShape>,
}

impl LiteralShape {
    fn of(lit: &Literal) -> LiteralShape {
        LiteralShape {
            polarity: lit.polarity,
            predicate: lit.predicate.id.as_u32(),
            args: lit.args.iter().map(TermShape::of).collect(),
        }
    }
}

/// Sorted multiset of literal shapes. Variants always share a shape key,
/// so the key narrows candidates to a (usually singleton) bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClauseShape {
    literals: Vec<LiteralShape>,
}

impl ClauseShape {
    fn of(literals: &[Literal]) -> ClauseShape {
        let mut shapes: Vec<LiteralShape> = literals.iter().map(LiteralShape::of).collect();
        shapes.sort();
        ClauseShape { literals: shapes }
    }
}

/// Result of [`ComponentStore::merge_or_insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The canonical clause for the candidate's variant class
    pub canonical: ClauseId,
    /// The candidate had no stored variant and became canonical itself
    pub was_new: bool,
    /// The stored variant's constraint changed during the merge
    pub was_modified: bool,
}

/// Deduplicating index over clauses up to variant equivalence.
///
/// Invariant: at most one canonical clause per variant class, ever.
#[derive(Debug, Default)]
pub struct ComponentStore {
    buckets: IndexMap<ClauseShape, Vec<ClauseId>>,
    size: usize,
}

impl ComponentStore {
    /// Create an empty store
    pub fn new() -> Self {
        ComponentStore::default()
    }

    /// Exact-variant lookup: the canonical clause whose literal multiset
    /// equals `literals` up to a variable bijection, if one is stored.
    pub fn retrieve_variant(
        &self,
        literals: &[Literal],
        manager: &ClauseManager,
    ) -> Option<ClauseId> {
        let shape = ClauseShape::of(literals);
        let bucket = self.buckets.get(&shape)?;
        bucket
            .iter()
            .copied()
            .find(|&id| variant_literals(&manager.clause(id).literals, literals))
    }

    /// Register a brand-new clause as canonical for its variant class.
    ///
    /// The clause must still be vacuous (constant-true constraint) and must
    /// not have a stored variant; both are programmer errors otherwise.
    pub fn insert(&mut self, id: ClauseId, manager: &ClauseManager) {
        debug_assert_eq!(manager.clause(id).constraint, NodeId::TRUE);
        debug_assert!(self
            .retrieve_variant(&manager.clause(id).literals, manager)
            .is_none());
        self.insert_canonical(id, manager);
    }

    /// Merge a candidate into its stored variant, or insert it as canonical.
    ///
    /// On a variant hit the stored clause's constraint is conjoined with the
    /// candidate's; a change is reported as `was_modified` and recorded with
    /// the sink. A constraint collapsing to false is returned as-is; the
    /// caller decides what a refutation means.
    pub fn merge_or_insert(
        &mut self,
        id: ClauseId,
        manager: &mut ClauseManager,
        sink: &mut dyn ProvenanceSink,
    ) -> MergeOutcome {
        if let Some(canonical) = self.retrieve_variant(&manager.clause(id).literals, manager) {
            let old = manager.clause(canonical).constraint;
            let incoming = manager.clause(id).constraint;
            let merged = manager.constraints.conjunction(old, incoming);
            if merged == old {
                return MergeOutcome {
                    canonical,
                    was_new: false,
                    was_modified: false,
                };
            }
            manager.set_constraint(canonical, merged);
            sink.record(ProvenanceEvent::Merge {
                stored: canonical,
                old,
                incoming: id,
                new: merged,
            });
            log::debug!(
                "merge: {} absorbed constraint of {} ({} -> {})",
                canonical,
                id,
                old,
                merged
            );
            MergeOutcome {
                canonical,
                was_new: false,
                was_modified: true,
            }
        } else {
            self.insert_canonical(id, manager);
            MergeOutcome {
                canonical: id,
                was_new: true,
                was_modified: false,
            }
        }
    }

    fn insert_canonical(&mut self, id: ClauseId, manager: &ClauseManager) {
        let shape = ClauseShape::of(&manager.clause(id).literals);
        self.buckets.entry(shape).or_default().push(id);
        self.size += 1;
    }

    /// Number of canonical clauses stored
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Check whether two literal multisets are identical up to a bijective
/// variable renaming.
///
/// Backtracks over the possible pairings; components are small, so the
/// bounded search is cheap in practice. The variable mapping is kept
/// bijective by tracking both directions.
pub fn variant_literals(a: &[Literal], b: &[Literal]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    let mut forward = HashMap::new();
    let mut backward = HashMap::new();
    match_remaining(a, b, 0, &mut used, &mut forward, &mut backward)
}

fn match_remaining(
    a: &[Literal],
    b: &[Literal],
    i: usize,
    used: &mut [bool],
    forward: &mut HashMap<VariableId, VariableId>,
    backward: &mut HashMap<VariableId, VariableId>,
) -> bool {
    if i == a.len() {
        return true;
    }
    for j in 0..b.len() {
        if used[j] {
            continue;
        }
        if a[i].polarity != b[j].polarity || a[i].predicate != b[j].predicate {
            continue;
        }
        // Snapshot the bijection so a failed branch can be undone
        let saved_forward = forward.clone();
        let saved_backward = backward.clone();
        if literals_align(&a[i], &b[j], forward, backward) {
            used[j] = true;
            if match_remaining(a, b, i + 1, used, forward, backward) {
                return true;
            }
            used[j] = false;
        }
        *forward = saved_forward;
        *backward = saved_backward;
    }
    false
}

fn literals_align(
    a: &Literal,
    b: &Literal,
    forward: &mut HashMap<VariableId, VariableId>,
    backward: &mut HashMap<VariableId, VariableId>,
) -> bool {
    a.args.len() == b.args.len()
        && a.args
            .iter()
            .zip(&b.args)
            .all(|(ta, tb)| terms_align(ta, tb, forward, backward))
}

fn terms_align(
    a: &Term,
    b: &Term,
    forward: &mut HashMap<VariableId, VariableId>,
    backward: &mut HashMap<VariableId, VariableId>,
) -> bool {
    match (a, b) {
        (Term::Variable(va), Term::Variable(vb)) => {
            match (forward.get(&va.id), backward.get(&vb.id)) {
                (Some(&mapped), _) => mapped == vb.id,
                (None, Some(_)) => false, // vb already taken by another variable
                (None, None) => {
                    forward.insert(va.id, vb.id);
                    backward.insert(vb.id, va.id);
                    true
                }
            }
        }
        (Term::Constant(ca), Term::Constant(cb)) => ca == cb,
        (Term::Function(fa, args_a), Term::Function(fb, args_b)) => {
            fa == fb
                && args_a.len() == args_b.len()
                && args_a
                    .iter()
                    .zip(args_b)
                    .all(|(ta, tb)| terms_align(ta, tb, forward, backward))
        }
        _ => false,
    }
}
