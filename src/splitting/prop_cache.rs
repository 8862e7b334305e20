//! Propositional literal cache.
//!
//! Nullary predicate occurrences behave as pure propositional atoms, so
//! instead of routing them through the general component machinery (which
//! would create and deduplicate trivial singleton clauses over and over),
//! each propositional predicate is assigned a constraint-engine atom once,
//! together with a singleton justification clause per polarity.
//!
//! The atom is shared by both polarities of the predicate: `p` and `~p`
//! contribute complementary constraints, which is what lets a later merge
//! collapse them to the constant-false constraint and surface a
//! refutation. Entries are created lazily, at most once per key, and never
//! destroyed during a run.

use crate::constraint::AtomId;
use crate::inference::{Derivation, ProvenanceEvent, ProvenanceSink};
use crate::logic::{Clause, ClauseId, ClauseManager, ClauseRole, Literal, PredicateId};
use std::collections::HashMap;

/// Cache of propositional names and justification clauses.
#[derive(Debug, Default)]
pub struct PropLiteralCache {
    /// Assigned atom per propositional predicate (shared across polarities)
    names: HashMap<PredicateId, AtomId>,
    /// Justification clause per (predicate, polarity)
    justifications: HashMap<(PredicateId, bool), ClauseId>,
}

impl PropLiteralCache {
    /// Create an empty cache
    pub fn new() -> Self {
        PropLiteralCache::default()
    }

    /// Resolve a propositional literal to its name and justification clause.
    ///
    /// The justification is a singleton clause containing exactly the
    /// literal, guarded by the name with the polarity opposite to the one
    /// the caller disjoins onto the master clause. For a positive `p` the
    /// justification reads `p ∨ ¬n`, so under `n` the literal holds while
    /// the master clause carries the `∨ n` escape. Both the name and the
    /// justification are created on first sight of their key and cached
    /// afterwards.
    pub fn name_for(
        &mut self,
        lit: &Literal,
        manager: &mut ClauseManager,
        sink: &mut dyn ProvenanceSink,
    ) -> (AtomId, ClauseId) {
        debug_assert!(lit.is_propositional());

        let pred = lit.predicate.id;
        let name = match self.names.get(&pred) {
            Some(&name) => name,
            None => {
                let name = manager.constraints.fresh_atom();
                log::trace!("named propositional predicate {} as {}", pred, name);
                self.names.insert(pred, name);
                name
            }
        };

        let key = (pred, lit.polarity);
        let justification = match self.justifications.get(&key) {
            Some(&id) => id,
            None => {
                let mut clause = Clause::with_role(vec![lit.clone()], ClauseRole::Axiom);
                clause.constraint = manager.constraints.atomic(name, !lit.polarity);
                let id = manager.insert(clause);
                sink.record(ProvenanceEvent::Introduced {
                    clause: id,
                    derivation: Derivation {
                        rule_name: "ClauseNaming".into(),
                        premises: vec![],
                    },
                });
                self.justifications.insert(key, id);
                id
            }
        };

        (name, justification)
    }

    /// Number of named propositional predicates
    pub fn named_predicates(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::PredicateSymbol;

    fn prop_lit(manager: &mut ClauseManager, name: &str, polarity: bool) -> Literal {
        let p = PredicateSymbol::new(manager.interner.intern_predicate(name), 0);
        Literal {
            predicate: p,
            args: vec![],
            polarity,
        }
    }

    #[test]
    fn test_name_is_stable_per_predicate() {
        let mut manager = ClauseManager::new();
        let mut cache = PropLiteralCache::new();
        let lit = prop_lit(&mut manager, "p", true);

        let (n1, j1) = cache.name_for(&lit, &mut manager, &mut ());
        let (n2, j2) = cache.name_for(&lit, &mut manager, &mut ());
        assert_eq!(n1, n2);
        assert_eq!(j1, j2);
        assert_eq!(cache.named_predicates(), 1);
    }

    #[test]
    fn test_polarities_share_the_atom_but_not_the_justification() {
        let mut manager = ClauseManager::new();
        let mut cache = PropLiteralCache::new();
        let pos = prop_lit(&mut manager, "p", true);
        let neg = pos.complement();

        let (n_pos, j_pos) = cache.name_for(&pos, &mut manager, &mut ());
        let (n_neg, j_neg) = cache.name_for(&neg, &mut manager, &mut ());

        assert_eq!(n_pos, n_neg);
        assert_ne!(j_pos, j_neg);

        // Justification constraints are complementary
        let c_pos = manager.clause(j_pos).constraint;
        let c_neg = manager.clause(j_neg).constraint;
        let both = manager.constraints.conjunction(c_pos, c_neg);
        assert!(manager.constraints.is_false(both));
    }

    #[test]
    fn test_distinct_predicates_get_distinct_atoms() {
        let mut manager = ClauseManager::new();
        let mut cache = PropLiteralCache::new();
        let p = prop_lit(&mut manager, "p", true);
        let q = prop_lit(&mut manager, "q", true);

        let (n_p, _) = cache.name_for(&p, &mut manager, &mut ());
        let (n_q, _) = cache.name_for(&q, &mut manager, &mut ());
        assert_ne!(n_p, n_q);
    }

    #[test]
    fn test_justification_content() {
        let mut manager = ClauseManager::new();
        let mut cache = PropLiteralCache::new();
        let lit = prop_lit(&mut manager, "p", false);

        let (n, j) = cache.name_for(&lit, &mut manager, &mut ());
        let guard = manager.constraints.atomic(n, true);
        let clause = manager.clause(j);
        assert_eq!(clause.literals.len(), 1);
        assert_eq!(clause.literals[0], lit);
        assert_eq!(clause.role, ClauseRole::Axiom);
        assert_eq!(clause.constraint, guard);
    }
}
