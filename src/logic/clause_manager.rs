//! Centralized clause management: the clause arena, symbol interner, and
//! constraint engine for one prover run.
//!
//! Clauses and constraint nodes are heavily shared (many clauses reference
//! the same literal content and constraint handles), so clauses live in an
//! arena indexed by [`ClauseId`] rather than behind aliased pointers.
//! Constraint mutation on stored clauses goes through
//! [`ClauseManager::set_constraint`]; literal content is immutable once a
//! clause is inserted.

use super::clause::{Clause, ClauseId};
use super::interner::Interner;
use crate::constraint::{Bdd, NodeId};

/// Clause arena coupled with the symbol interner and constraint engine.
///
/// One `ClauseManager` exists per prover run; the splitting engine takes it
/// as an explicit dependency rather than reaching for global state.
#[derive(Debug, Default)]
pub struct ClauseManager {
    /// Symbol interner for resolving and creating symbol names
    pub interner: Interner,
    /// Constraint engine shared by all clauses in this arena
    pub constraints: Bdd,
    clauses: Vec<Clause>,
}

impl ClauseManager {
    /// Create an empty manager
    pub fn new() -> Self {
        ClauseManager::default()
    }

    /// Create a manager around an existing interner (e.g. from a parser)
    pub fn with_interner(interner: Interner) -> Self {
        ClauseManager {
            interner,
            constraints: Bdd::new(),
            clauses: Vec::new(),
        }
    }

    /// Insert a clause into the arena, returning its id.
    ///
    /// The clause's `id` field is set to the assigned handle.
    pub fn insert(&mut self, mut clause: Clause) -> ClauseId {
        let id = ClauseId(self.clauses.len());
        clause.id = Some(id);
        self.clauses.push(clause);
        id
    }

    /// Get a clause by id
    pub fn clause(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.0]
    }

    /// Replace a clause's propositional constraint
    pub fn set_constraint(&mut self, id: ClauseId, constraint: NodeId) {
        self.clauses[id.0].constraint = constraint;
    }

    /// Number of clauses in the arena
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterate over all clause ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ClauseId> {
        (0..self.clauses.len()).map(ClauseId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Literal, PredicateSymbol};

    #[test]
    fn test_insert_assigns_ids_in_order() {
        let mut manager = ClauseManager::new();
        let p = PredicateSymbol::new(manager.interner.intern_predicate("p"), 0);

        let c1 = manager.insert(Clause::new(vec![Literal::positive(p, vec![])]));
        let c2 = manager.insert(Clause::new(vec![Literal::negative(p, vec![])]));

        assert_ne!(c1, c2);
        assert_eq!(manager.clause(c1).id, Some(c1));
        assert_eq!(manager.clause(c2).id, Some(c2));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_set_constraint() {
        let mut manager = ClauseManager::new();
        let id = manager.insert(Clause::new(vec![]));
        assert_eq!(manager.clause(id).constraint, NodeId::FALSE);

        let atom = manager.constraints.fresh_atom();
        let node = manager.constraints.atomic(atom, true);
        manager.set_constraint(id, node);
        assert_eq!(manager.clause(id).constraint, node);
    }
}
