//! Clauses with propositional constraints

use super::interner::Interner;
use super::literal::Literal;
use crate::constraint::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a clause in the [`ClauseManager`](super::ClauseManager) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClauseId(pub(crate) usize);

impl ClauseId {
    /// Get the raw index value (for debugging/serialization)
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Role of a clause in the proof (from the input problem or derived)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClauseRole {
    /// Axiom from the problem
    #[default]
    Axiom,
    /// Hypothesis
    Hypothesis,
    /// Negated conjecture (goal)
    NegatedConjecture,
    /// Derived clause (from inference)
    Derived,
}

/// A clause (disjunction of literals) with a propositional constraint.
///
/// A clause with constraint `c` stands for `literals ∨ c`: the
/// constant-false node asserts the literals unconditionally (the state of
/// every input clause), while constant-true makes the clause vacuous
/// (the state of a component at insertion, before any split conditions
/// it). Literal content is fixed once the clause enters the component
/// store; the constraint may still be strengthened by merges. A merge
/// driving the canonical empty clause's constraint to false is a
/// refutation signal for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
    pub id: Option<ClauseId>,
    /// Role of the clause (axiom, hypothesis, negated conjecture, derived)
    pub role: ClauseRole,
    /// Age of the clause (derivation step when it was created, 0 for input clauses)
    pub age: usize,
    /// Propositional constraint attached to this clause
    pub constraint: NodeId,
}

impl Clause {
    /// Create a new clause from literals, asserted unconditionally
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause {
            literals,
            id: None,
            role: ClauseRole::default(),
            age: 0,
            constraint: NodeId::FALSE,
        }
    }

    /// Create a new clause with a specific role
    pub fn with_role(literals: Vec<Literal>, role: ClauseRole) -> Self {
        Clause {
            literals,
            id: None,
            role,
            age: 0,
            constraint: NodeId::FALSE,
        }
    }

    /// Create a derived clause with age
    pub fn derived(literals: Vec<Literal>, age: usize) -> Self {
        Clause {
            literals,
            id: None,
            role: ClauseRole::Derived,
            age,
            constraint: NodeId::FALSE,
        }
    }

    /// Check if this clause has no literals
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Number of literals
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Format this clause with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> ClauseDisplay<'a> {
        ClauseDisplay {
            clause: self,
            interner,
        }
    }
}

/// Display wrapper for Clause that includes an interner for name resolution
pub struct ClauseDisplay<'a> {
    clause: &'a Clause,
    interner: &'a Interner,
}

impl<'a> fmt::Display for ClauseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clause.is_empty() {
            write!(f, "⊥")
        } else {
            for (i, lit) in self.clause.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " ∨ ")?;
                }
                write!(f, "{}", lit.display(self.interner))?;
            }
            Ok(())
        }
    }
}

// Display implementation that shows ids (for debugging without interner)
impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "⊥")
        } else {
            for (i, lit) in self.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " ∨ ")?;
                }
                write!(f, "{}", lit)?;
            }
            Ok(())
        }
    }
}
