//! First-order logic representation
//!
//! This module provides the fundamental types for representing clauses:
//! terms, literals, interned symbols, and the clause arena.

pub mod clause;
pub mod clause_manager;
pub mod interner;
pub mod literal;
pub mod term;

// Re-export commonly used types
pub use clause::{Clause, ClauseDisplay, ClauseId, ClauseRole};
pub use clause_manager::ClauseManager;
pub use interner::{ConstantId, FunctionId, Interner, PredicateId, VariableId};
pub use literal::{Literal, LiteralDisplay, PredicateSymbol};
pub use term::{Constant, FunctionSymbol, Term, TermDisplay, Variable};
