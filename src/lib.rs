//! SplitAtlas: clause splitting for saturation-based first-order proving
//!
//! When a derived clause's literals fall into several variable-disjoint
//! groups, splitting the clause into independent components and reasoning
//! about them propositionally keeps the search space tractable. This
//! library provides the splitting engine: variable connectivity analysis,
//! component deduplication up to variants, stable propositional naming,
//! and merge-on-insert of propositional constraints, together with the
//! clause representation, constraint engine, and provenance log it works
//! against.
//!
//! The entry point is [`Splitter::split`], which takes a clause from the
//! saturation loop and returns the newly created clauses to enqueue plus
//! the previously known clauses whose constraint changed.

pub mod constraint;
pub mod inference;
pub mod logic;
pub mod splitting;

// Re-export commonly used types
pub use constraint::{AtomId, Bdd, NodeId};
pub use inference::{Derivation, EventLog, ProvenanceEvent, ProvenanceSink};
pub use logic::{
    Clause, ClauseId, ClauseManager, ClauseRole, Constant, ConstantId, FunctionId,
    FunctionSymbol, Interner, Literal, PredicateId, PredicateSymbol, Term, Variable, VariableId,
};
pub use splitting::{
    connected_groups, ComponentStore, MergeOutcome, PropLiteralCache, SplitResult, Splitter,
    SplitterConfig, SplitterStats,
};
