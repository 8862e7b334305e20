//! Clause splitting for the saturation loop.
//!
//! The engine decomposes a derived clause into variable-connected
//! components, deduplicates them against everything ever derived, assigns
//! stable propositional names, and reports exactly which clauses are newly
//! produced and which were updated in place.

pub mod connectivity;
pub mod prop_cache;
pub mod splitter;
pub mod store;

pub use connectivity::{connected_groups, UnionFind};
pub use prop_cache::PropLiteralCache;
pub use splitter::{SplitResult, Splitter, SplitterConfig, SplitterStats};
pub use store::{variant_literals, ComponentStore, MergeOutcome};
