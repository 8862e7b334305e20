//! Provenance recording for splitting, merging, and naming.
//!
//! The splitting engine reports every inference it performs to a
//! [`ProvenanceSink`]. The sink is purely observational: nothing the engine
//! does depends on a sink's return value, so callers that do not track
//! proofs can pass `&mut ()` and pay nothing.
//!
//! Events are the raw log format; proof extraction and any derived views
//! come from replaying them.

use crate::constraint::{AtomId, NodeId};
use crate::logic::ClauseId;
use serde::{Deserialize, Serialize};

/// How a clause was derived (rule name + premises).
///
/// This is a dynamic struct that stores the rule name and premise ids,
/// allowing new rules to be added without modifying this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    /// Name of the inference rule that produced this clause
    pub rule_name: String,
    /// Ids of the premise clauses used in the inference
    pub premises: Vec<ClauseId>,
}

impl Derivation {
    /// Create an Input derivation (no premises)
    pub fn input() -> Self {
        Derivation {
            rule_name: "Input".into(),
            premises: vec![],
        }
    }
}

/// Atomic provenance events emitted by the splitting engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProvenanceEvent {
    /// A clause was introduced by the engine (component, justification, ...)
    Introduced {
        clause: ClauseId,
        derivation: Derivation,
    },
    /// A master component's constraint was rewired by a split
    Split {
        master: ClauseId,
        old: NodeId,
        new: NodeId,
        /// The original clause plus every component/justification consulted
        premises: Vec<ClauseId>,
    },
    /// A stored clause's constraint absorbed an incoming variant's constraint
    Merge {
        stored: ClauseId,
        old: NodeId,
        incoming: ClauseId,
        new: NodeId,
    },
    /// A component received a propositional name
    Naming {
        component: ClauseId,
        name: AtomId,
        old: NodeId,
        new: NodeId,
    },
}

/// Observer for provenance events. No return value is consumed by the engine.
pub trait ProvenanceSink {
    /// Record one event
    fn record(&mut self, event: ProvenanceEvent);
}

/// No-op sink for callers that do not track provenance
impl ProvenanceSink for () {
    fn record(&mut self, _event: ProvenanceEvent) {}
}

/// Recording sink: an append-only event log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<ProvenanceEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        EventLog::default()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ProvenanceSink for EventLog {
    fn record(&mut self, event: ProvenanceEvent) {
        self.events.push(event);
    }
}
