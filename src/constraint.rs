//! Boolean-constraint engine for propositional side-conditions.
//!
//! Clauses produced by splitting carry a propositional constraint that
//! records under which assignments of component names the clause's literal
//! content is asserted. The engine represents these constraints as reduced
//! ordered binary decision diagrams with a hash-consed unique table, so
//! structurally equal formulas always receive the *same* `NodeId`.
//! Conjunction and disjunction are associative, commutative, and idempotent
//! on equal nodes, and equality of constraints is a handle comparison.
//!
//! Atom ids are allocated monotonically via [`Bdd::fresh_atom`] and are
//! never reused for a different purpose.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// An atom in the constraint engine's variable space
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(u32);

impl AtomId {
    /// Get the raw id value (for debugging/serialization)
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Handle to a constraint node. Canonical: equal constraints have equal handles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The constant-false constraint
    pub const FALSE: NodeId = NodeId(0);
    /// The constant-true constraint
    pub const TRUE: NodeId = NodeId(1);

    /// Get the raw id value (for debugging/serialization)
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NodeId::FALSE => write!(f, "$false"),
            NodeId::TRUE => write!(f, "$true"),
            NodeId(raw) => write!(f, "b{}", raw),
        }
    }
}

impl Serialize for AtomId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AtomId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(AtomId)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(NodeId)
    }
}

/// Decision node: branch on `var`, `lo` when false, `hi` when true.
///
/// Terminal nodes use `var == u32::MAX` so they sort below every real atom
/// in the variable order.
#[derive(Debug, Copy, Clone)]
struct Node {
    var: u32,
    lo: NodeId,
    hi: NodeId,
}

const TERMINAL_VAR: u32 = u32::MAX;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum Op {
    And,
    Or,
}

/// Constraint engine: hash-consed decision-diagram store plus atom allocator.
#[derive(Debug)]
pub struct Bdd {
    nodes: Vec<Node>,
    /// Unique table: (var, lo, hi) -> existing node
    unique: HashMap<(u32, NodeId, NodeId), NodeId>,
    /// Memo table for apply (operands normalized by handle order)
    cache: HashMap<(Op, NodeId, NodeId), NodeId>,
    next_atom: u32,
}

impl Bdd {
    /// Create an engine with no atoms allocated
    pub fn new() -> Self {
        let terminal = |id| Node {
            var: TERMINAL_VAR,
            lo: id,
            hi: id,
        };
        Bdd {
            nodes: vec![terminal(NodeId::FALSE), terminal(NodeId::TRUE)],
            unique: HashMap::new(),
            cache: HashMap::new(),
            next_atom: 0,
        }
    }

    /// Allocate a fresh atom. Atom ids are monotonic and never reused.
    pub fn fresh_atom(&mut self) -> AtomId {
        let id = AtomId(self.next_atom);
        self.next_atom += 1;
        id
    }

    /// Number of atoms allocated so far
    pub fn atom_count(&self) -> usize {
        self.next_atom as usize
    }

    /// The constraint asserting `atom` with the given polarity
    pub fn atomic(&mut self, atom: AtomId, polarity: bool) -> NodeId {
        if polarity {
            self.mk(atom.0, NodeId::FALSE, NodeId::TRUE)
        } else {
            self.mk(atom.0, NodeId::TRUE, NodeId::FALSE)
        }
    }

    /// Conjunction of two constraints
    pub fn conjunction(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.apply(Op::And, a, b)
    }

    /// Disjunction of two constraints
    pub fn disjunction(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.apply(Op::Or, a, b)
    }

    /// Is this the constant-true constraint?
    pub fn is_true(&self, node: NodeId) -> bool {
        node == NodeId::TRUE
    }

    /// Is this the constant-false constraint?
    pub fn is_false(&self, node: NodeId) -> bool {
        node == NodeId::FALSE
    }

    /// Get-or-create a reduced node
    fn mk(&mut self, var: u32, lo: NodeId, hi: NodeId) -> NodeId {
        if lo == hi {
            return lo;
        }
        if let Some(&id) = self.unique.get(&(var, lo, hi)) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { var, lo, hi });
        self.unique.insert((var, lo, hi), id);
        id
    }

    fn apply(&mut self, op: Op, a: NodeId, b: NodeId) -> NodeId {
        // Terminal cases
        match op {
            Op::And => {
                if a == NodeId::FALSE || b == NodeId::FALSE {
                    return NodeId::FALSE;
                }
                if a == NodeId::TRUE {
                    return b;
                }
                if b == NodeId::TRUE {
                    return a;
                }
            }
            Op::Or => {
                if a == NodeId::TRUE || b == NodeId::TRUE {
                    return NodeId::TRUE;
                }
                if a == NodeId::FALSE {
                    return b;
                }
                if b == NodeId::FALSE {
                    return a;
                }
            }
        }
        if a == b {
            return a;
        }

        // Both operations are commutative; normalize for the memo table
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        if let Some(&cached) = self.cache.get(&(op, a, b)) {
            return cached;
        }

        let na = self.nodes[a.as_u32() as usize];
        let nb = self.nodes[b.as_u32() as usize];
        let var = na.var.min(nb.var);

        let (a_lo, a_hi) = if na.var == var { (na.lo, na.hi) } else { (a, a) };
        let (b_lo, b_hi) = if nb.var == var { (nb.lo, nb.hi) } else { (b, b) };

        let lo = self.apply(op, a_lo, b_lo);
        let hi = self.apply(op, a_hi, b_hi);
        let result = self.mk(var, lo, hi);

        self.cache.insert((op, a, b), result);
        result
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        let bdd = Bdd::new();
        assert!(bdd.is_true(NodeId::TRUE));
        assert!(bdd.is_false(NodeId::FALSE));
        assert!(!bdd.is_true(NodeId::FALSE));
    }

    #[test]
    fn test_fresh_atoms_are_monotonic() {
        let mut bdd = Bdd::new();
        let a = bdd.fresh_atom();
        let b = bdd.fresh_atom();
        assert!(a < b);
        assert_eq!(bdd.atom_count(), 2);
    }

    #[test]
    fn test_atomic_is_canonical() {
        let mut bdd = Bdd::new();
        let n = bdd.fresh_atom();
        assert_eq!(bdd.atomic(n, true), bdd.atomic(n, true));
        assert_ne!(bdd.atomic(n, true), bdd.atomic(n, false));
    }

    #[test]
    fn test_complement_law() {
        let mut bdd = Bdd::new();
        let n = bdd.fresh_atom();
        let pos = bdd.atomic(n, true);
        let neg = bdd.atomic(n, false);
        assert_eq!(bdd.disjunction(pos, neg), NodeId::TRUE);
        assert_eq!(bdd.conjunction(pos, neg), NodeId::FALSE);
    }

    #[test]
    fn test_idempotence_and_identity() {
        let mut bdd = Bdd::new();
        let n = bdd.fresh_atom();
        let pos = bdd.atomic(n, true);
        assert_eq!(bdd.conjunction(pos, pos), pos);
        assert_eq!(bdd.disjunction(pos, pos), pos);
        assert_eq!(bdd.conjunction(pos, NodeId::TRUE), pos);
        assert_eq!(bdd.disjunction(pos, NodeId::FALSE), pos);
    }

    #[test]
    fn test_commutativity_gives_identical_handles() {
        let mut bdd = Bdd::new();
        let x = bdd.fresh_atom();
        let y = bdd.fresh_atom();
        let px = bdd.atomic(x, true);
        let py = bdd.atomic(y, true);
        assert_eq!(bdd.conjunction(px, py), bdd.conjunction(py, px));
        assert_eq!(bdd.disjunction(px, py), bdd.disjunction(py, px));
    }

    #[test]
    fn test_associativity_gives_identical_handles() {
        let mut bdd = Bdd::new();
        let atoms: Vec<_> = (0..3).map(|_| bdd.fresh_atom()).collect();
        let nodes: Vec<_> = atoms.iter().map(|&a| bdd.atomic(a, true)).collect();

        let ab = bdd.disjunction(nodes[0], nodes[1]);
        let left = bdd.disjunction(ab, nodes[2]);
        let bc = bdd.disjunction(nodes[1], nodes[2]);
        let right = bdd.disjunction(nodes[0], bc);
        assert_eq!(left, right);
    }

    #[test]
    fn test_absorption_to_true() {
        let mut bdd = Bdd::new();
        let x = bdd.fresh_atom();
        let y = bdd.fresh_atom();
        let neg_x = bdd.atomic(x, false);
        let pos_y = bdd.atomic(y, true);
        // (~x | y) | x == true
        let partial = bdd.disjunction(neg_x, pos_y);
        let pos_x = bdd.atomic(x, true);
        assert_eq!(bdd.disjunction(partial, pos_x), NodeId::TRUE);
    }
}
