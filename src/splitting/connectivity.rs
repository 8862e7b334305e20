//! Variable connectivity analysis.
//!
//! Two literals of a clause belong to the same component iff they are
//! connected by a chain of shared variables. The partition is computed with
//! a union-find over literal indices: the first literal seen containing a
//! variable becomes that variable's master, and every later literal
//! containing it is unioned with the master.

use crate::logic::{Clause, VariableId};
use std::collections::{HashMap, HashSet};

/// Union-find over `0..n` with union by rank and path halving.
#[derive(Debug)]
pub struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Create `n` singleton sets
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
        }
    }

    /// Find the representative of `x`'s set
    pub fn find(&mut self, x: usize) -> usize {
        let mut x = x as u32;
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x as usize
    }

    /// Merge the sets containing `a` and `b`
    pub fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb as u32,
            std::cmp::Ordering::Greater => self.parent[rb] = ra as u32,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra as u32;
                self.rank[ra] += 1;
            }
        }
    }

}

/// Partition a clause's literal indices into variable-connected groups.
///
/// Groups are ordered by their first literal index, and literal indices
/// within a group keep clause order, so the partition is deterministic.
/// Ground literals share no variables and end up in singleton groups.
pub fn connected_groups(clause: &Clause) -> Vec<Vec<usize>> {
    let n = clause.literals.len();
    let mut uf = UnionFind::new(n);
    let mut var_master: HashMap<VariableId, usize> = HashMap::new();

    let mut vars = HashSet::new();
    for (i, lit) in clause.literals.iter().enumerate() {
        vars.clear();
        lit.collect_variable_ids(&mut vars);
        for &v in &vars {
            match var_master.get(&v) {
                Some(&master) => uf.union(master, i),
                None => {
                    var_master.insert(v, i);
                }
            }
        }
    }

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut root_to_group: HashMap<usize, usize> = HashMap::new();
    for i in 0..n {
        let root = uf.find(i);
        let group = *root_to_group.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[group].push(i);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Clause, Constant, Interner, Literal, PredicateSymbol, Term, Variable};

    fn var(interner: &mut Interner, name: &str) -> Term {
        Term::Variable(Variable::new(interner.intern_variable(name)))
    }

    fn constant(interner: &mut Interner, name: &str) -> Term {
        Term::Constant(Constant::new(interner.intern_constant(name)))
    }

    fn pred(interner: &mut Interner, name: &str, arity: u8) -> PredicateSymbol {
        PredicateSymbol::new(interner.intern_predicate(name), arity)
    }

    #[test]
    fn test_union_find_basics() {
        let mut uf = UnionFind::new(4);
        assert_ne!(uf.find(0), uf.find(2));
        uf.union(0, 2);
        uf.union(2, 3);
        assert_eq!(uf.find(0), uf.find(3));
        assert_eq!(uf.find(2), uf.find(3));
        assert_ne!(uf.find(0), uf.find(1));
    }

    #[test]
    fn test_disconnected_literals_form_separate_groups() {
        let mut interner = Interner::new();
        let p = pred(&mut interner, "p", 1);
        let q = pred(&mut interner, "q", 1);
        let x = var(&mut interner, "X");
        let y = var(&mut interner, "Y");

        let clause = Clause::new(vec![
            Literal::positive(p, vec![x]),
            Literal::positive(q, vec![y]),
        ]);
        let groups = connected_groups(&clause);
        assert_eq!(groups, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_shared_variable_connects_literals() {
        let mut interner = Interner::new();
        let p = pred(&mut interner, "p", 1);
        let q = pred(&mut interner, "q", 2);
        let r = pred(&mut interner, "r", 1);
        let x = var(&mut interner, "X");
        let y = var(&mut interner, "Y");
        let z = var(&mut interner, "Z");

        // p(X), q(X,Y), r(Z): first two connected via X, r(Z) apart
        let clause = Clause::new(vec![
            Literal::positive(p, vec![x.clone()]),
            Literal::positive(q, vec![x, y]),
            Literal::positive(r, vec![z]),
        ]);
        let groups = connected_groups(&clause);
        assert_eq!(groups, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_transitive_chain_is_one_group() {
        let mut interner = Interner::new();
        let q = pred(&mut interner, "q", 2);
        let x = var(&mut interner, "X");
        let y = var(&mut interner, "Y");
        let z = var(&mut interner, "Z");

        // q(X,Y), q(Y,Z): connected through Y even though X and Z never meet
        let clause = Clause::new(vec![
            Literal::positive(q, vec![x, y.clone()]),
            Literal::positive(q, vec![y, z]),
        ]);
        let groups = connected_groups(&clause);
        assert_eq!(groups, vec![vec![0, 1]]);
    }

    #[test]
    fn test_ground_literals_are_singletons() {
        let mut interner = Interner::new();
        let p = pred(&mut interner, "p", 1);
        let q = pred(&mut interner, "q", 1);
        let a = constant(&mut interner, "a");
        let b = constant(&mut interner, "b");

        let clause = Clause::new(vec![
            Literal::positive(p, vec![a]),
            Literal::positive(q, vec![b]),
        ]);
        let groups = connected_groups(&clause);
        assert_eq!(groups.len(), 2);
    }
}
