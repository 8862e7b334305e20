//! Literals in first-order logic

use super::interner::{Interner, PredicateId};
use super::term::Term;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A predicate symbol with arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub id: PredicateId,
    pub arity: u8,
}

impl PredicateSymbol {
    /// Create a new predicate symbol from an id and arity
    pub fn new(id: PredicateId, arity: u8) -> Self {
        PredicateSymbol { id, arity }
    }

    /// Get the name of this predicate symbol from the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_predicate(self.id)
    }
}

/// A literal (positive or negative atomic formula)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            args,
            polarity: true,
        }
    }

    /// Create a new negative literal
    pub fn negative(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Literal {
            predicate,
            args,
            polarity: false,
        }
    }

    /// Get the complement of this literal
    pub fn complement(&self) -> Literal {
        Literal {
            predicate: self.predicate,
            args: self.args.clone(),
            polarity: !self.polarity,
        }
    }

    /// A nullary predicate occurrence behaves as a pure propositional atom
    pub fn is_propositional(&self) -> bool {
        self.predicate.arity == 0
    }

    /// Check if this literal contains no variables
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    /// Collect all variable ids occurring in this literal
    pub fn collect_variable_ids(&self, vars: &mut HashSet<super::interner::VariableId>) {
        for arg in &self.args {
            arg.collect_variable_ids(vars);
        }
    }

    /// Format this literal with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> LiteralDisplay<'a> {
        LiteralDisplay {
            literal: self,
            interner,
        }
    }
}

/// Display wrapper for Literal that includes an interner for name resolution
pub struct LiteralDisplay<'a> {
    literal: &'a Literal,
    interner: &'a Interner,
}

impl<'a> fmt::Display for LiteralDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.literal.polarity {
            write!(f, "~")?;
        }
        let pred_name = self.interner.resolve_predicate(self.literal.predicate.id);
        write!(f, "{}", pred_name)?;
        if !self.literal.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.literal.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", arg.display(self.interner))?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

// Display implementation that shows ids (for debugging without interner)

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "~")?;
        }
        write!(f, "{}", self.predicate.id)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::term::{Constant, Variable};

    #[test]
    fn test_propositional_literal() {
        let mut interner = Interner::new();
        let p = PredicateSymbol::new(interner.intern_predicate("p"), 0);
        let q = PredicateSymbol::new(interner.intern_predicate("q"), 1);
        let a = Term::Constant(Constant::new(interner.intern_constant("a")));

        assert!(Literal::positive(p, vec![]).is_propositional());
        assert!(!Literal::positive(q, vec![a]).is_propositional());
    }

    #[test]
    fn test_complement_flips_polarity_only() {
        let mut interner = Interner::new();
        let q = PredicateSymbol::new(interner.intern_predicate("q"), 1);
        let x = Term::Variable(Variable::new(interner.intern_variable("X")));

        let lit = Literal::positive(q, vec![x]);
        let comp = lit.complement();
        assert_eq!(lit.predicate, comp.predicate);
        assert_eq!(lit.args, comp.args);
        assert_ne!(lit.polarity, comp.polarity);
    }
}
