//! Symbol interning for efficient comparison and compact storage
//!
//! Symbols are referred to by `u32` ids instead of strings, giving O(1)
//! comparison and hashing and `Copy` semantics. Each symbol kind gets its
//! own id newtype so variables, constants, functions, and predicates
//! cannot be mixed up. The interner is passed through the clause context
//! rather than living in global state.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Define an interned-symbol id newtype.
///
/// Ids serialize as their raw `u32`; name resolution goes through the
/// interner, not the serialized form.
macro_rules! symbol_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Get the raw id value (for debugging/serialization)
            pub fn as_u32(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                u32::deserialize(deserializer).map($name)
            }
        }
    };
}

symbol_id! {
    /// Id for an interned variable name
    VariableId, "V"
}
symbol_id! {
    /// Id for an interned constant name
    ConstantId, "C"
}
symbol_id! {
    /// Id for an interned function symbol name
    FunctionId, "F"
}
symbol_id! {
    /// Id for an interned predicate symbol name
    PredicateId, "P"
}

/// Internal string arena for a single symbol kind
#[derive(Debug, Clone, Default)]
struct StringArena {
    /// Interned strings, indexed by id
    strings: Vec<String>,
    /// Lookup table from string to id
    lookup: HashMap<String, u32>,
}

impl StringArena {
    /// Intern a string, returning its id (get-or-create)
    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = self.strings.len() as u32;
        self.strings.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    /// Resolve an id to its string
    fn resolve(&self, id: u32) -> &str {
        &self.strings[id as usize]
    }

    /// Get the id for an already-interned string
    fn get(&self, name: &str) -> Option<u32> {
        self.lookup.get(name).copied()
    }

    fn len(&self) -> usize {
        self.strings.len()
    }
}

/// Symbol interner for first-order logic
///
/// Stores all symbol names in separate arenas for variables, constants,
/// functions, and predicates.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    variables: StringArena,
    constants: StringArena,
    functions: StringArena,
    predicates: StringArena,
}

impl Interner {
    /// Create a new empty interner
    pub fn new() -> Self {
        Interner::default()
    }

    /// Intern a variable name, returning its id (get-or-create)
    pub fn intern_variable(&mut self, name: &str) -> VariableId {
        VariableId(self.variables.intern(name))
    }

    /// Resolve a variable id to its name
    pub fn resolve_variable(&self, id: VariableId) -> &str {
        self.variables.resolve(id.0)
    }

    /// Get the id for an already-interned variable
    pub fn get_variable(&self, name: &str) -> Option<VariableId> {
        self.variables.get(name).map(VariableId)
    }

    /// Number of interned variables
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Intern a constant name, returning its id (get-or-create)
    pub fn intern_constant(&mut self, name: &str) -> ConstantId {
        ConstantId(self.constants.intern(name))
    }

    /// Resolve a constant id to its name
    pub fn resolve_constant(&self, id: ConstantId) -> &str {
        self.constants.resolve(id.0)
    }

    /// Get the id for an already-interned constant
    pub fn get_constant(&self, name: &str) -> Option<ConstantId> {
        self.constants.get(name).map(ConstantId)
    }

    /// Number of interned constants
    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    /// Intern a function name, returning its id (get-or-create)
    pub fn intern_function(&mut self, name: &str) -> FunctionId {
        FunctionId(self.functions.intern(name))
    }

    /// Resolve a function id to its name
    pub fn resolve_function(&self, id: FunctionId) -> &str {
        self.functions.resolve(id.0)
    }

    /// Get the id for an already-interned function
    pub fn get_function(&self, name: &str) -> Option<FunctionId> {
        self.functions.get(name).map(FunctionId)
    }

    /// Number of interned functions
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Intern a predicate name, returning its id (get-or-create)
    pub fn intern_predicate(&mut self, name: &str) -> PredicateId {
        PredicateId(self.predicates.intern(name))
    }

    /// Resolve a predicate id to its name
    pub fn resolve_predicate(&self, id: PredicateId) -> &str {
        self.predicates.resolve(id.0)
    }

    /// Get the id for an already-interned predicate
    pub fn get_predicate(&self, name: &str) -> Option<PredicateId> {
        self.predicates.get(name).map(PredicateId)
    }

    /// Number of interned predicates
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_is_idempotent() {
        let mut interner = Interner::new();

        let x1 = interner.intern_variable("X");
        let x2 = interner.intern_variable("X");
        let y = interner.intern_variable("Y");

        assert_eq!(x1, x2);
        assert_ne!(x1, y);
        assert_eq!(interner.resolve_variable(x1), "X");
        assert_eq!(interner.resolve_variable(y), "Y");
        assert_eq!(interner.variable_count(), 2);
    }

    #[test]
    fn test_separate_namespaces() {
        let mut interner = Interner::new();

        // Same name in different namespaces gets independent ids
        let v = interner.intern_variable("x");
        let c = interner.intern_constant("x");
        let f = interner.intern_function("x");
        let p = interner.intern_predicate("x");

        assert_eq!(interner.resolve_variable(v), "x");
        assert_eq!(interner.resolve_constant(c), "x");
        assert_eq!(interner.resolve_function(f), "x");
        assert_eq!(interner.resolve_predicate(p), "x");

        assert_eq!(interner.variable_count(), 1);
        assert_eq!(interner.constant_count(), 1);
        assert_eq!(interner.function_count(), 1);
        assert_eq!(interner.predicate_count(), 1);
    }

    #[test]
    fn test_get_without_interning() {
        let mut interner = Interner::new();

        assert!(interner.get_predicate("p").is_none());
        let p = interner.intern_predicate("p");
        assert_eq!(interner.get_predicate("p"), Some(p));
        assert!(interner.get_predicate("q").is_none());
    }

    #[test]
    fn test_id_ordering_follows_interning_order() {
        let mut interner = Interner::new();
        let x = interner.intern_variable("X");
        let y = interner.intern_variable("Y");
        assert!(x < y);
    }
}
