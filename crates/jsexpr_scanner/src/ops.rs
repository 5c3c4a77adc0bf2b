//! The operator registry.
//!
//! Built once per parser instance by folding every rule's registered
//! operators. The registry remembers, per operator string, whether the
//! token must be followed by whitespace (word-like operators such as
//! `instanceof`), and the maximum operator length for longest-match
//! scanning.

use rustc_hash::FxHashMap;

/// Operator-token table derived from a grammar's rules.
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    ops: FxHashMap<String, bool>,
    max_len: usize,
}

impl OperatorRegistry {
    /// Fold rule registrations into a registry.
    ///
    /// Duplicate registrations keep the first entry: rules register from
    /// the lowest precedence level up, so the first registrant is the
    /// outermost binding site.
    pub fn build<I>(defs: I) -> Self
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        let mut registry = OperatorRegistry::default();
        for (op, requires_space) in defs {
            if registry.ops.contains_key(&op) {
                continue;
            }
            registry.max_len = registry.max_len.max(op.chars().count());
            registry.ops.insert(op, requires_space);
        }
        registry
    }

    /// Whether `op` is registered.
    pub fn contains(&self, op: &str) -> bool {
        self.ops.contains_key(op)
    }

    /// The trailing-space requirement of `op`, if registered.
    pub fn requires_space(&self, op: &str) -> Option<bool> {
        self.ops.get(op).copied()
    }

    /// Longest registered operator length, in chars.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of registered operators.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
