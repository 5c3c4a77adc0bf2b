//! Evaluation scopes.
//!
//! A [`ScopeContext`] is an explicit environment: a frame of bindings
//! plus an optional parent. Reads walk the parent chain; writes always
//! go to the receiving frame, so arrow-function parameters and names
//! assigned inside an arrow body shadow outer bindings instead of
//! leaking into them. `this` resolves to the root frame, the context
//! object the caller handed to `evaluate`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::value::{ObjectMap, Value};

/// One evaluation environment in a delegation chain.
#[derive(Clone)]
pub struct ScopeContext {
    frame: Rc<RefCell<ObjectMap>>,
    parent: Option<Rc<ScopeContext>>,
    root: Rc<RefCell<ObjectMap>>,
}

impl Default for ScopeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeContext {
    /// A fresh, empty root context.
    pub fn new() -> Self {
        Self::from_map(ObjectMap::new())
    }

    /// A root context over the given bindings.
    pub fn from_map(map: ObjectMap) -> Self {
        let frame = Rc::new(RefCell::new(map));
        Self {
            root: frame.clone(),
            frame,
            parent: None,
        }
    }

    /// A root context from name/value pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        Self::from_map(
            pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    /// A child context delegating to `self`. Writes in the child never
    /// touch this context.
    pub fn child(&self) -> ScopeContext {
        ScopeContext {
            frame: Rc::new(RefCell::new(ObjectMap::new())),
            parent: Some(Rc::new(self.clone())),
            root: self.root.clone(),
        }
    }

    /// Read a binding, walking the parent chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.frame.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Whether a binding exists anywhere in the chain.
    pub fn has(&self, name: &str) -> bool {
        self.frame.borrow().contains_key(name)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.has(name))
    }

    /// Write a binding into this frame (shadowing any outer binding).
    pub fn set(&self, name: &str, value: Value) {
        self.frame.borrow_mut().insert(name.to_string(), value);
    }

    /// Remove a binding from this frame only. Mirrors `delete` on the
    /// receiving object: inherited bindings are untouched.
    pub fn delete(&self, name: &str) -> bool {
        self.frame.borrow_mut().shift_remove(name);
        true
    }

    /// The value of `this`: the root context object.
    pub fn this_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Direct access to this frame's bindings (tests read results back
    /// through this).
    pub fn frame(&self) -> &Rc<RefCell<ObjectMap>> {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_shadows_parent() {
        let root = ScopeContext::from_pairs([("a", Value::Number(1.0))]);
        let child = root.child();
        assert!(matches!(child.get("a"), Some(Value::Number(n)) if n == 1.0));

        child.set("a", Value::Number(2.0));
        assert!(matches!(child.get("a"), Some(Value::Number(n)) if n == 2.0));
        assert!(matches!(root.get("a"), Some(Value::Number(n)) if n == 1.0));
    }

    #[test]
    fn test_this_is_root_frame() {
        let root = ScopeContext::from_pairs([("a", Value::Number(1.0))]);
        let child = root.child();
        child.set("b", Value::Number(2.0));
        let this = child.this_value();
        let Value::Object(map) = this else {
            panic!("this must be an object");
        };
        assert!(map.borrow().contains_key("a"));
        assert!(!map.borrow().contains_key("b"));
    }
}
