use crate::core;
use crate::types::{Symbol, Value};
use itertools::Itertools;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

type Frame = HashMap<Symbol, Value>;

/// One scope. Children point at their parent; parents know nothing of their children, so the
/// chain is only ever walked outwards.
#[derive(Debug)]
pub struct Environment {
    frame: RefCell<Frame>,
    parent: Option<Rc<Environment>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UndefinedName(pub Symbol);

impl fmt::Display for UndefinedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "undefined name: {}", self.0)
    }
}

impl Environment {
    fn empty() -> Self {
        Self {
            frame: RefCell::new(Frame::new()),
            parent: None,
        }
    }

    pub fn spawn_from(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self {
            frame: RefCell::new(Frame::new()),
            parent: Some(parent.clone()),
        })
    }

    /// Binds `key` in this frame only. An outer binding with the same name is shadowed,
    /// never touched.
    pub fn set<T>(&self, key: T, value: Value) -> Option<Value>
    where
        T: Into<Symbol>,
    {
        self.frame.borrow_mut().insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        match self.frame.borrow().get(key) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|parent| parent.get(key)),
        }
    }

    pub fn fetch(&self, key: &Symbol) -> Result<Value, UndefinedName> {
        self.get(key).ok_or_else(|| UndefinedName(key.clone()))
    }

    pub fn defines_locally(&self, key: &str) -> bool {
        self.frame.borrow().contains_key(key)
    }

    /// A fresh top-level environment holding the boolean constants and the primitives.
    pub fn global() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl Default for Environment {
    fn default() -> Self {
        let env = Self::empty();
        env.set("true", Value::Bool(true));
        env.set("false", Value::Bool(false));
        for (&name, &func) in core::CORE.iter() {
            env.set(name, Value::Primitive(func));
        }
        env
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame.borrow();
        write!(f, "{{{}}}", frame.keys().map(|k| k.as_str()).sorted().join(" "))?;
        if let Some(parent) = &self.parent {
            write!(f, " -> {}", parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_has_constants_and_primitives() {
        let env = Environment::global();
        assert_eq!(env.get("true"), Some(Value::Bool(true)));
        assert_eq!(env.get("false"), Some(Value::Bool(false)));
        for name in &["+", "-", "*", "=", "<"] {
            assert!(env.defines_locally(name), "missing primitive {}", name);
        }
    }

    #[test]
    fn lookup_walks_outwards() {
        let global = Environment::global();
        global.set("x", Value::Integer(1));
        let child = Environment::spawn_from(&global);
        let grandchild = Environment::spawn_from(&child);
        assert_eq!(grandchild.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let global = Environment::global();
        global.set("x", Value::Integer(1));
        let child = Environment::spawn_from(&global);
        child.set("x", Value::Integer(2));
        assert_eq!(child.get("x"), Some(Value::Integer(2)));
        assert_eq!(global.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn parent_sees_no_child_bindings() {
        let global = Environment::global();
        let child = Environment::spawn_from(&global);
        child.set("y", Value::Integer(3));
        assert_eq!(global.get("y"), None);
    }

    #[test]
    fn later_definitions_are_visible_through_the_chain() {
        let global = Environment::global();
        let child = Environment::spawn_from(&global);
        assert_eq!(child.get("late"), None);
        global.set("late", Value::Integer(7));
        assert_eq!(child.get("late"), Some(Value::Integer(7)));
    }

    #[test]
    fn fetch_reports_the_missing_name() {
        let env = Environment::global();
        assert_eq!(
            env.fetch(&Symbol::from("nope")),
            Err(UndefinedName(Symbol::from("nope")))
        );
    }

    #[test]
    fn display_lists_frames_outwards() {
        let global = Rc::new(Environment::empty());
        global.set("b", Value::Integer(1));
        global.set("a", Value::Integer(2));
        let child = Environment::spawn_from(&global);
        child.set("z", Value::Integer(3));
        assert_eq!(child.to_string(), "{z} -> {a b}");
    }
}
