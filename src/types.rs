extern crate derive_more;
use crate::environment::Environment;
use crate::evaluator;
use derive_more::{Deref, Display};
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

pub type Int = i64;

#[derive(Deref, Display, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self(String::from(name))
    }
}

impl std::borrow::Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Deref, Debug, PartialEq)]
pub struct ExprList(pub Vec<Expression>);

/// The tree the reader produces. Lists are shared so that a closure can hold on to its
/// body without copying it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Symbol(Symbol),
    Number(Int),
    List(Rc<ExprList>),
}

impl Expression {
    pub fn wrap_list(elements: Vec<Expression>) -> Self {
        Self::List(Rc::new(ExprList(elements)))
    }

    pub fn new_symbol(name: &str) -> Self {
        Self::Symbol(Symbol::from(name))
    }

    pub(crate) fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Expression::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_list(&self) -> Option<&[Expression]> {
        match self {
            Expression::List(list) => Some(list.as_slice()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BadArgCount {
    pub name: String,
    pub expected: Arity,
    pub got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let noun = match &self.expected {
            Arity::Between(r) if r.start() == r.end() && *r.end() == 1 => "operand",
            _ => "operands",
        };
        write!(
            f,
            "when evaluating {} expected {} {}, but received {}",
            self.name, self.expected, noun, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn between(low: usize, high: usize) -> Self {
        Self::Between(low..=high)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name: name.into(),
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl PartialEq for Arity {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arity::Between(x), Arity::Between(y)) => x == y,
            (Arity::AtLeast(x), Arity::AtLeast(y)) => x.start == y.start,
            _ => false,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

/// A user procedure. `parent` is shared with whoever else holds the defining environment;
/// when the closure is then bound into that same frame (a `define` at top level or inside a
/// call) the two form an `Rc` cycle, and that frame is never freed.
pub struct Closure {
    pub parameters: Vec<Symbol>,
    pub body: Expression,
    pub parent: Rc<Environment>,
}

impl Closure {
    pub fn arity(&self) -> Arity {
        Arity::exactly(self.parameters.len())
    }
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the parent: the parent may well contain this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Integer(Int),
    Bool(bool),
    Closure(Rc<Closure>),
    Primitive(&'static PrimitiveFn),
    Unspecified,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeMismatch {
    NotAnInt(Value),
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeMismatch::NotAnInt(v) => write!(f, "expected an integer, got {}", v),
        }
    }
}

impl Value {
    pub(crate) fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Value::Integer(x) => Ok(*x),
            _ => Err(TypeMismatch::NotAnInt(self.clone())),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Value::Unspecified)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Integer(x), Integer(y)) => x == y,
            (Bool(x), Bool(y)) => x == y,
            (Closure(x), Closure(y)) => Rc::ptr_eq(x, y),
            (Primitive(x), Primitive(y)) => x.name == y.name,
            (Unspecified, Unspecified) => true,
            (_, _) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_bounds() {
        assert!(Arity::exactly(2).contains(2));
        assert!(!Arity::exactly(2).contains(3));
        assert!(Arity::between(1, 2).contains(1));
        assert!(!Arity::between(1, 2).contains(0));
        assert!(Arity::at_least(0).contains(17));
    }

    #[test]
    fn bad_arg_count_names_the_culprit() {
        let err = Arity::exactly(3).validate_for(2, "if").unwrap_err();
        assert_eq!(err.got, 2);
        assert_eq!(
            err.to_string(),
            "when evaluating if expected exactly 3 operands, but received 2"
        );
    }

    #[test]
    fn single_operand_is_singular() {
        let err = Arity::exactly(1).validate_for(0, "f").unwrap_err();
        assert_eq!(
            err.to_string(),
            "when evaluating f expected exactly 1 operand, but received 0"
        );
        let err = Arity::between(1, 2).validate_for(3, "-").unwrap_err();
        assert_eq!(
            err.to_string(),
            "when evaluating - expected from 1 to 2 operands, but received 3"
        );
    }

    #[test]
    fn booleans_are_not_integers() {
        assert_ne!(Value::Bool(false), Value::Integer(0));
        assert_eq!(
            Value::Bool(true).as_int(),
            Err(TypeMismatch::NotAnInt(Value::Bool(true)))
        );
    }
}
