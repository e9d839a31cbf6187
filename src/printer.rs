use crate::types::{Closure, Expression, Value};
use itertools::Itertools;
use std::fmt;

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::List(elements) => write!(f, "({})", elements.iter().join(" ")),
            Expression::Number(value) => write!(f, "{}", value),
            Expression::Symbol(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<procedure ({})>", self.parameters.iter().join(" "))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Bool(true) => write!(f, "true"),
            Value::Bool(false) => write!(f, "false"),
            Value::Closure(c) => write!(f, "{}", c),
            Value::Primitive(p) => write!(f, "#<primitive {}>", p.name),
            // define has no result worth showing
            Value::Unspecified => Ok(()),
        }
    }
}
