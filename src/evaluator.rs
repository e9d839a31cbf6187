use crate::environment::{Environment, UndefinedName};
use crate::special_forms::{self, SyntaxError};
use crate::types::{BadArgCount, Closure, Expression, PrimitiveFn, TypeMismatch, Value};
use itertools::Itertools;

use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;
#[derive(Debug, PartialEq)]
pub enum Error {
    UndefinedName(UndefinedName),
    ArityMismatch(BadArgCount),
    NotAProcedure(Value),
    UnknownExpressionType(Expression),
    BadSyntax(SyntaxError),
    TypeMismatch(TypeMismatch),
    IntegerOverflow(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UndefinedName(e) => write!(f, "{}", e),
            Error::ArityMismatch(e) => write!(f, "{}", e),
            Error::NotAProcedure(v) => write!(f, "application of non-procedure {}", v),
            Error::UnknownExpressionType(e) => write!(f, "unknown expression type: {}", e),
            Error::BadSyntax(e) => write!(f, "bad syntax: {}", e),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::IntegerOverflow(name) => write!(f, "integer overflow in {}", name),
        }
    }
}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::ArityMismatch(e)
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Self::BadSyntax(e)
    }
}

/// Evaluates `ast` in `env`. Special forms are recognised by the symbol at the head of a
/// list; every other non-empty list is an application.
pub fn eval(ast: &Expression, env: &Rc<Environment>) -> Result {
    log::trace!("eval {}", ast);
    match ast {
        Expression::Number(n) => Ok(Value::Integer(*n)),
        Expression::Symbol(name) => env.fetch(name).map_err(Error::UndefinedName),
        Expression::List(list) => match list.split_first() {
            None => Err(Error::UnknownExpressionType(ast.clone())),
            Some((Expression::Symbol(head), args)) => match head.as_str() {
                "if" => special_forms::apply_if(args, env),
                "define" => special_forms::apply_define(args, env),
                "lambda" => special_forms::apply_lambda(args, env),
                "let" => special_forms::apply_let(args, env),
                _ => eval_application(list, env),
            },
            Some(_) => eval_application(list, env),
        },
    }
}

fn eval_application(list: &[Expression], env: &Rc<Environment>) -> Result {
    let evaluated = evaluate_sequence_elementwise(list, env)?;
    match evaluated.split_first() {
        Some((callable, args)) => apply(callable, args),
        None => unreachable!("empty lists are rejected before application"),
    }
}

/// Calls `callable` with already evaluated operands.
pub fn apply(callable: &Value, args: &[Value]) -> Result {
    match callable {
        Value::Primitive(f) => call_primitive(f, args),
        Value::Closure(f) => {
            let env = make_closure_env(f, args)?;
            let result = eval(&f.body, &env);
            log::trace!("closure returned {:?}", result);
            result
        }
        other => Err(Error::NotAProcedure(other.clone())),
    }
}

// Left to right; the first failure wins.
pub fn evaluate_sequence_elementwise(
    seq: &[Expression],
    env: &Rc<Environment>,
) -> std::result::Result<Vec<Value>, Error> {
    seq.iter().map(|obj| eval(obj, env)).collect()
}

pub(crate) fn pretty_print_args(args: &[Value]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_primitive(func: &PrimitiveFn, args: &[Value]) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

// The new frame hangs off the closure's defining environment, not the caller's.
fn make_closure_env(func: &Closure, args: &[Value]) -> Result<Rc<Environment>> {
    log::trace!("Call {} with {}", func, pretty_print_args(args));
    func.arity().validate_for(args.len(), &func.to_string())?;
    let env = Environment::spawn_from(&func.parent);
    for (key, value) in func.parameters.iter().zip(args) {
        env.set(key.clone(), value.clone());
    }
    Ok(env)
}
