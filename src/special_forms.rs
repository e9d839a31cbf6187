use crate::environment::Environment;
use crate::evaluator::{eval, Result};
use crate::types::{Arity, Closure, Expression, Symbol, Value};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
pub enum SyntaxError {
    DefineTargetNotASymbol(Expression),
    ParametersNotGivenAsList(Expression),
    ParameterNotASymbol(Expression),
    BindingsNotGivenAsList(Expression),
    BadBinding(Expression),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::DefineTargetNotASymbol(e) => {
                write!(f, "define: cannot bind to {}", e)
            }
            SyntaxError::ParametersNotGivenAsList(e) => {
                write!(f, "lambda: expected a parameter list, got {}", e)
            }
            SyntaxError::ParameterNotASymbol(e) => {
                write!(f, "lambda: parameter {} is not a symbol", e)
            }
            SyntaxError::BindingsNotGivenAsList(e) => {
                write!(f, "let: expected a list of bindings, got {}", e)
            }
            SyntaxError::BadBinding(e) => write!(f, "let: malformed binding {}", e),
        }
    }
}

/// `(if TEST THEN ELSE)`. Only the boolean false selects ELSE; `0` and `()` count as true.
pub fn apply_if(args: &[Expression], env: &Rc<Environment>) -> Result {
    Arity::exactly(3).validate_for(args.len(), "if")?;
    let condition = eval(&args[0], env)?;
    if condition == Value::Bool(false) {
        eval(&args[2], env)
    } else {
        eval(&args[1], env)
    }
}

/// `(define NAME EXPR)`, or `(define (NAME PARAM...) BODY)` as shorthand for binding a
/// lambda. The binding goes into `env`'s own frame.
pub fn apply_define(args: &[Expression], env: &Rc<Environment>) -> Result {
    Arity::exactly(2).validate_for(args.len(), "define")?;
    let (key, value) = match &args[0] {
        Expression::Symbol(s) => (s, eval(&args[1], env)?),
        Expression::List(signature) => match signature.split_first() {
            Some((Expression::Symbol(s), parameters)) => {
                (s, make_closure(parameters, &args[1], env)?)
            }
            _ => return Err(SyntaxError::DefineTargetNotASymbol(args[0].clone()).into()),
        },
        other => return Err(SyntaxError::DefineTargetNotASymbol(other.clone()).into()),
    };
    log::debug!("define {} as {}", key, value);
    env.set(key.clone(), value);
    Ok(Value::Unspecified)
}

/// `(lambda (PARAM...) BODY)`. Captures `env` itself rather than a copy of it.
pub fn apply_lambda(args: &[Expression], env: &Rc<Environment>) -> Result {
    Arity::exactly(2).validate_for(args.len(), "lambda")?;
    let parameters = args[0]
        .as_list()
        .ok_or_else(|| SyntaxError::ParametersNotGivenAsList(args[0].clone()))?;
    make_closure(parameters, &args[1], env)
}

fn make_closure(parameters: &[Expression], body: &Expression, env: &Rc<Environment>) -> Result {
    let extract_symbol = |obj: &Expression| {
        obj.as_symbol()
            .cloned()
            .ok_or_else(|| SyntaxError::ParameterNotASymbol(obj.clone()))
    };
    let parameters: std::result::Result<Vec<Symbol>, _> =
        parameters.iter().map(extract_symbol).collect();
    let closure = Closure {
        parameters: parameters?,
        body: body.clone(),
        parent: env.clone(),
    };
    Ok(Value::Closure(Rc::new(closure)))
}

/// `(let ((NAME EXPR)...) BODY)`. Every EXPR is evaluated in `env`, then BODY runs in a new
/// frame holding the bindings, exactly as if an anonymous lambda had been applied.
pub fn apply_let(args: &[Expression], env: &Rc<Environment>) -> Result {
    Arity::exactly(2).validate_for(args.len(), "let")?;
    let bindings = args[0]
        .as_list()
        .ok_or_else(|| SyntaxError::BindingsNotGivenAsList(args[0].clone()))?;
    let child = Environment::spawn_from(env);
    for binding in bindings {
        match binding.as_list() {
            Some([Expression::Symbol(name), value]) => {
                let value = eval(value, env)?;
                child.set(name.clone(), value);
            }
            _ => return Err(SyntaxError::BadBinding(binding.clone()).into()),
        }
    }
    eval(&args[1], &child)
}
