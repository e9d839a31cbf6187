use crate::environment::Environment;
use crate::types::{Expression, Value};
use crate::{evaluator, reader};
use derive_more::From;
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;
#[derive(Debug, PartialEq, From)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

pub fn read(line: &str) -> Result<Vec<Expression>> {
    Ok(reader::parse(line)?)
}

pub fn eval(ast: &Expression, env: &Rc<Environment>) -> Result {
    Ok(evaluator::eval(ast, env)?)
}

/// Reads `line` and evaluates its forms in order against `env`. Evaluation stops at the first
/// failure, which is the last entry returned; definitions made before it are kept.
pub fn rep(line: &str, env: &Rc<Environment>) -> Vec<Result> {
    let forms = match read(line) {
        Ok(forms) => forms,
        Err(e) => return vec![Err(e)],
    };
    let mut results = Vec::with_capacity(forms.len());
    for form in &forms {
        let result = eval(form, env);
        let failed = result.is_err();
        results.push(result);
        if failed {
            log::debug!("abandoning the rest of {:?}", line);
            break;
        }
    }
    results
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Runs every form in `text`, returning the last value or the first evaluation error.
    pub(crate) fn run(text: &str, env: &Rc<Environment>) -> evaluator::Result {
        let mut last = Value::Unspecified;
        for result in rep(text, env) {
            last = match result {
                Ok(value) => value,
                Err(Error::Eval(e)) => return Err(e),
                Err(Error::Read(e)) => panic!("could not read {:?}: {}", text, e),
            };
        }
        Ok(last)
    }

    pub(crate) fn run_fresh(text: &str) -> evaluator::Result {
        run(text, &Environment::global())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_form_yields_a_result() {
        let env = Environment::global();
        assert_eq!(
            rep("(define x 1) (+ x 1) x", &env),
            vec![Ok(Value::Unspecified), Ok(Value::Integer(2)), Ok(Value::Integer(1))]
        );
    }

    #[test]
    fn read_errors_evaluate_nothing() {
        let env = Environment::global();
        assert_eq!(
            rep("(define x 1) (+ x 1", &env),
            vec![Err(Error::Read(reader::Error::UnmatchedOpenParen))]
        );
        assert_eq!(env.get("x"), None);
    }

    #[test]
    fn failure_keeps_earlier_definitions() {
        let env = Environment::global();
        let results = rep("(define x 5) (boom) (define y 6)", &env);
        assert_eq!(results.len(), 2);
        assert!(matches!(results[1], Err(Error::Eval(_))));
        assert_eq!(env.get("x"), Some(Value::Integer(5)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn session_state_persists_between_lines() {
        let env = Environment::global();
        rep("(define (double n) (* 2 n))", &env);
        assert_eq!(rep("(double 21)", &env), vec![Ok(Value::Integer(42))]);
    }
}
