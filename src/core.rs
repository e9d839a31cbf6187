use crate::evaluator::{self, Error};
use crate::types::{Arity, Int, PrimitiveFn, Value};
use std::collections::HashMap;

fn grab_ints(args: &[Value]) -> evaluator::Result<Vec<Int>> {
    let type_check: Result<Vec<_>, _> = args.iter().map(|o| o.as_int()).collect();
    type_check.map_err(Error::TypeMismatch)
}

fn fold_ints(
    args: &[Value],
    name: &'static str,
    identity: Int,
    op: fn(Int, Int) -> Option<Int>,
) -> evaluator::Result {
    grab_ints(args)?
        .into_iter()
        .try_fold(identity, op)
        .map(Value::Integer)
        .ok_or(Error::IntegerOverflow(name))
}

const SUM: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: |args| fold_ints(args, "+", 0, Int::checked_add),
    arity: Arity::at_least(0),
};

const MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: |args| fold_ints(args, "*", 1, Int::checked_mul),
    arity: Arity::at_least(0),
};

const SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: sub_,
    arity: Arity::between(1, 2),
};

fn sub_(args: &[Value]) -> evaluator::Result {
    let result = match grab_ints(args)?.as_slice() {
        [x] => x.checked_neg(),
        [x, y] => x.checked_sub(*y),
        _ => unreachable!("arity checked before the call"),
    };
    result.map(Value::Integer).ok_or(Error::IntegerOverflow("-"))
}

const EQUAL: PrimitiveFn = PrimitiveFn {
    name: "=",
    fn_ptr: |args| Ok(Value::Bool(args[0] == args[1])),
    arity: Arity::exactly(2),
};

const LESS_THAN: PrimitiveFn = PrimitiveFn {
    name: "<",
    fn_ptr: less_than_,
    arity: Arity::exactly(2),
};

fn less_than_(args: &[Value]) -> evaluator::Result {
    match grab_ints(args)?.as_slice() {
        [x, y] => Ok(Value::Bool(x < y)),
        _ => unreachable!("arity checked before the call"),
    }
}

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub static ref CORE: Namespace = {
        let mut map = Namespace::new();
        for func in [
            // Arithmetic
            SUM,
            SUB,
            MUL,
            // Comparisons
            EQUAL,
            LESS_THAN,
        ].iter() {
            map.insert(func.name, func);
        }
        map
    };
}
