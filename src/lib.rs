pub mod cmdline;
pub mod core;
pub mod environment;
pub mod evaluator;
pub mod interpreter;
pub mod printer;
pub mod reader;
pub mod special_forms;
pub mod tokens;
pub mod types;

#[macro_use]
extern crate lazy_static;

pub use environment::Environment;
pub use evaluator::{apply, eval};
pub use reader::parse;
pub use tokens::tokenize;
pub use types::{Expression, Value};
