//! Brainf**k parser with a printer, tree-walking interpreter and C transpiler
//! all sharing one folded program tree.

pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod transpiler;
pub mod visitor;

pub use error::Error;
pub use interpreter::{ast_interpreter::AstInterpreter, EofBehavior, Runtime, RuntimeConfig, RuntimeError};
pub use parser::{parse, parse_bytes, parse_with, ParseError, ParseFlags, Program};
pub use printer::{print_program, Printer};
pub use transpiler::{transpile_c, CTranspiler};
pub use visitor::{walk_block, Visitor};
