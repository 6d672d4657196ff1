pub mod c;

use std::io;

use crate::{interpreter::RuntimeConfig, parser::Program};

pub use self::c::CTranspiler;

/// Emit a standalone C program that behaves like the interpreter run with `config`
pub fn transpile_c(program: &Program, config: RuntimeConfig) -> io::Result<String> {
    let mut transpiler = CTranspiler::new(Vec::new(), config);
    program.accept(&mut transpiler)?;
    Ok(String::from_utf8_lossy(&transpiler.into_inner()).into_owned())
}
