use thiserror::Error;

use crate::{interpreter::RuntimeError, parser::ParseError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO Error: {0}")]
    FileIO(
        #[from]
        std::io::Error,
    ),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
