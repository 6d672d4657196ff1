use bitflags::bitflags;
use thiserror::Error;

use crate::lexer::{lexer::Lexer, Position};

pub mod parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `<`
    ShiftLeft,
    /// `>`
    ShiftRight,
    /// `,`
    Input,
    /// `.`
    Output,
    /// `[+]` / `[-]`, only ever produced by the parser
    ClearCell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstructionKind,
    /// Always >= 1
    pub repeat: usize,
}

impl Instruction {
    pub fn from_char(c: char, repeat: usize) -> Result<Instruction, ParseError> {
        let kind = match c {
            '+' => InstructionKind::Increment,
            '-' => InstructionKind::Decrement,
            '<' => InstructionKind::ShiftLeft,
            '>' => InstructionKind::ShiftRight,
            ',' => InstructionKind::Input,
            '.' => InstructionKind::Output,
            found => return Err(ParseError::InvalidInstructionCharacter { found }),
        };

        Ok(Instruction {
            kind,
            repeat: repeat.max(1),
        })
    }

    pub fn clear_cell() -> Instruction {
        Instruction {
            kind: InstructionKind::ClearCell,
            repeat: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Instruction(Instruction),
    Loop(BasicBlock),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicBlock {
    pub nodes: Vec<Node>,
}

/// The root block, unlike a loop it runs exactly once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub body: BasicBlock,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParseFlags: u8 {
        /// Fold runs of the same instruction into one counted instruction
        const FOLD_RUNS = 0b001;
        /// Replace `[+]` / `[-]` loops with a single `ClearCell`
        const CLEAR_IDIOM = 0b010;
        /// Treat a `]` with no open loop as the end of the program
        const LENIENT_LOOP_END = 0b100;
    }
}

impl Default for ParseFlags {
    fn default() -> Self {
        ParseFlags::FOLD_RUNS | ParseFlags::CLEAR_IDIOM
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{found}' is not an instruction")]
    InvalidInstructionCharacter { found: char },

    #[error("Loop opened at {position} is never closed")]
    UnterminatedLoop { position: Position },

    #[error("Found ']' at {position} with no loop to close")]
    UnmatchedLoopEnd { position: Position },
}

/// Lex and parse `source` with the default flags
pub fn parse(source: &str) -> Result<Program, ParseError> {
    parse_with(source, ParseFlags::default())
}

pub fn parse_with(source: &str, flags: ParseFlags) -> Result<Program, ParseError> {
    let tokens = Lexer::new(source).tokenize();
    parser::Parser::new(&tokens, flags).parse_program()
}

/// Raw bytes are fine, anything that isn't UTF-8 can only ever be part of a comment
pub fn parse_bytes(source: &[u8], flags: ParseFlags) -> Result<Program, ParseError> {
    parse_with(&String::from_utf8_lossy(source), flags)
}
