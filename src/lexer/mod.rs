use std::fmt;

pub mod lexer;

#[derive(Debug, Clone, PartialEq)]
pub enum LexerTokenKind {
    // `>`: Increment the `data pointer` by one
    ShiftRight,
    // `<`: Decrement the `data pointer` by one
    ShiftLeft,

    // `+`: Increment the byte at the `data pointer` by one
    Increment,
    // `-`: Decrement the byte at the `data pointer` by one
    Decrement,

    // `.`: Write the byte at the `data pointer` to the `output device`
    Write,
    // `,`: Read the next byte from the `input device` and write it to the `data pointer`
    Read,

    // `[`: If the byte at the `data pointer` is zero, then jump the `instruction pointer` forward to the instruction after the matching `]`
    JumpStart,
    // `]`: If the byte at the `data pointer` is non-zero then jump the `instruction pointer` back to the instruction after the matching `[`
    JumpEnd,

    // End of file: no more tokens left
    EOF,

    // Comment every other character
    Comment(String),
}

impl LexerTokenKind {
    /// The source character for a command token, `None` for comments and EOF
    pub fn as_char(&self) -> Option<char> {
        match self {
            LexerTokenKind::ShiftRight => Some('>'),
            LexerTokenKind::ShiftLeft => Some('<'),
            LexerTokenKind::Increment => Some('+'),
            LexerTokenKind::Decrement => Some('-'),
            LexerTokenKind::Write => Some('.'),
            LexerTokenKind::Read => Some(','),
            LexerTokenKind::JumpStart => Some('['),
            LexerTokenKind::JumpEnd => Some(']'),
            LexerTokenKind::EOF | LexerTokenKind::Comment(_) => None,
        }
    }

    pub fn is_command_char(c: char) -> bool {
        matches!(c, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']')
    }
}

/// Human readable location of a token in the source (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexerToken {
    pub kind: LexerTokenKind,
    pub position: Position,
}
