use std::iter::Peekable;

use crate::lexer::{LexerToken, LexerTokenKind, Position};

use super::{BasicBlock, Instruction, InstructionKind, Node, ParseError, ParseFlags, Program};

pub struct Parser<'a> {
    tokens: Peekable<std::slice::Iter<'a, LexerToken>>,
    flags: ParseFlags,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [LexerToken], flags: ParseFlags) -> Parser<'a> {
        Parser {
            tokens: tokens.iter().peekable(),
            flags,
        }
    }

    /// Parses until the `]` matching `opened_at`, or until the end of input for the program block
    pub fn parse_block(&mut self, opened_at: Option<Position>) -> Result<BasicBlock, ParseError> {
        let mut nodes = vec![];

        while let Some(token) = self.tokens.next() {
            match &token.kind {
                // we aren't outputting comments to AST
                LexerTokenKind::Comment(_) => continue,
                LexerTokenKind::JumpStart => {
                    let body = self.parse_block(Some(token.position))?;
                    nodes.push(self.close_loop(body));
                }
                // the loop has ended so we can break
                LexerTokenKind::JumpEnd => match opened_at {
                    Some(_) => return Ok(BasicBlock { nodes }),
                    None if self.flags.contains(ParseFlags::LENIENT_LOOP_END) => {
                        log::debug!("Stopping at unmatched ']' ({})", token.position);
                        break;
                    }
                    None => {
                        return Err(ParseError::UnmatchedLoopEnd {
                            position: token.position,
                        })
                    }
                },
                LexerTokenKind::EOF => break,
                kind => {
                    let c = match kind.as_char() {
                        Some(c) => c,
                        None => continue,
                    };
                    let repeat = self.fold_run(kind);
                    nodes.push(Node::Instruction(Instruction::from_char(c, repeat)?));
                }
            }
        }

        match opened_at {
            Some(position) => Err(ParseError::UnterminatedLoop { position }),
            None => Ok(BasicBlock { nodes }),
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        Ok(Program {
            body: self.parse_block(None)?,
        })
    }

    /// Consumes every following `kind` token (comments in between are skipped),
    /// returning the length of the run including the one already consumed
    fn fold_run(&mut self, kind: &LexerTokenKind) -> usize {
        let mut repeat = 1;
        if !self.flags.contains(ParseFlags::FOLD_RUNS) {
            return repeat;
        }

        loop {
            while let Some(LexerToken {
                kind: LexerTokenKind::Comment(_),
                ..
            }) = self.tokens.peek()
            {
                self.tokens.next();
            }

            match self.tokens.peek() {
                Some(next) if next.kind == *kind => {
                    self.tokens.next();
                    repeat += 1;
                }
                _ => break repeat,
            }
        }
    }

    fn close_loop(&self, body: BasicBlock) -> Node {
        if self.flags.contains(ParseFlags::CLEAR_IDIOM) {
            // `[-]` and `[+]` zero the cell whatever the inner count is
            if let [Node::Instruction(Instruction {
                kind: InstructionKind::Increment | InstructionKind::Decrement,
                ..
            })] = body.nodes.as_slice()
            {
                return Node::Instruction(Instruction::clear_cell());
            }
        }

        Node::Loop(body)
    }
}
