use super::{LexerToken, LexerTokenKind, Position};

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human Readable positions in file */
    pub cur_line: usize,
    pub cur_col: usize,

    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a str) -> Lexer<'a> {
        Lexer {
            cur_col: 1,
            cur_line: 1,

            chars: chars.chars().peekable(),
        }
    }

    fn transform_to_type(&mut self, c: char) -> LexerTokenKind {
        match c {
            '>' => LexerTokenKind::ShiftRight,
            '<' => LexerTokenKind::ShiftLeft,
            '+' => LexerTokenKind::Increment,
            '-' => LexerTokenKind::Decrement,
            '.' => LexerTokenKind::Write,
            ',' => LexerTokenKind::Read,
            '[' => LexerTokenKind::JumpStart,
            ']' => LexerTokenKind::JumpEnd,
            c => {
                // Simplify the comment stream down to strings
                let mut comment = String::from(c);
                while let Some(&next) = self.chars.peek() {
                    if LexerTokenKind::is_command_char(next) || next.is_whitespace() {
                        break;
                    }
                    if let Some(next) = self.consume_char() {
                        comment.push(next);
                    }
                }

                LexerTokenKind::Comment(comment)
            }
        }
    }

    fn consume_char(&mut self) -> Option<char> {
        match self.chars.next() {
            Some(c) => {
                self.cur_col += 1;
                if c == '\n' {
                    self.cur_line += 1;
                    self.cur_col = 1;
                }
                Some(c)
            }
            None => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.consume_char();
        }
    }

    fn position(&self) -> Position {
        Position {
            line: self.cur_line,
            col: self.cur_col,
        }
    }

    pub fn next_token(&mut self) -> LexerToken {
        self.skip_whitespace();

        let position = self.position();
        let kind = match self.consume_char() {
            Some(c) => self.transform_to_type(c),
            None => LexerTokenKind::EOF,
        };

        LexerToken { kind, position }
    }

    /// Every token in the source, not including the trailing `EOF`
    pub fn tokenize(&mut self) -> Vec<LexerToken> {
        let mut v = vec![];
        loop {
            match self.next_token() {
                LexerToken {
                    kind: LexerTokenKind::EOF,
                    ..
                } => break v,
                tok => v.push(tok),
            }
        }
    }
}
