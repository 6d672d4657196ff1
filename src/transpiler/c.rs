use std::io::{self, Write};

use crate::{
    interpreter::{EofBehavior, RuntimeConfig},
    parser::{BasicBlock, Instruction, InstructionKind, Program},
    visitor::{walk_block, Visitor},
};

/*
    The emitted program keeps an index `p` into a static `tape` rather than a raw pointer,
    so bounds checks compare integers and never form an out of range pointer.

    Tape faults and the `error` EOF policy print the interpreter's message to stderr
    and exit with status 1 after flushing whatever was already written.
*/

const PROLOGUE: &str = r#"#include <stdio.h>
#include <stdlib.h>

static unsigned char tape[TAPE_SIZE];

static void fail(const char *message) {
    fflush(stdout);
    fputs(message, stderr);
    fputc('\n', stderr);
    exit(1);
}

static void shift_right(size_t *p, size_t by) {
    if (by >= TAPE_SIZE - *p) {
        fail("Data pointer left the tape");
    }
    *p += by;
}

static void shift_left(size_t *p, size_t by) {
    if (by > *p) {
        fail("Data pointer left the tape");
    }
    *p -= by;
}

"#;

pub struct CTranspiler<W: Write> {
    out: W,
    config: RuntimeConfig,
    depth: usize,
}

impl<W: Write> CTranspiler<W> {
    pub fn new(out: W, config: RuntimeConfig) -> Self {
        Self {
            out,
            config,
            depth: 1,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, statement: &str) -> io::Result<()> {
        writeln!(self.out, "{:indent$}{}", "", statement, indent = self.depth * 4)
    }

    /// `statement` once, or wrapped in a counted `for` when repeated
    fn repeated(&mut self, statement: &str, repeat: usize) -> io::Result<()> {
        if repeat == 1 {
            self.line(statement)
        } else {
            self.line(&format!(
                "for (size_t i = 0; i < {repeat}; i++) {statement}"
            ))
        }
    }

    fn write_read_cell(&mut self) -> io::Result<()> {
        let on_eof = match self.config.eof {
            EofBehavior::Zero => "tape[p] = 0;\n        return;",
            EofBehavior::Unchanged => "return;",
            EofBehavior::Error => "fail(\"Tried to read past the end of input\");",
        };
        writeln!(
            self.out,
            "static void read_cell(size_t p) {{\n    int c = getchar();\n    if (c == EOF) {{\n        {on_eof}\n    }}\n    tape[p] = (unsigned char)c;\n}}\n"
        )
    }
}

impl<W: Write> Visitor for CTranspiler<W> {
    type Error = io::Error;

    fn visit_instruction(&mut self, instruction: &Instruction) -> io::Result<()> {
        let repeat = instruction.repeat;
        match instruction.kind {
            // cells are bytes, so only the count modulo 256 matters
            InstructionKind::Increment => match repeat % 256 {
                0 => Ok(()),
                by => self.line(&format!("tape[p] += {by};")),
            },
            InstructionKind::Decrement => match repeat % 256 {
                0 => Ok(()),
                by => self.line(&format!("tape[p] -= {by};")),
            },
            InstructionKind::ShiftRight => self.line(&format!("shift_right(&p, {repeat});")),
            InstructionKind::ShiftLeft => self.line(&format!("shift_left(&p, {repeat});")),
            InstructionKind::Input => self.repeated("read_cell(p);", repeat),
            InstructionKind::Output => self.repeated("putchar(tape[p]);", repeat),
            InstructionKind::ClearCell => self.line("tape[p] = 0;"),
        }
    }

    fn visit_loop(&mut self, body: &BasicBlock) -> io::Result<()> {
        self.line("while (tape[p]) {")?;
        self.depth += 1;
        walk_block(self, body)?;
        self.depth -= 1;
        self.line("}")
    }

    fn visit_program(&mut self, program: &Program) -> io::Result<()> {
        writeln!(self.out, "#define TAPE_SIZE {}", self.config.tape_size.max(1))?;
        self.out.write_all(PROLOGUE.as_bytes())?;
        self.write_read_cell()?;

        writeln!(self.out, "int main(void) {{")?;
        self.line("size_t p = 0;")?;
        walk_block(self, &program.body)?;
        self.line("return 0;")?;
        writeln!(self.out, "}}")
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        parser::parse,
        transpiler::transpile_c,
    };

    use super::*;

    fn body_of(source: &str) -> Vec<String> {
        let c = transpile_c(&parse(source).unwrap(), RuntimeConfig::default()).unwrap();
        let start = c.find("int main(void) {\n").unwrap() + "int main(void) {\n".len();
        c[start..]
            .lines()
            .map(|line| line.to_string())
            .collect()
    }

    #[test]
    fn test_end_to_end_example() {
        assert_eq!(
            body_of("+++.[-]"),
            vec![
                "    size_t p = 0;",
                "    tape[p] += 3;",
                "    putchar(tape[p]);",
                "    tape[p] = 0;",
                "    return 0;",
                "}",
            ]
        );
    }

    #[test]
    fn test_nested_loops_are_indented() {
        assert_eq!(
            body_of("[>[<..]-]"),
            vec![
                "    size_t p = 0;",
                "    while (tape[p]) {",
                "        shift_right(&p, 1);",
                "        while (tape[p]) {",
                "            shift_left(&p, 1);",
                "            for (size_t i = 0; i < 2; i++) putchar(tape[p]);",
                "        }",
                "        tape[p] -= 1;",
                "    }",
                "    return 0;",
                "}",
            ]
        );
    }

    #[test]
    fn test_counts_reduced_modulo_byte() {
        let body = body_of(&format!("{}>{}", "+".repeat(258), "-".repeat(256)));
        assert_eq!(
            body,
            vec![
                "    size_t p = 0;",
                "    tape[p] += 2;",
                "    shift_right(&p, 1);",
                "    return 0;",
                "}",
            ]
        );
    }

    #[test]
    fn test_prologue_uses_config() {
        let config = RuntimeConfig {
            tape_size: 64,
            eof: EofBehavior::Error,
        };
        let c = transpile_c(&parse(",").unwrap(), config).unwrap();
        assert!(c.starts_with("#define TAPE_SIZE 64\n#include <stdio.h>"));
        assert!(c.contains("fail(\"Tried to read past the end of input\");"));
        assert!(c.contains("    read_cell(p);\n"));
    }

    #[test]
    fn test_braces_balance() {
        let c = transpile_c(
            &parse("++[>+[>++<-]<-[,.]]").unwrap(),
            RuntimeConfig::default(),
        )
        .unwrap();
        assert_eq!(c.matches('{').count(), c.matches('}').count());
    }
}
