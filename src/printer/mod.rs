use std::io::{self, Write};

use crate::{
    parser::{BasicBlock, Instruction, InstructionKind, Program},
    visitor::{walk_block, Visitor},
};

/// Writes the tree back out as source, expanding folded runs.
/// A `ClearCell` is always spelled `[+]`.
pub struct Printer<W: Write> {
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visitor for Printer<W> {
    type Error = io::Error;

    fn visit_instruction(&mut self, instruction: &Instruction) -> io::Result<()> {
        let c = match instruction.kind {
            InstructionKind::Increment => b'+',
            InstructionKind::Decrement => b'-',
            InstructionKind::ShiftLeft => b'<',
            InstructionKind::ShiftRight => b'>',
            InstructionKind::Input => b',',
            InstructionKind::Output => b'.',
            InstructionKind::ClearCell => return self.out.write_all(b"[+]"),
        };
        self.out.write_all(&vec![c; instruction.repeat])
    }

    fn visit_loop(&mut self, body: &BasicBlock) -> io::Result<()> {
        self.out.write_all(b"[")?;
        walk_block(self, body)?;
        self.out.write_all(b"]")
    }

    fn visit_program(&mut self, program: &Program) -> io::Result<()> {
        walk_block(self, &program.body)?;
        self.out.write_all(b"\n")
    }
}

/// Canonical source for `program`, with the trailing newline
pub fn print_program(program: &Program) -> io::Result<String> {
    let mut printer = Printer::new(Vec::new());
    program.accept(&mut printer)?;
    Ok(String::from_utf8_lossy(&printer.into_inner()).into_owned())
}
