use std::io::{Read, Write};

use crate::{
    parser::{BasicBlock, Instruction, InstructionKind, Program},
    visitor::{walk_block, Visitor},
};

use super::{Runtime, RuntimeError};

/// Walks the tree directly, applying every node to the runtime
pub struct AstInterpreter<'a, R: Read, W: Write> {
    runtime: &'a mut Runtime<R, W>,
}

impl<'a, R: Read, W: Write> AstInterpreter<'a, R, W> {
    pub fn new(runtime: &'a mut Runtime<R, W>) -> Self {
        Self { runtime }
    }

    pub fn interpret(&mut self, program: &Program) -> Result<(), RuntimeError> {
        program.accept(self)
    }
}

impl<'a, R: Read, W: Write> Visitor for AstInterpreter<'a, R, W> {
    type Error = RuntimeError;

    fn visit_instruction(&mut self, instruction: &Instruction) -> Result<(), RuntimeError> {
        let repeat = instruction.repeat;
        match instruction.kind {
            InstructionKind::Increment => self.runtime.deref_and_add_value(repeat),
            InstructionKind::Decrement => self.runtime.deref_and_sub_value(repeat),
            InstructionKind::ShiftRight => self.runtime.shift_data_pointer(repeat as isize)?,
            InstructionKind::ShiftLeft => self.runtime.shift_data_pointer(-(repeat as isize))?,
            InstructionKind::Input => self.runtime.read(repeat)?,
            InstructionKind::Output => self.runtime.write(repeat)?,
            InstructionKind::ClearCell => self.runtime.clear_value(),
        }
        Ok(())
    }

    fn visit_loop(&mut self, body: &BasicBlock) -> Result<(), RuntimeError> {
        while !self.runtime.value_is_zero() {
            walk_block(self, body)?;
        }
        Ok(())
    }

    fn visit_program(&mut self, program: &Program) -> Result<(), RuntimeError> {
        // written this way since the upper-most block (program) doesn't repeat
        walk_block(self, &program.body)?;
        self.runtime.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use crate::{
        interpreter::{EofBehavior, RuntimeConfig},
        parser::{parse, parse_with, BasicBlock, Node, ParseFlags},
    };

    use super::*;

    fn run_with(source: &str, input: &[u8], config: RuntimeConfig) -> Result<Vec<u8>, RuntimeError> {
        let program = parse(source).unwrap();
        let mut runtime = Runtime::new(config, Cursor::new(input.to_vec()), Vec::new());
        AstInterpreter::new(&mut runtime).interpret(&program)?;
        Ok(runtime.into_output())
    }

    fn run(source: &str, input: &[u8]) -> Vec<u8> {
        run_with(source, input, RuntimeConfig::default()).unwrap()
    }

    fn runtime_after(program: &Program) -> Runtime<Cursor<Vec<u8>>, Vec<u8>> {
        let mut runtime = Runtime::new(RuntimeConfig::default(), Cursor::new(vec![]), Vec::new());
        AstInterpreter::new(&mut runtime).interpret(program).unwrap();
        runtime
    }

    #[rstest]
    #[case::out_1(">+.", b"", b"\x01")]
    #[case::read_and_add(",++.", b"a", b"c")]
    #[case::move_loop("+++[>+<-]>.", b"", b"\x03")]
    #[case::end_to_end("+++.[-]", b"", b"\x03")]
    #[case::end_to_end_cleared("+++.[-].", b"", b"\x03\x00")]
    #[case::folded_output("+++...", b"", b"\x03\x03\x03")]
    #[case::wrap_up("-.", b"", b"\xff")]
    #[case::wrap_down("-+.", b"", b"\x00")]
    #[case::echo(",[.,]", b"hi!", b"hi!")]
    #[case::folded_read(",,.", b"ab", b"b")]
    #[case::no_implicit_output("+", b"", b"")]
    fn test_run(#[case] source: &str, #[case] input: &[u8], #[case] expected: &[u8]) {
        assert_eq!(run(source, input), expected);
    }

    #[test]
    fn test_folded_increment_wraps() {
        assert_eq!(run(&"+".repeat(257), b""), b"");
        assert_eq!(run(&format!("{}.", "+".repeat(257)), b""), b"\x01");
        assert_eq!(run(&format!("{}.", "-".repeat(513)), b""), b"\xff");
    }

    #[test]
    fn test_hello_world() {
        let source = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
        assert_eq!(run(source, b""), b"Hello World!\n");
    }

    #[rstest]
    #[case::zero(EofBehavior::Zero, Ok(b"\x00".to_vec()))]
    #[case::unchanged(EofBehavior::Unchanged, Ok(b"\x05".to_vec()))]
    #[case::error(EofBehavior::Error, Err(()))]
    fn test_eof_behavior(#[case] eof: EofBehavior, #[case] expected: Result<Vec<u8>, ()>) {
        let config = RuntimeConfig { eof, ..RuntimeConfig::default() };
        let result = run_with("+++++,.", b"", config);
        match expected {
            Ok(bytes) => assert_eq!(result.unwrap(), bytes),
            Err(()) => assert!(matches!(result, Err(RuntimeError::EndOfInput))),
        }
    }

    #[rstest]
    #[case::left_of_zero("<", 10)]
    #[case::past_the_end(">>>>", 4)]
    #[case::folded_jump(">>>>>>>>>>", 5)]
    fn test_tape_bounds(#[case] source: &str, #[case] tape_size: usize) {
        let config = RuntimeConfig { tape_size, ..RuntimeConfig::default() };
        assert!(matches!(
            run_with(source, b"", config),
            Err(RuntimeError::TapeBoundsExceeded { .. })
        ));
    }

    #[test]
    fn test_last_cell_is_reachable() {
        let config = RuntimeConfig { tape_size: 4, ..RuntimeConfig::default() };
        assert_eq!(run_with(">>>+.<<<.", b"", config).unwrap(), b"\x01\x00");
    }

    #[test]
    fn test_clear_idiom_equivalence() {
        for start in [0usize, 1, 7, 128, 255] {
            let setup = format!(">{}", "+".repeat(start));
            let mut clear = parse(&setup).unwrap();
            clear.body.nodes.push(Node::Instruction(Instruction::clear_cell()));
            let expected = runtime_after(&clear);

            for r in 1..=4 {
                for op in ["+", "-"] {
                    let looped = format!("{setup}[{}]", op.repeat(r));
                    let idiom = runtime_after(&parse(&looped).unwrap());

                    assert_eq!(idiom.tape()[1], 0);
                    assert_eq!(idiom.tape(), expected.tape());
                    assert_eq!(idiom.data_pointer(), expected.data_pointer());
                }
            }

            // a single step always reaches zero, so the literal loop agrees too
            for op in ["+", "-"] {
                let looped = format!("{setup}[{op}]");
                let literal = runtime_after(&parse_with(&looped, ParseFlags::FOLD_RUNS).unwrap());
                assert_eq!(literal.tape(), expected.tape());
                assert_eq!(literal.data_pointer(), expected.data_pointer());
            }
        }
    }

    #[test]
    fn test_clear_cell_is_idempotent() {
        let program = Program {
            body: BasicBlock {
                nodes: vec![
                    Node::Instruction(Instruction::clear_cell()),
                    Node::Instruction(Instruction::clear_cell()),
                ],
            },
        };
        let runtime = runtime_after(&program);
        assert!(runtime.tape().iter().all(|&cell| cell == 0));
        assert_eq!(runtime.data_pointer(), 0);
    }

    #[test]
    fn test_loop_zero_iterations() {
        let runtime = runtime_after(&parse("[>+++<,.]").unwrap());
        assert!(runtime.tape().iter().all(|&cell| cell == 0));
        assert_eq!(runtime.data_pointer(), 0);
    }

    #[test]
    fn test_reset_clears_tape() {
        let mut runtime = runtime_after(&parse(">++").unwrap());
        assert_eq!(runtime.tape()[1], 2);
        runtime.reset();
        assert_eq!(runtime.data_pointer(), 0);
        assert!(runtime.tape().iter().all(|&cell| cell == 0));
    }
}
