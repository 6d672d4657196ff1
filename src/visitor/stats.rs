use std::convert::Infallible;

use crate::parser::{BasicBlock, Instruction, InstructionKind, Program};

use super::{walk_block, Visitor};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Instruction and loop nodes, not counting the program itself
    pub nodes: usize,
    pub loops: usize,
    pub max_depth: usize,
    pub clear_cells: usize,
    /// How many source instructions the folded nodes stand for
    pub folded_instructions: usize,
}

#[derive(Default)]
struct StatsCollector {
    stats: TreeStats,
    depth: usize,
}

impl Visitor for StatsCollector {
    type Error = Infallible;

    fn visit_instruction(&mut self, instruction: &Instruction) -> Result<(), Infallible> {
        self.stats.nodes += 1;
        match instruction.kind {
            InstructionKind::ClearCell => self.stats.clear_cells += 1,
            _ => self.stats.folded_instructions += instruction.repeat,
        }
        Ok(())
    }

    fn visit_loop(&mut self, body: &BasicBlock) -> Result<(), Infallible> {
        self.stats.nodes += 1;
        self.stats.loops += 1;
        self.depth += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        walk_block(self, body)?;
        self.depth -= 1;
        Ok(())
    }

    fn visit_program(&mut self, program: &Program) -> Result<(), Infallible> {
        walk_block(self, &program.body)
    }
}

impl Program {
    pub fn stats(&self) -> TreeStats {
        let mut collector = StatsCollector::default();
        match self.accept(&mut collector) {
            Ok(()) => collector.stats,
            Err(never) => match never {},
        }
    }
}
