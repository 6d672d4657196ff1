//! Double dispatch over the program tree.
//!
//! Back-ends implement [`Visitor`] and never match on the tree themselves,
//! a new node kind is a compile error in every back-end until it's handled.

pub mod stats;

use crate::parser::{BasicBlock, Instruction, Node, Program};

pub trait Visitor {
    type Error;

    fn visit_instruction(&mut self, instruction: &Instruction) -> Result<(), Self::Error>;

    fn visit_loop(&mut self, body: &BasicBlock) -> Result<(), Self::Error>;

    fn visit_program(&mut self, program: &Program) -> Result<(), Self::Error>;
}

impl Node {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            Node::Instruction(instruction) => visitor.visit_instruction(instruction),
            Node::Loop(body) => visitor.visit_loop(body),
        }
    }
}

impl Program {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        visitor.visit_program(self)
    }
}

/// Accept every node of `block` in order, stopping at the first error
pub fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, block: &BasicBlock) -> Result<(), V::Error> {
    for node in block.nodes.iter() {
        node.accept(visitor)?;
    }
    Ok(())
}
