//! Tape-language compiler
//!
//! Single pass over the eight recognized glyphs; every other character is a
//! comment and is dropped.
//!
//! ```text
//! +  ADD:1     -  SUB:1     >  ADP:1     <  SDP:1
//! ,  INP:1     .  OUT:1     [  BIZ:0 (placeholder)
//! ]  patch nearest open BIZ, then BNZ:offset
//! ```
//!
//! A trailing `HLT:0` is always appended.

use crate::error::{CompileError, CompileResult};
use crate::instruction::Instruction;
use crate::opcode::Operator;
use crate::program::Program;

/// Glyphs that survive comment filtering
pub const SYMBOLS: [char; 8] = ['+', '-', '>', '<', '[', ']', ',', '.'];

/// Compiles tape-language source into a program
pub fn compile(source: &str) -> CompileResult<Program> {
    let open = source.matches('[').count();
    let close = source.matches(']').count();
    if open != close {
        return Err(CompileError::UnbalancedBrackets { open, close });
    }

    let mut program = Program::new();

    for (position, symbol) in source.chars().filter(|c| SYMBOLS.contains(c)).enumerate() {
        let instr = match symbol {
            '+' => Instruction::new(Operator::Add, 1),
            '-' => Instruction::new(Operator::Subtract, 1),
            '>' => Instruction::new(Operator::AdvancePointer, 1),
            '<' => Instruction::new(Operator::RetreatPointer, 1),
            ',' => Instruction::new(Operator::Input, 1),
            '.' => Instruction::new(Operator::Output, 1),
            '[' => Instruction::placeholder(),
            ']' => {
                let offset = program.resolve_open_branch(position)?;
                Instruction::new(Operator::BranchIfNonZero, offset)
            }
            _ => continue,
        };
        program.push(instr);
    }

    program.push(Instruction::halt());

    tracing::debug!(
        instructions = program.len(),
        loops = open,
        "compiled tape-language source"
    );

    Ok(program)
}
