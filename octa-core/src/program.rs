//! Compiled programs
//!
//! [`Program`] is the ordered instruction sequence both front ends emit and the
//! VM consumes. While a front end is still emitting, an earlier open branch can
//! be patched in place by [`Program::resolve_open_branch`]; that is the only
//! mutation of an already-emitted instruction.

use crate::error::{CompileError, CompileResult, IsaResult};
use crate::instruction::Instruction;
use crate::opcode::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Ordered, index-addressable instruction sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Closes the nearest open `BIZ:0` and returns the offset written into it.
    ///
    /// Scans backward from the end for the closest unresolved `BranchIfZero`,
    /// sets its operand to `len - index` and returns that value. The caller
    /// emits the matching `BranchIfNonZero` with the same offset. Each
    /// placeholder is resolved exactly once, so nesting pairs innermost-first.
    ///
    /// `position` is the source symbol being compiled, reported when nothing
    /// is open.
    pub fn resolve_open_branch(&mut self, position: usize) -> CompileResult<u32> {
        let current = self.instructions.len();
        let open = self
            .instructions
            .iter()
            .rposition(Instruction::is_unresolved)
            .ok_or(CompileError::NoMatchingBracket { position })?;

        let offset = (current - open) as u32;
        self.instructions[open].operand = offset;
        Ok(offset)
    }

    /// One byte per instruction. Fails on operands that do not fit 3 bits.
    pub fn to_bytes(&self) -> IsaResult<Vec<u8>> {
        self.instructions.iter().map(Instruction::encode).collect()
    }

    pub fn from_bytes(bytes: &[u8]) -> IsaResult<Self> {
        let instructions = bytes
            .iter()
            .map(|&b| Instruction::decode(b))
            .collect::<IsaResult<Vec<_>>>()?;
        Ok(Self { instructions })
    }

    /// `"{n} ops"` line followed by the space-joined instructions
    pub fn listing(&self) -> String {
        format!("{} ops\n{}", self.len(), self)
    }

    /// Number of instructions using the given operator
    pub fn count(&self, operator: Operator) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.operator == operator)
            .count()
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Self::Output {
        &self.instructions[index]
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instr) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", instr)?;
        }
        Ok(())
    }
}
