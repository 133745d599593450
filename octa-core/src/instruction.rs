//! Instructions
//!
//! One operator plus an operand. The binary form is a single byte:
//! `operator_index * 8 + operand`, so only operands in `0..8` encode.
//! In memory the operand is wider because bracket offsets often exceed 7.

use super::error::{IsaError, IsaResult};
use super::opcode::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the operand field in the binary encoding
pub const OPERAND_BITS: u32 = 3;

/// Number of distinct operand values in one byte
pub const OPERAND_RANGE: u32 = 1 << OPERAND_BITS;

/// Decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub operator: Operator,
    pub operand: u32,
}

impl Instruction {
    pub const fn new(operator: Operator, operand: u32) -> Self {
        Self { operator, operand }
    }

    /// `HLT:0`
    pub const fn halt() -> Self {
        Self::new(Operator::Halt, 0)
    }

    /// Fresh unresolved `BIZ:0`, patched later by the matching close
    pub const fn placeholder() -> Self {
        Self::new(Operator::BranchIfZero, 0)
    }

    /// Whether this is an open branch still waiting for its offset
    #[inline]
    pub fn is_unresolved(&self) -> bool {
        self.operator == Operator::BranchIfZero && self.operand == 0
    }

    /// Encodes to a single byte
    pub fn encode(&self) -> IsaResult<u8> {
        if self.operand >= OPERAND_RANGE {
            return Err(IsaError::OperandOverflow {
                operator: self.operator,
                operand: self.operand,
            });
        }
        Ok(self.operator.index() * OPERAND_RANGE as u8 + self.operand as u8)
    }

    /// Decodes a single byte
    pub fn decode(byte: u8) -> IsaResult<Self> {
        let index = byte / OPERAND_RANGE as u8;
        let operand = byte % OPERAND_RANGE as u8;
        let operator = Operator::from_index(index).ok_or(IsaError::InvalidOpcode(byte))?;
        Ok(Self::new(operator, operand as u32))
    }
}

impl Default for Instruction {
    fn default() -> Self {
        Self::halt()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operator.name(), self.operand)
    }
}
