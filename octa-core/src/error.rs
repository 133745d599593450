//! Error types for the Octa core
//!
//! Compile errors are raised by the two front ends, ISA errors by the binary
//! codec and execution errors by the VM. [`Error`] wraps all of them for
//! callers that compile and run in one go.

use crate::compiler::SourcePos;
use crate::opcode::Operator;
use thiserror::Error;

pub type IsaResult<T> = std::result::Result<T, IsaError>;
pub type CompileResult<T> = std::result::Result<T, CompileError>;
pub type ExecResult<T> = std::result::Result<T, ExecError>;
pub type Result<T> = std::result::Result<T, Error>;

/// Binary encoding/decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsaError {
    /// Byte whose operator index is outside 0..=8
    #[error("invalid opcode byte: 0x{0:02X}")]
    InvalidOpcode(u8),

    /// Operand does not fit the 3-bit field
    #[error("operand {operand} of {operator} does not fit in 3 bits")]
    OperandOverflow { operator: Operator, operand: u32 },
}

/// Errors detected while compiling source text. Compilation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unbalanced brackets: {open} '[' vs {close} ']'")]
    UnbalancedBrackets { open: usize, close: usize },

    /// A closing construct found no open `BIZ` placeholder before it
    #[error("no matching open bracket for symbol at {position}")]
    NoMatchingBracket { position: usize },

    #[error("missing operand for '{mnemonic}' at {pos}")]
    MissingOperand { mnemonic: String, pos: SourcePos },

    #[error("operand '{operand}' for '{mnemonic}' at {pos} must be an unsigned integer")]
    InvalidOperand {
        mnemonic: String,
        operand: String,
        pos: SourcePos,
    },

    #[error("operand '{label}' at {pos} is neither an integer nor a known label")]
    UnknownLabel { label: String, pos: SourcePos },

    #[error("label '{label}' at {pos} already defined at {first}")]
    DuplicateLabel {
        label: String,
        pos: SourcePos,
        first: SourcePos,
    },

    #[error("unrecognized symbol '{symbol}' at {pos} (not a mnemonic or label)")]
    UnrecognizedSymbol { symbol: String, pos: SourcePos },
}

/// Runtime failures of the VM
#[derive(Debug, Error)]
pub enum ExecError {
    /// Data pointer outside the tape when a cell was accessed
    #[error("data pointer {pointer} out of range for tape of {size} cells (ip {ip})")]
    IndexOutOfRange { pointer: i64, size: usize, ip: usize },

    /// Backward branch would land before the first instruction
    #[error("branch at {ip} with offset {offset} jumps before the start of the program")]
    BranchOutOfRange { ip: usize, offset: u32 },

    #[error("cycle limit of {limit} exceeded")]
    CycleLimitExceeded { limit: u64 },

    #[error("invalid hex input: {0}")]
    InvalidHexInput(#[from] hex::FromHexError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for compile-then-run pipelines
#[derive(Debug, Error)]
pub enum Error {
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("execution error: {0}")]
    Exec(#[from] ExecError),

    #[error("encoding error: {0}")]
    Isa(#[from] IsaError),
}
