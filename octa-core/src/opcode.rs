//! Operadores da ISA Octa
//!
//! Conjunto fechado de nove operadores. A ordem de declaração é o índice
//! binário do operador: `Halt = 0` … `Output = 8`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operador de uma [`Instruction`](crate::instruction::Instruction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Operator {
    // ═══════════════════════════════════════════════════════════════
    // CONTROLE
    // ═══════════════════════════════════════════════════════════════

    /// Encerra a execução
    Halt = 0,

    // ═══════════════════════════════════════════════════════════════
    // ARITMÉTICA (célula atual, mod 256)
    // ═══════════════════════════════════════════════════════════════

    /// cell += operand
    Add = 1,
    /// cell -= operand
    Subtract = 2,

    // ═══════════════════════════════════════════════════════════════
    // PONTEIRO DE DADOS
    // ═══════════════════════════════════════════════════════════════

    /// dp += operand
    AdvancePointer = 3,
    /// dp -= operand
    RetreatPointer = 4,

    // ═══════════════════════════════════════════════════════════════
    // DESVIOS (offset relativo em instruções)
    // ═══════════════════════════════════════════════════════════════

    /// if cell == 0 { ip += operand }
    BranchIfZero = 5,
    /// if cell != 0 { ip -= operand }
    BranchIfNonZero = 6,

    // ═══════════════════════════════════════════════════════════════
    // I/O
    // ═══════════════════════════════════════════════════════════════

    /// célula = próximo byte de entrada
    Input = 7,
    /// saída <- célula
    Output = 8,
}

impl Operator {
    /// Todos os operadores, em ordem de índice
    pub const ALL: [Operator; 9] = [
        Self::Halt,
        Self::Add,
        Self::Subtract,
        Self::AdvancePointer,
        Self::RetreatPointer,
        Self::BranchIfZero,
        Self::BranchIfNonZero,
        Self::Input,
        Self::Output,
    ];

    /// Índice binário do operador
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Operador para um índice binário, se existir
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Nome curto em maiúsculas usado em listagens e traces
    pub const fn name(self) -> &'static str {
        match self {
            Self::Halt => "HLT",
            Self::Add => "ADD",
            Self::Subtract => "SUB",
            Self::AdvancePointer => "ADP",
            Self::RetreatPointer => "SDP",
            Self::BranchIfZero => "BIZ",
            Self::BranchIfNonZero => "BNZ",
            Self::Input => "INP",
            Self::Output => "OUT",
        }
    }

    /// Mnemônico do assembly
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Halt => "hlt",
            Self::Add => "add",
            Self::Subtract => "sub",
            Self::AdvancePointer => "adp",
            Self::RetreatPointer => "sdp",
            Self::BranchIfZero => "biz",
            Self::BranchIfNonZero => "bnz",
            Self::Input => "inp",
            Self::Output => "out",
        }
    }

    /// Busca um operador pelo mnemônico (diferencia maiúsculas)
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.mnemonic() == mnemonic)
    }

    /// Se a forma assembly exige um operando
    pub const fn takes_operand(self) -> bool {
        !matches!(self, Self::Halt | Self::Input | Self::Output)
    }

    /// Se o operando é um offset relativo em instruções
    pub const fn is_branch(self) -> bool {
        matches!(self, Self::BranchIfZero | Self::BranchIfNonZero)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
