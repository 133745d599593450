//! Assembler
//!
//! Two-pass compiler for the mnemonic form of the ISA.
//!
//! # Syntax
//!
//! ```text
//! ; comment to end of line
//!     add 3          ; cell += 3
//! loop:              ; label
//!     biz end        ; placeholder, patched by the matching bnz
//!     sub 1
//!     bnz loop       ; resolves the nearest open biz
//! end:
//!     out
//!     hlt
//! ```
//!
//! Numeric `biz`/`bnz` operands are literal relative offsets. A label
//! operand must name a defined label; `bnz <label>` then pairs with the
//! nearest unresolved `biz`, exactly like `]` in the tape language.
//!
//! `;` comments are an extension over plain whitespace tokenization: text
//! from `;` to the end of the line is dropped, so `add 5;x` assembles.

use std::collections::HashMap;

use super::SourcePos;
use crate::error::{CompileError, CompileResult};
use crate::instruction::Instruction;
use crate::opcode::Operator;
use crate::program::Program;

// ═══════════════════════════════════════════════════════════════════════════════
// TOKENS
// ═══════════════════════════════════════════════════════════════════════════════

/// Whitespace-delimited word with its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub pos: SourcePos,
}

impl<'a> Token<'a> {
    /// Name of the label this token defines (`loop:` → `loop`)
    pub fn label_definition(&self) -> Option<&'a str> {
        self.text.strip_suffix(':')
    }

    pub fn operator(&self) -> Option<Operator> {
        Operator::from_mnemonic(self.text)
    }

    fn is_numeric(&self) -> bool {
        self.text.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Splits source into tokens, dropping `;` comments
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();

    for (line_idx, raw_line) in source.lines().enumerate() {
        let line = match raw_line.find(';') {
            Some(at) => &raw_line[..at],
            None => raw_line,
        };

        let mut start: Option<usize> = None;
        for (byte_idx, c) in line.char_indices().chain(std::iter::once((line.len(), ' '))) {
            match (c.is_whitespace(), start) {
                (false, None) => start = Some(byte_idx),
                (true, Some(s)) => {
                    tokens.push(Token {
                        text: &line[s..byte_idx],
                        pos: SourcePos {
                            line: line_idx as u32 + 1,
                            column: line[..s].chars().count() as u32 + 1,
                        },
                    });
                    start = None;
                }
                _ => {}
            }
        }
    }

    tokens
}

// ═══════════════════════════════════════════════════════════════════════════════
// LABEL TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Labels defined in one compilation unit
///
/// Built by [`collect_labels`] and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    entries: HashMap<String, (usize, SourcePos)>,
}

impl LabelTable {
    /// Token index of the label definition
    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.get(name).map(|&(index, _)| index)
    }

    pub fn position(&self, name: &str) -> Option<SourcePos> {
        self.entries.get(name).map(|&(_, pos)| pos)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(name, &(index, _))| (name.as_str(), index))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PASSES
// ═══════════════════════════════════════════════════════════════════════════════

/// First pass: binds every `name:` token to its token index
pub fn collect_labels(tokens: &[Token<'_>]) -> CompileResult<LabelTable> {
    let mut table = LabelTable::default();

    for (index, token) in tokens.iter().enumerate() {
        let Some(name) = token.label_definition() else {
            continue;
        };
        if name.is_empty() {
            return Err(CompileError::UnrecognizedSymbol {
                symbol: token.text.to_string(),
                pos: token.pos,
            });
        }
        if let Some(first) = table.position(name) {
            return Err(CompileError::DuplicateLabel {
                label: name.to_string(),
                pos: token.pos,
                first,
            });
        }
        table
            .entries
            .insert(name.to_string(), (index, token.pos));
    }

    Ok(table)
}

/// Second pass: one instruction per mnemonic, in source order
pub fn emit(tokens: &[Token<'_>], labels: &LabelTable) -> CompileResult<Program> {
    let mut program = Program::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];

        if token.label_definition().is_some() {
            index += 1;
            continue;
        }

        let Some(operator) = token.operator() else {
            return Err(CompileError::UnrecognizedSymbol {
                symbol: token.text.to_string(),
                pos: token.pos,
            });
        };

        if !operator.takes_operand() {
            program.push(Instruction::new(operator, 0));
            index += 1;
            continue;
        }

        let operand = operand_token(tokens, index, labels)?;
        let instr = if operator.is_branch() {
            branch(&mut program, operator, token, operand, labels, index)?
        } else {
            Instruction::new(operator, parse_number(token, operand)?)
        };
        program.push(instr);
        index += 2;
    }

    Ok(program)
}

/// Assembles source text into a program
///
/// No `HLT` is appended; execution also stops when the instruction
/// pointer runs past the last instruction.
pub fn assemble(source: &str) -> CompileResult<Program> {
    let tokens = tokenize(source);
    let labels = collect_labels(&tokens)?;
    let program = emit(&tokens, &labels)?;

    tracing::debug!(
        tokens = tokens.len(),
        labels = labels.len(),
        instructions = program.len(),
        "assembled source"
    );

    Ok(program)
}

// ═══════════════════════════════════════════════════════════════════════════════
// OPERANDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Token after the mnemonic at `index`
///
/// A following mnemonic or label definition means the operand is missing,
/// except that a branch may name a defined label that shares a mnemonic's
/// spelling (`out:` ... `bnz out`).
fn operand_token<'t, 'a>(
    tokens: &'t [Token<'a>],
    index: usize,
    labels: &LabelTable,
) -> CompileResult<&'t Token<'a>> {
    let mnemonic = &tokens[index];
    let branch = mnemonic.operator().is_some_and(Operator::is_branch);
    tokens
        .get(index + 1)
        .filter(|next| {
            if next.label_definition().is_some() {
                return false;
            }
            next.operator().is_none() || (branch && labels.contains(next.text))
        })
        .ok_or_else(|| CompileError::MissingOperand {
            mnemonic: mnemonic.text.to_string(),
            pos: mnemonic.pos,
        })
}

fn parse_number(mnemonic: &Token<'_>, operand: &Token<'_>) -> CompileResult<u32> {
    let invalid = || CompileError::InvalidOperand {
        mnemonic: mnemonic.text.to_string(),
        operand: operand.text.to_string(),
        pos: operand.pos,
    };
    if !operand.is_numeric() {
        return Err(invalid());
    }
    operand.text.parse().map_err(|_| invalid())
}

fn branch(
    program: &mut Program,
    operator: Operator,
    mnemonic: &Token<'_>,
    operand: &Token<'_>,
    labels: &LabelTable,
    index: usize,
) -> CompileResult<Instruction> {
    if operand.is_numeric() {
        return Ok(Instruction::new(operator, parse_number(mnemonic, operand)?));
    }

    if !labels.contains(operand.text) {
        return Err(CompileError::UnknownLabel {
            label: operand.text.to_string(),
            pos: operand.pos,
        });
    }

    match operator {
        Operator::BranchIfNonZero => {
            let offset = program.resolve_open_branch(index)?;
            Ok(Instruction::new(operator, offset))
        }
        _ => Ok(Instruction::placeholder()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
