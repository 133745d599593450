//! Front ends
//!
//! Both compilers translate source text into the same [`Program`]:
//!
//! - [`tape`]: bracket-structured tape language (`+ - > < [ ] , .`)
//! - [`assembler`]: mnemonic assembly with labels (`add 5`, `bnz loop`, ...)
//!
//! Loops are resolved in a single emission pass by patching the nearest
//! open `BIZ:0` backward, see [`Program::resolve_open_branch`].

pub mod assembler;
pub mod tape;

pub use assembler::{LabelTable, assemble};
pub use tape::compile as compile_tape;

use crate::error::CompileResult;
use crate::program::Program;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in the source text (1-based)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source language selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// Bracket tape language
    #[default]
    Tape,
    /// Mnemonic assembly
    Assembly,
}

impl Language {
    /// Guesses the language from a file extension (`asm`/`s` → assembly)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "asm" | "s" => Self::Assembly,
            _ => Self::Tape,
        }
    }
}

/// Compiles source text with the selected front end
pub fn compile(language: Language, source: &str) -> CompileResult<Program> {
    match language {
        Language::Tape => tape::compile(source),
        Language::Assembly => assembler::assemble(source),
    }
}
