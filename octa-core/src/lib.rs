//! # Octa-Core
//!
//! Máquina virtual de 8 instruções e os dois compiladores que a alimentam.
//!
//! ## Arquitetura
//!
//! ```text
//!  tape source ──► compiler::tape ──┐
//!                                   ├──► Program ──► Vm ──► output ring ──► output::render_*
//!  asm source  ──► compiler::asm  ──┘
//! ```
//!
//! ## Módulos
//!
//! - [`opcode`]: os 9 operadores e seus nomes
//! - [`instruction`]: operador + operando, codificação em um byte
//! - [`program`]: sequência de instruções e patch retroativo de desvios
//! - [`compiler`]: front ends da linguagem de fita e do assembly
//! - [`buffer`]: anel de bytes circular para I/O
//! - [`memory`]: fita de dados
//! - [`vm`]: executor
//! - [`output`]: renderização do resultado
//! - [`config`]: configuração da VM
//!
//! ## Quick Start
//!
//! ```
//! use octa_core::prelude::*;
//!
//! let output = compile_and_run(Language::Tape, "+++.", VmConfig::default(), std::io::empty())?;
//! assert_eq!(output[0], 3);
//! # Ok::<(), octa_core::Error>(())
//! ```

pub mod buffer;
pub mod compiler;
pub mod config;
pub mod error;
pub mod instruction;
pub mod memory;
pub mod opcode;
pub mod output;
pub mod prelude;
pub mod program;
pub mod vm;

// Re-exportações de nível superior
pub use buffer::CircularBuffer;
pub use compiler::{Language, LabelTable, SourcePos, assemble, compile, compile_tape};
pub use config::{InputEncoding, VmConfig};
pub use error::{
    CompileError, CompileResult, Error, ExecError, ExecResult, IsaError, IsaResult, Result,
};
pub use instruction::Instruction;
pub use memory::Tape;
pub use opcode::Operator;
pub use program::Program;
pub use vm::{Vm, run_program};

use std::io::Read;

/// Compila `source` e executa com `input` como entrada externa
pub fn compile_and_run<R: Read + 'static>(
    language: Language,
    source: &str,
    config: VmConfig,
    input: R,
) -> Result<Vec<u8>> {
    let program = compile(language, source)?;
    let output = Vm::new(program, config)?.with_input(input).run()?;
    Ok(output)
}
