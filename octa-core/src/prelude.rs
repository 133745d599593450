//! # Prelude
//!
//! ```
//! use octa_core::prelude::*;
//! ```

// ISA
pub use crate::instruction::Instruction;
pub use crate::opcode::Operator;
pub use crate::program::Program;

// Compilers
pub use crate::compiler::{Language, SourcePos, assemble, compile, compile_tape};

// Execution
pub use crate::config::{InputEncoding, VmConfig};
pub use crate::vm::{Vm, run_program};
pub use crate::compile_and_run;

// Output
pub use crate::output::{render_hex, render_raw_hex, render_text, render_trace};

// Errors
pub use crate::error::{CompileError, Error, ExecError, IsaError};
