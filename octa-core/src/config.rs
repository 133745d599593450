//! VM configuration
//!
//! Defaults match the reference tools (256-cell tape, 256-byte I/O rings).
//! [`VmConfig::from_env`] overlays values from the environment or a `.env`
//! file:
//!
//! - `OCTA_TAPE_SIZE`: tape cells (default: 256)
//! - `OCTA_BUFFER_SIZE`: input/output ring capacity (default: 256)
//! - `OCTA_MAX_CYCLES`: instruction budget (default: unlimited)

use crate::memory::DEFAULT_TAPE_SIZE;
use once_cell::sync::Lazy;
use std::env;

/// Default capacity of the input and output rings
pub const DEFAULT_BUFFER_SIZE: usize = 256;

// Automatically load .env when config module is accessed
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    ensure_loaded();
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// How the external input source is interpreted on the first `INP`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputEncoding {
    /// Bytes are used as-is
    #[default]
    Raw,
    /// Text holding hex digit pairs, decoded before use (whitespace ignored)
    Hex,
}

/// VM configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Number of tape cells
    pub tape_size: usize,
    /// Capacity of the input and output rings
    pub buffer_size: usize,
    /// Abort after this many executed instructions
    pub max_cycles: Option<u64>,
    /// Record every executed instruction
    pub trace: bool,
    /// Input interpretation
    pub input_encoding: InputEncoding,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_cycles: None,
            trace: false,
            input_encoding: InputEncoding::Raw,
        }
    }
}

impl VmConfig {
    /// Defaults overlaid with `OCTA_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tape_size: env_parse("OCTA_TAPE_SIZE").unwrap_or(defaults.tape_size),
            buffer_size: env_parse("OCTA_BUFFER_SIZE").unwrap_or(defaults.buffer_size),
            max_cycles: env_parse("OCTA_MAX_CYCLES").or(defaults.max_cycles),
            ..defaults
        }
    }

    pub fn with_tape_size(mut self, tape_size: usize) -> Self {
        self.tape_size = tape_size;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_input_encoding(mut self, encoding: InputEncoding) -> Self {
        self.input_encoding = encoding;
        self
    }
}
