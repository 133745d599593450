//! Executor
//!
//! Fetch-decode-execute loop over a [`Program`], a data [`Tape`] and two
//! [`CircularBuffer`]s for input and output.
//!
//! ```text
//!   program[ip] ──► execute ──► tape[dp]
//!                     │  ▲
//!               OUT   ▼  │  INP (first INP drains the source once)
//!               output ring   input ring ◄── source
//! ```
//!
//! Running past the last instruction halts normally, so programs without a
//! trailing `HLT` still terminate.

use std::fmt;
use std::io::{Cursor, Read};

use crate::buffer::CircularBuffer;
use crate::config::{InputEncoding, VmConfig};
use crate::error::{ExecError, ExecResult};
use crate::instruction::Instruction;
use crate::memory::Tape;
use crate::opcode::Operator;
use crate::program::Program;

/// Virtual machine for one program execution
pub struct Vm {
    program: Program,
    config: VmConfig,
    tape: Tape,
    input: CircularBuffer,
    output: CircularBuffer,
    /// External input, taken on the first `INP`
    source: Option<Box<dyn Read>>,
    input_filled: bool,
    ip: usize,
    cycles: u64,
    halted: bool,
    trace: Vec<Instruction>,
}

impl fmt::Debug for Vm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vm")
            .field("ip", &self.ip)
            .field("dp", &self.tape.pointer())
            .field("cycles", &self.cycles)
            .field("halted", &self.halted)
            .field("input_filled", &self.input_filled)
            .finish_non_exhaustive()
    }
}

impl Vm {
    /// Fresh VM: ip = 0, dp = 0, zeroed tape and buffers
    pub fn new(program: Program, config: VmConfig) -> ExecResult<Self> {
        if config.tape_size == 0 {
            return Err(ExecError::InvalidConfig(
                "tape size must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            tape: Tape::new(config.tape_size),
            input: CircularBuffer::new(config.buffer_size)?,
            output: CircularBuffer::new(config.buffer_size)?,
            program,
            config,
            source: None,
            input_filled: false,
            ip: 0,
            cycles: 0,
            halted: false,
            trace: Vec::new(),
        })
    }

    /// Sets the external input source
    pub fn with_input<R: Read + 'static>(mut self, reader: R) -> Self {
        self.source = Some(Box::new(reader));
        self
    }

    pub fn with_input_bytes(self, bytes: Vec<u8>) -> Self {
        self.with_input(Cursor::new(bytes))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Execution
    // ═══════════════════════════════════════════════════════════════════════════

    /// Runs until halt and returns the output ring's full backing bytes
    pub fn run(&mut self) -> ExecResult<Vec<u8>> {
        while self.step()? {}
        Ok(self.output.as_bytes().to_vec())
    }

    /// Executes one instruction. Returns `false` once halted.
    pub fn step(&mut self) -> ExecResult<bool> {
        if self.halted {
            return Ok(false);
        }

        let Some(&instr) = self.program.get(self.ip) else {
            self.halt("end of program");
            return Ok(false);
        };

        if let Some(limit) = self.config.max_cycles {
            if self.cycles >= limit {
                return Err(ExecError::CycleLimitExceeded { limit });
            }
        }

        self.cycles += 1;
        if self.config.trace {
            self.trace.push(instr);
        }
        tracing::trace!(ip = self.ip, dp = self.tape.pointer(), %instr, "step");

        let ip = self.ip;
        let next = self.execute(instr).map_err(|e| at_ip(e, ip))?;

        match next {
            Some(next) => {
                self.ip = next;
                Ok(true)
            }
            None => {
                self.halt("HLT");
                Ok(false)
            }
        }
    }

    /// Executes `instr` and returns the next ip, or `None` on `HLT`
    fn execute(&mut self, instr: Instruction) -> ExecResult<Option<usize>> {
        let n = instr.operand;
        let mut next = self.ip + 1;

        match instr.operator {
            Operator::Halt => return Ok(None),
            Operator::Add => self.tape.add(n)?,
            Operator::Subtract => self.tape.sub(n)?,
            Operator::AdvancePointer => self.tape.advance(n),
            Operator::RetreatPointer => self.tape.retreat(n),
            Operator::Input => {
                self.fill_input()?;
                let byte = self.input.read();
                self.tape.set(byte)?;
            }
            Operator::Output => {
                let byte = self.tape.get()?;
                self.output.write(byte);
            }
            Operator::BranchIfZero => {
                if self.tape.get()? == 0 {
                    next += n as usize;
                }
            }
            Operator::BranchIfNonZero => {
                if self.tape.get()? != 0 {
                    next = next.checked_sub(n as usize).ok_or(
                        ExecError::BranchOutOfRange {
                            ip: self.ip,
                            offset: n,
                        },
                    )?;
                }
            }
        }

        Ok(Some(next))
    }

    /// Drains the source into the input ring, once
    fn fill_input(&mut self) -> ExecResult<()> {
        if self.input_filled {
            return Ok(());
        }
        self.input_filled = true;

        let Some(mut source) = self.source.take() else {
            return Ok(());
        };

        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;

        if self.config.input_encoding == InputEncoding::Hex {
            let digits: Vec<u8> = bytes
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            bytes = hex::decode(digits)?;
        }

        self.input.write_all(&bytes);
        self.input.rewind();

        tracing::debug!(bytes = bytes.len(), "input filled");
        Ok(())
    }

    fn halt(&mut self, reason: &str) {
        self.halted = true;
        tracing::debug!(ip = self.ip, cycles = self.cycles, reason, "halted");
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // State
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    /// Instructions executed so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn output(&self) -> &CircularBuffer {
        &self.output
    }

    /// Executed instructions, in order (empty unless tracing is enabled)
    pub fn trace(&self) -> &[Instruction] {
        &self.trace
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

/// Tags a tape access failure with the instruction that caused it
fn at_ip(err: ExecError, ip: usize) -> ExecError {
    match err {
        ExecError::IndexOutOfRange { pointer, size, .. } => {
            ExecError::IndexOutOfRange { pointer, size, ip }
        }
        other => other,
    }
}

/// Runs a program to completion and returns the output ring
pub fn run_program<R: Read + 'static>(
    program: &Program,
    config: VmConfig,
    input: R,
) -> ExecResult<Vec<u8>> {
    Vm::new(program.clone(), config)?.with_input(input).run()
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
