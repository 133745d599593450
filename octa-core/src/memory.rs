//! Data tape
//!
//! Zero-initialized cells addressed by a data pointer that starts at 0.
//! Moving the pointer is never checked; reading or writing a cell is.

use crate::error::{ExecError, ExecResult};

/// Default number of tape cells
pub const DEFAULT_TAPE_SIZE: usize = 256;

/// Working memory of the VM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    pointer: i64,
}

impl Tape {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0; size],
            pointer: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn pointer(&self) -> i64 {
        self.pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// dp += n (unchecked)
    #[inline]
    pub fn advance(&mut self, n: u32) {
        self.pointer += n as i64;
    }

    /// dp -= n (unchecked)
    #[inline]
    pub fn retreat(&mut self, n: u32) {
        self.pointer -= n as i64;
    }

    /// Current cell value
    #[inline]
    pub fn get(&self) -> ExecResult<u8> {
        let index = self.index()?;
        Ok(self.cells[index])
    }

    /// Overwrites the current cell
    #[inline]
    pub fn set(&mut self, value: u8) -> ExecResult<()> {
        let index = self.index()?;
        self.cells[index] = value;
        Ok(())
    }

    /// cell = (cell + n) mod 256
    pub fn add(&mut self, n: u32) -> ExecResult<()> {
        let index = self.index()?;
        self.cells[index] = self.cells[index].wrapping_add((n % 256) as u8);
        Ok(())
    }

    /// cell = (cell - n) mod 256
    pub fn sub(&mut self, n: u32) -> ExecResult<()> {
        let index = self.index()?;
        self.cells[index] = self.cells[index].wrapping_sub((n % 256) as u8);
        Ok(())
    }

    fn index(&self) -> ExecResult<usize> {
        usize::try_from(self.pointer)
            .ok()
            .filter(|&i| i < self.cells.len())
            .ok_or(ExecError::IndexOutOfRange {
                pointer: self.pointer,
                size: self.cells.len(),
                ip: 0,
            })
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(DEFAULT_TAPE_SIZE)
    }
}
