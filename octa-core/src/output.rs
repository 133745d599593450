//! Result rendering
//!
//! The VM returns the whole output ring, zero padding included. These
//! helpers turn it into what the CLI prints.

use crate::instruction::Instruction;

/// Non-empty runs of bytes between zero bytes
fn segments(buffer: &[u8]) -> impl Iterator<Item = &[u8]> {
    buffer.split(|&b| b == 0).filter(|s| !s.is_empty())
}

/// Segments joined by a single zero byte
pub fn render_text(buffer: &[u8]) -> Vec<u8> {
    segments(buffer).collect::<Vec<_>>().join(&0u8)
}

/// Segments as lower-case hex, joined by the text `00`
pub fn render_hex(buffer: &[u8]) -> String {
    segments(buffer)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join("00")
}

/// Entire buffer as lower-case hex
pub fn render_raw_hex(buffer: &[u8]) -> String {
    hex::encode(buffer)
}

/// Space-joined `NAME:operand` list
pub fn render_trace(instructions: &[Instruction]) -> String {
    instructions
        .iter()
        .map(Instruction::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
