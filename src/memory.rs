//! Symbolic-byte memory
//!
//! The simulator maps a single 64 KiB byte-addressable window starting
//! at 0x400000. Each cell is a symbolic byte: instructions are stored
//! pre-decoded, with the head cell carrying the whole instruction and
//! seven tail cells padding the slot to 8 bytes. Data lives as plain
//! raw bytes, quadwords in little-endian order.
//!
//! Any address leaving the window is a segmentation fault.

use crate::cpu::isa::Instruction;
use crate::error::Fault;

/// Lowest mapped address
pub const MEM_BOT: i64 = 0x40_0000;

/// Window length in bytes
pub const MEM_SIZE: usize = 0x1_0000;

/// One past the highest mapped address
pub const MEM_TOP: i64 = MEM_BOT + MEM_SIZE as i64;

/// Every instruction occupies one 8-byte slot
pub const INS_SIZE: i64 = 8;

/// One memory cell
#[derive(Debug, Clone, PartialEq)]
pub enum SByte {
    /// First byte of an instruction slot; carries the decoded instruction
    InsHead(Instruction),
    /// One of the remaining seven bytes of an instruction slot
    InsTail,
    /// A plain data byte
    Raw(u8),
}

/// The mapped window
pub struct Memory {
    cells: Vec<SByte>,
}

impl Memory {
    /// Fresh window of zeroed data bytes
    pub fn new() -> Self {
        Self {
            cells: vec![SByte::Raw(0); MEM_SIZE],
        }
    }

    /// Translate an address to a cell index, faulting outside the window
    #[inline(always)]
    pub fn index_of(addr: i64) -> Result<usize, Fault> {
        if (MEM_BOT..MEM_TOP).contains(&addr) {
            Ok((addr - MEM_BOT) as usize)
        } else {
            Err(Fault::Segfault(addr))
        }
    }

    /// Read a single cell
    pub fn read(&self, addr: i64) -> Result<&SByte, Fault> {
        Ok(&self.cells[Self::index_of(addr)?])
    }

    /// Overwrite a single cell
    pub fn write(&mut self, addr: i64, cell: SByte) -> Result<(), Fault> {
        self.cells[Self::index_of(addr)?] = cell;
        Ok(())
    }

    /// Read the quadword stored in the 8 cells starting at addr
    pub fn read_quad(&self, addr: i64) -> Result<i64, Fault> {
        let lo = Self::index_of(addr)?;
        Self::index_of(addr + 7)?;
        Ok(deserialize_quad(&self.cells[lo..lo + 8]))
    }

    /// Write a quadword as 8 raw cells starting at addr
    ///
    /// A store landing inside an instruction slot simply replaces those
    /// cells; a later fetch from the clobbered slot faults.
    pub fn write_quad(&mut self, addr: i64, value: i64) -> Result<(), Fault> {
        let lo = Self::index_of(addr)?;
        Self::index_of(addr + 7)?;
        for (cell, byte) in self.cells[lo..lo + 8].iter_mut().zip(serialize_quad(value)) {
            *cell = byte;
        }
        Ok(())
    }

    /// Blit a segment into the window starting at addr
    pub fn load_at(&mut self, addr: i64, segment: &[SByte]) -> Result<(), Fault> {
        if segment.is_empty() {
            return Ok(());
        }
        let lo = Self::index_of(addr)?;
        Self::index_of(addr + segment.len() as i64 - 1)?;
        self.cells[lo..lo + segment.len()].clone_from_slice(segment);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a quadword as 8 raw bytes, least significant first
pub fn serialize_quad(value: i64) -> [SByte; 8] {
    value.to_le_bytes().map(SByte::Raw)
}

/// Decode a quadword from up to 8 cells; anything that is not a raw
/// byte reads as zero
pub fn deserialize_quad(cells: &[SByte]) -> i64 {
    let mut bytes = [0u8; 8];
    for (out, cell) in bytes.iter_mut().zip(cells) {
        if let SByte::Raw(b) = cell {
            *out = *b;
        }
    }
    i64::from_le_bytes(bytes)
}

/// Encode a string as raw bytes with a zero terminator
pub fn serialize_string(s: &str) -> Vec<SByte> {
    s.bytes().map(SByte::Raw).chain([SByte::Raw(0)]).collect()
}

/// Encode an instruction as one head cell plus seven tail cells
pub fn serialize_ins(ins: Instruction) -> [SByte; 8] {
    [
        SByte::InsHead(ins),
        SByte::InsTail,
        SByte::InsTail,
        SByte::InsTail,
        SByte::InsTail,
        SByte::InsTail,
        SByte::InsTail,
        SByte::InsTail,
    ]
}
