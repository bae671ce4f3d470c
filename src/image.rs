//! Loaded program images
//!
//! The assembler and linker live outside this crate; what the simulator
//! consumes is a fully resolved image: an entry point, segment
//! positions, and the symbolic bytes of the text and data segments.

use crate::cpu::isa::Instruction;
use crate::memory::{serialize_ins, SByte, MEM_BOT};

/// A linked executable image
#[derive(Debug, Clone)]
pub struct Image {
    /// Initial instruction pointer
    pub entry: i64,
    /// Start address of the text segment
    pub text_pos: i64,
    /// Start address of the data segment
    pub data_pos: i64,
    /// Instruction slots
    pub text: Vec<SByte>,
    /// Data bytes
    pub data: Vec<SByte>,
}

impl Image {
    /// Lay a bare instruction sequence out at the bottom of the window:
    /// entry at the first slot, data segment empty but positioned right
    /// after the text
    pub fn from_program(program: &[Instruction]) -> Self {
        let text: Vec<SByte> = program
            .iter()
            .flat_map(|ins| serialize_ins(ins.clone()))
            .collect();
        let data_pos = MEM_BOT + text.len() as i64;
        Self {
            entry: MEM_BOT,
            text_pos: MEM_BOT,
            data_pos,
            text,
            data: Vec::new(),
        }
    }

    /// Attach a data segment, keeping its position directly after the
    /// text segment
    pub fn with_data(mut self, data: Vec<SByte>) -> Self {
        self.data = data;
        self
    }
}
