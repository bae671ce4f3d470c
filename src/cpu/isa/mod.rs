//! ISA type definitions
//!
//! Instructions arrive pre-decoded from the assembler; there is no byte
//! decoding here, only the types the executor dispatches on.

pub mod instruction;
pub mod operands;

pub use instruction::{Cond, Instruction, Opcode};
pub use operands::{Imm, Operand, Reg};
