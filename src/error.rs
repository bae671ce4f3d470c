//! Fault taxonomy
//!
//! Two families of unrecoverable faults can end a run early:
//! - Segmentation faults, raised by any address translation that leaves
//!   the mapped window.
//! - Malformed instructions: the instruction pointer landing on a
//!   non-instruction byte, operand lists that do not fit the opcode,
//!   unresolved labels surviving past the linker, and unsupported shift
//!   count sources.
//!
//! Reaching the halt sentinel is not a fault; the run loop returns
//! normally.

use thiserror::Error;

use crate::cpu::isa::Opcode;

/// Unrecoverable simulation fault
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// Memory access outside the mapped window
    #[error("segmentation fault at {0:#x}")]
    Segfault(i64),

    /// The instruction pointer does not reference the head of an
    /// instruction slot
    #[error("no instruction at {0:#x}")]
    NotAnInstruction(i64),

    /// A label survived past link time and reached the executor
    #[error("unresolved label `{0}`")]
    UnresolvedLabel(String),

    /// Operand list does not match what the opcode expects
    #[error("malformed operands for {0}")]
    OperandMismatch(Opcode),

    /// An immediate was used as a store destination
    #[error("cannot store into an immediate operand")]
    ImmediateStore,

    /// An immediate or register operand was used where a memory address
    /// is required
    #[error("operand does not reference memory")]
    NotAddressable,

    /// Shift count came from a register other than %rcx
    #[error("shift count must be an immediate or %rcx")]
    ShiftCountSource,
}
