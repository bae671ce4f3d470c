//! x86-64 subset CPU
//!
//! Instructions arrive pre-decoded in 8-byte slots; execution is a
//! fetch-dispatch loop over handler functions organized by category.

pub mod execute;
pub mod harness;
pub mod isa;
pub mod state;

pub use harness::CpuHarness;
pub use state::{Cpu, Flags, EXIT_ADDR};
