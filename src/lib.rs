//! EZ64 - Sandboxed x86-64 Subset Simulator
//!
//! Executes a pre-assembled program image inside a fixed 64 KiB memory
//! window until the instruction pointer reaches the halt sentinel, then
//! reports the accumulator.

pub mod cpu;
pub mod error;
pub mod image;
pub mod memory;
