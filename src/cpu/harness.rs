//! CPU test harness
//!
//! Minimal coupling of a CPU and a memory for driving instruction
//! sequences in tests and demos without a full image pipeline.

use crate::cpu::isa::Instruction;
use crate::cpu::Cpu;
use crate::error::Fault;
use crate::image::Image;
use crate::memory::Memory;

/// Test harness pairing CPU state with a memory window
pub struct CpuHarness {
    /// CPU state
    pub cpu: Cpu,

    /// Mapped memory
    pub mem: Memory,
}

impl CpuHarness {
    /// Create a harness with a fresh CPU and zeroed memory
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            mem: Memory::new(),
        }
    }

    /// Lay a bare instruction sequence out at the bottom of the window
    /// and point the machine at it
    pub fn load_program(&mut self, program: &[Instruction]) -> Result<(), Fault> {
        self.load_image(&Image::from_program(program))
    }

    /// Load a full image per the load contract
    pub fn load_image(&mut self, image: &Image) -> Result<(), Fault> {
        self.cpu.load(&mut self.mem, image)
    }

    /// Execute one instruction
    pub fn step(&mut self) -> Result<(), Fault> {
        self.cpu.step(&mut self.mem)
    }

    /// Execute n instructions
    pub fn step_n(&mut self, n: usize) -> Result<(), Fault> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Run to the halt sentinel, returning %rax
    pub fn run(&mut self) -> Result<i64, Fault> {
        self.cpu.run(&mut self.mem)
    }
}

impl Default for CpuHarness {
    fn default() -> Self {
        Self::new()
    }
}
