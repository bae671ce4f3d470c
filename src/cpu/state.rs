//! Machine state and the fetch-execute cycle
//!
//! The CPU state is the register file (sixteen general-purpose 64-bit
//! registers plus the instruction pointer) and the three condition
//! flags. Memory is owned separately and passed into each step, so a
//! machine is the pair of a Cpu and a Memory.

use log::{debug, trace};

use crate::cpu::execute;
use crate::cpu::isa::{Operand, Reg};
use crate::error::Fault;
use crate::image::Image;
use crate::memory::{Memory, SByte, INS_SIZE, MEM_TOP};

/// Halt sentinel for the instruction pointer
///
/// Lies outside the mapped window, so it can never collide with a real
/// instruction address.
pub const EXIT_ADDR: i64 = 0xfdead;

/// Condition flags
///
/// Rewritten wholesale by the most recent flag-affecting instruction;
/// everything else leaves them alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Signed overflow
    pub of: bool,
    /// Sign: the result was negative
    pub sf: bool,
    /// Zero
    pub zf: bool,
}

/// CPU state
pub struct Cpu {
    /// Register file, indexed by the Reg discriminants
    pub regs: [i64; Reg::COUNT],

    /// Condition flags
    pub flags: Flags,
}

impl Cpu {
    /// Create a CPU with zeroed registers and cleared flags
    pub fn new() -> Self {
        Self {
            regs: [0; Reg::COUNT],
            flags: Flags::default(),
        }
    }

    /// Read a register
    #[inline(always)]
    pub fn read_reg(&self, reg: Reg) -> i64 {
        self.regs[reg.index()]
    }

    /// Write a register
    #[inline(always)]
    pub fn write_reg(&mut self, reg: Reg, value: i64) {
        self.regs[reg.index()] = value;
    }

    /// Materialize a linked image
    ///
    /// %rip gets the entry point, %rsp the last legal quadword address,
    /// every other register zero; flags clear; segments blitted at
    /// their positions.
    pub fn load(&mut self, mem: &mut Memory, image: &Image) -> Result<(), Fault> {
        self.regs = [0; Reg::COUNT];
        self.flags = Flags::default();
        self.write_reg(Reg::Rip, image.entry);
        self.write_reg(Reg::Rsp, MEM_TOP - 8);
        mem.load_at(image.text_pos, &image.text)?;
        mem.load_at(image.data_pos, &image.data)?;
        Ok(())
    }

    /// Address computed by an indirect operand, before any dereference
    pub fn effective_address(&self, operand: &Operand) -> Result<i64, Fault> {
        match operand {
            Operand::Ind1(addr) => addr.value(),
            Operand::Ind2(base) => Ok(self.read_reg(*base)),
            Operand::Ind3(disp, base) => {
                Ok(self.read_reg(*base).wrapping_add(disp.value()?))
            }
            Operand::Imm(_) | Operand::Reg(_) => Err(Fault::NotAddressable),
        }
    }

    /// Resolve an operand to its 64-bit value
    ///
    /// Memory forms always read a full quadword.
    pub fn read_operand(&self, mem: &Memory, operand: &Operand) -> Result<i64, Fault> {
        match operand {
            Operand::Imm(imm) => imm.value(),
            Operand::Reg(reg) => Ok(self.read_reg(*reg)),
            _ => mem.read_quad(self.effective_address(operand)?),
        }
    }

    /// Store a 64-bit value into a register or memory destination
    pub fn write_operand(
        &mut self,
        mem: &mut Memory,
        operand: &Operand,
        value: i64,
    ) -> Result<(), Fault> {
        match operand {
            Operand::Imm(_) => Err(Fault::ImmediateStore),
            Operand::Reg(reg) => {
                self.write_reg(*reg, value);
                Ok(())
            }
            _ => mem.write_quad(self.effective_address(operand)?, value),
        }
    }

    /// Execute one instruction
    ///
    /// Fetches the slot at %rip, which must hold an instruction head,
    /// advances %rip past it, and dispatches. Control-flow handlers
    /// overwrite %rip with their target.
    pub fn step(&mut self, mem: &mut Memory) -> Result<(), Fault> {
        let ip = self.read_reg(Reg::Rip);
        let ins = match mem.read(ip)? {
            SByte::InsHead(ins) => ins.clone(),
            _ => return Err(Fault::NotAnInstruction(ip)),
        };
        trace!("{ip:#x}: {ins}");
        self.write_reg(Reg::Rip, ip + INS_SIZE);
        execute::dispatch(self, mem, &ins)
    }

    /// Run until %rip reaches the halt sentinel; return %rax
    pub fn run(&mut self, mem: &mut Memory) -> Result<i64, Fault> {
        while self.read_reg(Reg::Rip) != EXIT_ADDR {
            self.step(mem)?;
        }
        debug!("halted with %rax = {}", self.read_reg(Reg::Rax));
        Ok(self.read_reg(Reg::Rax))
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
