//! Control flow handlers (jmp, conditional jumps, callq, retq, set)
//!
//! None of these touch the flags; conditional forms only read them.

use crate::cpu::execute::{flags, stack};
use crate::cpu::isa::{Cond, Operand, Reg};
use crate::cpu::Cpu;
use crate::error::Fault;
use crate::memory::Memory;

/// jmp src - unconditional transfer
pub fn jmp(cpu: &mut Cpu, mem: &mut Memory, src: &Operand) -> Result<(), Fault> {
    let target = cpu.read_operand(mem, src)?;
    cpu.write_reg(Reg::Rip, target);
    Ok(())
}

/// j(cc) src - transfer when the condition holds
///
/// The target is only resolved on the taken path; a not-taken jump
/// falls through to the already-advanced %rip.
pub fn jcc(cpu: &mut Cpu, mem: &mut Memory, cond: Cond, src: &Operand) -> Result<(), Fault> {
    if flags::eval_cond(cond, &cpu.flags) {
        let target = cpu.read_operand(mem, src)?;
        cpu.write_reg(Reg::Rip, target);
    }
    Ok(())
}

/// callq src - push the return address, then transfer
///
/// %rip has already been advanced past the call slot, so it is the
/// return address.
pub fn callq(cpu: &mut Cpu, mem: &mut Memory, src: &Operand) -> Result<(), Fault> {
    let target = cpu.read_operand(mem, src)?;
    let return_addr = cpu.read_reg(Reg::Rip);
    stack::push_quad(cpu, mem, return_addr)?;
    cpu.write_reg(Reg::Rip, target);
    Ok(())
}

/// retq - pop the return address into %rip
pub fn retq(cpu: &mut Cpu, mem: &mut Memory) -> Result<(), Fault> {
    let return_addr = stack::pop_quad(cpu, mem)?;
    cpu.write_reg(Reg::Rip, return_addr);
    Ok(())
}

/// set(cc) dest - write 1 when the condition holds, 0 otherwise
///
/// This machine has no sub-quadword stores, so the whole 64-bit
/// destination is written.
pub fn set(cpu: &mut Cpu, mem: &mut Memory, cond: Cond, dst: &Operand) -> Result<(), Fault> {
    let value = i64::from(flags::eval_cond(cond, &cpu.flags));
    cpu.write_operand(mem, dst, value)
}
