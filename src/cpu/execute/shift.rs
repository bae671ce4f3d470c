//! Shift instruction handlers (shlq, shrq, sarq)
//!
//! The count comes from an immediate or from %rcx; any other register
//! is an invariant fault. Counts are truncated to the low 6 bits.

use crate::cpu::execute::flags;
use crate::cpu::isa::{Operand, Reg};
use crate::cpu::Cpu;
use crate::error::Fault;
use crate::memory::Memory;

/// Resolve the shift count and mask it to [0, 63]
fn shift_count(cpu: &Cpu, amt: &Operand) -> Result<u32, Fault> {
    let raw = match amt {
        Operand::Imm(imm) => imm.value()?,
        Operand::Reg(Reg::Rcx) => cpu.read_reg(Reg::Rcx),
        _ => return Err(Fault::ShiftCountSource),
    };
    Ok((raw & 0x3f) as u32)
}

/// shlq amt, dest - shift left
pub fn shlq(cpu: &mut Cpu, mem: &mut Memory, amt: &Operand, dst: &Operand) -> Result<(), Fault> {
    let count = shift_count(cpu, amt)?;
    let value = cpu.read_operand(mem, dst)?;
    let result = value << count;
    cpu.write_operand(mem, dst, result)?;
    flags::set_shl(&mut cpu.flags, value, count, result);
    Ok(())
}

/// shrq amt, dest - logical shift right; zeros enter from the top
pub fn shrq(cpu: &mut Cpu, mem: &mut Memory, amt: &Operand, dst: &Operand) -> Result<(), Fault> {
    let count = shift_count(cpu, amt)?;
    let value = cpu.read_operand(mem, dst)?;
    let result = ((value as u64) >> count) as i64;
    cpu.write_operand(mem, dst, result)?;
    flags::set_shr(&mut cpu.flags, value, count, result);
    Ok(())
}

/// sarq amt, dest - arithmetic shift right; the sign bit copies down
pub fn sarq(cpu: &mut Cpu, mem: &mut Memory, amt: &Operand, dst: &Operand) -> Result<(), Fault> {
    let count = shift_count(cpu, amt)?;
    let value = cpu.read_operand(mem, dst)?;
    let result = value >> count;
    cpu.write_operand(mem, dst, result)?;
    flags::set_sar(&mut cpu.flags, count, result);
    Ok(())
}
