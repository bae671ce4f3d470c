//! Basic machine tests: load contract, fetch cycle, movq, halt

use ez64::cpu::isa::{Instruction, Opcode::*, Operand, Reg::*};
use ez64::cpu::{CpuHarness, EXIT_ADDR};
use ez64::image::Image;
use ez64::memory::{serialize_quad, INS_SIZE, MEM_BOT, MEM_TOP};

fn ins(opcode: ez64::cpu::isa::Opcode, operands: Vec<Operand>) -> Instruction {
    Instruction::new(opcode, operands)
}

fn reg(r: ez64::cpu::isa::Reg) -> Operand {
    Operand::Reg(r)
}

fn halt() -> Instruction {
    ins(Jmp, vec![Operand::lit(EXIT_ADDR)])
}

#[test]
fn test_load_contract() {
    let mut harness = CpuHarness::new();
    harness.load_program(&[halt()]).unwrap();

    // Entry at the bottom of the window, stack at the last legal quadword
    assert_eq!(harness.cpu.read_reg(Rip), MEM_BOT);
    assert_eq!(harness.cpu.read_reg(Rsp), MEM_TOP - 8);

    // Everything else zeroed, flags clear
    assert_eq!(harness.cpu.read_reg(Rax), 0);
    assert_eq!(harness.cpu.read_reg(R15), 0);
    assert!(!harness.cpu.flags.of);
    assert!(!harness.cpu.flags.sf);
    assert!(!harness.cpu.flags.zf);
}

#[test]
fn test_rip_advances_by_one_slot() {
    let mut harness = CpuHarness::new();
    harness
        .load_program(&[ins(Movq, vec![Operand::lit(1), reg(Rax)]), halt()])
        .unwrap();

    harness.step().unwrap();
    assert_eq!(harness.cpu.read_reg(Rip), MEM_BOT + INS_SIZE);
}

#[test]
fn test_halt_returns_rax() {
    let mut harness = CpuHarness::new();
    // MOVQ $42, %rax; JMP exit
    harness
        .load_program(&[ins(Movq, vec![Operand::lit(42), reg(Rax)]), halt()])
        .unwrap();

    assert_eq!(harness.run().unwrap(), 42);
    assert_eq!(harness.cpu.read_reg(Rip), EXIT_ADDR);
}

#[test]
fn test_movq_register_to_register() {
    let mut harness = CpuHarness::new();
    harness
        .load_program(&[
            ins(Movq, vec![Operand::lit(-7), reg(Rbx)]),
            ins(Movq, vec![reg(Rbx), reg(Rax)]),
            halt(),
        ])
        .unwrap();

    assert_eq!(harness.run().unwrap(), -7);
    assert_eq!(harness.cpu.read_reg(Rbx), -7);
}

#[test]
fn test_movq_through_memory() {
    let scratch = MEM_BOT + 0x8000;
    let mut harness = CpuHarness::new();
    // Store through an absolute address, read back through a register base
    harness
        .load_program(&[
            ins(Movq, vec![Operand::lit(0x1234), Operand::abs(scratch)]),
            ins(Movq, vec![Operand::lit(scratch), reg(Rbx)]),
            ins(Movq, vec![Operand::Ind2(Rbx), reg(Rax)]),
            halt(),
        ])
        .unwrap();

    assert_eq!(harness.run().unwrap(), 0x1234);
}

#[test]
fn test_movq_with_displacement() {
    let scratch = MEM_BOT + 0x8000;
    let mut harness = CpuHarness::new();
    harness
        .load_program(&[
            ins(Movq, vec![Operand::lit(scratch), reg(Rbx)]),
            ins(Movq, vec![Operand::lit(99), Operand::based(16, Rbx)]),
            ins(Movq, vec![Operand::based(16, Rbx), reg(Rax)]),
            halt(),
        ])
        .unwrap();

    assert_eq!(harness.run().unwrap(), 99);
}

#[test]
fn test_movq_leaves_flags_alone() {
    let mut harness = CpuHarness::new();
    // CMPQ sets ZF, the MOVQs must not disturb it
    harness
        .load_program(&[
            ins(Cmpq, vec![Operand::lit(0), reg(Rax)]),
            ins(Movq, vec![Operand::lit(5), reg(Rax)]),
            ins(Movq, vec![reg(Rax), reg(Rbx)]),
            halt(),
        ])
        .unwrap();

    harness.run().unwrap();
    assert!(harness.cpu.flags.zf);
    assert!(!harness.cpu.flags.sf);
    assert!(!harness.cpu.flags.of);
}

#[test]
fn test_leaq_computes_without_dereference() {
    let mut harness = CpuHarness::new();
    // The computed address is far outside the window; leaq must not fault
    harness
        .load_program(&[
            ins(Movq, vec![Operand::lit(0x20), reg(Rbx)]),
            ins(Leaq, vec![Operand::based(0x99_0000, Rbx), reg(Rax)]),
            halt(),
        ])
        .unwrap();

    assert_eq!(harness.run().unwrap(), 0x99_0020);
}

#[test]
fn test_step_n_runs_a_prefix() {
    let mut harness = CpuHarness::new();
    harness
        .load_program(&[
            ins(Movq, vec![Operand::lit(2), reg(Rax)]),
            ins(Addq, vec![Operand::lit(3), reg(Rax)]),
            halt(),
        ])
        .unwrap();

    harness.step_n(2).unwrap();
    assert_eq!(harness.cpu.read_reg(Rax), 5);
    assert_eq!(harness.cpu.read_reg(Rip), MEM_BOT + 2 * INS_SIZE);
}

#[test]
fn test_image_with_data_segment() {
    let program = [
        ins(Movq, vec![Operand::abs(MEM_BOT + 2 * INS_SIZE), reg(Rax)]),
        halt(),
    ];
    // The data segment sits right behind the two instruction slots
    let image = Image::from_program(&program).with_data(serialize_quad(0xbeef).to_vec());

    let mut harness = CpuHarness::new();
    harness.load_image(&image).unwrap();
    assert_eq!(harness.run().unwrap(), 0xbeef);
}
