//! Condition evaluation tests
//!
//! Conditions are observed through SET after a comparison, which pins
//! the signed comparison conventions (including overflow cases where
//! the naive sign check gives the wrong answer).

use ez64::cpu::isa::{Cond, Instruction, Opcode::*, Operand, Reg::*};
use ez64::cpu::{CpuHarness, EXIT_ADDR};

fn ins(opcode: ez64::cpu::isa::Opcode, operands: Vec<Operand>) -> Instruction {
    Instruction::new(opcode, operands)
}

fn reg(r: ez64::cpu::isa::Reg) -> Operand {
    Operand::Reg(r)
}

fn halt() -> Instruction {
    ins(Jmp, vec![Operand::lit(EXIT_ADDR)])
}

/// Compare dest against src, then read out every condition code
fn conditions_after_cmp(dest: i64, src: i64) -> [i64; 6] {
    let mut harness = CpuHarness::new();
    harness
        .load_program(&[
            ins(Movq, vec![Operand::lit(dest), reg(Rax)]),
            ins(Cmpq, vec![Operand::lit(src), reg(Rax)]),
            ins(Set(Cond::Eq), vec![reg(Rbx)]),
            ins(Set(Cond::Neq), vec![reg(Rcx)]),
            ins(Set(Cond::Lt), vec![reg(Rdx)]),
            ins(Set(Cond::Le), vec![reg(Rsi)]),
            ins(Set(Cond::Gt), vec![reg(Rdi)]),
            ins(Set(Cond::Ge), vec![reg(R08)]),
            halt(),
        ])
        .unwrap();

    harness.run().unwrap();
    [
        harness.cpu.read_reg(Rbx),
        harness.cpu.read_reg(Rcx),
        harness.cpu.read_reg(Rdx),
        harness.cpu.read_reg(Rsi),
        harness.cpu.read_reg(Rdi),
        harness.cpu.read_reg(R08),
    ]
}

#[test]
fn test_conditions_equal() {
    // eq, neq, lt, le, gt, ge
    assert_eq!(conditions_after_cmp(3, 3), [1, 0, 0, 1, 0, 1]);
}

#[test]
fn test_conditions_less() {
    assert_eq!(conditions_after_cmp(2, 5), [0, 1, 1, 1, 0, 0]);
}

#[test]
fn test_conditions_greater() {
    assert_eq!(conditions_after_cmp(5, 2), [0, 1, 0, 0, 1, 1]);
}

#[test]
fn test_conditions_negative_vs_positive() {
    assert_eq!(conditions_after_cmp(-4, 4), [0, 1, 1, 1, 0, 0]);
}

#[test]
fn test_conditions_survive_subtraction_overflow() {
    // MIN - 1 wraps positive, yet MIN < 1 must still hold: SF != OF
    assert_eq!(conditions_after_cmp(i64::MIN, 1), [0, 1, 1, 1, 0, 0]);
}

#[test]
fn test_conditions_max_vs_min() {
    // MAX - MIN overflows; MAX > MIN must still hold
    assert_eq!(conditions_after_cmp(i64::MAX, i64::MIN), [0, 1, 0, 0, 1, 1]);
}

#[test]
fn test_transparent_instructions_preserve_flags() {
    let scratch = ez64::memory::MEM_BOT + 0x8000;
    let mut harness = CpuHarness::new();
    // CMPQ fixes the flags, then every non-affecting opcode runs
    harness
        .load_program(&[
            ins(Cmpq, vec![Operand::lit(0), reg(Rax)]),
            ins(Movq, vec![Operand::lit(3), reg(Rbx)]),
            ins(Leaq, vec![Operand::abs(scratch), reg(Rcx)]),
            ins(Pushq, vec![reg(Rbx)]),
            ins(Popq, vec![reg(Rdx)]),
            ins(Callq, vec![Operand::lit(ez64::memory::MEM_BOT + 7 * 8)]),
            ins(Jmp, vec![Operand::lit(ez64::memory::MEM_BOT + 8 * 8)]),
            ins(Retq, vec![]), // subroutine target
            ins(Set(Cond::Eq), vec![reg(Rsi)]),
            halt(),
        ])
        .unwrap();

    harness.run().unwrap();
    // ZF from the initial comparison is still the live flag state
    assert!(harness.cpu.flags.zf);
    assert!(!harness.cpu.flags.sf);
    assert!(!harness.cpu.flags.of);
    assert_eq!(harness.cpu.read_reg(Rsi), 1);
}
