//! EZ64 demo driver
//!
//! Builds one of a few hand-laid-out programs, runs it to the halt
//! sentinel, and prints the accumulator. Set RUST_LOG=trace for a
//! per-instruction execution trace.

use clap::{Parser, ValueEnum};
use ez64::cpu::isa::{Cond, Instruction, Opcode, Operand, Reg};
use ez64::cpu::{Cpu, EXIT_ADDR};
use ez64::image::Image;
use ez64::memory::{Memory, INS_SIZE, MEM_BOT};

/// Built-in demo programs
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Demo {
    /// n!
    Factorial,
    /// 1 + 2 + ... + n
    Sum,
}

#[derive(Parser)]
#[command(about = "Sandboxed x86-64 subset simulator")]
struct Args {
    /// Program to run
    #[arg(value_enum)]
    demo: Demo,

    /// Input value
    #[arg(short, long, default_value_t = 10)]
    n: i64,
}

/// Address of the i-th instruction slot
fn slot(i: i64) -> i64 {
    MEM_BOT + i * INS_SIZE
}

/// Iterative factorial of n, result in %rax
fn factorial(n: i64) -> Vec<Instruction> {
    use Opcode::*;

    vec![
        Instruction::new(Movq, vec![Operand::lit(n), Operand::Reg(Reg::Rdi)]),
        Instruction::new(Movq, vec![Operand::lit(1), Operand::Reg(Reg::Rax)]),
        // loop head
        Instruction::new(Cmpq, vec![Operand::lit(1), Operand::Reg(Reg::Rdi)]),
        Instruction::new(J(Cond::Le), vec![Operand::lit(slot(7))]),
        Instruction::new(Imulq, vec![Operand::Reg(Reg::Rdi), Operand::Reg(Reg::Rax)]),
        Instruction::new(Decq, vec![Operand::Reg(Reg::Rdi)]),
        Instruction::new(Jmp, vec![Operand::lit(slot(2))]),
        Instruction::new(Jmp, vec![Operand::lit(EXIT_ADDR)]),
    ]
}

/// Sum of 1..=n, result in %rax
fn sum(n: i64) -> Vec<Instruction> {
    use Opcode::*;

    vec![
        Instruction::new(Movq, vec![Operand::lit(n), Operand::Reg(Reg::Rdi)]),
        Instruction::new(Xorq, vec![Operand::Reg(Reg::Rax), Operand::Reg(Reg::Rax)]),
        // loop head
        Instruction::new(Cmpq, vec![Operand::lit(0), Operand::Reg(Reg::Rdi)]),
        Instruction::new(J(Cond::Le), vec![Operand::lit(slot(7))]),
        Instruction::new(Addq, vec![Operand::Reg(Reg::Rdi), Operand::Reg(Reg::Rax)]),
        Instruction::new(Decq, vec![Operand::Reg(Reg::Rdi)]),
        Instruction::new(Jmp, vec![Operand::lit(slot(2))]),
        Instruction::new(Jmp, vec![Operand::lit(EXIT_ADDR)]),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let program = match args.demo {
        Demo::Factorial => factorial(args.n),
        Demo::Sum => sum(args.n),
    };

    let image = Image::from_program(&program);
    let mut cpu = Cpu::new();
    let mut mem = Memory::new();
    cpu.load(&mut mem, &image)?;
    let result = cpu.run(&mut mem)?;

    println!("%rax = {result}");
    Ok(())
}
