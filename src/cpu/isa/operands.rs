//! Register and operand definitions

use std::fmt;

use crate::error::Fault;

/// General-purpose registers plus the instruction pointer
///
/// Discriminants are the register file indices:
/// - 0-7: %rax, %rbx, %rcx, %rdx, %rsi, %rdi, %rbp, %rsp
/// - 8-15: %r8 through %r15
/// - 16: %rip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    Rax,
    Rbx,
    Rcx,
    Rdx,
    Rsi,
    Rdi,
    Rbp,
    Rsp,
    R08,
    R09,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    Rip,
}

impl Reg {
    /// Register file size, %rip included
    pub const COUNT: usize = 17;

    /// Index into the register file
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg::Rax => "%rax",
            Reg::Rbx => "%rbx",
            Reg::Rcx => "%rcx",
            Reg::Rdx => "%rdx",
            Reg::Rsi => "%rsi",
            Reg::Rdi => "%rdi",
            Reg::Rbp => "%rbp",
            Reg::Rsp => "%rsp",
            Reg::R08 => "%r8",
            Reg::R09 => "%r9",
            Reg::R10 => "%r10",
            Reg::R11 => "%r11",
            Reg::R12 => "%r12",
            Reg::R13 => "%r13",
            Reg::R14 => "%r14",
            Reg::R15 => "%r15",
            Reg::Rip => "%rip",
        };
        f.write_str(name)
    }
}

/// Immediate: a literal, or a label the linker should have resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Lit(i64),
    Lbl(String),
}

impl Imm {
    /// The literal value; a surviving label is a link-stage defect and
    /// faults
    pub fn value(&self) -> Result<i64, Fault> {
        match self {
            Imm::Lit(v) => Ok(*v),
            Imm::Lbl(l) => Err(Fault::UnresolvedLabel(l.clone())),
        }
    }
}

impl fmt::Display for Imm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Imm::Lit(v) => write!(f, "{v}"),
            Imm::Lbl(l) => f.write_str(l),
        }
    }
}

/// The five operand forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Literal constant
    Imm(Imm),
    /// A register
    Reg(Reg),
    /// Memory at an absolute address
    Ind1(Imm),
    /// Memory at the address held in a register
    Ind2(Reg),
    /// Memory at base register plus displacement
    Ind3(Imm, Reg),
}

impl Operand {
    /// Literal immediate operand
    pub fn lit(value: i64) -> Self {
        Operand::Imm(Imm::Lit(value))
    }

    /// Absolute memory operand
    pub fn abs(addr: i64) -> Self {
        Operand::Ind1(Imm::Lit(addr))
    }

    /// Base-plus-displacement memory operand
    pub fn based(disp: i64, base: Reg) -> Self {
        Operand::Ind3(Imm::Lit(disp), base)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Imm(imm) => write!(f, "${imm}"),
            Operand::Reg(reg) => write!(f, "{reg}"),
            Operand::Ind1(addr) => write!(f, "{addr}"),
            Operand::Ind2(base) => write!(f, "({base})"),
            Operand::Ind3(disp, base) => write!(f, "{disp}({base})"),
        }
    }
}
