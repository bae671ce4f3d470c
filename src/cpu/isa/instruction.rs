//! Opcodes, condition codes, and decoded instructions

use std::fmt;

use crate::cpu::isa::Operand;

/// Condition codes derived from the flag triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    Eq,
    Neq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cond::Eq => "eq",
            Cond::Neq => "neq",
            Cond::Gt => "gt",
            Cond::Ge => "ge",
            Cond::Lt => "lt",
            Cond::Le => "le",
        };
        f.write_str(name)
    }
}

/// The instruction set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Movq,
    Pushq,
    Popq,
    Leaq,
    Incq,
    Decq,
    Negq,
    Notq,
    Addq,
    Subq,
    Imulq,
    Xorq,
    Orq,
    Andq,
    Shlq,
    Sarq,
    Shrq,
    Jmp,
    J(Cond),
    Cmpq,
    Set(Cond),
    Callq,
    Retq,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Movq => f.write_str("movq"),
            Opcode::Pushq => f.write_str("pushq"),
            Opcode::Popq => f.write_str("popq"),
            Opcode::Leaq => f.write_str("leaq"),
            Opcode::Incq => f.write_str("incq"),
            Opcode::Decq => f.write_str("decq"),
            Opcode::Negq => f.write_str("negq"),
            Opcode::Notq => f.write_str("notq"),
            Opcode::Addq => f.write_str("addq"),
            Opcode::Subq => f.write_str("subq"),
            Opcode::Imulq => f.write_str("imulq"),
            Opcode::Xorq => f.write_str("xorq"),
            Opcode::Orq => f.write_str("orq"),
            Opcode::Andq => f.write_str("andq"),
            Opcode::Shlq => f.write_str("shlq"),
            Opcode::Sarq => f.write_str("sarq"),
            Opcode::Shrq => f.write_str("shrq"),
            Opcode::Jmp => f.write_str("jmp"),
            Opcode::J(cond) => write!(f, "j{cond}"),
            Opcode::Cmpq => f.write_str("cmpq"),
            Opcode::Set(cond) => write!(f, "set{cond}"),
            Opcode::Callq => f.write_str("callq"),
            Opcode::Retq => f.write_str("retq"),
        }
    }
}

/// A decoded instruction: an opcode and its operand list
///
/// Operand shape is checked at dispatch time, not construction time; a
/// pairing that does not fit the opcode is an invariant fault when
/// executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self { opcode, operands }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i == 0 {
                write!(f, " {operand}")?;
            } else {
                write!(f, ", {operand}")?;
            }
        }
        Ok(())
    }
}
