//! Flag engine
//!
//! Single writer for the condition flags: every flag-affecting
//! instruction funnels its inputs and result through one of these
//! functions, keeping the x86 sign and overflow conventions in one
//! place. Instructions without a rule here leave the flags alone.
//!
//! Also hosts the condition evaluator shared by conditional jumps and
//! conditional sets.

use crate::cpu::isa::Cond;
use crate::cpu::state::Flags;

/// SF and ZF from a result; shared by every rule below
#[inline(always)]
fn result_flags(flags: &mut Flags, result: i64) {
    flags.sf = result < 0;
    flags.zf = result == 0;
}

/// Addition (addq, incq)
///
/// Overflow iff both inputs share a sign and the result has the
/// opposite one: ((dest ^ result) & (src ^ result)) has its top bit set.
pub fn set_add(flags: &mut Flags, dest: i64, src: i64, result: i64) {
    flags.of = ((dest ^ result) & (src ^ result)) < 0;
    result_flags(flags, result);
}

/// Subtraction (subq, decq, cmpq), result = dest - src
///
/// Overflow iff the inputs differ in sign and the result sign differs
/// from dest. Subtracting i64::MIN always overflows: its negation is
/// not representable.
pub fn set_sub(flags: &mut Flags, dest: i64, src: i64, result: i64) {
    flags.of = src == i64::MIN || ((dest ^ src) & (dest ^ result)) < 0;
    result_flags(flags, result);
}

/// Signed multiplication (imulq)
///
/// Only OF, set when the full product does not fit in 64 bits; SF and
/// ZF keep their previous values.
pub fn set_imul(flags: &mut Flags, overflow: bool) {
    flags.of = overflow;
}

/// Bitwise operations (andq, orq, xorq, notq): OF always cleared
pub fn set_logic(flags: &mut Flags, result: i64) {
    flags.of = false;
    result_flags(flags, result);
}

/// Negation: overflow iff the operand was i64::MIN
pub fn set_neg(flags: &mut Flags, operand: i64, result: i64) {
    flags.of = operand == i64::MIN;
    result_flags(flags, result);
}

/// Left shift
///
/// A zero count touches nothing. OF is defined only for count 1, set
/// iff the top two bits of the original value differ.
pub fn set_shl(flags: &mut Flags, original: i64, count: u32, result: i64) {
    if count == 0 {
        return;
    }
    if count == 1 {
        flags.of = (original ^ (original << 1)) < 0;
    }
    result_flags(flags, result);
}

/// Logical right shift
///
/// A zero count touches nothing. OF is defined only for count 1, set
/// to the sign bit of the original value.
pub fn set_shr(flags: &mut Flags, original: i64, count: u32, result: i64) {
    if count == 0 {
        return;
    }
    if count == 1 {
        flags.of = original < 0;
    }
    result_flags(flags, result);
}

/// Arithmetic right shift
///
/// A zero count touches nothing. OF is defined only for count 1,
/// always cleared.
pub fn set_sar(flags: &mut Flags, count: u32, result: i64) {
    if count == 0 {
        return;
    }
    if count == 1 {
        flags.of = false;
    }
    result_flags(flags, result);
}

/// Evaluate a condition code against the flag triple
///
/// Signed comparisons follow the x86 convention: less-than holds when
/// SF and OF disagree.
#[inline(always)]
pub fn eval_cond(cond: Cond, flags: &Flags) -> bool {
    match cond {
        Cond::Eq => flags.zf,
        Cond::Neq => !flags.zf,
        Cond::Lt => flags.sf != flags.of,
        Cond::Ge => flags.sf == flags.of,
        Cond::Le => flags.sf != flags.of || flags.zf,
        Cond::Gt => flags.sf == flags.of && !flags.zf,
    }
}
