use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use sym::{SymbolicBit, SymbolicBitVec};

use super::logic::itebv;
use super::{MAX_WIDTH, concrete_int, lift_bitvec, mask, width_mismatch};
use crate::error::{ContractViolation, Error, Result};
use crate::value::Value;

/// Unsigned `lhs > rhs`. Concrete operands are compared as [MAX_WIDTH]-bit values.
pub fn ugt(lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    ugt_within(MAX_WIDTH, lhs, rhs)
}

/// Unsigned `lhs >= rhs`. Concrete operands are compared as [MAX_WIDTH]-bit values.
pub fn uge(lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    uge_within(MAX_WIDTH, lhs, rhs)
}

/// Unsigned `lhs < rhs`. Concrete operands are compared as [MAX_WIDTH]-bit values.
pub fn ult(lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    ult_within(MAX_WIDTH, lhs, rhs)
}

/// Unsigned `lhs <= rhs`. Concrete operands are compared as [MAX_WIDTH]-bit values.
pub fn ule(lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    ule_within(MAX_WIDTH, lhs, rhs)
}

/// Unsigned `lhs > rhs` where concrete operands are masked to `width` bits.
pub fn ugt_within(width: usize, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    unsigned_compare(
        "ugt",
        width,
        lhs.into(),
        rhs.into(),
        |x, y| x > y,
        SymbolicBitVec::unsigned_greater_than,
    )
}

pub fn uge_within(width: usize, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    unsigned_compare(
        "uge",
        width,
        lhs.into(),
        rhs.into(),
        |x, y| x >= y,
        SymbolicBitVec::unsigned_greater_than_eq,
    )
}

pub fn ult_within(width: usize, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    unsigned_compare(
        "ult",
        width,
        lhs.into(),
        rhs.into(),
        |x, y| x < y,
        SymbolicBitVec::unsigned_less_than,
    )
}

pub fn ule_within(width: usize, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    unsigned_compare(
        "ule",
        width,
        lhs.into(),
        rhs.into(),
        |x, y| x <= y,
        SymbolicBitVec::unsigned_less_than_eq,
    )
}

fn unsigned_compare(
    operation: &'static str,
    width: usize,
    lhs: Value,
    rhs: Value,
    int_op: fn(&BigInt, &BigInt) -> bool,
    bitvec_op: fn(SymbolicBitVec, SymbolicBitVec) -> SymbolicBit,
) -> Result<Value> {
    match (lhs, rhs) {
        (Value::SymbolicBitVec(x), y) => {
            let y = lift_bitvec(operation, y, x.len())?;
            Ok(Value::SymbolicBool(bitvec_op(x, y)))
        }
        (x, Value::SymbolicBitVec(y)) => {
            let x = lift_bitvec(operation, x, y.len())?;
            Ok(Value::SymbolicBool(bitvec_op(x, y)))
        }
        (x, y) => {
            let x = concrete_int(operation, &x)? & mask(width);
            let y = concrete_int(operation, &y)? & mask(width);
            Ok(Value::Bool(int_op(&x, &y)))
        }
    }
}

/// Division operands after dispatch. A concrete operand paired with a symbolic one is lifted to a
/// constant of the symbolic operand's width.
enum DivisionOperands {
    Concrete(BigInt, BigInt),
    Symbolic(SymbolicBitVec, SymbolicBitVec),
}

impl DivisionOperands {
    fn new(operation: &'static str, dividend: Value, divisor: Value) -> Result<Self> {
        match (dividend, divisor) {
            (Value::SymbolicBitVec(x), Value::SymbolicBitVec(y)) => {
                if x.len() != y.len() {
                    return Err(width_mismatch(operation, x.len(), y.len()));
                }
                Ok(Self::Symbolic(x, y))
            }
            (Value::SymbolicBitVec(x), y) => {
                let y = lift_bitvec(operation, y, x.len())?;
                Ok(Self::Symbolic(x, y))
            }
            (x, Value::SymbolicBitVec(y)) => {
                let x = lift_bitvec(operation, x, y.len())?;
                Ok(Self::Symbolic(x, y))
            }
            (x, y) => {
                let x = concrete_int(operation, &x)?;
                let y = concrete_int(operation, &y)?;
                if y.is_zero() {
                    return Err(Error::contract(operation, ContractViolation::DivisionByZero));
                }
                Ok(Self::Concrete(x, y))
            }
        }
    }
}

/// Unsigned division. Concrete operands use floor division and require
/// `dividend >= 0 || divisor > 0`.
pub fn udiv(dividend: impl Into<Value>, divisor: impl Into<Value>) -> Result<Value> {
    match DivisionOperands::new("udiv", dividend.into(), divisor.into())? {
        DivisionOperands::Concrete(x, y) => {
            if x.is_negative() && !y.is_positive() {
                return Err(Error::contract(
                    "udiv",
                    ContractViolation::NegativeUnsignedOperand { value: x },
                ));
            }
            Ok(Value::Int(x.div_floor(&y)))
        }
        DivisionOperands::Symbolic(x, y) => Ok(Value::SymbolicBitVec(x.unsigned_divide(y).0)),
    }
}

/// Signed division truncated toward zero.
pub fn sdiv(dividend: impl Into<Value>, divisor: impl Into<Value>) -> Result<Value> {
    match DivisionOperands::new("sdiv", dividend.into(), divisor.into())? {
        DivisionOperands::Concrete(x, y) => Ok(Value::Int(x / y)),
        DivisionOperands::Symbolic(x, y) => Ok(Value::SymbolicBitVec(x.signed_divide(y).0)),
    }
}

/// Signed modulo of a truncating division. The result has the sign of the dividend.
pub fn smod(dividend: impl Into<Value>, divisor: impl Into<Value>) -> Result<Value> {
    match DivisionOperands::new("smod", dividend.into(), divisor.into())? {
        DivisionOperands::Concrete(x, y) => Ok(Value::Int(x % y)),
        DivisionOperands::Symbolic(x, y) => Ok(Value::SymbolicBitVec(x.signed_divide(y).1)),
    }
}

/// Signed remainder of a flooring division. The result has the sign of the divisor.
pub fn srem(dividend: impl Into<Value>, divisor: impl Into<Value>) -> Result<Value> {
    match DivisionOperands::new("srem", dividend.into(), divisor.into())? {
        DivisionOperands::Concrete(x, y) => Ok(Value::Int(x.mod_floor(&y))),
        DivisionOperands::Symbolic(x, y) => Ok(Value::SymbolicBitVec(x.signed_modulo(y))),
    }
}

/// Unsigned remainder.
pub fn urem(dividend: impl Into<Value>, divisor: impl Into<Value>) -> Result<Value> {
    match DivisionOperands::new("urem", dividend.into(), divisor.into())? {
        DivisionOperands::Concrete(x, y) => Ok(Value::Int(x.mod_floor(&y))),
        DivisionOperands::Symbolic(x, y) => Ok(Value::SymbolicBitVec(x.unsigned_divide(y).1)),
    }
}

/// Simplifies a formula node. Concrete values are returned unchanged.
pub fn simplify(value: impl Into<Value>) -> Value {
    match value.into() {
        Value::SymbolicBool(x) => Value::SymbolicBool(x.simplify()),
        Value::SymbolicBitVec(x) => Value::SymbolicBitVec(x.simplify()),
        value => value,
    }
}

/// Absolute value. A symbolic word selects between itself and its negation on the sign bit.
pub fn abs(value: impl Into<Value>) -> Result<Value> {
    match value.into() {
        Value::SymbolicBitVec(x) => {
            let size = x.len();
            let is_negative = x.msb().cloned().unwrap_or(SymbolicBit::Literal(false));
            let negated = -x.clone();
            itebv(size, is_negative, negated, x)
        }
        value => Ok(Value::Int(concrete_int("abs", &value)?.abs())),
    }
}
