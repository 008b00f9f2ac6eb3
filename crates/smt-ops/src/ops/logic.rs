use num_bigint::BigInt;
use num_traits::Zero;
use sym::{SymbolicBit, SymbolicBitVec};

use super::bits::extract_bits;
use super::{coerce_bool, concrete_int, lift_bitvec, lift_bool};
use crate::error::{ContractViolation, Error, Result};
use crate::value::Value;

/// Extracts the low 8 bits of a value. A symbolic word that is already 8 bits wide is returned
/// unchanged.
pub fn ord(value: impl Into<Value>) -> Result<Value> {
    byte("ord", value.into())
}

/// Constructs an 8-bit quantity from a value. Identical to [ord]; concrete bytes are plain integers.
pub fn chr(value: impl Into<Value>) -> Result<Value> {
    byte("chr", value.into())
}

fn byte(operation: &'static str, value: Value) -> Result<Value> {
    match value {
        Value::SymbolicBitVec(x) if x.len() == 8 => Ok(Value::SymbolicBitVec(x)),
        Value::SymbolicBool(_) => Err(Error::type_mismatch(operation, &value)),
        value => extract_bits(operation, value, 0, 8),
    }
}

/// Negation. Booleans are logically negated while integers and words are bitwise negated.
pub fn not(value: impl Into<Value>) -> Value {
    match value.into() {
        Value::Bool(x) => Value::Bool(!x),
        Value::Int(x) => Value::Int(!x),
        Value::SymbolicBool(x) => Value::SymbolicBool(!x),
        Value::SymbolicBitVec(x) => Value::SymbolicBitVec(!x),
    }
}

/// Logical conjunction of two booleans.
///
/// Unlike [or] and [xor], the operands are not normalized: both must already be two-valued
/// (concrete or symbolic booleans). Integer and word operands are a type mismatch.
pub fn and(lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    match (lhs.into(), rhs.into()) {
        (Value::Bool(x), Value::Bool(y)) => Ok(Value::Bool(x && y)),
        (x, y) => {
            let x = lift_bool("and", x)?;
            let y = lift_bool("and", y)?;
            Ok(Value::SymbolicBool(x & y))
        }
    }
}

/// Logical disjunction. Integer and word operands are combined bitwise and the result is
/// normalized to a boolean that is set iff the combination is non-zero.
pub fn or(lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    normalized(
        "or",
        lhs.into(),
        rhs.into(),
        |x, y| x | y,
        |x, y| x | y,
        |x, y| x | y,
    )
}

/// Exclusive or. Integer and word operands are combined bitwise and the result is normalized to a
/// boolean that is set iff the combination is non-zero.
pub fn xor(lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value> {
    normalized(
        "xor",
        lhs.into(),
        rhs.into(),
        |x, y| x ^ y,
        |x, y| x ^ y,
        |x, y| x ^ y,
    )
}

/// Conjunction of every operand. Fails if `values` is empty.
pub fn and_all<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Result<Value> {
    fold_all("and", values, |x, y| and(x, y))
}

/// Disjunction of every operand. Fails if `values` is empty.
pub fn or_all<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Result<Value> {
    fold_all("or", values, |x, y| or(x, y))
}

fn fold_all<T: Into<Value>>(
    operation: &'static str,
    values: impl IntoIterator<Item = T>,
    op: fn(Value, Value) -> Result<Value>,
) -> Result<Value> {
    let mut values = values.into_iter().map(Into::into);
    let first = values
        .next()
        .ok_or(Error::contract(operation, ContractViolation::EmptyOperands))?;
    values.try_fold(first, op)
}

fn normalized(
    operation: &'static str,
    lhs: Value,
    rhs: Value,
    bool_op: fn(SymbolicBit, SymbolicBit) -> SymbolicBit,
    int_op: fn(BigInt, BigInt) -> BigInt,
    bitvec_op: fn(SymbolicBitVec, SymbolicBitVec) -> SymbolicBitVec,
) -> Result<Value> {
    let combined = match (lhs, rhs) {
        (Value::SymbolicBool(x), y) | (y, Value::SymbolicBool(x)) => {
            return Ok(Value::SymbolicBool(bool_op(x, coerce_bool(y))));
        }
        (Value::SymbolicBitVec(x), y) => {
            let y = lift_bitvec(operation, y, x.len())?;
            Value::SymbolicBitVec(bitvec_op(x, y))
        }
        (x, Value::SymbolicBitVec(y)) => {
            let x = lift_bitvec(operation, x, y.len())?;
            Value::SymbolicBitVec(bitvec_op(x, y))
        }
        (x, y) => Value::Int(int_op(
            concrete_int(operation, &x)?,
            concrete_int(operation, &y)?,
        )),
    };

    let non_zero = match combined {
        Value::SymbolicBitVec(x) => Value::SymbolicBool(x.to_bool()),
        combined => Value::Bool(!concrete_int(operation, &combined)?.is_zero()),
    };

    ite(non_zero, true, false)
}

/// Selects between two-valued branches. A concrete condition returns the chosen branch unchanged
/// without building a node; a symbolic condition requires both branches to be booleans.
pub fn ite(
    condition: impl Into<Value>,
    then: impl Into<Value>,
    otherwise: impl Into<Value>,
) -> Result<Value> {
    match condition.into() {
        Value::Bool(true) => Ok(then.into()),
        Value::Bool(false) => Ok(otherwise.into()),
        Value::SymbolicBool(condition) => {
            let then = lift_bool("ite", then.into())?;
            let otherwise = lift_bool("ite", otherwise.into())?;
            Ok(Value::SymbolicBool(condition.select(then, otherwise)))
        }
        condition => Err(Error::type_mismatch("ite", &condition)),
    }
}

/// Selects between `size`-bit branches. Integer and word conditions are true iff non-zero. A
/// concrete condition returns the chosen branch unchanged without building a node.
pub fn itebv(
    size: usize,
    condition: impl Into<Value>,
    then: impl Into<Value>,
    otherwise: impl Into<Value>,
) -> Result<Value> {
    let then = then.into();
    let otherwise = otherwise.into();
    for branch in [&then, &otherwise] {
        if let Value::SymbolicBool(_) = branch {
            return Err(Error::type_mismatch("itebv", branch));
        }
    }

    match condition.into() {
        Value::Bool(true) => Ok(then),
        Value::Bool(false) => Ok(otherwise),
        Value::Int(condition) if condition.is_zero() => Ok(otherwise),
        Value::Int(_) => Ok(then),
        condition => {
            let condition = coerce_bool(condition);
            let then = lift_bitvec("itebv", then, size)?;
            let otherwise = lift_bitvec("itebv", otherwise, size)?;
            Ok(Value::SymbolicBitVec(SymbolicBitVec::select(
                condition, then, otherwise,
            )))
        }
    }
}
