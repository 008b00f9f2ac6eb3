//! Operations over [Value]s. Each operation takes the numeric path when every operand is concrete
//! and otherwise builds a formula node.

use num_bigint::BigInt;
use num_traits::{One, Zero};
use sym::{SymbolicBit, SymbolicBitVec};

use crate::error::{ContractViolation, Error, Result};
use crate::value::{Value, bitvec_constant};

mod arith;
mod bits;
mod logic;

pub use arith::*;
pub use bits::*;
pub use logic::*;

/// Maximum operand width, in bits, of the concrete unsigned comparisons. Negative concrete operands
/// are interpreted as two's complement values of this width. Use the `*_within` variants to compare
/// at a different width.
pub const MAX_WIDTH: usize = 128;

/// All ones in the low `size` bits.
fn mask(size: usize) -> BigInt {
    (BigInt::one() << size) - BigInt::one()
}

/// Reads a concrete integer operand. Booleans read as `0` or `1`.
fn concrete_int(operation: &'static str, value: &Value) -> Result<BigInt> {
    value
        .as_int()
        .ok_or_else(|| Error::type_mismatch(operation, value))
}

/// Converts an operand to a word of exactly `size` bits. Concrete operands become constants and
/// symbolic words must already have the requested width.
fn lift_bitvec(operation: &'static str, value: Value, size: usize) -> Result<SymbolicBitVec> {
    match value {
        Value::SymbolicBitVec(x) if x.len() == size => Ok(x),
        Value::SymbolicBitVec(x) => Err(width_mismatch(operation, size, x.len())),
        Value::Int(x) => Ok(bitvec_constant(&x, size)),
        Value::Bool(x) => Ok(SymbolicBitVec::constant(x.into(), size)),
        Value::SymbolicBool(_) => Err(Error::type_mismatch(operation, &value)),
    }
}

/// Converts a two-valued operand to a bit. Integers and words are rejected.
fn lift_bool(operation: &'static str, value: Value) -> Result<SymbolicBit> {
    match value {
        Value::Bool(x) => Ok(SymbolicBit::Literal(x)),
        Value::SymbolicBool(x) => Ok(x),
        value => Err(Error::type_mismatch(operation, &value)),
    }
}

/// Coerces any operand to a bit that is set iff the operand is non-zero.
fn coerce_bool(value: Value) -> SymbolicBit {
    match value {
        Value::Bool(x) => SymbolicBit::Literal(x),
        Value::Int(x) => SymbolicBit::Literal(!x.is_zero()),
        Value::SymbolicBool(x) => x,
        Value::SymbolicBitVec(x) => x.to_bool(),
    }
}

fn width_mismatch(operation: &'static str, expected: usize, actual: usize) -> Error {
    Error::contract(
        operation,
        ContractViolation::WidthMismatch { expected, actual },
    )
}
