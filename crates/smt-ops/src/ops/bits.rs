use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use sym::SymbolicBitVec;

use super::{concrete_int, lift_bitvec, mask, width_mismatch};
use crate::error::{ContractViolation, Error, Result};
use crate::value::{Value, bitvec_constant};

/// Returns bits `[offset, offset + size)` of `value`.
///
/// Extracting the full width of a symbolic word starting at offset `0` returns the word unchanged.
/// Concrete values compute `(value >> offset) & ((1 << size) - 1)`.
pub fn extract(value: impl Into<Value>, offset: usize, size: usize) -> Result<Value> {
    extract_bits("extract", value.into(), offset, size)
}

pub(crate) fn extract_bits(
    operation: &'static str,
    value: Value,
    offset: usize,
    size: usize,
) -> Result<Value> {
    match value {
        Value::SymbolicBitVec(x) if offset == 0 && size == x.len() => Ok(Value::SymbolicBitVec(x)),
        Value::SymbolicBitVec(x) if offset.checked_add(size).is_none_or(|end| end > x.len()) => {
            Err(Error::contract(
                operation,
                ContractViolation::InvalidRange {
                    offset,
                    size,
                    width: x.len(),
                },
            ))
        }
        Value::SymbolicBitVec(x) => Ok(Value::SymbolicBitVec(x.extract(offset, size))),
        value => {
            let x = concrete_int(operation, &value)?;
            Ok(Value::Int((x >> offset) & mask(size)))
        }
    }
}

/// Sign extends a `size_src`-bit value to `size_dest` bits.
pub fn sextend(value: impl Into<Value>, size_src: usize, size_dest: usize) -> Result<Value> {
    if size_src == 0 {
        return Err(Error::contract("sextend", ContractViolation::ZeroWidth));
    }

    if size_dest < size_src {
        return Err(Error::contract(
            "sextend",
            ContractViolation::Narrowing {
                from: size_src,
                to: size_dest,
            },
        ));
    }

    match value.into() {
        Value::SymbolicBitVec(x) if x.len() != size_src => {
            Err(width_mismatch("sextend", size_src, x.len()))
        }
        Value::SymbolicBitVec(x) => Ok(Value::SymbolicBitVec(x.sign_extend(size_dest - size_src))),
        value => {
            let mut x = concrete_int("sextend", &value)? & mask(size_src);
            if x.bit(size_src as u64 - 1) {
                x -= BigInt::one() << size_src;
            }
            Ok(Value::Int(x & mask(size_dest)))
        }
    }
}

/// Zero extends a value to `size` bits. Concrete values are masked to `size` bits.
pub fn zextend(value: impl Into<Value>, size: usize) -> Result<Value> {
    match value.into() {
        Value::SymbolicBitVec(x) if size < x.len() => Err(Error::contract(
            "zextend",
            ContractViolation::Narrowing {
                from: x.len(),
                to: size,
            },
        )),
        Value::SymbolicBitVec(x) => {
            let extension = size - x.len();
            Ok(Value::SymbolicBitVec(x.zero_extend(extension)))
        }
        value => Ok(Value::Int(concrete_int("zextend", &value)? & mask(size))),
    }
}

/// Concatenates equally sized operands into a single `total_size`-bit value. The first operand
/// becomes the most significant part of the result.
///
/// If any operand is symbolic then every concrete operand is lifted to a constant of
/// `total_size / n` bits. A single operand is returned unchanged.
pub fn concat<T: Into<Value>>(
    total_size: usize,
    values: impl IntoIterator<Item = T>,
) -> Result<Value> {
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Err(Error::contract("concat", ContractViolation::EmptyOperands));
    }

    let arg_size = total_size / values.len();
    if arg_size * values.len() != total_size {
        return Err(width_mismatch(
            "concat",
            total_size,
            arg_size * values.len(),
        ));
    }

    if values.iter().any(Value::is_symbolic) {
        if values.len() == 1 {
            return Ok(values.into_iter().next().unwrap_or_default());
        }

        let parts = values
            .into_iter()
            .map(|value| lift_bitvec("concat", value, arg_size))
            .collect::<Result<Vec<_>>>()?;

        // Parts are ordered most significant first
        let result = parts
            .into_iter()
            .rev()
            .fold(SymbolicBitVec::empty(), |low, high| low.concat(high));
        return Ok(Value::SymbolicBitVec(result));
    }

    let part_mask = mask(arg_size);
    values
        .iter()
        .try_fold(BigInt::zero(), |result, value| {
            let part = concrete_int("concat", value)? & &part_mask;
            Ok((result << arg_size) | part)
        })
        .map(Value::Int)
}

/// Arithmetic right shift of the `size`-bit field `value` by `amount` bits.
///
/// A symbolic shift amount narrower than `size` is zero extended first. Shifting by at least `size`
/// bits fills the field with the sign bit.
pub fn sar(size: usize, value: impl Into<Value>, amount: impl Into<Value>) -> Result<Value> {
    if size == 0 {
        return Err(Error::contract("sar", ContractViolation::ZeroWidth));
    }

    let amount = match amount.into() {
        Value::SymbolicBitVec(x) if x.len() < size => {
            let extension = size - x.len();
            Value::SymbolicBitVec(x.zero_extend(extension))
        }
        amount @ Value::SymbolicBool(_) => return Err(Error::type_mismatch("sar", &amount)),
        amount => amount,
    };

    let value = match value.into() {
        Value::SymbolicBitVec(x) if x.len() != size => {
            return Err(width_mismatch("sar", size, x.len()));
        }
        Value::SymbolicBitVec(x) => x,
        value @ Value::SymbolicBool(_) => return Err(Error::type_mismatch("sar", &value)),
        value => {
            let value = concrete_int("sar", &value)?;
            match amount {
                Value::SymbolicBitVec(amount) => {
                    let result = bitvec_constant(&value, size).signed_shift_right(amount);
                    return Ok(Value::SymbolicBitVec(result));
                }
                amount => {
                    let count = shift_count(&amount)?;
                    return Ok(Value::Int(concrete_sar(size, value, count)));
                }
            }
        }
    };

    let amount = match amount {
        Value::SymbolicBitVec(amount) => amount,
        amount => {
            // Any count of at least `size` saturates, and `size` always fits in `size` bits
            let count = shift_count(&amount)?.min(size);
            SymbolicBitVec::constant(count as u128, size)
        }
    };

    Ok(Value::SymbolicBitVec(value.signed_shift_right(amount)))
}

/// Reads a concrete shift count, saturating counts that do not fit in a `usize`.
fn shift_count(amount: &Value) -> Result<usize> {
    let count = concrete_int("sar", amount)?;
    if count.is_negative() {
        return Err(Error::contract(
            "sar",
            ContractViolation::NegativeShiftCount { count },
        ));
    }

    Ok(count.to_usize().unwrap_or(usize::MAX))
}

fn concrete_sar(size: usize, value: BigInt, count: usize) -> BigInt {
    let mut value = value & mask(size);
    let sign = if value.bit(size as u64 - 1) {
        BigInt::one() << (size - 1)
    } else {
        BigInt::zero()
    };

    // The field is saturated with the sign bit after `size` steps
    for _ in 0..count.min(size) {
        value = (value >> 1u32) | &sign;
    }

    value
}
