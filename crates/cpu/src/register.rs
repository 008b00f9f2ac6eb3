use num_traits::Zero;
use smt_ops::{Value, ops};

use crate::error::{Error, Result};

/// A fixed-width machine register. Registers of width `1` are flags and always hold a boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    width: usize,
    value: Value,
}

impl Register {
    /// Creates a register of `width` bits holding concrete zero.
    pub fn new(width: usize) -> Self {
        let value = if width == 1 {
            Value::Bool(false)
        } else {
            Value::default()
        };

        Self { width, value }
    }

    pub fn is_flag(&self) -> bool {
        self.width == 1
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn read(&self) -> &Value {
        &self.value
    }

    /// Stores a value in this register.
    ///
    /// * Booleans, concrete or symbolic, are stored as given.
    /// * Symbolic words are coerced to a boolean when written to a flag. Otherwise they must have
    ///   the width of the register.
    /// * Concrete integers are truncated to the register width and coerced to a boolean when
    ///   written to a flag.
    pub fn write(&mut self, value: impl Into<Value>) -> Result<()> {
        self.value = match value.into() {
            value @ (Value::Bool(_) | Value::SymbolicBool(_)) => value,
            Value::SymbolicBitVec(x) if self.is_flag() => Value::SymbolicBool(x.to_bool()),
            Value::SymbolicBitVec(x) if x.len() != self.width => {
                return Err(Error::WidthMismatch {
                    expected: self.width,
                    actual: x.len(),
                });
            }
            value @ Value::SymbolicBitVec(_) => value,
            value @ Value::Int(_) => match ops::extract(value, 0, self.width)? {
                Value::Int(x) if self.is_flag() => Value::Bool(!x.is_zero()),
                value => value,
            },
        };

        Ok(())
    }
}
