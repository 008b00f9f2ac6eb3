use num_bigint::BigInt;

use crate::value::{Value, ValueKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The operation does not accept an operand of this kind.
    #[error("{operation}: unsupported operand of kind {operand}")]
    TypeMismatch {
        operation: &'static str,
        operand: ValueKind,
    },

    /// A precondition of the operation was violated by its operands.
    #[error("{operation}: {violation}")]
    ContractViolation {
        operation: &'static str,
        violation: ContractViolation,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("division by zero")]
    DivisionByZero,

    #[error("negative operand {value} where an unsigned operand is required")]
    NegativeUnsignedOperand { value: BigInt },

    #[error("negative shift count {count}")]
    NegativeShiftCount { count: BigInt },

    #[error("expected a {expected}-bit operand but found {actual} bits")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("cannot extract {size} bits at offset {offset} from a {width}-bit operand")]
    InvalidRange {
        offset: usize,
        size: usize,
        width: usize,
    },

    #[error("cannot extend a {from}-bit operand to {to} bits")]
    Narrowing { from: usize, to: usize },

    #[error("operand width must be non-zero")]
    ZeroWidth,

    #[error("at least one operand is required")]
    EmptyOperands,
}

impl Error {
    pub fn type_mismatch(operation: &'static str, operand: &Value) -> Self {
        Self::TypeMismatch {
            operation,
            operand: operand.kind(),
        }
    }

    pub fn contract(operation: &'static str, violation: ContractViolation) -> Self {
        Self::ContractViolation {
            operation,
            violation,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
