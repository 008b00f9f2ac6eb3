//! Operator algebra for symbolic execution of machine code.
//!
//! Every operation accepts [Value]s that are either concrete (a plain integer or boolean) or
//! symbolic (a [sym::SymbolicBit] or [sym::SymbolicBitVec] formula node). When every operand is
//! concrete the operation is computed numerically. Otherwise a new formula node is built and left for
//! a constraint solver to decide.
//!
//! ### Widths
//!
//! Concrete integers carry no width; the width is given by the operation (for example the `size`
//! of [ops::extract]) or by the symbolic operand they are combined with. A concrete operand combined
//! with a symbolic one is lifted to a constant of the symbolic operand's width.
//!
//! ### Errors
//!
//! Operand kinds an operation does not support are reported as [Error::TypeMismatch]. Broken
//! preconditions such as division by zero are reported as [Error::ContractViolation]. Neither is
//! recoverable for the execution step that produced it.

mod error;
pub mod ops;
mod value;

pub use error::*;
pub use value::*;

#[cfg(test)]
mod tests;
