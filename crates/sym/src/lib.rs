//! Symbolic representation of fixed-width machine values.
//!
//! A [SymbolicBit] is a two-valued formula node and a [SymbolicBitVec] is a little-endian word of
//! such nodes. Operations on literal inputs fold into literals, so fully concrete computations never
//! grow a formula.

mod bit;
mod convert;
mod eval;
mod vec;

pub use crate::bit::*;
pub use crate::convert::ConcretizationError;
pub use crate::eval::*;
pub use crate::vec::SymbolicBitVec;

#[cfg(test)]
mod tests;
