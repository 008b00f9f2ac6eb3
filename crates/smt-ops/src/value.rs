use num_bigint::BigInt;
use num_traits::{One, Zero};
use sym::{SymbolicBit, SymbolicBitVec};

/// A machine value that is either fully known or a formula over unknown bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A concrete boolean. Where an integer is expected this reads as `0` or `1`.
    Bool(bool),

    /// A concrete integer of arbitrary precision. The width is implied by the operation.
    Int(BigInt),

    /// A two-valued formula node.
    SymbolicBool(SymbolicBit),

    /// A fixed-width formula node.
    SymbolicBitVec(SymbolicBitVec),
}

/// The kind of a [Value], reported by type errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    SymbolicBool,
    SymbolicBitVec,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::SymbolicBool => "symbolic bool",
            Self::SymbolicBitVec => "symbolic bitvec",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::SymbolicBool(_) => ValueKind::SymbolicBool,
            Self::SymbolicBitVec(_) => ValueKind::SymbolicBitVec,
        }
    }

    /// Returns `true` if this value is a formula node. Literal nodes are still symbolic.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::SymbolicBool(_) | Self::SymbolicBitVec(_))
    }

    pub fn is_concrete(&self) -> bool {
        !self.is_symbolic()
    }

    /// Returns `true` for values that are two-valued: concrete or symbolic booleans.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::SymbolicBool(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(x) => Some(*x),
            _ => None,
        }
    }

    /// The concrete integer this value represents. Booleans read as `0` or `1`.
    pub fn as_int(&self) -> Option<BigInt> {
        match self {
            Self::Bool(x) => Some(if *x { BigInt::one() } else { BigInt::zero() }),
            Self::Int(x) => Some(x.clone()),
            _ => None,
        }
    }

    /// Width of a symbolic word. Concrete values have no intrinsic width.
    pub fn width(&self) -> Option<usize> {
        match self {
            Self::SymbolicBitVec(x) => Some(x.len()),
            Self::SymbolicBool(_) => Some(1),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Int(BigInt::zero())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(x) => write!(f, "{x}"),
            Self::Int(x) => write!(f, "{x:#x}"),
            Self::SymbolicBool(x) => match x.maybe_literal() {
                Some(x) => write!(f, "{x}"),
                None => f.write_str("<symbolic bool>"),
            },
            Self::SymbolicBitVec(x) => write!(f, "<symbolic {len}-bit value>", len = x.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Self::Int(value)
    }
}

impl From<SymbolicBit> for Value {
    fn from(value: SymbolicBit) -> Self {
        Self::SymbolicBool(value)
    }
}

impl From<SymbolicBitVec> for Value {
    fn from(value: SymbolicBitVec) -> Self {
        Self::SymbolicBitVec(value)
    }
}

macro_rules! from_int {
    ($($type:ty),*) => {
        $(
            impl From<$type> for Value {
                fn from(value: $type) -> Self {
                    Self::Int(BigInt::from(value))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Builds a constant node of `size` bits from the two's complement representation of `value`.
pub fn bitvec_constant(value: &BigInt, size: usize) -> SymbolicBitVec {
    SymbolicBitVec::from_le_bits((0..size as u64).map(|i| value.bit(i)))
}
