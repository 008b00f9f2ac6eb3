use crate::bit::SymbolicBit;
use crate::vec::SymbolicBitVec;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConcretizationError {
    #[error("non-literal bit at index {bit_index}")]
    NonLiteralBit { bit_index: usize },

    #[error("value exceeded maximum number of bits ({max_bits})")]
    Overflow { max_bits: u32 },
}

impl From<bool> for SymbolicBit {
    fn from(value: bool) -> Self {
        SymbolicBit::Literal(value)
    }
}

impl TryFrom<SymbolicBit> for bool {
    type Error = ConcretizationError;

    fn try_from(value: SymbolicBit) -> Result<Self, Self::Error> {
        value
            .maybe_literal()
            .ok_or(ConcretizationError::NonLiteralBit { bit_index: 0 })
    }
}

impl From<SymbolicBit> for SymbolicBitVec {
    fn from(value: SymbolicBit) -> Self {
        std::iter::once(value).collect()
    }
}

/// Converts literal bits into a `u128`. Bits beyond `max_bits` must be literal zeros.
fn concretize(value: &SymbolicBitVec, max_bits: u32) -> Result<u128, ConcretizationError> {
    value
        .iter()
        .enumerate()
        .try_fold(0u128, |result, (bit_index, bit)| {
            match bit.maybe_literal() {
                None => Err(ConcretizationError::NonLiteralBit { bit_index }),
                Some(false) => Ok(result),
                Some(true) if bit_index < max_bits as usize => Ok(result | (1 << bit_index)),
                Some(true) => Err(ConcretizationError::Overflow { max_bits }),
            }
        })
}

macro_rules! concrete_type {
    ($type:ty) => {
        impl From<$type> for SymbolicBitVec {
            fn from(value: $type) -> Self {
                SymbolicBitVec::constant(value.into(), <$type>::BITS as usize)
            }
        }

        impl TryFrom<&SymbolicBitVec> for $type {
            type Error = ConcretizationError;

            fn try_from(value: &SymbolicBitVec) -> Result<Self, Self::Error> {
                let value = concretize(value, <$type>::BITS)?;

                // Bits above the type width were rejected above
                Ok(value as $type)
            }
        }

        impl TryFrom<SymbolicBitVec> for $type {
            type Error = ConcretizationError;

            fn try_from(value: SymbolicBitVec) -> Result<Self, Self::Error> {
                <$type>::try_from(&value)
            }
        }
    };
}

concrete_type!(u8);
concrete_type!(u16);
concrete_type!(u32);
concrete_type!(u64);
concrete_type!(u128);
