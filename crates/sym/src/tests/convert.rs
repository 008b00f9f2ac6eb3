use crate::*;

#[test]
fn symbolic_concrete_conversions() {
    for n in u8::MIN..=u8::MAX {
        let symbolic_byte: SymbolicBitVec = n.into();
        let concrete_byte: u8 = symbolic_byte
            .try_into()
            .expect("failed to convert back into byte");
        assert_eq!(concrete_byte, n);
    }
}

#[test]
fn widening_conversion() {
    let value: SymbolicBitVec = 0xBEEFu16.into();
    assert_eq!(u64::try_from(&value), Ok(0xBEEF));
    assert_eq!(u128::try_from(value), Ok(0xBEEF));
}

#[test]
fn narrowing_conversion_overflow() {
    let value: SymbolicBitVec = 0x1FFu16.into();
    assert_eq!(
        u8::try_from(value),
        Err(ConcretizationError::Overflow { max_bits: 8 })
    );
}

#[test]
fn narrowing_conversion_of_zero_high_bits() {
    let value: SymbolicBitVec = 0xFFu16.into();
    assert_eq!(u8::try_from(value), Ok(0xFF));
}

#[test]
fn symbolic_conversion_fails() {
    let value = SymbolicBitVec::constant(0x1, 4).concat(SymbolicBitVec::with_size(4));
    assert_eq!(
        u8::try_from(value),
        Err(ConcretizationError::NonLiteralBit { bit_index: 4 })
    );
}

#[test]
fn constant_wider_than_value() {
    let value = SymbolicBitVec::constant(u128::MAX, 136);
    assert_eq!(value.len(), 136);
    assert_eq!(value[127], TRUE);
    assert_eq!(value[128], FALSE);
}

#[test]
fn little_endian_bits() {
    let value = SymbolicBitVec::from_le_bits([true, false, true, true]);
    assert_eq!(u8::try_from(value), Ok(0b1101));
}
