use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::bit::{FALSE, SymbolicBit, TRUE};

mod ops;

/// A fixed-width word of [SymbolicBit]s. Bit `0` is the least significant bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolicBitVec {
    bits: VecDeque<SymbolicBit>,
}

enum ShiftDirection {
    Left,
    Right,
}

static START_SYMBOL: AtomicUsize = AtomicUsize::new(0);

impl SymbolicBitVec {
    pub fn msb(&self) -> Option<&SymbolicBit> {
        self.bits.back()
    }

    pub fn lsb(&self) -> Option<&SymbolicBit> {
        self.bits.front()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Width of this value in bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolicBit> {
        self.bits.iter()
    }

    /// Returns `true` if every bit is a literal.
    pub fn is_concrete(&self) -> bool {
        self.bits.iter().all(SymbolicBit::is_literal)
    }

    /// Creates a value of `num_bits` fresh variables. Variable identifiers are unique across the
    /// process.
    pub fn with_size(num_bits: usize) -> Self {
        let start_symbol = START_SYMBOL.fetch_add(num_bits, Ordering::SeqCst);
        (start_symbol..start_symbol + num_bits)
            .map(SymbolicBit::Variable)
            .collect()
    }

    pub fn empty() -> Self {
        Self {
            bits: VecDeque::with_capacity(0),
        }
    }

    /// Creates a constant of `num_bits` bits. Bits of `value` above `num_bits` are discarded.
    pub fn constant(value: u128, num_bits: usize) -> Self {
        (0..num_bits)
            .map(|i| {
                let bit = u32::try_from(i)
                    .ok()
                    .and_then(|i| value.checked_shr(i))
                    .unwrap_or(0);
                SymbolicBit::Literal(bit & 0x1 == 0x1)
            })
            .collect()
    }

    /// Creates a constant from literal bits ordered least significant first.
    pub fn from_le_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        bits.into_iter().map(SymbolicBit::Literal).collect()
    }

    /// Returns `size` bits starting at bit `offset`.
    pub fn extract(self, offset: usize, size: usize) -> Self {
        assert!(
            offset.checked_add(size).is_some_and(|end| end <= self.len()),
            "extract of {size} bits at offset {offset} out of range for {len} bits",
            len = self.len()
        );
        Self {
            bits: self.bits.into_iter().skip(offset).take(size).collect(),
        }
    }

    /// Concatenates the left-hand side with the right-hand side. The right-hand side becomes the
    /// most significant part of the result.
    pub fn concat(mut self, mut rhs: Self) -> Self {
        self.bits.append(&mut rhs.bits);
        self
    }

    /// Create a new `SymbolicBitVec` with the number of additional zero bits specified as the
    /// most-significant bits.
    pub fn zero_extend(self, num_bits: usize) -> Self {
        self.concat(SymbolicBitVec::constant(0, num_bits))
    }

    /// Create a new `SymbolicBitVec` with the number of additional bits specified as the
    /// most-significant bits. The additional bits are clones of the original most significant-bit.
    pub fn sign_extend(self, num_bits: usize) -> Self {
        let msb = self.msb().cloned().unwrap_or(FALSE);
        let extension = std::iter::repeat_n(msb, num_bits).collect();
        self.concat(extension)
    }

    /// Boolean coercion: the result is set iff any bit of this value is set.
    pub fn to_bool(&self) -> SymbolicBit {
        self.bits
            .iter()
            .cloned()
            .fold(FALSE, |any_set, bit| any_set | bit)
    }

    /// Bitwise conditional select. Both branches must have the same width.
    pub fn select(condition: SymbolicBit, then: Self, otherwise: Self) -> Self {
        assert_eq!(then.len(), otherwise.len());
        then.bits
            .into_iter()
            .zip(otherwise.bits)
            .map(|(then, otherwise)| condition.clone().select(then, otherwise))
            .collect()
    }

    /// Simplifies every bit. Nodes shared between bits are rebuilt once.
    pub fn simplify(&self) -> Self {
        let mut cache = HashMap::new();
        self.bits
            .iter()
            .map(|bit| bit.simplify_shared(&mut cache))
            .collect()
    }

    pub fn equals(self, rhs: Self) -> SymbolicBit {
        assert_eq!(self.len(), rhs.len());
        self.bits
            .into_iter()
            .zip(rhs.bits)
            .fold(TRUE, |equal, (lhs, rhs)| equal & lhs.equals(rhs))
    }

    pub fn addition_with_carry(self, rhs: Self) -> (Self, SymbolicBit) {
        let mut carry = self.clone().addition_carry_bits(rhs.clone());
        let overflow = carry.bits.pop_back().unwrap_or(FALSE);
        let sum = self ^ rhs ^ carry;
        (sum, overflow)
    }

    /// Carry into each bit position. The result has one more bit than the inputs, the last being
    /// the carry out of the most significant bit.
    pub fn addition_carry_bits(self, rhs: Self) -> Self {
        assert_eq!(self.len(), rhs.len());
        let mut carry = VecDeque::with_capacity(self.len() + 1);
        carry.push_back(FALSE);
        for (i, (lhs, rhs)) in self.bits.into_iter().zip(rhs.bits).enumerate() {
            let carry_in = carry[i].clone();
            carry.push_back((lhs.clone() & rhs.clone()) | (carry_in & (lhs ^ rhs)));
        }

        Self { bits: carry }
    }

    /// Unsigned `self < rhs`. Both values must be the same width.
    pub fn unsigned_less_than(self, rhs: Self) -> SymbolicBit {
        assert_eq!(self.len(), rhs.len());

        // Walk from the least significant bit. A more significant position overrides the result
        // unless both bits are equal there.
        self.bits
            .into_iter()
            .zip(rhs.bits)
            .fold(FALSE, |less_than, (lhs, rhs)| {
                (!lhs.clone() & rhs.clone()) | (lhs.equals(rhs) & less_than)
            })
    }

    pub fn unsigned_less_than_eq(self, rhs: Self) -> SymbolicBit {
        !rhs.unsigned_less_than(self)
    }

    pub fn unsigned_greater_than(self, rhs: Self) -> SymbolicBit {
        rhs.unsigned_less_than(self)
    }

    pub fn unsigned_greater_than_eq(self, rhs: Self) -> SymbolicBit {
        !self.unsigned_less_than(rhs)
    }

    /// Two's complement `self < rhs`. Both values must be the same width.
    pub fn signed_less_than(self, rhs: Self) -> SymbolicBit {
        assert_eq!(self.len(), rhs.len());
        if self.is_empty() {
            return FALSE;
        }

        let lhs_sign_bit = self.msb().cloned().unwrap_or(FALSE);
        let rhs_sign_bit = rhs.msb().cloned().unwrap_or(FALSE);
        let mixed_sign_case = lhs_sign_bit.clone() & !rhs_sign_bit.clone();
        let same_sign_case = lhs_sign_bit.equals(rhs_sign_bit) & self.unsigned_less_than(rhs);

        mixed_sign_case | same_sign_case
    }

    pub fn signed_less_than_eq(self, rhs: Self) -> SymbolicBit {
        !rhs.signed_less_than(self)
    }

    pub fn signed_greater_than(self, rhs: Self) -> SymbolicBit {
        rhs.signed_less_than(self)
    }

    pub fn signed_greater_than_eq(self, rhs: Self) -> SymbolicBit {
        !self.signed_less_than(rhs)
    }

    /// Computes the unsigned integer division of `self / divisor` and returns
    /// `(quotient, remainder)`.
    ///
    /// # Division by zero
    ///
    /// Dividing by zero yields a quotient of all ones and a remainder equal to the dividend, which
    /// matches the SMT-LIB definition of `bvudiv` and `bvurem`.
    pub fn unsigned_divide(self, divisor: Self) -> (Self, Self) {
        assert_eq!(self.len(), divisor.len());
        let num_bits = self.len();

        // The working remainder needs an extra bit: shifting in the next dividend bit may exceed
        // the width when the divisor uses the most significant bit.
        let divisor = divisor.zero_extend(1);
        let mut remainder = SymbolicBitVec::constant(0, num_bits + 1);
        let mut quotient = VecDeque::with_capacity(num_bits);

        for next_bit in self.bits.into_iter().rev() {
            remainder.bits.pop_back();
            remainder.bits.push_front(next_bit);

            let less_than = remainder.clone().unsigned_less_than(divisor.clone());
            let difference = remainder.clone() - divisor.clone();
            remainder = Self::select(less_than.clone(), remainder, difference);
            quotient.push_front(!less_than);
        }

        remainder.bits.pop_back();
        (Self { bits: quotient }, remainder)
    }

    /// Computes the signed integer division of `self / divisor` and returns
    /// `(quotient, remainder)`. The quotient is truncated toward zero and the remainder has the
    /// sign of the dividend.
    pub fn signed_divide(self, divisor: Self) -> (Self, Self) {
        assert_eq!(self.len(), divisor.len());
        let dividend_msb = self.msb().cloned().unwrap_or(FALSE);
        let divisor_msb = divisor.msb().cloned().unwrap_or(FALSE);

        let unsigned_dividend = Self::select(dividend_msb.clone(), -self.clone(), self);
        let unsigned_divisor = Self::select(divisor_msb.clone(), -divisor.clone(), divisor);

        let (quotient, remainder) = unsigned_dividend.unsigned_divide(unsigned_divisor);

        let quotient = Self::select(
            dividend_msb.clone() ^ divisor_msb,
            -quotient.clone(),
            quotient,
        );
        let remainder = Self::select(dividend_msb, -remainder.clone(), remainder);

        (quotient, remainder)
    }

    /// Signed modulo whose result has the sign of the divisor (floored division remainder).
    pub fn signed_modulo(self, divisor: Self) -> Self {
        let dividend_msb = self.msb().cloned().unwrap_or(FALSE);
        let divisor_msb = divisor.msb().cloned().unwrap_or(FALSE);
        let (_, remainder) = self.signed_divide(divisor.clone());

        let needs_adjustment = remainder.to_bool() & (dividend_msb ^ divisor_msb);
        let adjusted = remainder.clone() + divisor;
        Self::select(needs_adjustment, adjusted, remainder)
    }

    /// Arithmetic right shift. The shift amount is interpreted as an unsigned integer of any
    /// width; shifting by at least the width fills every bit with the sign bit.
    pub fn signed_shift_right(self, rhs: Self) -> Self {
        let sign_bit = self.msb().cloned().unwrap_or(FALSE);
        self.shift_by(rhs, sign_bit, ShiftDirection::Right)
    }

    fn shift_by(mut self, rhs: Self, shift_in: SymbolicBit, direction: ShiftDirection) -> Self {
        for (i, shift_bit) in rhs.bits.into_iter().enumerate() {
            if matches!(shift_bit, SymbolicBit::Literal(false)) {
                continue;
            }

            let amount = u32::try_from(i)
                .ok()
                .and_then(|i| 1usize.checked_shl(i))
                .unwrap_or(usize::MAX);
            let mut shifted_value = self.clone();
            shifted_value.shift_mut(amount, shift_in.clone(), &direction);
            self = Self::select(shift_bit, shifted_value, self);
        }
        self
    }

    fn shift_mut(&mut self, amount: usize, shift_in: SymbolicBit, direction: &ShiftDirection) {
        let len = self.len();
        let amount = usize::min(len, amount);

        match direction {
            ShiftDirection::Left => {
                // [ 0 1 2 3 4 5 6 7 ] << 3
                // [ x x x 0 1 2 3 4 ]
                self.bits.truncate(len - amount);
                for _ in 0..amount {
                    self.bits.push_front(shift_in.clone());
                }
            }
            ShiftDirection::Right => {
                // [ 0 1 2 3 4 5 6 7 ] >> 3
                // [ 3 4 5 6 7 x x x ]
                self.bits.drain(..amount);
                self.bits.extend(std::iter::repeat_n(shift_in, amount));
            }
        }
    }
}
