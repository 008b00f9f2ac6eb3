use super::{ShiftDirection, SymbolicBitVec};
use crate::bit::{FALSE, SymbolicBit};

impl std::ops::Index<usize> for SymbolicBitVec {
    type Output = SymbolicBit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl FromIterator<SymbolicBit> for SymbolicBitVec {
    fn from_iter<T: IntoIterator<Item = SymbolicBit>>(iter: T) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SymbolicBitVec {
    type Item = SymbolicBit;
    type IntoIter = std::collections::vec_deque::IntoIter<SymbolicBit>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.into_iter()
    }
}

impl std::ops::Not for SymbolicBitVec {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.bits.into_iter().map(|bit| !bit).collect()
    }
}

macro_rules! bitwise_op {
    ($trait:ident, $fn:ident, $op:tt) => {
        impl std::ops::$trait for SymbolicBitVec {
            type Output = Self;

            fn $fn(self, rhs: Self) -> Self::Output {
                assert_eq!(self.len(), rhs.len());
                self.bits
                    .into_iter()
                    .zip(rhs.bits)
                    .map(|(lhs, rhs)| lhs $op rhs)
                    .collect()
            }
        }
    };
}

bitwise_op!(BitAnd, bitand, &);
bitwise_op!(BitOr, bitor, |);
bitwise_op!(BitXor, bitxor, ^);

impl std::ops::Shl<usize> for SymbolicBitVec {
    type Output = Self;

    fn shl(mut self, rhs: usize) -> Self::Output {
        self.shift_mut(rhs, FALSE, &ShiftDirection::Left);
        self
    }
}

impl std::ops::Shl for SymbolicBitVec {
    type Output = Self;

    fn shl(self, rhs: Self) -> Self::Output {
        self.shift_by(rhs, FALSE, ShiftDirection::Left)
    }
}

/// Performs an _unsigned_ right shift.
impl std::ops::Shr<usize> for SymbolicBitVec {
    type Output = Self;

    fn shr(mut self, rhs: usize) -> Self::Output {
        self.shift_mut(rhs, FALSE, &ShiftDirection::Right);
        self
    }
}

/// Performs an _unsigned_ right shift.
impl std::ops::Shr for SymbolicBitVec {
    type Output = Self;

    fn shr(self, rhs: Self) -> Self::Output {
        self.shift_by(rhs, FALSE, ShiftDirection::Right)
    }
}

impl std::ops::Add for SymbolicBitVec {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let (sum, _) = self.addition_with_carry(rhs);
        sum
    }
}

impl std::ops::Neg for SymbolicBitVec {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let num_bits = self.len();
        !self + SymbolicBitVec::constant(1, num_bits)
    }
}

impl std::ops::Sub for SymbolicBitVec {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert_eq!(self.len(), rhs.len());
        self + (-rhs)
    }
}

/// Multiplication modulo the operand width. Both operands must be the same width.
impl std::ops::Mul for SymbolicBitVec {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        assert_eq!(self.len(), rhs.len());
        let num_bits = self.len();
        let zero = SymbolicBitVec::constant(0, num_bits);

        rhs.bits
            .into_iter()
            .enumerate()
            .fold(zero.clone(), |product, (i, selector)| {
                let partial = SymbolicBitVec::select(selector, self.clone() << i, zero.clone());
                product + partial
            })
    }
}
