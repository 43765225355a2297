//! Fixed-width field elements stored as little-endian `u64` limbs.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use rand::RngCore;

use crate::error::{AimError, Result};

/// Element of GF(2^(64·N)), a polynomial over GF(2) with one coefficient per bit.
///
/// Limb 0 holds coefficients 0..64. Elements are plain values; reduction only
/// happens inside [`BinaryField`](crate::BinaryField) operations.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gf<const N: usize> {
    limbs: [u64; N],
}

/// Element of GF(2^128).
pub type Gf128 = Gf<2>;
/// Element of GF(2^192).
pub type Gf192 = Gf<3>;
/// Element of GF(2^256).
pub type Gf256 = Gf<4>;

impl<const N: usize> Gf<N> {
    /// Width of the element in bits.
    pub const BITS: usize = 64 * N;
    /// Width of the serialized element in bytes.
    pub const BYTES: usize = 8 * N;

    /// Returns the additive identity.
    pub const fn zero() -> Self {
        Self { limbs: [0u64; N] }
    }

    /// Returns the multiplicative identity.
    pub fn one() -> Self {
        Self::basis(0)
    }

    /// Wraps raw limbs, least significant first.
    pub const fn from_limbs(limbs: [u64; N]) -> Self {
        Self { limbs }
    }

    /// Exposes the underlying limbs, least significant first.
    pub const fn limbs(&self) -> &[u64; N] {
        &self.limbs
    }

    /// Returns the element with only bit `i` set.
    pub fn basis(i: usize) -> Self {
        let mut limbs = [0u64; N];
        limbs[i / 64] = 1u64 << (i % 64);
        Self { limbs }
    }

    /// Returns the element with bits `0..i` set. `i` may equal [`Self::BITS`].
    pub fn low_mask(i: usize) -> Self {
        let mut limbs = [0u64; N];
        for (idx, limb) in limbs.iter_mut().enumerate() {
            let base = idx * 64;
            if i >= base + 64 {
                *limb = u64::MAX;
            } else if i > base {
                *limb = (1u64 << (i - base)) - 1;
            }
        }
        Self { limbs }
    }

    /// Samples a uniformly random element.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut limbs = [0u64; N];
        for limb in limbs.iter_mut() {
            *limb = rng.next_u64();
        }
        Self { limbs }
    }

    /// Reads bit `i`.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        (self.limbs[i / 64] >> (i % 64)) & 1 == 1
    }

    /// Sets bit `i`.
    #[inline]
    pub fn set_bit(&mut self, i: usize) {
        self.limbs[i / 64] |= 1u64 << (i % 64);
    }

    /// Returns true for the zero element.
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&limb| limb == 0)
    }

    /// Position of the highest set bit plus one, or zero for the zero element.
    pub fn bit_len(&self) -> usize {
        for (idx, limb) in self.limbs.iter().enumerate().rev() {
            if *limb != 0 {
                return idx * 64 + 64 - limb.leading_zeros() as usize;
            }
        }
        0
    }

    /// Shifts left by `n` bits, discarding everything shifted past bit `BITS - 1`.
    pub fn shl(&self, n: usize) -> Self {
        if n >= Self::BITS {
            return Self::zero();
        }
        let limb_shift = n / 64;
        let bit_shift = n % 64;
        let mut limbs = [0u64; N];
        for idx in limb_shift..N {
            let src = idx - limb_shift;
            let mut value = self.limbs[src] << bit_shift;
            if bit_shift != 0 && src > 0 {
                value |= self.limbs[src - 1] >> (64 - bit_shift);
            }
            limbs[idx] = value;
        }
        Self { limbs }
    }

    /// Shifts left by one bit in place and returns the bit shifted out of the top.
    #[inline]
    pub(crate) fn shl1_carry(&mut self) -> bool {
        let mut carry = 0u64;
        for limb in self.limbs.iter_mut() {
            let next = *limb >> 63;
            *limb = (*limb << 1) | carry;
            carry = next;
        }
        carry == 1
    }

    /// Iterates over the indices of set bits in increasing order.
    pub fn set_bits(&self) -> SetBits<N> {
        SetBits {
            limbs: self.limbs,
            limb: 0,
        }
    }

    /// Parses up to [`Self::BYTES`] little-endian bytes, zero-extending the high end.
    pub fn from_le_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Self::BYTES {
            return Err(AimError::InvalidInput(format!(
                "{} bytes do not fit a {}-bit element",
                bytes.len(),
                Self::BITS
            )));
        }
        let mut limbs = [0u64; N];
        for (idx, byte) in bytes.iter().enumerate() {
            limbs[idx / 8] |= u64::from(*byte) << (8 * (idx % 8));
        }
        Ok(Self { limbs })
    }

    /// Serializes to exactly [`Self::BYTES`] little-endian bytes.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::BYTES);
        for limb in self.limbs.iter() {
            out.extend_from_slice(&limb.to_le_bytes());
        }
        out
    }
}

/// Iterator over set-bit positions of a [`Gf`] element.
#[derive(Clone, Debug)]
pub struct SetBits<const N: usize> {
    limbs: [u64; N],
    limb: usize,
}

impl<const N: usize> Iterator for SetBits<N> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.limb < N {
            let bits = self.limbs[self.limb];
            if bits != 0 {
                let bit = bits.trailing_zeros() as usize;
                self.limbs[self.limb] = bits & (bits - 1);
                return Some(self.limb * 64 + bit);
            }
            self.limb += 1;
        }
        None
    }
}

impl<const N: usize> From<[u64; N]> for Gf<N> {
    fn from(limbs: [u64; N]) -> Self {
        Self::from_limbs(limbs)
    }
}

macro_rules! impl_bitwise {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<const N: usize> $trait for Gf<N> {
            type Output = Self;

            #[inline]
            fn $method(mut self, rhs: Self) -> Self {
                self.$assign_method(rhs);
                self
            }
        }

        impl<const N: usize> $assign_trait for Gf<N> {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                for (d, s) in self.limbs.iter_mut().zip(rhs.limbs.iter()) {
                    *d $op *s;
                }
            }
        }
    };
}

impl_bitwise!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^=);
impl_bitwise!(BitAnd, bitand, BitAndAssign, bitand_assign, &=);
impl_bitwise!(BitOr, bitor, BitOrAssign, bitor_assign, |=);

impl<const N: usize> Not for Gf<N> {
    type Output = Self;

    #[inline]
    fn not(mut self) -> Self {
        for limb in self.limbs.iter_mut() {
            *limb = !*limb;
        }
        self
    }
}

impl<const N: usize> fmt::LowerHex for Gf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in self.limbs.iter().rev() {
            write!(f, "{:016x}", limb)?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::UpperHex for Gf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in self.limbs.iter().rev() {
            write!(f, "{:016X}", limb)?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for Gf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gf{}({:x})", Self::BITS, self)
    }
}
