//! Arithmetic in GF(2^d) modulo a fixed irreducible polynomial.

use crate::element::Gf;
use crate::error::{AimError, Result};

/// Binary extension field GF(2^(64·N)) defined by `x^d + tail`.
///
/// `tail` carries the low-order coefficients of the irreducible polynomial; the
/// leading `x^d` term is implicit in the element width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryField<const N: usize> {
    tail: u64,
}

/// GF(2^128) with `x^128 + x^7 + x^2 + x + 1`.
pub const GF128: BinaryField<2> = BinaryField::new(0x87);
/// GF(2^192) with `x^192 + x^7 + x^2 + x + 1`.
pub const GF192: BinaryField<3> = BinaryField::new(0x87);
/// GF(2^256) with `x^256 + x^10 + x^5 + x^2 + 1`.
pub const GF256: BinaryField<4> = BinaryField::new(0x425);

impl<const N: usize> BinaryField<N> {
    /// Defines the field `x^(64·N) + tail`.
    pub const fn new(tail: u64) -> Self {
        Self { tail }
    }

    /// Extension degree `d`.
    pub const fn degree(&self) -> usize {
        64 * N
    }

    /// Serialized element width, `d / 8` bytes.
    pub const fn byte_len(&self) -> usize {
        8 * N
    }

    /// Low-order coefficients of the defining polynomial.
    pub const fn tail(&self) -> u64 {
        self.tail
    }

    /// Full defining polynomial as `d/8 + 1` little-endian bytes.
    pub fn modulus_bytes(&self) -> Vec<u8> {
        let mut out = Gf::<N>::from_limbs(self.tail_limbs()).to_le_bytes();
        out.push(1);
        out
    }

    fn tail_limbs(&self) -> [u64; N] {
        let mut limbs = [0u64; N];
        limbs[0] = self.tail;
        limbs
    }

    /// Parses exactly `d/8` little-endian bytes.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Gf<N>> {
        if bytes.len() != self.byte_len() {
            return Err(AimError::InvalidInput(format!(
                "expected {} bytes for GF(2^{}), got {}",
                self.byte_len(),
                self.degree(),
                bytes.len()
            )));
        }
        Gf::from_le_slice(bytes)
    }

    /// Parses at most `d/8` little-endian bytes, zero-extending the high end.
    pub fn from_partial_bytes(&self, bytes: &[u8]) -> Result<Gf<N>> {
        Gf::from_le_slice(bytes)
    }

    /// Serializes to `d/8` little-endian bytes.
    pub fn to_bytes(&self, x: &Gf<N>) -> Vec<u8> {
        x.to_le_bytes()
    }

    /// Multiplies `x * y`, reducing `x` after every shift that reaches bit `d`.
    pub fn mul(&self, x: Gf<N>, y: Gf<N>) -> Gf<N> {
        let mut shifted = x;
        let mut acc = Gf::zero();
        let top = y.bit_len();
        for i in 0..top {
            if i > 0 && shifted.shl1_carry() {
                shifted ^= Gf::from_limbs(self.tail_limbs());
            }
            if y.bit(i) {
                acc ^= shifted;
            }
        }
        acc
    }

    /// Squares `x`.
    #[inline]
    pub fn square(&self, x: Gf<N>) -> Gf<N> {
        self.mul(x, x)
    }

    /// Raises `x` to a 64-bit exponent.
    pub fn pow(&self, x: Gf<N>, e: u64) -> Gf<N> {
        self.pow_limbs(x, &[e])
    }

    /// Raises `x` to an exponent given as little-endian `u64` limbs.
    ///
    /// Scans the exponent from its least significant bit, squaring the base at
    /// each step. `pow_limbs(x, &[0])` is one.
    pub fn pow_limbs(&self, x: Gf<N>, e: &[u64]) -> Gf<N> {
        let bits = exponent_bit_len(e);
        if bits == 0 {
            return Gf::one();
        }
        let mut base = x;
        let mut acc = if exponent_bit(e, 0) { x } else { Gf::one() };
        for i in 1..bits {
            base = self.square(base);
            if exponent_bit(e, i) {
                acc = self.mul(acc, base);
            }
        }
        acc
    }

    /// Multiplicative inverse `x^(2^d - 2)`.
    pub fn inv(&self, x: Gf<N>) -> Result<Gf<N>> {
        if x.is_zero() {
            return Err(AimError::InvalidOperand("zero has no multiplicative inverse"));
        }
        let mut e = [u64::MAX; N];
        e[0] = u64::MAX - 1;
        Ok(self.pow_limbs(x, &e))
    }
}

fn exponent_bit_len(e: &[u64]) -> usize {
    for (idx, limb) in e.iter().enumerate().rev() {
        if *limb != 0 {
            return idx * 64 + 64 - limb.leading_zeros() as usize;
        }
    }
    0
}

#[inline]
fn exponent_bit(e: &[u64], i: usize) -> bool {
    (e[i / 64] >> (i % 64)) & 1 == 1
}
