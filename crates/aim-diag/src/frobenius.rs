//! Matrices of iterated Frobenius maps.

use aim_field::{BinaryField, Gf};
use aim_gen::BitMatrix;

/// Returns the matrix `E` with `x · E = x^(2^e)` for every `x`.
///
/// Squaring is GF(2)-linear, so entry `i` is the basis element `xⁱ` squared `e` times.
pub fn frobenius_matrix<const N: usize>(field: &BinaryField<N>, e: u32) -> BitMatrix<N> {
    BitMatrix::from_fn(|i| {
        let mut x = Gf::basis(i);
        for _ in 0..e {
            x = field.square(x);
        }
        x
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_field::{Gf128, Gf256, GF128, GF256};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn matches_repeated_squaring() {
        let mut rng = ChaCha20Rng::from_seed([60u8; 32]);
        let e5 = frobenius_matrix(&GF256, 5);
        for _ in 0..8 {
            let x = Gf256::random(&mut rng);
            assert_eq!(e5.apply(&x), GF256.pow(x, 32));
        }
    }

    #[test]
    fn zero_power_is_identity() {
        assert_eq!(frobenius_matrix(&GF128, 0), BitMatrix::identity());
    }

    #[test]
    fn full_cycle_is_identity() {
        // x^(2^d) = x in GF(2^d), so composing one squaring d times cycles back.
        let e1 = frobenius_matrix(&GF128, 1);
        let mut acc = BitMatrix::<2>::identity();
        for _ in 0..128 {
            acc = acc.mul(&e1);
        }
        assert_eq!(acc, BitMatrix::identity());
        assert!(e1.is_invertible());
        let x = Gf128::basis(127);
        assert_eq!(e1.apply(&x), GF128.square(x));
    }
}
