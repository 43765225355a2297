//! Deterministic affine layer generation from an initialization vector.

use aim_field::{AimError, BinaryField, Gf, Result};
use tracing::{instrument, trace};

use crate::affine::AffineLayer;
use crate::matrix::{mat_mat, BitMatrix};
use crate::xof::LayerXof;

/// Streams unit-triangular factors, layer matrices and the constant out of a SHAKE reader.
///
/// Every read continues where the previous one stopped, so the order of calls
/// fixes the output: for each layer the lower factor, then the upper factor,
/// and finally the constant.
pub struct LayerGenerator<const N: usize> {
    field: BinaryField<N>,
    xof: LayerXof,
    scratch: Vec<u8>,
}

impl<const N: usize> LayerGenerator<N> {
    /// Seeds a generator with `iv`, which must be exactly `d/8` bytes.
    pub fn new(field: &BinaryField<N>, iv: &[u8]) -> Result<Self> {
        if iv.len() != field.byte_len() {
            return Err(AimError::InvalidInput(format!(
                "IV must be {} bytes for GF(2^{}), got {}",
                field.byte_len(),
                field.degree(),
                iv.len()
            )));
        }
        Ok(Self {
            field: *field,
            xof: LayerXof::from_iv(iv),
            scratch: vec![0u8; field.byte_len()],
        })
    }

    /// Name of the SHAKE function feeding this generator.
    pub fn xof_name(&self) -> &'static str {
        self.xof.name()
    }

    fn read_element(&mut self, len: usize) -> Result<Gf<N>> {
        let chunk = &mut self.scratch[..len];
        self.xof.read(chunk);
        self.field.from_partial_bytes(chunk)
    }

    /// Reads the lower factor: entry `i` has bits below `i` clear and bit `i` set.
    ///
    /// Row `i` consumes `(d - i + 6) / 8` bytes, which land in the top bytes of the entry.
    pub fn lower_factor(&mut self) -> Result<Vec<Gf<N>>> {
        let d = self.field.degree();
        let width = self.field.byte_len();
        let mut rows = Vec::with_capacity(d);
        for i in 0..d {
            let len = (d - i + 6) / 8;
            let x = self.read_element(len)?.shl(8 * (width - len));
            rows.push((x & !Gf::<N>::low_mask(i)) | Gf::<N>::basis(i));
        }
        Ok(rows)
    }

    /// Reads the upper factor: entry `i` keeps bits below `i`, has bit `i` set and nothing above.
    ///
    /// Row `i` consumes `(i + 7) / 8` bytes.
    pub fn upper_factor(&mut self) -> Result<Vec<Gf<N>>> {
        let d = self.field.degree();
        let mut rows = Vec::with_capacity(d);
        for i in 0..d {
            let len = (i + 7) / 8;
            let x = self.read_element(len)?;
            rows.push((x & Gf::<N>::low_mask(i)) | Gf::<N>::basis(i));
        }
        Ok(rows)
    }

    /// Reads one lower and one upper factor and returns their product `U · L`.
    pub fn next_matrix(&mut self) -> Result<BitMatrix<N>> {
        let lower = self.lower_factor()?;
        let upper = self.upper_factor()?;
        BitMatrix::from_entries(mat_mat(&upper, &lower))
    }

    /// Reads the `d/8`-byte additive constant.
    pub fn constant(&mut self) -> Result<Gf<N>> {
        let width = self.field.byte_len();
        self.read_element(width)
    }
}

/// Derives the `layers` matrices and the constant of an affine layer from `iv`.
#[instrument(skip_all, name = "aim_gen::generate_layer", fields(degree = field.degree(), layers = layers))]
pub fn generate_layer<const N: usize>(
    field: &BinaryField<N>,
    iv: &[u8],
    layers: usize,
) -> Result<AffineLayer<N>> {
    let mut gen = LayerGenerator::new(field, iv)?;
    let mut matrices = Vec::with_capacity(layers);
    for layer in 0..layers {
        matrices.push(gen.next_matrix()?);
        trace!(layer, xof = gen.xof_name(), "generated layer matrix");
    }
    let constant = gen.constant()?;
    Ok(AffineLayer::new(matrices, constant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_field::{Gf128, GF128, GF192, GF256};

    fn iv(len: usize, seed: u8) -> Vec<u8> {
        (0..len).map(|i| seed.wrapping_mul(31).wrapping_add(i as u8)).collect()
    }

    #[test]
    fn factors_are_unit_triangular() {
        let mut gen = LayerGenerator::new(&GF192, &iv(24, 1)).unwrap();
        let lower = gen.lower_factor().unwrap();
        let upper = gen.upper_factor().unwrap();
        for i in 0..192 {
            assert!(lower[i].bit(i) && upper[i].bit(i), "diagonal bit {i}");
            assert!((lower[i] & Gf::<3>::low_mask(i)).is_zero(), "lower row {i}");
            assert!((upper[i] & !Gf::<3>::low_mask(i + 1)).is_zero(), "upper row {i}");
        }
    }

    #[test]
    fn layer_matrices_are_invertible() {
        for seed in 0..3u8 {
            let layer = generate_layer(&GF128, &iv(16, seed), 2).unwrap();
            assert!(layer.matrices.iter().all(|m| m.is_invertible()));
        }
        let layer = generate_layer(&GF256, &iv(32, 9), 3).unwrap();
        assert_eq!(layer.len(), 3);
        assert!(layer.matrices.iter().all(|m| m.rank() == 256));
    }

    #[test]
    fn matrix_is_upper_times_lower() {
        let seed = iv(16, 4);
        let mut gen = LayerGenerator::new(&GF128, &seed).unwrap();
        let lower = gen.lower_factor().unwrap();
        let upper = gen.upper_factor().unwrap();
        let expected = BitMatrix::from_entries(upper)
            .unwrap()
            .mul(&BitMatrix::from_entries(lower).unwrap());
        let layer = generate_layer(&GF128, &seed, 1).unwrap();
        assert_eq!(layer.matrices[0], expected);
    }

    #[test]
    fn constant_follows_all_factor_bytes() {
        let d = 128usize;
        let lower: usize = (0..d).map(|i| (d - i + 6) / 8).sum();
        let upper: usize = (0..d).map(|i| (i + 7) / 8).sum();
        let consumed = 2 * (lower + upper);

        let seed = iv(16, 5);
        let mut stream = vec![0u8; consumed + 16];
        LayerXof::from_iv(&seed).read(&mut stream);
        let expected = Gf128::from_le_slice(&stream[consumed..]).unwrap();

        let layer = generate_layer(&GF128, &seed, 2).unwrap();
        assert_eq!(layer.constant, expected);
    }

    #[test]
    fn generation_is_deterministic() {
        let seed = iv(24, 6);
        let a = generate_layer(&GF192, &seed, 2).unwrap();
        let b = generate_layer(&GF192, &seed, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_bit_iv_change_alters_layer() {
        let seed = iv(32, 7);
        let base = generate_layer(&GF256, &seed, 3).unwrap();
        for bit in [0usize, 77, 255] {
            let mut flipped = seed.clone();
            flipped[bit / 8] ^= 1 << (bit % 8);
            let other = generate_layer(&GF256, &flipped, 3).unwrap();
            assert_ne!(other.constant, base.constant);
            for (a, b) in base.matrices.iter().zip(other.matrices.iter()) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn iv_width_must_match_field() {
        for bad in [15usize, 17, 24, 32] {
            let err = generate_layer(&GF128, &vec![0u8; bad], 2).unwrap_err();
            assert!(matches!(err, AimError::InvalidInput(_)));
        }
        assert!(LayerGenerator::new(&GF256, &[0u8; 24]).is_err());
    }
}
