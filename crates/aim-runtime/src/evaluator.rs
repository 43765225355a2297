//! One-way function evaluation.

use aim_field::{AimError, BinaryField, Gf, Result, GF128, GF192, GF256};
use aim_gen::{generate_layer, AffineLayer};
use tracing::{debug, instrument};

use crate::params::{AimParams, Variant, AIM128_PARAMS, AIM192_PARAMS, AIM256_PARAMS};

/// AIM instance bound to one field and one parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OneWayFunction<const N: usize> {
    field: BinaryField<N>,
    params: &'static AimParams,
}

/// AIM-I.
pub const AIM128: OneWayFunction<2> = OneWayFunction::new(GF128, &AIM128_PARAMS);
/// AIM-III.
pub const AIM192: OneWayFunction<3> = OneWayFunction::new(GF192, &AIM192_PARAMS);
/// AIM-V.
pub const AIM256: OneWayFunction<4> = OneWayFunction::new(GF256, &AIM256_PARAMS);

/// `2^e - 1`.
#[inline]
pub const fn mersenne(e: u32) -> u64 {
    (1u64 << e) - 1
}

impl<const N: usize> OneWayFunction<N> {
    /// Binds a field to a parameter set of the same degree.
    pub const fn new(field: BinaryField<N>, params: &'static AimParams) -> Self {
        Self { field, params }
    }

    /// Field the function operates in.
    pub const fn field(&self) -> &BinaryField<N> {
        &self.field
    }

    /// Parameter set of the function.
    pub const fn params(&self) -> &'static AimParams {
        self.params
    }

    /// Nonlinear inputs `x^(2^eᵢ - 1)` to the affine layer, in parameter order.
    pub fn power_inputs(&self, x: &Gf<N>) -> Vec<Gf<N>> {
        self.params
            .exponents
            .iter()
            .map(|&e| self.field.pow(*x, mersenne(e)))
            .collect()
    }

    /// Affine layer derived from `iv`.
    pub fn layer(&self, iv: &[u8]) -> Result<AffineLayer<N>> {
        generate_layer(&self.field, iv, self.params.layers())
    }

    /// Final map `u ↦ u^(2^f - 1) ⊕ x`.
    pub fn finalize(&self, u: &Gf<N>, x: &Gf<N>) -> Gf<N> {
        self.field.pow(*u, mersenne(self.params.final_exponent)) ^ *x
    }

    /// Evaluates the function on a field element.
    pub fn eval(&self, x: &Gf<N>, iv: &[u8]) -> Result<Gf<N>> {
        let inputs = self.power_inputs(x);
        let layer = self.layer(iv)?;
        let u = layer.apply(&inputs)?;
        Ok(self.finalize(&u, x))
    }

    /// Evaluates the function on serialized inputs of `d/8` bytes each.
    pub fn eval_bytes(&self, pt: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let x = self.field.from_bytes(pt)?;
        let ct = self.eval(&x, iv)?;
        Ok(self.field.to_bytes(&ct))
    }
}

/// Evaluates `variant` on a preimage and an IV, both `variant.byte_len()` bytes.
#[instrument(skip_all, name = "aim_runtime::evaluate", fields(variant = %variant))]
pub fn evaluate(variant: Variant, pt: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    if pt.len() != iv.len() {
        return Err(AimError::InvalidInput(format!(
            "preimage is {} bytes but IV is {} bytes",
            pt.len(),
            iv.len()
        )));
    }
    if pt.len() != variant.byte_len() {
        return Err(AimError::InvalidInput(format!(
            "{variant} expects {}-byte inputs, got {}",
            variant.byte_len(),
            pt.len()
        )));
    }
    let ct = match variant {
        Variant::Aim128 => AIM128.eval_bytes(pt, iv)?,
        Variant::Aim192 => AIM192.eval_bytes(pt, iv)?,
        Variant::Aim256 => AIM256.eval_bytes(pt, iv)?,
    };
    debug!(bytes = ct.len(), "evaluated one-way function");
    Ok(ct)
}

/// Evaluates the variant implied by the preimage length.
pub fn evaluate_auto(pt: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let variant = Variant::from_len(pt.len())?;
    evaluate(variant, pt, iv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_field::{Gf128, Gf192};
    use aim_gen::vec_mat;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn mersenne_exponents() {
        assert_eq!(mersenne(3), 7);
        assert_eq!(mersenne(53), (1u64 << 53) - 1);
    }

    #[test]
    fn eval_matches_manual_composition() {
        let mut rng = ChaCha20Rng::from_seed([50u8; 32]);
        let x = Gf128::random(&mut rng);
        let mut iv = [0u8; 16];
        rng.fill_bytes(&mut iv);

        let layer = generate_layer(&GF128, &iv, 2).unwrap();
        let t0 = GF128.pow(x, 7);
        let t1 = GF128.pow(x, (1 << 27) - 1);
        let u = layer.constant ^ vec_mat(&t0, layer.matrices[0].entries())
            ^ vec_mat(&t1, layer.matrices[1].entries());
        let expected = GF128.pow(u, 31) ^ x;

        assert_eq!(AIM128.eval(&x, &iv).unwrap(), expected);
    }

    #[test]
    fn outputs_have_field_width() {
        let mut rng = ChaCha20Rng::from_seed([51u8; 32]);
        for variant in Variant::ALL {
            let mut pt = vec![0u8; variant.byte_len()];
            let mut iv = vec![0u8; variant.byte_len()];
            rng.fill_bytes(&mut pt);
            rng.fill_bytes(&mut iv);
            let ct = evaluate(variant, &pt, &iv).unwrap();
            assert_eq!(ct.len(), variant.byte_len());
            assert_eq!(evaluate_auto(&pt, &iv).unwrap(), ct);
        }
    }

    #[test]
    fn iv_change_changes_output() {
        let mut rng = ChaCha20Rng::from_seed([52u8; 32]);
        let x = Gf192::random(&mut rng);
        let mut iv = [0u8; 24];
        rng.fill_bytes(&mut iv);
        let base = AIM192.eval(&x, &iv).unwrap();
        iv[11] ^= 0x10;
        assert_ne!(AIM192.eval(&x, &iv).unwrap(), base);
    }

    #[test]
    fn zero_preimage_is_accepted() {
        let ct = evaluate(Variant::Aim128, &[0u8; 16], &[1u8; 16]).unwrap();
        let layer = AIM128.layer(&[1u8; 16]).unwrap();
        let expected = GF128.pow(layer.constant, 31);
        assert_eq!(ct, GF128.to_bytes(&expected));
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = evaluate(Variant::Aim128, &[0u8; 16], &[0u8; 24]).unwrap_err();
        assert!(matches!(err, AimError::InvalidInput(_)));
        let err = evaluate(Variant::Aim192, &[0u8; 16], &[0u8; 16]).unwrap_err();
        assert!(matches!(err, AimError::InvalidInput(_)));
        let err = evaluate_auto(&[0u8; 20], &[0u8; 20]).unwrap_err();
        assert!(matches!(err, AimError::InvalidInput(_)));
        let err = evaluate_auto(&[0u8; 32], &[0u8; 16]).unwrap_err();
        assert!(matches!(err, AimError::InvalidInput(_)));
    }
}
