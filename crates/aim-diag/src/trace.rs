//! Intermediate values of one evaluation, computed two ways.

use aim_field::{Gf, Result};
use aim_gen::generate_layer;
use aim_runtime::{mersenne, OneWayFunction};
use tracing::debug;

use crate::frobenius::frobenius_matrix;

/// Values seen by the final power map of one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trace<const N: usize> {
    /// Preimage.
    pub x: Gf<N>,
    /// Claimed output.
    pub c: Gf<N>,
    /// Affine layer output, input of the final power map.
    pub u: Gf<N>,
    /// Recomputed output `u^(2^f - 1) ⊕ x`.
    pub d: Gf<N>,
    /// `u^(2^f)`.
    pub r1: Gf<N>,
    /// `(x ⊕ c)·u`.
    pub r2: Gf<N>,
}

impl<const N: usize> Trace<N> {
    /// True when the recomputed output equals `c` and the quadratic relation holds.
    pub fn is_consistent(&self) -> bool {
        self.d == self.c && self.r1 == self.r2
    }
}

/// Recomputes `u` and checks `u^(2^f) = (x ⊕ ct)·u` for a claimed `(pt, iv, ct)`.
pub fn trace<const N: usize>(
    aim: &OneWayFunction<N>,
    pt: &[u8],
    iv: &[u8],
    ct: &[u8],
) -> Result<Trace<N>> {
    let field = aim.field();
    let params = aim.params();
    let x = field.from_bytes(pt)?;
    let c = field.from_bytes(ct)?;

    let layer = generate_layer(field, iv, params.layers())?;
    let inputs: Vec<Gf<N>> = params
        .exponents
        .iter()
        .map(|&e| field.pow(x, mersenne(e)))
        .collect();
    let u = layer.apply(&inputs)?;

    let f = params.final_exponent;
    let d = field.pow(u, mersenne(f)) ^ x;
    let r1 = field.pow(u, 1u64 << f);
    let r2 = field.mul(x ^ c, u);
    debug!(variant = params.name, consistent = r1 == r2, "traced evaluation");

    Ok(Trace { x, c, u, d, r1, r2 })
}

/// Values of the exponentiation-free recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Linearized<const N: usize> {
    /// Affine layer output rebuilt from Frobenius matrices.
    pub u: Gf<N>,
    /// `u · E_f`, i.e. `u^(2^f)`.
    pub p1: Gf<N>,
    /// `(c ⊕ x)·u`.
    pub p2: Gf<N>,
}

impl<const N: usize> Linearized<N> {
    /// True when both sides of the relation agree.
    pub fn is_consistent(&self) -> bool {
        self.p1 == self.p2
    }
}

/// Rebuilds `u` as `b ⊕ Σ ((x · E_eᵢ) · x⁻¹) · Aᵢ` and compares `u · E_f` with `(c ⊕ x)·u`.
///
/// Fails with `InvalidOperand` for the zero preimage, which has no inverse.
pub fn linearized<const N: usize>(
    aim: &OneWayFunction<N>,
    pt: &[u8],
    iv: &[u8],
    ct: &[u8],
) -> Result<Linearized<N>> {
    let field = aim.field();
    let params = aim.params();
    let x = field.from_bytes(pt)?;
    let c = field.from_bytes(ct)?;
    let z = field.inv(x)?;

    let layer = generate_layer(field, iv, params.layers())?;
    let inputs: Vec<Gf<N>> = params
        .exponents
        .iter()
        .map(|&e| field.mul(frobenius_matrix(field, e).apply(&x), z))
        .collect();
    let u = layer.apply(&inputs)?;

    let p1 = frobenius_matrix(field, params.final_exponent).apply(&u);
    let p2 = field.mul(c ^ x, u);
    Ok(Linearized { u, p1, p2 })
}
