//! Affine layers `t ↦ b ⊕ Σ tᵢ·Aᵢ` over GF(2).

use aim_field::{AimError, Gf, Result};

use crate::matrix::BitMatrix;

/// Affine layer made of `s` matrices and one additive constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffineLayer<const N: usize> {
    /// Linear components, in generation order.
    pub matrices: Vec<BitMatrix<N>>,
    /// Additive constant.
    pub constant: Gf<N>,
}

impl<const N: usize> AffineLayer<N> {
    /// Constructs a layer from components.
    pub fn new(matrices: Vec<BitMatrix<N>>, constant: Gf<N>) -> Self {
        Self { matrices, constant }
    }

    /// Number of matrices `s`.
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Returns true if the layer has no linear component.
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Applies the layer to one input per matrix: `constant ⊕ Σ inputs[i] · matrices[i]`.
    pub fn apply(&self, inputs: &[Gf<N>]) -> Result<Gf<N>> {
        if inputs.len() != self.matrices.len() {
            return Err(AimError::InvalidInput(format!(
                "affine layer has {} matrices but got {} inputs",
                self.matrices.len(),
                inputs.len()
            )));
        }
        let mut acc = self.constant;
        for (matrix, input) in self.matrices.iter().zip(inputs.iter()) {
            acc ^= matrix.apply(input);
        }
        Ok(acc)
    }
}
