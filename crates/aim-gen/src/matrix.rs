//! Square GF(2) matrices whose entries are packed into field elements.

use aim_field::{AimError, Gf, Result};
use rand::RngCore;

/// Multiplies the row vector `v` by the matrix whose `i`-th entry is `entries[i]`.
///
/// Returns the XOR of `entries[i]` over every set bit `i` of `v`. Bits of `v`
/// beyond `entries.len()` are ignored.
pub fn vec_mat<const N: usize>(v: &Gf<N>, entries: &[Gf<N>]) -> Gf<N> {
    let mut acc = Gf::zero();
    for bit in v.set_bits().take_while(|&bit| bit < entries.len()) {
        acc ^= entries[bit];
    }
    acc
}

/// Multiplies `A · B` where `rows_a` are the rows of `A` and `entries_b` the entries of `B`.
pub fn mat_mat<const N: usize>(rows_a: &[Gf<N>], entries_b: &[Gf<N>]) -> Vec<Gf<N>> {
    rows_a.iter().map(|row| vec_mat(row, entries_b)).collect()
}

/// d×d binary matrix, one `d`-bit entry per row, acting on row vectors from the left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix<const N: usize> {
    entries: Vec<Gf<N>>,
}

impl<const N: usize> BitMatrix<N> {
    /// Dimension `d` of the matrix.
    pub const DIM: usize = Gf::<N>::BITS;

    /// Wraps exactly `d` entries.
    pub fn from_entries(entries: Vec<Gf<N>>) -> Result<Self> {
        if entries.len() != Self::DIM {
            return Err(AimError::InvalidInput(format!(
                "a {0}x{0} matrix needs {0} entries, got {1}",
                Self::DIM,
                entries.len()
            )));
        }
        Ok(Self { entries })
    }

    /// Builds the matrix whose entry `i` is `f(i)`.
    pub fn from_fn<F: FnMut(usize) -> Gf<N>>(f: F) -> Self {
        Self {
            entries: (0..Self::DIM).map(f).collect(),
        }
    }

    /// Returns the identity matrix.
    pub fn identity() -> Self {
        Self::from_fn(Gf::basis)
    }

    /// Generates a uniformly random matrix (not necessarily invertible).
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        Self::from_fn(|_| Gf::random(rng))
    }

    /// Generates a uniformly random invertible matrix, retrying until one is found.
    pub fn random_invertible<R: RngCore>(rng: &mut R) -> Self {
        loop {
            let candidate = Self::random(rng);
            if candidate.is_invertible() {
                return candidate;
            }
        }
    }

    /// Exposes the entries in order.
    pub fn entries(&self) -> &[Gf<N>] {
        &self.entries
    }

    /// Applies the matrix to `v`, i.e. computes `v · self`.
    #[inline]
    pub fn apply(&self, v: &Gf<N>) -> Gf<N> {
        vec_mat(v, &self.entries)
    }

    /// Multiplies two matrices (`self * rhs`).
    pub fn mul(&self, rhs: &Self) -> Self {
        Self {
            entries: mat_mat(&self.entries, &rhs.entries),
        }
    }

    /// Rank over GF(2), by forward elimination on a copy of the entries.
    pub fn rank(&self) -> usize {
        let mut rows = self.entries.clone();
        let mut rank = 0;
        for col in 0..Self::DIM {
            let Some(pivot) = (rank..rows.len()).find(|&row| rows[row].bit(col)) else {
                continue;
            };
            rows.swap(pivot, rank);
            let pivot_row = rows[rank];
            for row in rows.iter_mut().skip(rank + 1) {
                if row.bit(col) {
                    *row ^= pivot_row;
                }
            }
            rank += 1;
        }
        rank
    }

    /// Attempts to invert the matrix via Gauss–Jordan elimination.
    pub fn invert(&self) -> Option<Self> {
        let mut left = self.entries.clone();
        let mut right = Self::identity().entries;

        for col in 0..Self::DIM {
            let pivot = (col..Self::DIM).find(|&row| left[row].bit(col))?;
            if pivot != col {
                left.swap(pivot, col);
                right.swap(pivot, col);
            }
            let (pivot_left, pivot_right) = (left[col], right[col]);
            for row in 0..Self::DIM {
                if row != col && left[row].bit(col) {
                    left[row] ^= pivot_left;
                    right[row] ^= pivot_right;
                }
            }
        }

        Some(Self { entries: right })
    }

    /// Returns true if the matrix is invertible.
    pub fn is_invertible(&self) -> bool {
        self.rank() == Self::DIM
    }
}
