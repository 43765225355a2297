//! Diagnostics for the AIM one-way functions.
//!
//! Everything here is built from the public field, matrix and layer
//! generation operations and recomputes the evaluator's intermediate values a
//! second way:
//! - [`trace`] exposes `u`, the input of the final power map, and checks the
//!   quadratic relation `u^(2^f) = (x ⊕ ct)·u`.
//! - [`linearized`] rebuilds `u` from Frobenius matrices and one inversion
//!   instead of large exponentiations, and checks the same relation with the
//!   final power replaced by its matrix.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod frobenius;
mod trace;

pub use frobenius::frobenius_matrix;
pub use trace::{linearized, trace, Linearized, Trace};
