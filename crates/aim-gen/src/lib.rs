//! Affine layer generation for the AIM one-way functions.
//!
//! This crate provides the GF(2) linear algebra and the SHAKE-driven sampler
//! that turn a public initialization vector into the affine layer of AIM:
//! a sequence of invertible binary matrices, each the product of two
//! unit-triangular factors, and one additive constant.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod affine;
mod generator;
mod matrix;
mod xof;

pub use affine::AffineLayer;
pub use generator::{generate_layer, LayerGenerator};
pub use matrix::{mat_mat, vec_mat, BitMatrix};
pub use xof::LayerXof;
