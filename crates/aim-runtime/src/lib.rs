//! Evaluator for the AIM one-way functions.
//!
//! Each variant raises the preimage to a few Mersenne-exponent powers, feeds
//! them through an affine layer derived from the public IV, and finishes with
//! one more power map folded back onto the preimage:
//!
//! `ct = (b ⊕ Σ x^(2^eᵢ - 1)·Aᵢ)^(2^f - 1) ⊕ x`
//!
//! The [`kat`] module reads known-answer-test key pairs for acceptance checks.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod evaluator;
pub mod kat;
mod params;

pub use crate::evaluator::{
    evaluate, evaluate_auto, mersenne, OneWayFunction, AIM128, AIM192, AIM256,
};
pub use crate::kat::{parse_rsp, KatRecord};
pub use crate::params::{AimParams, Variant, AIM128_PARAMS, AIM192_PARAMS, AIM256_PARAMS};
