//! Binary extension field arithmetic for the AIM one-way functions.
//!
//! This crate provides:
//! - Fixed-width elements of GF(2^128), GF(2^192) and GF(2^256).
//! - Shift-and-add multiplication, square-and-multiply exponentiation and
//!   inversion, parameterized by a [`BinaryField`] descriptor.
//! - The error type shared across the workspace.
//!
//! Arithmetic is written for clarity and exact agreement with the published
//! test vectors; it is not constant time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod element;
mod error;
mod field;

pub use crate::element::{Gf, Gf128, Gf192, Gf256, SetBits};
pub use crate::error::{AimError, Result};
pub use crate::field::{BinaryField, GF128, GF192, GF256};
