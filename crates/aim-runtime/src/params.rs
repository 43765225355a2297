//! Parameter sets for AIM-I, AIM-III and AIM-V.

use core::fmt;

use aim_field::{AimError, Result};

/// Static description of one AIM instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AimParams {
    /// Human-readable name.
    pub name: &'static str,
    /// Field degree `d` in bits.
    pub degree: usize,
    /// Exponents `e` of the power maps `x^(2^e - 1)`, one per matrix of the affine layer.
    pub exponents: &'static [u32],
    /// Exponent `f` of the final map `x^(2^f - 1)`.
    pub final_exponent: u32,
}

impl AimParams {
    /// Number of matrices `s` in the affine layer.
    pub const fn layers(&self) -> usize {
        self.exponents.len()
    }

    /// Serialized width `d/8` of preimages, IVs and outputs.
    pub const fn byte_len(&self) -> usize {
        self.degree / 8
    }
}

/// AIM-I over GF(2^128).
pub const AIM128_PARAMS: AimParams = AimParams {
    name: "AIM-I",
    degree: 128,
    exponents: &[3, 27],
    final_exponent: 5,
};

/// AIM-III over GF(2^192).
pub const AIM192_PARAMS: AimParams = AimParams {
    name: "AIM-III",
    degree: 192,
    exponents: &[5, 29],
    final_exponent: 7,
};

/// AIM-V over GF(2^256).
pub const AIM256_PARAMS: AimParams = AimParams {
    name: "AIM-V",
    degree: 256,
    exponents: &[3, 53, 7],
    final_exponent: 5,
};

/// The three supported one-way function variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// AIM-I, 16-byte inputs.
    Aim128,
    /// AIM-III, 24-byte inputs.
    Aim192,
    /// AIM-V, 32-byte inputs.
    Aim256,
}

impl Variant {
    /// All variants in increasing size.
    pub const ALL: [Variant; 3] = [Variant::Aim128, Variant::Aim192, Variant::Aim256];

    /// Selects the variant whose preimage is `len` bytes long.
    pub fn from_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(Self::Aim128),
            24 => Ok(Self::Aim192),
            32 => Ok(Self::Aim256),
            other => Err(AimError::InvalidInput(format!(
                "unsupported width of {other} bytes; expected 16, 24 or 32"
            ))),
        }
    }

    /// Selects the variant with field degree `bits`.
    pub fn from_bits(bits: usize) -> Result<Self> {
        if bits % 8 != 0 {
            return Err(AimError::InvalidInput(format!(
                "unsupported degree of {bits} bits; expected 128, 192 or 256"
            )));
        }
        Self::from_len(bits / 8)
    }

    /// Parameter set of the variant.
    pub const fn params(&self) -> &'static AimParams {
        match self {
            Self::Aim128 => &AIM128_PARAMS,
            Self::Aim192 => &AIM192_PARAMS,
            Self::Aim256 => &AIM256_PARAMS,
        }
    }

    /// Preimage, IV and output width in bytes.
    pub const fn byte_len(&self) -> usize {
        self.params().byte_len()
    }

    /// Field degree in bits.
    pub const fn degree(&self) -> usize {
        self.params().degree
    }

    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        self.params().name
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
