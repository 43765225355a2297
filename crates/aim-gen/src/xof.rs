//! SHAKE byte streams seeded from an initialization vector.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake128Reader, Shake256, Shake256Reader};

/// SHAKE instance selected by IV width.
///
/// A 128-bit IV reads from SHAKE128; 192-bit and 256-bit IVs read from
/// SHAKE256. The stream is consumed strictly in order.
pub enum LayerXof {
    /// Reader for 128-bit IVs.
    Shake128(Shake128Reader),
    /// Reader for wider IVs.
    Shake256(Shake256Reader),
}

impl LayerXof {
    /// Absorbs `iv` and returns the squeezing reader.
    pub fn from_iv(iv: &[u8]) -> Self {
        if iv.len() * 8 == 128 {
            let mut hasher = Shake128::default();
            hasher.update(iv);
            Self::Shake128(hasher.finalize_xof())
        } else {
            let mut hasher = Shake256::default();
            hasher.update(iv);
            Self::Shake256(hasher.finalize_xof())
        }
    }

    /// Fills `buf` with the next bytes of the stream.
    pub fn read(&mut self, buf: &mut [u8]) {
        match self {
            Self::Shake128(reader) => reader.read(buf),
            Self::Shake256(reader) => reader.read(buf),
        }
    }

    /// Name of the underlying function.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shake128(_) => "SHAKE128",
            Self::Shake256(_) => "SHAKE256",
        }
    }
}
