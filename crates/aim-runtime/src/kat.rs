//! Known-answer-test records in the NIST response-file layout.
//!
//! A record pairs a public key `pk = iv || ct` with a secret key that starts
//! with the preimage `pt`. Some producers prepend a one-byte variant tag to
//! either key; a key whose length is `1 mod 8` has that byte stripped.

use aim_field::{AimError, Result};

use crate::evaluator::evaluate;
use crate::params::Variant;

/// One `(iv, ct, pt)` triple recovered from a key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KatRecord {
    /// Variant implied by the key widths.
    pub variant: Variant,
    /// Public initialization vector.
    pub iv: Vec<u8>,
    /// Expected one-way function output.
    pub ct: Vec<u8>,
    /// Secret preimage.
    pub pt: Vec<u8>,
}

fn strip_tag(bytes: &[u8]) -> &[u8] {
    if bytes.len() % 8 == 1 {
        &bytes[1..]
    } else {
        bytes
    }
}

fn decode_hex(label: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim())
        .map_err(|err| AimError::InvalidInput(format!("{label} is not valid hex: {err}")))
}

impl KatRecord {
    /// Splits raw key bytes into a record.
    pub fn from_bytes(pk: &[u8], sk: &[u8]) -> Result<Self> {
        let pk = strip_tag(pk);
        let sk = strip_tag(sk);
        if pk.len() % 2 != 0 {
            return Err(AimError::InvalidInput(format!(
                "public key of {} bytes does not split into iv || ct",
                pk.len()
            )));
        }
        let half = pk.len() / 2;
        let variant = Variant::from_len(half)?;
        if sk.len() < half {
            return Err(AimError::InvalidInput(format!(
                "secret key of {} bytes is shorter than the {half}-byte preimage",
                sk.len()
            )));
        }
        let (iv, ct) = pk.split_at(half);
        Ok(Self {
            variant,
            iv: iv.to_vec(),
            ct: ct.to_vec(),
            pt: sk[..half].to_vec(),
        })
    }

    /// Parses hex-encoded keys.
    pub fn from_hex(pk_hex: &str, sk_hex: &str) -> Result<Self> {
        let pk = decode_hex("pk", pk_hex)?;
        let sk = decode_hex("sk", sk_hex)?;
        Self::from_bytes(&pk, &sk)
    }

    /// Recomputes the output from `pt` and `iv`.
    pub fn evaluate(&self) -> Result<Vec<u8>> {
        evaluate(self.variant, &self.pt, &self.iv)
    }

    /// Returns true if the recomputed output equals `ct`.
    pub fn verify(&self) -> Result<bool> {
        Ok(self.evaluate()? == self.ct)
    }
}

/// Parses every `pk`/`sk` pair from a `.rsp` file.
///
/// Lines are `key = value`; blank lines and `#` comments are skipped, and keys
/// other than `pk` and `sk` are ignored.
pub fn parse_rsp(text: &str) -> Result<Vec<KatRecord>> {
    let mut records = Vec::new();
    let mut pk: Option<&str> = None;
    let mut sk: Option<&str> = None;

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(AimError::InvalidInput(format!(
                "line {}: expected `key = value`",
                lineno + 1
            )));
        };
        match key.trim() {
            "count" if pk.is_some() || sk.is_some() => {
                return Err(AimError::InvalidInput(format!(
                    "line {}: record ends without both pk and sk",
                    lineno + 1
                )));
            }
            "pk" => pk = Some(value.trim()),
            "sk" => sk = Some(value.trim()),
            _ => {}
        }
        if let (Some(pk_hex), Some(sk_hex)) = (pk, sk) {
            records.push(KatRecord::from_hex(pk_hex, sk_hex)?);
            pk = None;
            sk = None;
        }
    }

    if pk.is_some() || sk.is_some() {
        return Err(AimError::InvalidInput(
            "trailing record without both pk and sk".to_string(),
        ));
    }
    Ok(records)
}
