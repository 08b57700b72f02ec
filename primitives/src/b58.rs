use {
  multihash::{Hasher, Ripemd160},
  thiserror::Error,
};

const CHECKSUM_LEN: usize = 4;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("invalid base58 encoding: {0}")]
  Encoding(#[from] bs58::decode::Error),

  #[error("base58 payload is too short to carry a checksum")]
  TooShort,

  #[error("checksum mismatch")]
  Checksum,
}

/// First four bytes of RIPEMD-160 over the payload followed by the suffix.
///
/// Legacy key strings use an empty suffix, prefixed strings (`PUB_K1_`)
/// mix the key type into the checksum.
fn checksum(payload: &[u8], suffix: &[u8]) -> [u8; CHECKSUM_LEN] {
  let mut hasher = Ripemd160::default();
  hasher.update(payload);
  hasher.update(suffix);
  let digest = hasher.finalize();

  let mut out = [0u8; CHECKSUM_LEN];
  out.copy_from_slice(&digest[..CHECKSUM_LEN]);
  out
}

pub trait ToBase58Check {
  /// Base58 of the bytes with a RIPEMD-160 checksum appended.
  fn to_b58_check(&self, suffix: &[u8]) -> String;
}

impl ToBase58Check for &[u8] {
  fn to_b58_check(&self, suffix: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(self.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(self);
    bytes.extend_from_slice(&checksum(self, suffix));
    bs58::encode(bytes).into_string()
  }
}

impl<const N: usize> ToBase58Check for [u8; N] {
  fn to_b58_check(&self, suffix: &[u8]) -> String {
    self.as_slice().to_b58_check(suffix)
  }
}

/// Decodes a checksummed base58 string and returns the payload without
/// the trailing checksum bytes.
pub fn decode_check(s: &str, suffix: &[u8]) -> Result<Vec<u8>, Error> {
  let mut bytes = bs58::decode(s).into_vec()?;
  if bytes.len() < CHECKSUM_LEN {
    return Err(Error::TooShort);
  }

  let expected = bytes.split_off(bytes.len() - CHECKSUM_LEN);
  if checksum(&bytes, suffix)[..] != expected[..] {
    return Err(Error::Checksum);
  }
  Ok(bytes)
}

#[cfg(test)]
mod tests {
  use super::{decode_check, Error, ToBase58Check};

  #[test]
  fn checksum_roundtrip_with_suffix() -> anyhow::Result<()> {
    let payload = [7u8; 33];
    let encoded = payload.to_b58_check(b"K1");
    assert_eq!(decode_check(&encoded, b"K1")?, payload.to_vec());
    Ok(())
  }

  #[test]
  fn checksum_depends_on_suffix() {
    let payload = [7u8; 33];
    let encoded = payload.to_b58_check(b"K1");
    assert_eq!(decode_check(&encoded, b"R1"), Err(Error::Checksum));
    assert_eq!(decode_check(&encoded, b""), Err(Error::Checksum));
  }

  #[test]
  fn rejects_short_and_malformed_input() {
    assert_eq!(decode_check("1", b""), Err(Error::TooShort));
    assert!(matches!(decode_check("0OIl", b""), Err(Error::Encoding(_))));
  }
}
