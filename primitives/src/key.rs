use {
  crate::b58::{self, decode_check, ToBase58Check},
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

/// Compressed curve point length shared by K1 and R1 keys.
pub const KEY_DATA_LEN: usize = 33;

/// Prefix used by the legacy key format on most networks.
pub const LEGACY_PREFIX: &str = "EOS";

const MODERN_PREFIX: &str = "PUB_";
const LEGACY_BODY_LEN: usize = 50;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unsupported public key type '{0}'")]
  UnsupportedType(String),

  #[error("malformed public key '{0}'")]
  Malformed(String),

  #[error("invalid public key '{key}': {source}")]
  Encoding { key: String, source: b58::Error },

  #[error("public key '{key}' carries {len} bytes, expected 33")]
  InvalidLength { key: String, len: usize },
}

/// Curve of a public key.
///
/// The declaration order matches the variant index used in the binary
/// encoding of keys, which is also the first byte compared when keys
/// are ordered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyType {
  K1,
  R1,
}

impl KeyType {
  pub fn index(&self) -> u8 {
    match self {
      KeyType::K1 => 0,
      KeyType::R1 => 1,
    }
  }

  fn suffix(&self) -> &'static str {
    match self {
      KeyType::K1 => "K1",
      KeyType::R1 => "R1",
    }
  }
}

impl FromStr for KeyType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "K1" => Ok(KeyType::K1),
      "R1" => Ok(KeyType::R1),
      other => Err(Error::UnsupportedType(other.to_owned())),
    }
  }
}

/// A public key in its canonical form.
///
/// Keys are accepted both in the legacy format (`EOS6MRy...`) and in the
/// prefixed format (`PUB_K1_6MRy...`). Both decode to the same value,
/// so equality, hashing and ordering never depend on the textual form a
/// key arrived in.
///
/// Ordering is over the canonical bytes: key type index first, then the
/// compressed point. This is the order the chain requires for keys
/// listed in an authority.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey {
  kind: KeyType,
  data: [u8; KEY_DATA_LEN],
}

impl PublicKey {
  pub fn new(kind: KeyType, data: [u8; KEY_DATA_LEN]) -> Self {
    Self { kind, data }
  }

  pub fn kind(&self) -> KeyType {
    self.kind
  }

  pub fn data(&self) -> &[u8; KEY_DATA_LEN] {
    &self.data
  }

  /// Canonical binary form: type index followed by the key data.
  pub fn to_bytes(&self) -> [u8; KEY_DATA_LEN + 1] {
    let mut bytes = [0u8; KEY_DATA_LEN + 1];
    bytes[0] = self.kind.index();
    bytes[1..].copy_from_slice(&self.data);
    bytes
  }

  /// Renders the key in the legacy format with the given network prefix.
  ///
  /// Only K1 keys have a legacy representation.
  pub fn to_legacy_string(&self, prefix: &str) -> Result<String, Error> {
    match self.kind {
      KeyType::K1 => Ok(format!("{prefix}{}", self.data.to_b58_check(b""))),
      other => Err(Error::UnsupportedType(other.suffix().to_owned())),
    }
  }

  fn from_payload(
    key: &str,
    kind: KeyType,
    payload: Result<Vec<u8>, b58::Error>,
  ) -> Result<Self, Error> {
    let payload = payload.map_err(|source| Error::Encoding {
      key: key.to_owned(),
      source,
    })?;

    let data: [u8; KEY_DATA_LEN] =
      payload
        .as_slice()
        .try_into()
        .map_err(|_| Error::InvalidLength {
          key: key.to_owned(),
          len: payload.len(),
        })?;

    Ok(Self { kind, data })
  }
}

impl FromStr for PublicKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if let Some(rest) = s.strip_prefix(MODERN_PREFIX) {
      let (kind, body) = rest
        .split_once('_')
        .ok_or_else(|| Error::Malformed(s.to_owned()))?;
      let kind: KeyType = kind.parse()?;
      return Self::from_payload(
        s,
        kind,
        decode_check(body, kind.suffix().as_bytes()),
      );
    }

    // legacy: <network prefix><50 chars of base58 key + checksum>
    if !s.is_ascii() || s.len() <= LEGACY_BODY_LEN {
      return Err(Error::Malformed(s.to_owned()));
    }
    let (prefix, body) = s.split_at(s.len() - LEGACY_BODY_LEN);
    if !prefix.chars().all(|c| c.is_ascii_uppercase()) {
      return Err(Error::Malformed(s.to_owned()));
    }
    Self::from_payload(s, KeyType::K1, decode_check(body, b""))
  }
}

impl TryFrom<&str> for PublicKey {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

impl TryFrom<String> for PublicKey {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    FromStr::from_str(&value)
  }
}

impl Display for PublicKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let suffix = self.kind.suffix();
    write!(
      f,
      "{MODERN_PREFIX}{suffix}_{}",
      self.data.to_b58_check(suffix.as_bytes())
    )
  }
}

impl Debug for PublicKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "public_key({self})")
  }
}

impl From<PublicKey> for String {
  fn from(key: PublicKey) -> Self {
    key.to_string()
  }
}

#[cfg(test)]
mod tests {
  use {
    super::{Error, KeyType, PublicKey, LEGACY_PREFIX},
    std::str::FromStr,
  };

  const MODERN: &str = "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63";
  const LEGACY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";
  const OTHER: &str = "PUB_K1_6XXTaRpWhPwnb7CTV9zVsCBrvCpYMMPSk8E8hsJxhf6V9t8aT5";

  #[test]
  fn legacy_and_modern_forms_are_equal() -> anyhow::Result<()> {
    let modern = PublicKey::from_str(MODERN)?;
    let legacy = PublicKey::from_str(LEGACY)?;
    assert_eq!(modern, legacy);
    assert_eq!(legacy.to_string(), MODERN);
    assert_eq!(modern.to_legacy_string(LEGACY_PREFIX)?, LEGACY);
    Ok(())
  }

  #[test]
  fn decodes_key_bytes() -> anyhow::Result<()> {
    let key = PublicKey::from_str(MODERN)?;
    assert_eq!(key.kind(), KeyType::K1);
    assert_eq!(
      hex::encode(key.to_bytes()),
      "0002c0ded2bc1f1305fb0faac5e6c03ee3a1924234985427b6167ca569d13df435cf"
    );
    Ok(())
  }

  #[test]
  fn orders_by_canonical_bytes() -> anyhow::Result<()> {
    let low = PublicKey::from_str(MODERN)?;
    let high = PublicKey::from_str(OTHER)?;
    assert!(low < high);

    // type index dominates the key data
    let r1 = PublicKey::new(KeyType::R1, [0u8; 33]);
    assert!(high < r1);
    Ok(())
  }

  #[test]
  fn r1_keys_roundtrip() -> anyhow::Result<()> {
    let key = PublicKey::new(KeyType::R1, [2u8; 33]);
    let text = key.to_string();
    assert_eq!(text, "PUB_R1_4uNe9acnngQsW7wqi818p8GopreujRtw7CS3i6jJWEHjVJPwWx");
    assert_eq!(PublicKey::from_str(&text)?, key);
    assert_eq!(
      key.to_legacy_string(LEGACY_PREFIX),
      Err(Error::UnsupportedType("R1".into()))
    );
    Ok(())
  }

  #[test]
  fn rejects_bad_keys() {
    assert!(matches!(
      PublicKey::from_str("EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CW"),
      Err(Error::Encoding { .. })
    ));
    assert!(matches!(
      PublicKey::from_str("PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"),
      Err(Error::Encoding { .. })
    ));
    assert_eq!(
      PublicKey::from_str("PUB_WA_abc"),
      Err(Error::UnsupportedType("WA".into()))
    );
    assert!(matches!(
      PublicKey::from_str("PUB_K1"),
      Err(Error::Malformed(_))
    ));
    assert!(matches!(
      PublicKey::from_str("eos6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"),
      Err(Error::Malformed(_))
    ));
  }

  #[test]
  fn serde_uses_modern_form() -> anyhow::Result<()> {
    let key: PublicKey = serde_json::from_str(&format!("\"{LEGACY}\""))?;
    assert_eq!(serde_json::to_string(&key)?, format!("\"{MODERN}\""));
    Ok(())
  }
}
