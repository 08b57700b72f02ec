use {
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("name '{0}' is longer than 13 characters")]
  TooLong(String),

  #[error("name '{name}' contains invalid character '{ch}'")]
  InvalidCharacter { name: String, ch: char },

  #[error("the 13th character of name '{0}' must be one of '.12345abcdefghij'")]
  InvalidLastCharacter(String),
}

/// Identifier of accounts, permissions, actions and contracts.
///
/// Names are up to 13 characters long and are packed into a single
/// 64 bit integer. The first 12 characters take 5 bits each and the
/// 13th character (if present) takes the remaining 4 bits, so it is
/// restricted to the first 16 symbols of the alphabet.
///
/// The chain compares names by their integer value, so that is the
/// ordering used here as well. Any place that needs canonical order
/// of names (like accounts in an authority) relies on it.
#[derive(
  Copy,
  Clone,
  Default,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Name(u64);

const fn char_to_symbol(c: u8) -> Option<u64> {
  match c {
    b'a'..=b'z' => Some((c - b'a') as u64 + 6),
    b'1'..=b'5' => Some((c - b'1') as u64 + 1),
    b'.' => Some(0),
    _ => None,
  }
}

impl Name {
  /// Well known names used by the system contract.
  pub const ACTIVE: Name = Name::constant("active");
  pub const OWNER: Name = Name::constant("owner");
  pub const EOSIO: Name = Name::constant("eosio");

  pub const fn from_u64(value: u64) -> Self {
    Self(value)
  }

  pub const fn as_u64(&self) -> u64 {
    self.0
  }

  /// Encodes a name known at compile time.
  ///
  /// Panics during const evaluation if the literal is not a valid name.
  pub const fn constant(s: &'static str) -> Self {
    let bytes = s.as_bytes();
    assert!(bytes.len() <= 13, "name is too long");

    let mut value = 0u64;
    let mut i = 0;
    while i < bytes.len() {
      let symbol = match char_to_symbol(bytes[i]) {
        Some(symbol) => symbol,
        None => panic!("invalid character in name"),
      };
      if i < 12 {
        value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
      } else {
        assert!(symbol <= 0x0f, "invalid 13th character in name");
        value |= symbol;
      }
      i += 1;
    }
    Self(value)
  }

  pub fn is_empty(&self) -> bool {
    self.0 == 0
  }
}

impl FromStr for Name {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut value = 0u64;
    for (i, ch) in s.chars().enumerate() {
      if i >= 13 {
        return Err(Error::TooLong(s.to_owned()));
      }

      let symbol = u8::try_from(ch)
        .ok()
        .and_then(char_to_symbol)
        .ok_or_else(|| Error::InvalidCharacter {
          name: s.to_owned(),
          ch,
        })?;

      if i < 12 {
        value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
      } else if symbol > 0x0f {
        return Err(Error::InvalidLastCharacter(s.to_owned()));
      } else {
        value |= symbol;
      }
    }
    Ok(Self(value))
  }
}

impl TryFrom<&str> for Name {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

impl TryFrom<String> for Name {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    FromStr::from_str(&value)
  }
}

impl Display for Name {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut chars = [b'.'; 13];
    let mut tmp = self.0;
    for (i, slot) in chars.iter_mut().rev().enumerate() {
      let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
      *slot = CHARMAP[(tmp & mask) as usize];
      tmp >>= shift;
    }
    let text: String = chars.iter().map(|&c| c as char).collect();
    write!(f, "{}", text.trim_end_matches('.'))
  }
}

impl Debug for Name {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "name({self})")
  }
}

impl From<Name> for String {
  fn from(name: Name) -> Self {
    name.to_string()
  }
}

impl From<Name> for u64 {
  fn from(name: Name) -> Self {
    name.0
  }
}

#[cfg(test)]
mod tests {
  use {
    super::{Error, Name},
    std::str::FromStr,
  };

  #[test]
  fn name_roundtrip() -> anyhow::Result<()> {
    for text in ["teamgreymass", "trust.gm", "eosio.token", "a", "", "zzzzzzzzzzzzj"]
    {
      assert_eq!(Name::from_str(text)?.to_string(), text);
    }
    Ok(())
  }

  #[test]
  fn name_known_values() -> anyhow::Result<()> {
    assert_eq!(Name::from_str("eosio")?.as_u64(), 6138663577826885632);
    assert_eq!(Name::from_str("............1")?.as_u64(), 1);
    assert_eq!(Name::from_str("eosio")?, Name::EOSIO);
    assert_eq!(Name::ACTIVE.to_string(), "active");
    assert_eq!(Name::OWNER.to_string(), "owner");
    Ok(())
  }

  #[test]
  fn name_trailing_dots_are_trimmed() -> anyhow::Result<()> {
    assert_eq!(Name::from_str("abc..")?.to_string(), "abc");
    assert_eq!(Name::from_str("abc..")?, Name::from_str("abc")?);
    Ok(())
  }

  #[test]
  fn name_rejects_malformed() {
    assert_eq!(
      Name::from_str("toolongname123"),
      Err(Error::TooLong("toolongname123".into()))
    );
    assert!(matches!(
      Name::from_str("Active"),
      Err(Error::InvalidCharacter { ch: 'A', .. })
    ));
    assert!(matches!(
      Name::from_str("abc6"),
      Err(Error::InvalidCharacter { ch: '6', .. })
    ));
    assert!(matches!(
      Name::from_str("aaaaaaaaaaaaz"),
      Err(Error::InvalidLastCharacter(_))
    ));
  }

  #[test]
  fn name_order_follows_value() -> anyhow::Result<()> {
    let mut names: Vec<Name> = ["trust.gm", "active", "owner", "a", "b.a"]
      .into_iter()
      .map(Name::from_str)
      .collect::<Result<_, _>>()?;
    names.sort();

    let sorted: Vec<String> = names.into_iter().map(String::from).collect();
    assert_eq!(sorted, vec!["a", "active", "b.a", "owner", "trust.gm"]);
    Ok(())
  }

  #[test]
  fn name_serde_as_string() -> anyhow::Result<()> {
    let name: Name = serde_json::from_str("\"teamgreymass\"")?;
    assert_eq!(serde_json::to_string(&name)?, "\"teamgreymass\"");
    assert!(serde_json::from_str::<Name>("\"NOPE\"").is_err());
    Ok(())
  }
}
