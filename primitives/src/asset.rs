use {
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
  thiserror::Error,
};

/// Largest amount the chain accepts for an asset, `2^62 - 1`.
pub const MAX_AMOUNT: i64 = (1 << 62) - 1;

const MAX_PRECISION: u8 = 18;
const MAX_CODE_LEN: usize = 7;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("invalid symbol '{0}'")]
  InvalidSymbol(String),

  #[error("invalid asset '{0}'")]
  InvalidAsset(String),

  #[error("asset amount is out of range")]
  Overflow,

  #[error("symbol mismatch, expected {expected} got {found}")]
  SymbolMismatch { expected: Symbol, found: Symbol },
}

/// Token symbol: a precision and an uppercase code of up to 7 letters.
///
/// Packed the same way the chain packs it, precision in the lowest byte
/// followed by the code characters.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(u64);

impl Symbol {
  /// Encodes a symbol known at compile time.
  ///
  /// Panics during const evaluation if the literal is not a valid symbol.
  pub const fn constant(precision: u8, code: &'static str) -> Self {
    let bytes = code.as_bytes();
    assert!(precision <= MAX_PRECISION, "symbol precision is too large");
    assert!(
      !bytes.is_empty() && bytes.len() <= MAX_CODE_LEN,
      "invalid symbol code length"
    );

    let mut packed = precision as u64;
    let mut i = 0;
    while i < bytes.len() {
      assert!(bytes[i].is_ascii_uppercase(), "invalid symbol code");
      packed |= (bytes[i] as u64) << (8 * (i + 1));
      i += 1;
    }
    Self(packed)
  }

  pub fn new(precision: u8, code: &str) -> Result<Self, Error> {
    let invalid = || Error::InvalidSymbol(format!("{precision},{code}"));
    if precision > MAX_PRECISION
      || code.is_empty()
      || code.len() > MAX_CODE_LEN
      || !code.bytes().all(|c| c.is_ascii_uppercase())
    {
      return Err(invalid());
    }

    let packed = code
      .bytes()
      .enumerate()
      .fold(precision as u64, |acc, (i, c)| acc | (c as u64) << (8 * (i + 1)));
    Ok(Self(packed))
  }

  pub fn precision(&self) -> u8 {
    (self.0 & 0xff) as u8
  }

  pub fn code(&self) -> String {
    (1..8)
      .map(|i| ((self.0 >> (8 * i)) & 0xff) as u8)
      .take_while(|&c| c != 0)
      .map(char::from)
      .collect()
  }

  /// Number of minor units in one whole token.
  fn scale(&self) -> i64 {
    10i64.pow(self.precision() as u32)
  }
}

impl FromStr for Symbol {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (precision, code) = s
      .split_once(',')
      .ok_or_else(|| Error::InvalidSymbol(s.to_owned()))?;
    let precision = precision
      .trim()
      .parse()
      .map_err(|_| Error::InvalidSymbol(s.to_owned()))?;
    Symbol::new(precision, code.trim())
  }
}

impl TryFrom<String> for Symbol {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    FromStr::from_str(&value)
  }
}

impl From<Symbol> for String {
  fn from(symbol: Symbol) -> Self {
    symbol.to_string()
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{},{}", self.precision(), self.code())
  }
}

impl Debug for Symbol {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "symbol({self})")
  }
}

/// A token quantity in minor units of its symbol.
///
/// `"1.0000 EOS"` is 10000 units of symbol `4,EOS`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
  amount: i64,
  symbol: Symbol,
}

impl Asset {
  pub fn new(amount: i64, symbol: Symbol) -> Result<Self, Error> {
    if !(-MAX_AMOUNT..=MAX_AMOUNT).contains(&amount) {
      return Err(Error::Overflow);
    }
    Ok(Self { amount, symbol })
  }

  /// Builds an asset from a non-negative count of minor units.
  pub fn from_units(units: u64, symbol: Symbol) -> Result<Self, Error> {
    let amount = i64::try_from(units).map_err(|_| Error::Overflow)?;
    Self::new(amount, symbol)
  }

  pub fn zero(symbol: Symbol) -> Self {
    Self { amount: 0, symbol }
  }

  pub fn amount(&self) -> i64 {
    self.amount
  }

  pub fn symbol(&self) -> Symbol {
    self.symbol
  }

  pub fn is_zero(&self) -> bool {
    self.amount == 0
  }

  pub fn checked_add(&self, other: &Asset) -> Result<Asset, Error> {
    self.ensure_same_symbol(other)?;
    let amount = self.amount.checked_add(other.amount).ok_or(Error::Overflow)?;
    Asset::new(amount, self.symbol)
  }

  pub fn checked_sub(&self, other: &Asset) -> Result<Asset, Error> {
    self.ensure_same_symbol(other)?;
    let amount = self.amount.checked_sub(other.amount).ok_or(Error::Overflow)?;
    Asset::new(amount, self.symbol)
  }

  fn ensure_same_symbol(&self, other: &Asset) -> Result<(), Error> {
    if self.symbol != other.symbol {
      return Err(Error::SymbolMismatch {
        expected: self.symbol,
        found: other.symbol,
      });
    }
    Ok(())
  }
}

impl FromStr for Asset {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || Error::InvalidAsset(s.to_owned());
    let (quantity, code) = s.trim().split_once(' ').ok_or_else(invalid)?;
    let (negative, quantity) = match quantity.strip_prefix('-') {
      Some(rest) => (true, rest),
      None => (false, quantity),
    };
    let (whole, fraction) = quantity.split_once('.').unwrap_or((quantity, ""));

    let digits = |part: &str| part.bytes().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !digits(whole) || !digits(fraction) {
      return Err(invalid());
    }

    let precision = u8::try_from(fraction.len()).map_err(|_| invalid())?;
    let symbol = Symbol::new(precision, code.trim())?;

    let amount = format!("{whole}{fraction}")
      .parse::<i64>()
      .map_err(|_| Error::Overflow)?;
    Asset::new(if negative { -amount } else { amount }, symbol)
  }
}

impl TryFrom<String> for Asset {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    FromStr::from_str(&value)
  }
}

impl TryFrom<&str> for Asset {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

impl From<Asset> for String {
  fn from(asset: Asset) -> Self {
    asset.to_string()
  }
}

impl Display for Asset {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let sign = if self.amount < 0 { "-" } else { "" };
    let scale = self.symbol.scale();
    let whole = (self.amount / scale).unsigned_abs();
    let code = self.symbol.code();
    match self.symbol.precision() as usize {
      0 => write!(f, "{sign}{whole} {code}"),
      precision => {
        let fraction = (self.amount % scale).unsigned_abs();
        write!(f, "{sign}{whole}.{fraction:0precision$} {code}")
      }
    }
  }
}

impl Debug for Asset {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "asset({self})")
  }
}
