use {
  serde::{Deserialize, Serialize},
  std::{fmt::Display, str::FromStr},
  thiserror::Error,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown resource '{0}', expected one of cpu, net or ram")]
pub struct Error(String);

/// Chain resources an account can hold.
///
/// Cpu and net are acquired by staking the core token and measured in its
/// minor units. Ram is bought and sold and measured in bytes.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
  Cpu,
  Net,
  Ram,
}

impl ResourceKind {
  pub const ALL: [ResourceKind; 3] =
    [ResourceKind::Cpu, ResourceKind::Net, ResourceKind::Ram];

  pub(crate) fn index(self) -> usize {
    match self {
      ResourceKind::Cpu => 0,
      ResourceKind::Net => 1,
      ResourceKind::Ram => 2,
    }
  }

  /// Whether the resource is acquired by staking rather than buying.
  pub fn is_staked(self) -> bool {
    !matches!(self, ResourceKind::Ram)
  }
}

impl Display for ResourceKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      ResourceKind::Cpu => "cpu",
      ResourceKind::Net => "net",
      ResourceKind::Ram => "ram",
    })
  }
}

impl FromStr for ResourceKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "cpu" => Ok(ResourceKind::Cpu),
      "net" => Ok(ResourceKind::Net),
      "ram" => Ok(ResourceKind::Ram),
      _ => Err(Error(s.to_owned())),
    }
  }
}
