use {
  crate::{name::Error as NameError, Name},
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
};

/// An `(actor, permission)` pair naming one permission of one account.
///
/// The textual form is `actor@permission`. A bare `actor` is read as
/// `actor@active`, the permission most delegations point at.
///
/// Levels order by actor first and permission second, comparing names by
/// their integer value.
#[derive(
  Copy,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
pub struct PermissionLevel {
  pub actor: Name,
  pub permission: Name,
}

impl PermissionLevel {
  pub fn new(actor: Name, permission: Name) -> Self {
    Self { actor, permission }
  }
}

impl FromStr for PermissionLevel {
  type Err = NameError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once('@') {
      Some((actor, permission)) => Ok(Self {
        actor: actor.parse()?,
        permission: permission.parse()?,
      }),
      None => Ok(Self {
        actor: s.parse()?,
        permission: Name::ACTIVE,
      }),
    }
  }
}

impl TryFrom<&str> for PermissionLevel {
  type Error = NameError;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

impl TryFrom<String> for PermissionLevel {
  type Error = NameError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    FromStr::from_str(&value)
  }
}

impl TryFrom<(&str, &str)> for PermissionLevel {
  type Error = NameError;

  fn try_from((actor, permission): (&str, &str)) -> Result<Self, Self::Error> {
    Ok(Self {
      actor: actor.parse()?,
      permission: permission.parse()?,
    })
  }
}

impl From<(Name, Name)> for PermissionLevel {
  fn from((actor, permission): (Name, Name)) -> Self {
    Self { actor, permission }
  }
}

impl Display for PermissionLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}@{}", self.actor, self.permission)
  }
}

impl Debug for PermissionLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "permission_level({self})")
  }
}
