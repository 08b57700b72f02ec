use {
  crate::{Authority, Name},
  serde::{Deserialize, Serialize},
};

/// A named authority of an account.
///
/// Permissions of an account form a tree through `parent`, `owner` is the
/// root (its parent is the empty name) and `active` usually hangs off it.
/// The tree itself is managed on chain; here the parent is only carried
/// along so the permission can be re-submitted unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
  pub account: Name,
  #[serde(rename = "permission")]
  pub name: Name,
  pub parent: Name,
  #[serde(rename = "auth")]
  pub required_auth: Authority,
}

impl Permission {
  pub fn new(
    account: Name,
    name: Name,
    parent: Name,
    required_auth: Authority,
  ) -> Self {
    Self {
      account,
      name,
      parent,
      required_auth,
    }
  }

  pub fn is_root(&self) -> bool {
    self.parent.is_empty()
  }

  pub fn authority(&self) -> &Authority {
    &self.required_auth
  }

  pub fn authority_mut(&mut self) -> &mut Authority {
    &mut self.required_auth
  }
}

#[cfg(test)]
mod tests {
  use {
    super::Permission,
    crate::{Authority, Name},
    std::str::FromStr,
  };

  #[test]
  fn mutations_go_through_the_authority() -> anyhow::Result<()> {
    let mut permission = Permission::new(
      Name::from_str("teamgreymass")?,
      Name::ACTIVE,
      Name::OWNER,
      Authority::new(1),
    );
    assert!(!permission.is_root());

    permission.authority_mut().add_account("trust.gm")?;
    permission.authority_mut().add_wait(100)?;
    assert_eq!(
      permission.authority().accounts()[0].permission.to_string(),
      "trust.gm@active"
    );
    assert_eq!(permission.authority().waits()[0].wait_sec, 100);
    Ok(())
  }

  #[test]
  fn serializes_as_updateauth_fields() -> anyhow::Result<()> {
    let permission = Permission::new(
      Name::from_str("teamgreymass")?,
      Name::OWNER,
      Name::default(),
      Authority::new(1),
    );
    assert!(permission.is_root());

    let json = serde_json::to_value(&permission)?;
    assert_eq!(json["account"], "teamgreymass");
    assert_eq!(json["permission"], "owner");
    assert_eq!(json["parent"], "");
    assert_eq!(json["auth"]["threshold"], 1);
    Ok(())
  }
}
