use accountkit_sdk::{Account, AccountObject};

/// Snapshot of a `get_account` response for `teamgreymass`.
pub fn teamgreymass() -> anyhow::Result<Account> {
  let data: AccountObject =
    serde_json::from_str(include_str!("../fixtures/teamgreymass.json"))?;
  Ok(Account::new(data))
}
