use {
  accountkit_primitives::{Asset, Authority, Name},
  serde::{de, Deserialize, Deserializer, Serialize},
};

/// Chain nodes encode 64 bit integers either as JSON numbers or, when
/// they may not fit a double, as strings. Both are accepted.
fn int64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Int64 {
    Number(i64),
    Text(String),
  }

  match Int64::deserialize(deserializer)? {
    Int64::Number(value) => Ok(value),
    Int64::Text(text) => text.parse().map_err(de::Error::custom),
  }
}

/// Subset of a `get_account` response this crate reads.
///
/// Unknown fields are ignored so responses of chains that add their own
/// fields still parse. Resource weights and limits are `-1` for accounts
/// with unlimited resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountObject {
  pub account_name: Name,

  #[serde(deserialize_with = "int64")]
  pub ram_quota: i64,

  #[serde(deserialize_with = "int64")]
  pub ram_usage: i64,

  #[serde(deserialize_with = "int64")]
  pub net_weight: i64,

  #[serde(deserialize_with = "int64")]
  pub cpu_weight: i64,

  pub net_limit: AccountResourceLimit,
  pub cpu_limit: AccountResourceLimit,

  #[serde(default)]
  pub permissions: Vec<PermissionObject>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub core_liquid_balance: Option<Asset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResourceLimit {
  #[serde(deserialize_with = "int64")]
  pub used: i64,

  #[serde(deserialize_with = "int64")]
  pub available: i64,

  #[serde(deserialize_with = "int64")]
  pub max: i64,
}

/// One entry of the permission tree of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionObject {
  pub perm_name: Name,
  pub parent: Name,
  pub required_auth: Authority,
}

#[cfg(test)]
mod tests {
  use super::AccountObject;

  #[test]
  fn accepts_numbers_and_strings() -> anyhow::Result<()> {
    let account: AccountObject = serde_json::from_str(
      r#"{
        "account_name": "test",
        "head_block_num": 0,
        "ram_quota": "67988",
        "ram_usage": 17086,
        "net_weight": 8253324,
        "cpu_weight": "236250",
        "net_limit": { "used": 1, "available": "2", "max": 3 },
        "cpu_limit": { "used": -1, "available": -1, "max": -1, "last_usage_update_time": "2023-01-01T00:00:00.000" },
        "core_liquid_balance": "1.0000 EOS"
      }"#,
    )?;

    assert_eq!(account.account_name.to_string(), "test");
    assert_eq!(account.ram_quota, 67988);
    assert_eq!(account.cpu_weight, 236250);
    assert_eq!(account.net_limit.available, 2);
    assert_eq!(account.cpu_limit.max, -1);
    assert!(account.permissions.is_empty());
    assert_eq!(
      account.core_liquid_balance.map(|b| b.to_string()),
      Some("1.0000 EOS".into())
    );
    Ok(())
  }

  #[test]
  fn rejects_non_numeric_strings() {
    let result = serde_json::from_str::<AccountObject>(
      r#"{
        "account_name": "test",
        "ram_quota": "lots",
        "ram_usage": 0,
        "net_weight": 0,
        "cpu_weight": 0,
        "net_limit": { "used": 0, "available": 0, "max": 0 },
        "cpu_limit": { "used": 0, "available": 0, "max": 0 }
      }"#,
    );
    assert!(result.is_err());
  }
}
