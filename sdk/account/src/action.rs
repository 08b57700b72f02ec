use {
  accountkit_primitives::{Asset, Authority, Name, PermissionLevel},
  serde::{Deserialize, Serialize},
};

/// A system contract action with structured (not ABI encoded) data.
///
/// This is what gets handed over to whatever signs and broadcasts
/// transactions. Encoding `data` into its binary form is left to them,
/// the JSON shape of every payload matches the contract ABI field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
  pub account: Name,
  pub name: Name,
  pub authorization: Vec<PermissionLevel>,
  pub data: ActionData,
}

impl Action {
  pub fn new<P: ActionPayload>(
    contract: Name,
    authorization: Vec<PermissionLevel>,
    payload: P,
  ) -> Self {
    Self {
      account: contract,
      name: P::NAME,
      authorization,
      data: payload.into(),
    }
  }
}

/// Implemented by every payload type, ties it to its action name.
pub trait ActionPayload: Into<ActionData> {
  const NAME: Name;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionData {
  UpdateAuth(UpdateAuth),
  DeleteAuth(DeleteAuth),
  BuyRam(BuyRam),
  BuyRamBytes(BuyRamBytes),
  SellRam(SellRam),
  DelegateBw(DelegateBw),
  UndelegateBw(UndelegateBw),
  Refund(Refund),
}

macro_rules! payload {
  ($ty:ident, $name:literal) => {
    impl ActionPayload for $ty {
      const NAME: Name = Name::constant($name);
    }

    impl From<$ty> for ActionData {
      fn from(payload: $ty) -> Self {
        ActionData::$ty(payload)
      }
    }
  };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAuth {
  pub account: Name,
  pub permission: Name,
  pub parent: Name,
  pub auth: Authority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAuth {
  pub account: Name,
  pub permission: Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyRam {
  pub payer: Name,
  pub receiver: Name,
  pub quant: Asset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyRamBytes {
  pub payer: Name,
  pub receiver: Name,
  pub bytes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellRam {
  pub account: Name,
  pub bytes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateBw {
  pub from: Name,
  pub receiver: Name,
  pub stake_net_quantity: Asset,
  pub stake_cpu_quantity: Asset,
  pub transfer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndelegateBw {
  pub from: Name,
  pub receiver: Name,
  pub unstake_net_quantity: Asset,
  pub unstake_cpu_quantity: Asset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
  pub owner: Name,
}

payload!(UpdateAuth, "updateauth");
payload!(DeleteAuth, "deleteauth");
payload!(BuyRam, "buyram");
payload!(BuyRamBytes, "buyrambytes");
payload!(SellRam, "sellram");
payload!(DelegateBw, "delegatebw");
payload!(UndelegateBw, "undelegatebw");
payload!(Refund, "refund");

#[cfg(test)]
mod tests {
  use {
    super::{Action, ActionPayload, Refund, SellRam},
    accountkit_primitives::{Name, PermissionLevel},
    std::str::FromStr,
  };

  #[test]
  fn action_takes_payload_name() -> anyhow::Result<()> {
    let owner = Name::from_str("teamgreymass")?;
    let action = Action::new(
      Name::EOSIO,
      vec![PermissionLevel::new(owner, Name::ACTIVE)],
      Refund { owner },
    );
    assert_eq!(action.name, Refund::NAME);
    assert_eq!(action.name.to_string(), "refund");

    let json = serde_json::to_value(&action)?;
    assert_eq!(json["account"], "eosio");
    assert_eq!(json["name"], "refund");
    assert_eq!(json["authorization"][0]["actor"], "teamgreymass");
    assert_eq!(json["authorization"][0]["permission"], "active");
    assert_eq!(json["data"]["owner"], "teamgreymass");
    Ok(())
  }

  #[test]
  fn payload_names() {
    assert_eq!(SellRam::NAME.to_string(), "sellram");
  }
}
