use {
  crate::ResourceKind,
  serde::{Deserialize, Serialize},
};

/// Resource changes needed to move an account to its target allocation.
///
/// Every field is either a strictly positive quantity or absent, absence
/// meaning that nothing of that kind needs to happen. For any one resource
/// at most one direction is ever set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDelta {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ram_to_buy: Option<u64>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ram_to_sell: Option<u64>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cpu_to_stake: Option<u64>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cpu_to_unstake: Option<u64>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub net_to_stake: Option<u64>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub net_to_unstake: Option<u64>,
}

impl ResourceDelta {
  pub fn is_empty(&self) -> bool {
    *self == ResourceDelta::default()
  }

  /// Amount to buy (ram) or stake (cpu, net).
  pub fn acquire(&self, kind: ResourceKind) -> Option<u64> {
    match kind {
      ResourceKind::Cpu => self.cpu_to_stake,
      ResourceKind::Net => self.net_to_stake,
      ResourceKind::Ram => self.ram_to_buy,
    }
  }

  /// Amount to sell (ram) or unstake (cpu, net).
  pub fn release(&self, kind: ResourceKind) -> Option<u64> {
    match kind {
      ResourceKind::Cpu => self.cpu_to_unstake,
      ResourceKind::Net => self.net_to_unstake,
      ResourceKind::Ram => self.ram_to_sell,
    }
  }

  /// Records the needed and surplus amounts of one resource, zero
  /// amounts leave the field unset.
  pub(crate) fn record(
    &mut self,
    kind: ResourceKind,
    needed: u64,
    surplus: u64,
  ) {
    let (acquire, release) = match kind {
      ResourceKind::Cpu => (&mut self.cpu_to_stake, &mut self.cpu_to_unstake),
      ResourceKind::Net => (&mut self.net_to_stake, &mut self.net_to_unstake),
      ResourceKind::Ram => (&mut self.ram_to_buy, &mut self.ram_to_sell),
    };
    *acquire = (needed > 0).then_some(needed);
    *release = (surplus > 0).then_some(surplus);
  }
}

#[cfg(test)]
mod tests {
  use {super::ResourceDelta, crate::ResourceKind};

  #[test]
  fn zero_amounts_are_not_recorded() {
    let mut delta = ResourceDelta::default();
    delta.record(ResourceKind::Ram, 0, 0);
    assert!(delta.is_empty());

    delta.record(ResourceKind::Net, 0, 22);
    assert_eq!(delta.release(ResourceKind::Net), Some(22));
    assert_eq!(delta.acquire(ResourceKind::Net), None);
    assert!(!delta.is_empty());
  }

  #[test]
  fn serializes_only_present_fields() -> anyhow::Result<()> {
    let delta = ResourceDelta {
      cpu_to_stake: Some(222),
      ram_to_buy: Some(666),
      ..Default::default()
    };
    assert_eq!(
      serde_json::to_string(&delta)?,
      r#"{"ram_to_buy":666,"cpu_to_stake":222}"#
    );
    assert_eq!(serde_json::to_string(&ResourceDelta::default())?, "{}");
    Ok(())
  }
}
