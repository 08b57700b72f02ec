use {
  crate::{ResourceDelta, ResourceKind},
  accountkit_primitives::{Asset, Symbol},
  serde::{Deserialize, Serialize},
  std::collections::BTreeMap,
  thiserror::Error,
  tracing::debug,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("invalid {kind} target: {reason}")]
  InvalidArgument { kind: ResourceKind, reason: String },
}

impl Error {
  fn invalid(kind: ResourceKind, reason: impl Into<String>) -> Self {
    Error::InvalidArgument {
      kind,
      reason: reason.into(),
    }
  }
}

/// Usage of a resource as reported by the chain, for display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimit {
  pub used: u64,
  pub available: u64,
  pub max: u64,
}

/// Desired amounts for any subset of the resources.
///
/// Values are signed so that out of range input coming from users or
/// JSON can be rejected instead of silently wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
  #[serde(default)]
  pub cpu: Option<i64>,
  #[serde(default)]
  pub net: Option<i64>,
  #[serde(default)]
  pub ram: Option<i64>,
}

impl Targets {
  pub fn get(&self, kind: ResourceKind) -> Option<i64> {
    match kind {
      ResourceKind::Cpu => self.cpu,
      ResourceKind::Net => self.net,
      ResourceKind::Ram => self.ram,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Allocation {
  current: u64,
  target: Option<u64>,
  limit: Option<ResourceLimit>,
}

/// Current resource allocation of an account together with the
/// allocation the caller wants it to have.
///
/// Amounts are in native units: staked minor units of the core token for
/// cpu and net, bytes for ram. A resource without a target is left as it
/// is and never shows up in a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSnapshot {
  // indexed by ResourceKind::index
  allocations: [Allocation; 3],
}

impl ResourceSnapshot {
  pub fn new(cpu: u64, net: u64, ram: u64) -> Self {
    let mut snapshot = Self::default();
    snapshot.allocation_mut(ResourceKind::Cpu).current = cpu;
    snapshot.allocation_mut(ResourceKind::Net).current = net;
    snapshot.allocation_mut(ResourceKind::Ram).current = ram;
    snapshot
  }

  pub fn with_limit(mut self, kind: ResourceKind, limit: ResourceLimit) -> Self {
    self.allocation_mut(kind).limit = Some(limit);
    self
  }

  fn allocation(&self, kind: ResourceKind) -> &Allocation {
    &self.allocations[kind.index()]
  }

  fn allocation_mut(&mut self, kind: ResourceKind) -> &mut Allocation {
    &mut self.allocations[kind.index()]
  }

  pub fn current(&self, kind: ResourceKind) -> u64 {
    self.allocation(kind).current
  }

  pub fn target(&self, kind: ResourceKind) -> Option<u64> {
    self.allocation(kind).target
  }

  pub fn limit(&self, kind: ResourceKind) -> Option<ResourceLimit> {
    self.allocation(kind).limit
  }

  /// Records the desired amount of one resource.
  ///
  /// Negative amounts are rejected and leave the previous target in place.
  pub fn set_target(
    &mut self,
    kind: ResourceKind,
    amount: i64,
  ) -> Result<(), Error> {
    let amount = validate(kind, amount)?;
    self.allocation_mut(kind).target = Some(amount);
    Ok(())
  }

  /// Records the desired amounts of all resources present in `targets`,
  /// the others keep whatever target they had.
  ///
  /// Either every given target is recorded or, if any of them is invalid,
  /// none is.
  pub fn set_targets(&mut self, targets: Targets) -> Result<(), Error> {
    let mut validated = [None; 3];
    for kind in ResourceKind::ALL {
      if let Some(amount) = targets.get(kind) {
        validated[kind.index()] = Some(validate(kind, amount)?);
      }
    }

    for kind in ResourceKind::ALL {
      if let Some(amount) = validated[kind.index()] {
        self.allocation_mut(kind).target = Some(amount);
      }
    }
    Ok(())
  }

  pub fn clear_target(&mut self, kind: ResourceKind) {
    self.allocation_mut(kind).target = None;
  }

  /// How much of a resource must be acquired to reach its target.
  pub fn needed(&self, kind: ResourceKind) -> u64 {
    let allocation = self.allocation(kind);
    allocation
      .target
      .map_or(0, |target| target.saturating_sub(allocation.current))
  }

  /// How much of a resource is held above its target.
  pub fn surplus(&self, kind: ResourceKind) -> u64 {
    let allocation = self.allocation(kind);
    allocation
      .target
      .map_or(0, |target| allocation.current.saturating_sub(target))
  }

  /// Needed amounts of the resources below target, resources at or above
  /// their target are omitted.
  pub fn needed_all(&self) -> BTreeMap<ResourceKind, u64> {
    self.positive(Self::needed)
  }

  /// Surplus amounts of the resources above target, resources at or
  /// below their target are omitted.
  pub fn surplus_all(&self) -> BTreeMap<ResourceKind, u64> {
    self.positive(Self::surplus)
  }

  fn positive(
    &self,
    amount: impl Fn(&Self, ResourceKind) -> u64,
  ) -> BTreeMap<ResourceKind, u64> {
    ResourceKind::ALL
      .into_iter()
      .map(|kind| (kind, amount(self, kind)))
      .filter(|(_, amount)| *amount > 0)
      .collect()
  }

  /// Minimal set of changes that brings every resource to its target.
  ///
  /// An empty delta is a valid outcome, it means the account already
  /// matches all of its targets.
  pub fn plan(&self) -> ResourceDelta {
    let mut delta = ResourceDelta::default();
    for kind in ResourceKind::ALL {
      delta.record(kind, self.needed(kind), self.surplus(kind));
    }
    debug!("planned resource changes: {delta:?}");
    delta
  }
}

fn validate(kind: ResourceKind, amount: i64) -> Result<u64, Error> {
  u64::try_from(amount)
    .map_err(|_| Error::invalid(kind, format!("{amount} is negative")))
}

/// Parses a target given as a plain integer in native units or, for
/// staked resources, as an asset of the staking token (`"1.5000 EOS"`).
///
/// The result still goes through the same checks as any other target
/// when it is recorded.
pub fn parse_target(
  kind: ResourceKind,
  input: &str,
  stake_symbol: Symbol,
) -> Result<i64, Error> {
  let input = input.trim();
  if let Ok(units) = input.parse::<i64>() {
    return Ok(units);
  }

  if !kind.is_staked() {
    return Err(Error::invalid(kind, format!("'{input}' is not a byte count")));
  }

  let asset: Asset = input
    .parse()
    .map_err(|e| Error::invalid(kind, format!("'{input}': {e}")))?;
  if asset.symbol() != stake_symbol {
    return Err(Error::invalid(
      kind,
      format!("expected an amount of {stake_symbol}, got {input}"),
    ));
  }
  Ok(asset.amount())
}
