use {
  crate::{
    action::{
      Action,
      ActionPayload,
      BuyRam,
      BuyRamBytes,
      DelegateBw,
      DeleteAuth,
      Refund,
      SellRam,
      UndelegateBw,
      UpdateAuth,
    },
    balances::Balances,
    snapshot::{AccountObject, AccountResourceLimit},
  },
  accountkit_primitives::{
    Asset,
    AssetError,
    AuthorityError,
    Name,
    Permission,
    PermissionLevel,
    Symbol,
  },
  accountkit_resources::{
    ResourceDelta,
    ResourceKind,
    ResourceLimit,
    ResourceSnapshot,
  },
  serde::Serialize,
  thiserror::Error,
  tracing::debug,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("Permission {permission} does not exist on account {account}.")]
  PermissionNotFound { permission: Name, account: Name },

  #[error("permission {permission} belongs to {owner}, not to {account}")]
  ForeignPermission {
    permission: Name,
    owner: Name,
    account: Name,
  },

  #[error("permission {0} cannot be deleted")]
  ProtectedPermission(Name),

  #[error("{kind} of account {account} is unlimited")]
  UnlimitedResource { account: Name, kind: ResourceKind },

  #[error("{what} of {value} is out of range")]
  OutOfRange { what: &'static str, value: u64 },

  #[error(transparent)]
  Authority(#[from] AuthorityError),

  #[error(transparent)]
  Asset(#[from] AssetError),
}

/// Settings of the chain an account lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfig {
  /// Contract implementing permission and resource actions.
  pub contract: Name,

  /// Token staked for cpu and net.
  pub core_symbol: Symbol,

  /// Permission of the account that authorizes produced actions.
  pub authorizer: Name,

  /// Whether staked tokens are transferred to the receiver.
  pub transfer: bool,
}

impl Default for AccountConfig {
  fn default() -> Self {
    Self {
      contract: Name::EOSIO,
      core_symbol: Symbol::constant(4, "EOS"),
      authorizer: Name::ACTIVE,
      transfer: false,
    }
  }
}

/// Resource usage of an account as reported by the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceUsage {
  pub cpu_available: i64,
  pub cpu_used: i64,
  pub net_available: i64,
  pub net_used: i64,
  pub ram_quota: i64,
  pub ram_usage: i64,
}

/// A fetched account together with the chain settings needed to act
/// on its behalf.
///
/// The account itself is read-only. Permissions and resource plans are
/// derived from it, edited by the caller and turned back into actions
/// that the account authorizes.
#[derive(Debug, Clone)]
pub struct Account {
  data: AccountObject,
  config: AccountConfig,
}

impl Account {
  pub fn new(data: AccountObject) -> Self {
    Self::with_config(data, AccountConfig::default())
  }

  pub fn with_config(data: AccountObject, config: AccountConfig) -> Self {
    Self { data, config }
  }

  pub fn name(&self) -> Name {
    self.data.account_name
  }

  pub fn data(&self) -> &AccountObject {
    &self.data
  }

  pub fn config(&self) -> &AccountConfig {
    &self.config
  }

  pub fn permissions(&self) -> impl Iterator<Item = Permission> + '_ {
    self.data.permissions.iter().map(|object| {
      Permission::new(
        self.name(),
        object.perm_name,
        object.parent,
        object.required_auth.clone(),
      )
    })
  }

  pub fn permission(&self, name: Name) -> Result<Permission, Error> {
    self
      .permissions()
      .find(|permission| permission.name == name)
      .ok_or(Error::PermissionNotFound {
        permission: name,
        account: self.name(),
      })
  }

  /// Current staked cpu and net weights and ram quota, ready for
  /// resource planning.
  pub fn resources(&self) -> Result<ResourceSnapshot, Error> {
    let amount = |kind, value: i64| {
      u64::try_from(value).map_err(|_| Error::UnlimitedResource {
        account: self.name(),
        kind,
      })
    };
    let limit = |l: &AccountResourceLimit| ResourceLimit {
      used: l.used.max(0) as u64,
      available: l.available.max(0) as u64,
      max: l.max.max(0) as u64,
    };

    let ram_quota = amount(ResourceKind::Ram, self.data.ram_quota)?;
    let ram_usage = self.data.ram_usage.max(0) as u64;
    Ok(
      ResourceSnapshot::new(
        amount(ResourceKind::Cpu, self.data.cpu_weight)?,
        amount(ResourceKind::Net, self.data.net_weight)?,
        ram_quota,
      )
      .with_limit(ResourceKind::Cpu, limit(&self.data.cpu_limit))
      .with_limit(ResourceKind::Net, limit(&self.data.net_limit))
      .with_limit(ResourceKind::Ram, ResourceLimit {
        used: ram_usage,
        available: ram_quota.saturating_sub(ram_usage),
        max: ram_quota,
      }),
    )
  }

  pub fn usage(&self) -> ResourceUsage {
    ResourceUsage {
      cpu_available: self.data.cpu_limit.available,
      cpu_used: self.data.cpu_limit.used,
      net_available: self.data.net_limit.available,
      net_used: self.data.net_limit.used,
      ram_quota: self.data.ram_quota,
      ram_usage: self.data.ram_usage,
    }
  }

  pub fn balances(&self) -> Balances {
    Balances::new(self.data.core_liquid_balance.into_iter().collect())
  }

  fn action<P: ActionPayload>(&self, payload: P) -> Action {
    Action::new(
      self.config.contract,
      vec![PermissionLevel::new(self.name(), self.config.authorizer)],
      payload,
    )
  }

  /// Builds `updateauth` for an edited permission of this account.
  ///
  /// The authority is checked against the chain's validation rules first
  /// since the chain would reject it anyway.
  pub fn update_permission(
    &self,
    permission: &Permission,
  ) -> Result<Action, Error> {
    if permission.account != self.name() {
      return Err(Error::ForeignPermission {
        permission: permission.name,
        owner: permission.account,
        account: self.name(),
      });
    }
    permission.required_auth.validate()?;

    debug!("updating permission {} of {}", permission.name, self.name());
    Ok(self.action(UpdateAuth {
      account: self.name(),
      permission: permission.name,
      parent: permission.parent,
      auth: permission.required_auth.clone(),
    }))
  }

  /// Builds `deleteauth`. `owner` and `active` can never be deleted.
  pub fn remove_permission(&self, name: Name) -> Result<Action, Error> {
    if name == Name::OWNER || name == Name::ACTIVE {
      return Err(Error::ProtectedPermission(name));
    }
    Ok(self.action(DeleteAuth {
      account: self.name(),
      permission: name,
    }))
  }

  pub fn buy_ram(&self, quant: Asset) -> Result<Action, Error> {
    self.ensure_core_symbol(&quant)?;
    Ok(self.action(BuyRam {
      payer: self.name(),
      receiver: self.name(),
      quant,
    }))
  }

  pub fn buy_ram_bytes(&self, bytes: u32) -> Action {
    self.action(BuyRamBytes {
      payer: self.name(),
      receiver: self.name(),
      bytes,
    })
  }

  pub fn sell_ram(&self, bytes: u64) -> Result<Action, Error> {
    let bytes = i64::try_from(bytes).map_err(|_| Error::OutOfRange {
      what: "ram to sell",
      value: bytes,
    })?;
    Ok(self.action(SellRam {
      account: self.name(),
      bytes,
    }))
  }

  pub fn delegate_resources(
    &self,
    cpu: Asset,
    net: Asset,
  ) -> Result<Action, Error> {
    self.ensure_core_symbol(&cpu)?;
    self.ensure_core_symbol(&net)?;
    Ok(self.action(DelegateBw {
      from: self.name(),
      receiver: self.name(),
      stake_net_quantity: net,
      stake_cpu_quantity: cpu,
      transfer: self.config.transfer,
    }))
  }

  pub fn undelegate_resources(
    &self,
    cpu: Asset,
    net: Asset,
  ) -> Result<Action, Error> {
    self.ensure_core_symbol(&cpu)?;
    self.ensure_core_symbol(&net)?;
    Ok(self.action(UndelegateBw {
      from: self.name(),
      receiver: self.name(),
      unstake_net_quantity: net,
      unstake_cpu_quantity: cpu,
    }))
  }

  pub fn refund(&self) -> Action {
    self.action(Refund { owner: self.name() })
  }

  /// Turns a resource plan into the actions that carry it out.
  ///
  /// Releases come before acquisitions: `sellram`, `undelegatebw`,
  /// `buyrambytes`, `delegatebw`. Cpu and net share one stake and one
  /// unstake action, the side without a change is a zero quantity.
  /// An empty plan produces no actions.
  pub fn apply_plan(&self, delta: &ResourceDelta) -> Result<Vec<Action>, Error> {
    let mut actions = vec![];

    if let Some(bytes) = delta.ram_to_sell {
      actions.push(self.sell_ram(bytes)?);
    }

    if delta.cpu_to_unstake.is_some() || delta.net_to_unstake.is_some() {
      actions.push(self.undelegate_resources(
        self.stake(delta.cpu_to_unstake)?,
        self.stake(delta.net_to_unstake)?,
      )?);
    }

    if let Some(bytes) = delta.ram_to_buy {
      let bytes = u32::try_from(bytes).map_err(|_| Error::OutOfRange {
        what: "ram to buy",
        value: bytes,
      })?;
      actions.push(self.buy_ram_bytes(bytes));
    }

    if delta.cpu_to_stake.is_some() || delta.net_to_stake.is_some() {
      actions.push(self.delegate_resources(
        self.stake(delta.cpu_to_stake)?,
        self.stake(delta.net_to_stake)?,
      )?);
    }

    debug!(
      "resource plan for {} produced {} actions",
      self.name(),
      actions.len()
    );
    Ok(actions)
  }

  fn stake(&self, units: Option<u64>) -> Result<Asset, Error> {
    Ok(Asset::from_units(
      units.unwrap_or_default(),
      self.config.core_symbol,
    )?)
  }

  fn ensure_core_symbol(&self, asset: &Asset) -> Result<(), Error> {
    if asset.symbol() != self.config.core_symbol {
      return Err(Error::Asset(AssetError::SymbolMismatch {
        expected: self.config.core_symbol,
        found: asset.symbol(),
      }));
    }
    Ok(())
  }
}
