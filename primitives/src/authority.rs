use {
  crate::{
    key::Error as KeyError,
    name::Error as NameError,
    PermissionLevel,
    PublicKey,
  },
  serde::{Deserialize, Serialize},
  std::{convert::Infallible, fmt::Display},
  thiserror::Error,
};

pub type Weight = u16;

/// Weight used when the caller does not specify one.
pub const DEFAULT_WEIGHT: Weight = 1;

/// Identifies one entry of an authority in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
  Key(PublicKey),
  Account(PermissionLevel),
  Wait(u32),
}

impl Display for Entry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Entry::Key(key) => write!(f, "key {key}"),
      Entry::Account(level) => write!(f, "account {level}"),
      Entry::Wait(secs) => write!(f, "wait of {secs}s"),
    }
  }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
  #[error("{0} is already present in the authority")]
  DuplicateEntry(Entry),

  #[error("{0} is not present in the authority")]
  NotFound(Entry),

  #[error(transparent)]
  Key(#[from] KeyError),

  #[error(transparent)]
  Name(#[from] NameError),

  #[error("authority threshold must be greater than zero")]
  ZeroThreshold,

  #[error("authority weights sum up to {total} which is below threshold {threshold}")]
  Unsatisfiable { threshold: u32, total: u64 },
}

impl From<Infallible> for Error {
  fn from(e: Infallible) -> Self {
    match e {}
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyWeight {
  pub key: PublicKey,
  pub weight: Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionLevelWeight {
  pub permission: PermissionLevel,
  pub weight: Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaitWeight {
  pub wait_sec: u32,
  pub weight: Weight,
}

/// Common shape of the three weighted lists of an authority.
///
/// Each list is kept sorted ascending by `id` and holds at most one
/// entry per `id`. The weight is never part of the identity.
trait Weighted: Copy {
  type Id: Ord + Copy;

  fn id(&self) -> Self::Id;
  fn weight(&self) -> Weight;
  fn entry(id: Self::Id) -> Entry;
}

impl Weighted for KeyWeight {
  type Id = PublicKey;

  fn id(&self) -> PublicKey {
    self.key
  }

  fn weight(&self) -> Weight {
    self.weight
  }

  fn entry(id: PublicKey) -> Entry {
    Entry::Key(id)
  }
}

impl Weighted for PermissionLevelWeight {
  type Id = PermissionLevel;

  fn id(&self) -> PermissionLevel {
    self.permission
  }

  fn weight(&self) -> Weight {
    self.weight
  }

  fn entry(id: PermissionLevel) -> Entry {
    Entry::Account(id)
  }
}

impl Weighted for WaitWeight {
  type Id = u32;

  fn id(&self) -> u32 {
    self.wait_sec
  }

  fn weight(&self) -> Weight {
    self.weight
  }

  fn entry(id: u32) -> Entry {
    Entry::Wait(id)
  }
}

/// Inserts at the sorted position, the list is never left unsorted.
fn insert_sorted<T: Weighted>(items: &mut Vec<T>, item: T) -> Result<(), Error> {
  let id = item.id();
  match items.binary_search_by(|probe| probe.id().cmp(&id)) {
    Ok(_) => Err(Error::DuplicateEntry(T::entry(id))),
    Err(position) => {
      items.insert(position, item);
      Ok(())
    }
  }
}

/// Removes the entry with the given id. When `weight` is given it must
/// match too, otherwise the entry counts as missing.
fn remove_sorted<T: Weighted>(
  items: &mut Vec<T>,
  id: T::Id,
  weight: Option<Weight>,
) -> Result<T, Error> {
  match items.binary_search_by(|probe| probe.id().cmp(&id)) {
    Ok(position)
      if weight.map_or(true, |w| items[position].weight() == w) =>
    {
      Ok(items.remove(position))
    }
    _ => Err(Error::NotFound(T::entry(id))),
  }
}

/// Weighted threshold multi-signature authority.
///
/// An action is authorized when the weights of the satisfied keys,
/// delegated permissions and elapsed waits add up to at least the
/// threshold.
///
/// All three lists are kept in the canonical order the chain expects
/// after every single mutation and never contain duplicates, so the
/// authority can be read (and serialized) at any point. A mutation that
/// fails leaves the authority untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthorityData")]
pub struct Authority {
  threshold: u32,
  keys: Vec<KeyWeight>,
  accounts: Vec<PermissionLevelWeight>,
  waits: Vec<WaitWeight>,
}

/// Authority as it comes over the wire, before canonicalization.
#[derive(Debug, Deserialize)]
struct AuthorityData {
  threshold: u32,
  #[serde(default)]
  keys: Vec<KeyWeight>,
  #[serde(default)]
  accounts: Vec<PermissionLevelWeight>,
  #[serde(default)]
  waits: Vec<WaitWeight>,
}

impl TryFrom<AuthorityData> for Authority {
  type Error = Error;

  fn try_from(data: AuthorityData) -> Result<Self, Self::Error> {
    Authority::from_parts(data.threshold, data.keys, data.accounts, data.waits)
  }
}

impl Authority {
  /// An empty authority with the given threshold.
  pub fn new(threshold: u32) -> Self {
    Self {
      threshold,
      keys: vec![],
      accounts: vec![],
      waits: vec![],
    }
  }

  /// Builds an authority from lists in any order.
  ///
  /// Fails with [`Error::DuplicateEntry`] if any list repeats an entry.
  pub fn from_parts(
    threshold: u32,
    keys: impl IntoIterator<Item = KeyWeight>,
    accounts: impl IntoIterator<Item = PermissionLevelWeight>,
    waits: impl IntoIterator<Item = WaitWeight>,
  ) -> Result<Self, Error> {
    let mut authority = Authority::new(threshold);
    for key in keys {
      insert_sorted(&mut authority.keys, key)?;
    }
    for account in accounts {
      insert_sorted(&mut authority.accounts, account)?;
    }
    for wait in waits {
      insert_sorted(&mut authority.waits, wait)?;
    }
    Ok(authority)
  }

  pub fn threshold(&self) -> u32 {
    self.threshold
  }

  pub fn set_threshold(&mut self, threshold: u32) {
    self.threshold = threshold;
  }

  pub fn keys(&self) -> &[KeyWeight] {
    &self.keys
  }

  pub fn accounts(&self) -> &[PermissionLevelWeight] {
    &self.accounts
  }

  pub fn waits(&self) -> &[WaitWeight] {
    &self.waits
  }

  pub fn add_key<K>(&mut self, key: K) -> Result<(), Error>
  where
    K: TryInto<PublicKey>,
    Error: From<<K as TryInto<PublicKey>>::Error>,
  {
    self.add_key_with_weight(key, DEFAULT_WEIGHT)
  }

  /// Adds a key in either legacy or prefixed form, or an already parsed
  /// [`PublicKey`].
  pub fn add_key_with_weight<K>(
    &mut self,
    key: K,
    weight: Weight,
  ) -> Result<(), Error>
  where
    K: TryInto<PublicKey>,
    Error: From<<K as TryInto<PublicKey>>::Error>,
  {
    let key = key.try_into()?;
    insert_sorted(&mut self.keys, KeyWeight { key, weight })
  }

  pub fn remove_key<K>(&mut self, key: K) -> Result<KeyWeight, Error>
  where
    K: TryInto<PublicKey>,
    Error: From<<K as TryInto<PublicKey>>::Error>,
  {
    remove_sorted(&mut self.keys, key.try_into()?, None)
  }

  pub fn add_account<L>(&mut self, level: L) -> Result<(), Error>
  where
    L: TryInto<PermissionLevel>,
    Error: From<<L as TryInto<PermissionLevel>>::Error>,
  {
    self.add_account_with_weight(level, DEFAULT_WEIGHT)
  }

  /// Adds a delegated permission given as a [`PermissionLevel`], an
  /// `(actor, permission)` pair or an `"actor@permission"` string.
  pub fn add_account_with_weight<L>(
    &mut self,
    level: L,
    weight: Weight,
  ) -> Result<(), Error>
  where
    L: TryInto<PermissionLevel>,
    Error: From<<L as TryInto<PermissionLevel>>::Error>,
  {
    let permission = level.try_into()?;
    insert_sorted(&mut self.accounts, PermissionLevelWeight {
      permission,
      weight,
    })
  }

  pub fn remove_account<L>(
    &mut self,
    level: L,
  ) -> Result<PermissionLevelWeight, Error>
  where
    L: TryInto<PermissionLevel>,
    Error: From<<L as TryInto<PermissionLevel>>::Error>,
  {
    remove_sorted(&mut self.accounts, level.try_into()?, None)
  }

  pub fn add_wait(&mut self, wait_sec: u32) -> Result<(), Error> {
    self.add_wait_with_weight(wait_sec, DEFAULT_WEIGHT)
  }

  pub fn add_wait_with_weight(
    &mut self,
    wait_sec: u32,
    weight: Weight,
  ) -> Result<(), Error> {
    insert_sorted(&mut self.waits, WaitWeight { wait_sec, weight })
  }

  /// Removes the wait of `wait_sec` seconds. If `weight` is given, the
  /// stored weight must match as well.
  pub fn remove_wait(
    &mut self,
    wait_sec: u32,
    weight: Option<Weight>,
  ) -> Result<WaitWeight, Error> {
    remove_sorted(&mut self.waits, wait_sec, weight)
  }

  /// Sum of all weights in the authority.
  pub fn total_weight(&self) -> u64 {
    let keys = self.keys.iter().map(|k| k.weight as u64);
    let accounts = self.accounts.iter().map(|a| a.weight as u64);
    let waits = self.waits.iter().map(|w| w.weight as u64);
    keys.chain(accounts).chain(waits).sum()
  }

  /// Checks the rules the chain applies before accepting an authority:
  /// a positive threshold that the weights can actually reach.
  ///
  /// Mutations never call this, intermediate states are allowed to be
  /// unsatisfiable.
  pub fn validate(&self) -> Result<(), Error> {
    if self.threshold == 0 {
      return Err(Error::ZeroThreshold);
    }

    let total = self.total_weight();
    if total < self.threshold as u64 {
      return Err(Error::Unsatisfiable {
        threshold: self.threshold,
        total,
      });
    }
    Ok(())
  }
}
