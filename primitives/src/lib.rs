mod asset;
mod authority;
mod b58;
mod key;
mod level;
mod name;
mod permission;

pub use {
  asset::{Asset, Error as AssetError, Symbol, MAX_AMOUNT},
  authority::{
    Authority,
    Entry,
    Error as AuthorityError,
    KeyWeight,
    PermissionLevelWeight,
    WaitWeight,
    Weight,
    DEFAULT_WEIGHT,
  },
  b58::{Error as Base58Error, ToBase58Check},
  key::{Error as KeyError, KeyType, PublicKey, KEY_DATA_LEN, LEGACY_PREFIX},
  level::PermissionLevel,
  name::{Error as NameError, Name},
  permission::Permission,
};
