mod account;
mod action;
mod balances;
mod snapshot;

pub use {
  account::{Account, AccountConfig, Error as AccountError, ResourceUsage},
  action::{
    Action,
    ActionData,
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
  snapshot::{AccountObject, AccountResourceLimit, PermissionObject},
};
