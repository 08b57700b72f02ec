use {
  accountkit_primitives::{Name, Symbol, Weight, DEFAULT_WEIGHT},
  accountkit_sdk::AccountConfig,
  anyhow::Context,
  clap::{Parser, Subcommand},
  std::path::PathBuf,
};

/// Antelope Account Kit
///
/// Reads an account snapshot (the JSON returned by `get_account`) and
/// prints the system contract actions that bring the account to the
/// requested state. Nothing is signed or broadcast.
#[derive(Debug, Parser)]
pub struct CliOptions {
  #[clap(subcommand)]
  pub command: Command,

  /// Symbol of the token staked for cpu and net
  #[clap(long, global = true, default_value = "4,EOS", value_name = "SYMBOL")]
  core_symbol: Symbol,

  /// Account of the system contract
  #[clap(long, global = true, default_value = "eosio", value_name = "NAME")]
  contract: Name,

  /// Permission of the account authorizing produced actions
  #[clap(long, global = true, default_value = "active", value_name = "NAME")]
  authorizer: Name,

  /// Transfer staked tokens instead of delegating them
  #[clap(long, global = true)]
  transfer: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Plans cpu, net and ram changes towards the given targets
  Plan {
    /// Account snapshot
    snapshot: PathBuf,

    /// Target cpu stake, in token units or as an asset
    #[clap(long, value_name = "AMOUNT")]
    cpu: Option<String>,

    /// Target net stake, in token units or as an asset
    #[clap(long, value_name = "AMOUNT")]
    net: Option<String>,

    /// Target ram quota in bytes
    #[clap(long, value_name = "BYTES")]
    ram: Option<String>,
  },

  /// Edits one permission and prints the resulting updateauth action
  Auth {
    /// Account snapshot
    snapshot: PathBuf,

    /// Permission to edit
    permission: Name,

    #[clap(long, value_name = "KEY[:WEIGHT]")]
    add_key: Vec<String>,

    #[clap(long, value_name = "KEY")]
    remove_key: Vec<String>,

    #[clap(long, value_name = "ACTOR@PERMISSION[:WEIGHT]")]
    add_account: Vec<String>,

    #[clap(long, value_name = "ACTOR@PERMISSION")]
    remove_account: Vec<String>,

    #[clap(long, value_name = "SECONDS[:WEIGHT]")]
    add_wait: Vec<String>,

    #[clap(long, value_name = "SECONDS[:WEIGHT]")]
    remove_wait: Vec<String>,

    #[clap(long)]
    threshold: Option<u32>,
  },

  /// Prints resource usage and balances of the account
  Usage {
    /// Account snapshot
    snapshot: PathBuf,
  },
}

impl CliOptions {
  pub fn account_config(&self) -> AccountConfig {
    AccountConfig {
      contract: self.contract,
      core_symbol: self.core_symbol,
      authorizer: self.authorizer,
      transfer: self.transfer,
    }
  }
}

/// Splits an optional `:weight` suffix off an entry argument.
pub fn weighted(arg: &str) -> anyhow::Result<(&str, Weight)> {
  let (entry, weight) = split_weight(arg)?;
  Ok((entry, weight.unwrap_or(DEFAULT_WEIGHT)))
}

/// Like [`weighted`] but keeps track of whether a weight was given.
pub fn split_weight(arg: &str) -> anyhow::Result<(&str, Option<Weight>)> {
  match arg.rsplit_once(':') {
    Some((entry, weight)) => Ok((
      entry,
      Some(
        weight
          .parse()
          .with_context(|| format!("invalid weight in '{arg}'"))?,
      ),
    )),
    None => Ok((arg, None)),
  }
}
