use {
  crate::cli::{split_weight, weighted, CliOptions, Command},
  accountkit_primitives::Permission,
  accountkit_resources::{parse_target, ResourceKind, Targets},
  accountkit_sdk::{Account, AccountConfig, AccountObject},
  anyhow::Context,
  clap::Parser,
  serde_json::{json, Value},
  std::path::Path,
  tracing::{debug, info},
  tracing_subscriber::{EnvFilter, FmtSubscriber},
};

mod cli;

fn main() -> anyhow::Result<()> {
  tracing::subscriber::set_global_default(
    FmtSubscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_writer(std::io::stderr)
      .finish(),
  )?;

  let opts = CliOptions::parse();
  debug!("options: {opts:?}");

  let config = opts.account_config();
  let output = match opts.command {
    Command::Plan {
      snapshot,
      cpu,
      net,
      ram,
    } => {
      let account = load(&snapshot, config)?;
      let symbol = account.config().core_symbol;
      let target = |kind, input: Option<String>| {
        input
          .map(|input| parse_target(kind, &input, symbol))
          .transpose()
      };
      plan(&account, Targets {
        cpu: target(ResourceKind::Cpu, cpu)?,
        net: target(ResourceKind::Net, net)?,
        ram: target(ResourceKind::Ram, ram)?,
      })?
    }
    Command::Auth {
      snapshot,
      permission,
      add_key,
      remove_key,
      add_account,
      remove_account,
      add_wait,
      remove_wait,
      threshold,
    } => {
      let account = load(&snapshot, config)?;
      let mut permission = account.permission(permission)?;
      edit(&mut permission, Edits {
        add_key,
        remove_key,
        add_account,
        remove_account,
        add_wait,
        remove_wait,
        threshold,
      })?;
      serde_json::to_value(account.update_permission(&permission)?)?
    }
    Command::Usage { snapshot } => {
      let account = load(&snapshot, config)?;
      json!({
        "usage": account.usage(),
        "balances": account
          .balances()
          .sorted()
          .into_iter()
          .map(|asset| asset.to_string())
          .collect::<Vec<_>>(),
      })
    }
  };

  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

fn load(path: &Path, config: AccountConfig) -> anyhow::Result<Account> {
  let json = std::fs::read_to_string(path)
    .with_context(|| format!("reading {}", path.display()))?;
  let data: AccountObject = serde_json::from_str(&json)
    .with_context(|| format!("parsing account snapshot {}", path.display()))?;
  info!("loaded account {}", data.account_name);
  Ok(Account::with_config(data, config))
}

fn plan(account: &Account, targets: Targets) -> anyhow::Result<Value> {
  let mut resources = account.resources()?;
  resources.set_targets(targets)?;

  let delta = resources.plan();
  let actions = account.apply_plan(&delta)?;
  Ok(json!({
    "needed": resources.needed_all(),
    "surplus": resources.surplus_all(),
    "delta": delta,
    "actions": actions,
  }))
}

struct Edits {
  add_key: Vec<String>,
  remove_key: Vec<String>,
  add_account: Vec<String>,
  remove_account: Vec<String>,
  add_wait: Vec<String>,
  remove_wait: Vec<String>,
  threshold: Option<u32>,
}

/// Removals go first so an entry can be re-added with a new weight in
/// one invocation.
fn edit(permission: &mut Permission, edits: Edits) -> anyhow::Result<()> {
  let authority = permission.authority_mut();

  for key in &edits.remove_key {
    authority.remove_key(key.as_str())?;
  }
  for level in &edits.remove_account {
    authority.remove_account(level.as_str())?;
  }
  for arg in &edits.remove_wait {
    let (wait, weight) = split_weight(arg)?;
    let wait = wait
      .parse()
      .with_context(|| format!("invalid wait '{arg}'"))?;
    authority.remove_wait(wait, weight)?;
  }

  for arg in &edits.add_key {
    let (key, weight) = weighted(arg)?;
    authority.add_key_with_weight(key, weight)?;
  }
  for arg in &edits.add_account {
    let (level, weight) = weighted(arg)?;
    authority.add_account_with_weight(level, weight)?;
  }
  for arg in &edits.add_wait {
    let (wait, weight) = weighted(arg)?;
    let wait = wait
      .parse()
      .with_context(|| format!("invalid wait '{arg}'"))?;
    authority.add_wait_with_weight(wait, weight)?;
  }

  if let Some(threshold) = edits.threshold {
    authority.set_threshold(threshold);
  }

  debug!(
    "edited permission {}: {:?}",
    permission.name,
    permission.authority()
  );
  Ok(())
}

#[cfg(test)]
mod tests {
  use {
    super::{edit, Edits},
    accountkit_primitives::{Authority, Name, Permission},
    std::str::FromStr,
  };

  fn edits() -> Edits {
    Edits {
      add_key: vec![],
      remove_key: vec![],
      add_account: vec![],
      remove_account: vec![],
      add_wait: vec![],
      remove_wait: vec![],
      threshold: None,
    }
  }

  #[test]
  fn reweights_entry_in_one_pass() -> anyhow::Result<()> {
    let mut authority = Authority::new(1);
    authority.add_account("trust.gm")?;
    let mut permission = Permission::new(
      Name::from_str("teamgreymass")?,
      Name::ACTIVE,
      Name::OWNER,
      authority,
    );

    edit(&mut permission, Edits {
      remove_account: vec!["trust.gm@active".into()],
      add_account: vec!["trust.gm@active:2".into()],
      add_wait: vec!["600:1".into()],
      threshold: Some(3),
      ..edits()
    })?;

    let authority = permission.authority();
    assert_eq!(authority.threshold(), 3);
    assert_eq!(authority.accounts()[0].weight, 2);
    assert_eq!(authority.waits()[0].wait_sec, 600);
    assert!(authority.validate().is_ok());
    Ok(())
  }

  #[test]
  fn removes_wait_only_when_weight_matches() -> anyhow::Result<()> {
    let mut authority = Authority::new(1);
    authority.add_wait_with_weight(600, 2)?;
    let mut permission = Permission::new(
      Name::from_str("teamgreymass")?,
      Name::ACTIVE,
      Name::OWNER,
      authority,
    );

    assert!(edit(&mut permission, Edits {
      remove_wait: vec!["600:1".into()],
      ..edits()
    })
    .is_err());
    assert_eq!(permission.authority().waits().len(), 1);

    edit(&mut permission, Edits {
      remove_wait: vec!["600:2".into()],
      ..edits()
    })?;
    assert!(permission.authority().waits().is_empty());
    Ok(())
  }

  #[test]
  fn missing_entry_fails() -> anyhow::Result<()> {
    let mut permission = Permission::new(
      Name::from_str("teamgreymass")?,
      Name::ACTIVE,
      Name::OWNER,
      Authority::new(1),
    );
    assert!(edit(&mut permission, Edits {
      remove_wait: vec!["10".into()],
      ..edits()
    })
    .is_err());
    Ok(())
  }
}
