use {
  accountkit_primitives::{Asset, Symbol},
  std::cmp::Ordering,
};

/// Token balances held by an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances {
  assets: Vec<Asset>,
}

impl Balances {
  pub fn new(assets: Vec<Asset>) -> Self {
    Self { assets }
  }

  pub fn iter(&self) -> impl Iterator<Item = &Asset> {
    self.assets.iter()
  }

  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }

  /// Sum of all balances of one symbol, `None` if it overflows.
  pub fn total(&self, symbol: Symbol) -> Option<Asset> {
    self
      .assets
      .iter()
      .filter(|asset| asset.symbol() == symbol)
      .try_fold(Asset::zero(symbol), |acc, asset| acc.checked_add(asset).ok())
  }

  /// Balance held under the code of `symbol`, whatever its precision.
  /// Zero in `symbol` when the account holds none.
  pub fn get(&self, symbol: Symbol) -> Asset {
    let code = symbol.code();
    self
      .assets
      .iter()
      .find(|asset| asset.symbol().code() == code)
      .copied()
      .unwrap_or_else(|| Asset::zero(symbol))
  }

  /// Balances from largest to smallest value.
  pub fn sorted(&self) -> Vec<Asset> {
    let mut assets = self.assets.clone();
    assets.sort_by(|a, b| compare(b, a));
    assets
  }

  /// Balances whose value lies strictly between the two bounds.
  pub fn filter(&self, above: Option<&Asset>, below: Option<&Asset>) -> Vec<Asset> {
    self
      .assets
      .iter()
      .filter(|asset| above.map_or(true, |lo| compare(asset, lo).is_gt()))
      .filter(|asset| below.map_or(true, |hi| compare(asset, hi).is_lt()))
      .copied()
      .collect()
  }
}

impl<'a> IntoIterator for &'a Balances {
  type Item = &'a Asset;
  type IntoIter = std::slice::Iter<'a, Asset>;

  fn into_iter(self) -> Self::IntoIter {
    self.assets.iter()
  }
}

// amounts scaled to a common precision of 18 fit into i128
fn normalized(asset: &Asset) -> i128 {
  let shift = 18u32.saturating_sub(asset.symbol().precision() as u32);
  asset.amount() as i128 * 10i128.pow(shift)
}

fn compare(a: &Asset, b: &Asset) -> Ordering {
  normalized(a).cmp(&normalized(b))
}

#[cfg(test)]
mod tests {
  use {
    super::Balances,
    accountkit_primitives::{Asset, Symbol},
    std::str::FromStr,
  };

  fn balances() -> anyhow::Result<Balances> {
    Ok(Balances::new(vec![
      Asset::from_str("1.5000 EOS")?,
      Asset::from_str("20 WAX")?,
      Asset::from_str("0.25 TLOS")?,
    ]))
  }

  #[test]
  fn get_defaults_to_zero() -> anyhow::Result<()> {
    let balances = balances()?;
    assert_eq!(balances.get(Symbol::from_str("4,EOS")?).to_string(), "1.5000 EOS");
    assert_eq!(balances.get(Symbol::from_str("4,FOO")?).to_string(), "0.0000 FOO");
    Ok(())
  }

  #[test]
  fn get_matches_code_across_precisions() -> anyhow::Result<()> {
    let balances = balances()?;
    assert_eq!(balances.get(Symbol::from_str("8,EOS")?).to_string(), "1.5000 EOS");
    assert_eq!(balances.get(Symbol::from_str("0,TLOS")?).to_string(), "0.25 TLOS");
    assert_eq!(balances.get(Symbol::from_str("8,FOO")?).to_string(), "0.00000000 FOO");
    Ok(())
  }

  #[test]
  fn total_sums_one_symbol() -> anyhow::Result<()> {
    let mut assets: Vec<_> = balances()?.iter().copied().collect();
    assets.push(Asset::from_str("0.5000 EOS")?);
    let balances = Balances::new(assets);
    assert_eq!(
      balances.total(Symbol::from_str("4,EOS")?).map(|a| a.to_string()),
      Some("2.0000 EOS".into())
    );
    Ok(())
  }

  #[test]
  fn sorted_compares_across_precisions() -> anyhow::Result<()> {
    let sorted: Vec<_> = balances()?
      .sorted()
      .into_iter()
      .map(|asset| asset.to_string())
      .collect();
    assert_eq!(sorted, ["20 WAX", "1.5000 EOS", "0.25 TLOS"]);
    Ok(())
  }

  #[test]
  fn filter_is_exclusive() -> anyhow::Result<()> {
    let balances = balances()?;
    let one = Asset::from_str("1 X")?;
    let twenty = Asset::from_str("20.0 X")?;

    let filtered = balances.filter(Some(&one), Some(&twenty));
    assert_eq!(filtered, vec![Asset::from_str("1.5000 EOS")?]);

    let filtered = balances.filter(None, Some(&one));
    assert_eq!(filtered, vec![Asset::from_str("0.25 TLOS")?]);
    assert_eq!(balances.filter(None, None).len(), 3);
    Ok(())
  }
}
