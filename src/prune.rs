use {
  crate::{
    error::{Error, Result},
    locus::LocusSizes,
    seeds::{SeedId, SeedSet}
  },
  std::collections::BTreeSet
};

/// What to do with seeds that received no pixel in the last pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ZeroLocus {
  /// Never select them. They do not take part in the average either.
  #[default]
  Retain,
  /// Select them along with the below-threshold ones.
  Prune,
}

/// Selects seeds whose locus is smaller than `fraction` of the average locus size.
/// Performs no mutation; see [`SeedSet::apply_pruning`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pruning {
  fraction: f64,
  zero_locus: ZeroLocus,
}

impl Pruning {
  pub fn new(fraction: f64) -> Result<Self> {
    // also rejects NaN
    if !(fraction > 0.0) {
      return Err(Error::invalid(format!("pruning fraction must be positive, got {fraction}")));
    }
    Ok(Self { fraction, zero_locus: ZeroLocus::default() })
  }

  pub fn with_zero_locus(mut self, zero_locus: ZeroLocus) -> Self {
    self.zero_locus = zero_locus;
    self
  }

  pub fn fraction(&self) -> f64 {
    self.fraction
  }

  pub fn zero_locus(&self) -> ZeroLocus {
    self.zero_locus
  }

  /// `mean(locus) * fraction`, or `None` for an empty map.
  pub fn threshold(&self, locus: &LocusSizes) -> Option<f64> {
    locus.mean().map(|avg| avg * self.fraction)
  }

  /// Seeds recorded in `locus` below the threshold.
  pub fn select_recorded(&self, locus: &LocusSizes) -> BTreeSet<SeedId> {
    match self.threshold(locus) {
      Some(threshold) => locus.iter()
        .filter(|&(_, count)| (count as f64) < threshold)
        .map(|(seed, _)| seed)
        .collect(),
      None => BTreeSet::new()
    }
  }

  /// Seeds of the active set to remove before the next pass.
  pub fn select(&self, seeds: &SeedSet, locus: &LocusSizes) -> BTreeSet<SeedId> {
    let below = self.select_recorded(locus);
    seeds.ids()
      .filter(|id| below.contains(id) || match self.zero_locus {
        ZeroLocus::Retain => false,
        ZeroLocus::Prune => !locus.contains(*id),
      })
      .collect()
  }
}

/// Seeds of `locus` whose count is below `mean * fraction`.
///
/// Seeds absent from `locus` are never selected.
pub fn prune(locus: &LocusSizes, fraction: f64) -> Result<BTreeSet<SeedId>> {
  Ok(Pruning::new(fraction)?.select_recorded(locus))
}
