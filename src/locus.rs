use {
  crate::seeds::SeedId,
  std::collections::{HashMap, hash_map}
};

/// Number of pixels assigned to each seed during one render pass.
///
/// Every tile of a pass counts into its own instance, the scheduler sums them up at the join,
/// so no counter is ever shared between workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocusSizes {
  counts: HashMap<SeedId, u64>,
}

impl LocusSizes {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn increment(&mut self, seed: SeedId) {
    *self.counts.entry(seed).or_insert(0) += 1;
  }

  pub fn add(&mut self, seed: SeedId, count: u64) {
    if count > 0 {
      *self.counts.entry(seed).or_insert(0) += count;
    }
  }

  /// Sum of two count maps.
  pub fn merge(self, other: Self) -> Self {
    // fold the smaller map into the larger one
    let (mut into, from) = if self.counts.len() >= other.counts.len() {
      (self, other)
    } else {
      (other, self)
    };
    from.counts.into_iter().for_each(|(seed, count)| into.add(seed, count));
    into
  }

  /// Pixel count of `seed`, zero when it received no pixel.
  pub fn get(&self, seed: SeedId) -> u64 {
    self.counts.get(&seed).copied().unwrap_or(0)
  }

  pub fn contains(&self, seed: SeedId) -> bool {
    self.counts.contains_key(&seed)
  }

  /// Total number of assigned pixels.
  pub fn total(&self) -> u64 {
    self.counts.values().sum()
  }

  /// Mean over seeds with a recorded count. `None` when the map is empty.
  pub fn mean(&self) -> Option<f64> {
    (!self.counts.is_empty())
      .then(|| self.total() as f64 / self.counts.len() as f64)
  }

  pub fn len(&self) -> usize {
    self.counts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (SeedId, u64)> + '_ {
    self.counts.iter().map(|(&seed, &count)| (seed, count))
  }
}

impl FromIterator<(SeedId, u64)> for LocusSizes {
  fn from_iter<I: IntoIterator<Item = (SeedId, u64)>>(iter: I) -> Self {
    let mut locus = LocusSizes::new();
    iter.into_iter().for_each(|(seed, count)| locus.add(seed, count));
    locus
  }
}

impl IntoIterator for LocusSizes {
  type Item = (SeedId, u64);
  type IntoIter = hash_map::IntoIter<SeedId, u64>;

  fn into_iter(self) -> Self::IntoIter {
    self.counts.into_iter()
  }
}
