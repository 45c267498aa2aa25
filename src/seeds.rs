use {
  crate::{
    error::{Error, Result},
    geometry::Point
  },
  std::collections::BTreeSet
};

/// Stable identity of a seed, decoupled from its coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeedId(pub u64);

/// Generator point of one Voronoi cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Seed {
  pub id: SeedId,
  pub point: Point,
}

/// Ordered, caller-owned collection of seeds.
///
/// Insertion order is the canonical order used for tie-breaking. Identifiers are never reused
/// within one set, so two seeds at the same coordinates stay distinguishable.
#[derive(Debug, Clone, Default)]
pub struct SeedSet {
  seeds: Vec<Seed>,
  next_id: u64,
}

impl SeedSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_points(points: impl IntoIterator<Item = Point>) -> Result<Self> {
    let mut set = Self::new();
    for point in points {
      set.push(point)?;
    }
    Ok(set)
  }

  /// Append a seed at the end of the canonical order.
  pub fn push(&mut self, point: Point) -> Result<SeedId> {
    if !(point.x.is_finite() && point.y.is_finite()) {
      return Err(Error::invalid(format!("seed coordinates must be finite, got {point:?}")));
    }
    let id = SeedId(self.next_id);
    self.next_id += 1;
    self.seeds.push(Seed { id, point });
    Ok(id)
  }

  pub fn get(&self, id: SeedId) -> Option<&Seed> {
    self.seeds.iter().find(|seed| seed.id == id)
  }

  pub fn remove(&mut self, id: SeedId) -> Option<Seed> {
    let index = self.seeds.iter().position(|seed| seed.id == id)?;
    Some(self.seeds.remove(index))
  }

  pub fn retain(&mut self, f: impl FnMut(&Seed) -> bool) {
    self.seeds.retain(f)
  }

  /// Remove every seed selected by a pruning pass. Returns the number of removed seeds.
  pub fn apply_pruning(&mut self, selected: &BTreeSet<SeedId>) -> usize {
    let before = self.seeds.len();
    self.seeds.retain(|seed| !selected.contains(&seed.id));
    before - self.seeds.len()
  }

  pub fn clear(&mut self) {
    self.seeds.clear()
  }

  pub fn len(&self) -> usize {
    self.seeds.len()
  }

  pub fn is_empty(&self) -> bool {
    self.seeds.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Seed> {
    self.seeds.iter()
  }

  pub fn as_slice(&self) -> &[Seed] {
    &self.seeds
  }

  pub fn ids(&self) -> impl Iterator<Item = SeedId> + '_ {
    self.seeds.iter().map(|seed| seed.id)
  }
}

#[cfg(feature = "random")]
#[cfg_attr(docsrs, doc(cfg(feature = "random")))]
impl SeedSet {
  /// Replace the content with `count` seeds drawn uniformly over the canvas.
  pub fn scatter(&mut self, count: usize, canvas: crate::geometry::Canvas, rng: &mut impl rand::Rng) {
    self.seeds.clear();
    self.seeds.reserve(count);
    let (w, h) = (canvas.width.max(1) as f64, canvas.height.max(1) as f64);
    for _ in 0..count {
      let point = Point::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h));
      let id = SeedId(self.next_id);
      self.next_id += 1;
      self.seeds.push(Seed { id, point });
    }
  }
}

impl<'a> IntoIterator for &'a SeedSet {
  type Item = &'a Seed;
  type IntoIter = std::slice::Iter<'a, Seed>;

  fn into_iter(self) -> Self::IntoIter {
    self.seeds.iter()
  }
}
