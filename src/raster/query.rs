use {
  crate::{
    geometry::{Point, Tile, clamp_to_tile, diagonal, tile_contains},
    metric::Metric,
    seeds::{Seed, SeedId}
  },
  std::borrow::Cow
};

/// Nearest-seed lookup for a single sample point.
pub trait NearestSeed {
  /// Metric-nearest candidate, ties resolved in favour of the earliest seed in canonical order.
  fn nearest(&self, point: Point) -> Option<SeedId>;
}

impl<T: NearestSeed + ?Sized> NearestSeed for &T {
  fn nearest(&self, point: Point) -> Option<SeedId> {
    (**self).nearest(point)
  }
}

/// Linear scan of `candidates`; first encountered wins on equal distance.
pub fn nearest_seed(point: Point, candidates: &[Seed], metric: Metric) -> Option<&Seed> {
  candidates.iter()
    .fold(None, |best: Option<(&Seed, f64)>, seed| {
      let d = metric.distance(point, seed.point);
      match best {
        Some((_, best_d)) if d >= best_d => best,
        _ => Some((seed, d))
      }
    })
    .map(|(seed, _)| seed)
}

/// Seeds considered for pixels of `tile` by the culling heuristic.
///
/// A seed is kept if it lies in the tile, or if the metric distance to its clamped point on the
/// tile rectangle does not exceed twice the tile diagonal. Not a correctness bound: the true
/// nearest seed of a pixel may be dropped when seeds are sparse relative to the tile size.
pub fn relevant_seeds(seeds: &[Seed], tile: Tile, metric: Metric) -> Vec<Seed> {
  let max_dist = 2.0 * diagonal(tile);
  seeds.iter()
    .filter(|seed|
      tile_contains(tile, seed.point) ||
      metric.distance(seed.point, clamp_to_tile(seed.point, tile)) <= max_dist
    )
    .copied()
    .collect()
}

/// Linear scan over a candidate list, either every seed or the culled subset of a tile.
#[derive(Debug, Clone)]
pub struct Scan<'a> {
  candidates: Cow<'a, [Seed]>,
  metric: Metric,
}

impl<'a> Scan<'a> {
  pub fn all(seeds: &'a [Seed], metric: Metric) -> Self {
    Self { candidates: Cow::Borrowed(seeds), metric }
  }

  pub fn culled(seeds: &[Seed], tile: Tile, metric: Metric) -> Self {
    Self { candidates: Cow::Owned(relevant_seeds(seeds, tile, metric)), metric }
  }

  pub fn candidates(&self) -> &[Seed] {
    &self.candidates
  }
}

impl NearestSeed for Scan<'_> {
  #[inline]
  fn nearest(&self, point: Point) -> Option<SeedId> {
    nearest_seed(point, &self.candidates, self.metric).map(|seed| seed.id)
  }
}
