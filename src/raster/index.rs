use {
  super::query::NearestSeed,
  crate::{
    geometry::{Canvas, Point},
    metric::Metric,
    seeds::{Seed, SeedId}
  },
  euclid::{Box2D, Point2D}
};

/// Uniform grid over the seeds, giving exact nearest-seed queries independent of tile geometry.
///
/// The grid spans the canvas and the seeds near it, with roughly one seed per cell and at most a
/// few cells per seed. Seeds farther than one canvas extent from the canvas are kept apart and
/// compared on every query. A query scans rings of cells around the sample point and stops once
/// the best distance is strictly below the Chebyshev distance to the unexplored area. All
/// supported metrics are bounded below by Chebyshev, so the answer equals a linear scan of every
/// seed, tie-break included.
#[derive(Debug, Clone)]
pub struct GridIndex<'a> {
  seeds: &'a [Seed],
  metric: Metric,
  origin: Point,
  cell_size: f64,
  cols: usize,
  rows: usize,
  /// seed indices per cell, ascending
  buckets: Vec<Vec<usize>>,
  /// seeds outside of the grid, ascending
  outliers: Vec<usize>,
}

/// Upper bound on cells per seed.
const CELLS_PER_SEED: f64 = 4.0;

impl<'a> GridIndex<'a> {
  pub fn new(seeds: &'a [Seed], canvas: Canvas, metric: Metric) -> Self {
    let canvas_box = Box2D::from_size(canvas.to_f64());
    let margin = canvas.width.max(canvas.height) as f64;
    let limit = canvas_box.inflate(margin, margin);
    let near = |p: Point| (limit.min.x..=limit.max.x).contains(&p.x) && (limit.min.y..=limit.max.y).contains(&p.y);

    let (inside, outliers): (Vec<usize>, Vec<usize>) = (0..seeds.len())
      .partition(|&i| near(seeds[i].point));
    let bounds = inside.iter()
      .map(|&i| seeds[i].point)
      .fold(canvas_box, |bounds, p| Box2D::new(bounds.min.min(p), bounds.max.max(p)));

    let size = bounds.size();
    let count = inside.len().max(1) as f64;
    let cell_size = (size.width * size.height / count).sqrt()
      .max(size.width.max(size.height) / (CELLS_PER_SEED * count).sqrt())
      .max(1.0);
    let cols = ((size.width / cell_size).ceil() as usize).max(1);
    let rows = ((size.height / cell_size).ceil() as usize).max(1);

    let mut index = Self {
      seeds,
      metric,
      origin: bounds.min,
      cell_size,
      cols,
      rows,
      buckets: vec![vec![]; cols * rows],
      outliers
    };
    for i in inside {
      let (cx, cy) = index.cell_of(seeds[i].point);
      index.buckets[cy * cols + cx].push(i);
    }
    if !index.outliers.is_empty() {
      tracing::debug!(outliers = index.outliers.len(), "seeds far outside of the canvas");
    }
    index
  }

  pub fn dimensions(&self) -> (usize, usize) {
    (self.cols, self.rows)
  }

  fn cell_of(&self, p: Point) -> (usize, usize) {
    let c = ((p - self.origin) / self.cell_size).floor();
    (
      (c.x.max(0.0) as usize).min(self.cols - 1),
      (c.y.max(0.0) as usize).min(self.rows - 1)
    )
  }

  fn visit_cell(&self, x: usize, y: usize, p: Point, best: &mut Option<(f64, usize)>) {
    self.visit(&self.buckets[y * self.cols + x], p, best)
  }

  fn visit(&self, indices: &[usize], p: Point, best: &mut Option<(f64, usize)>) {
    for &i in indices {
      let d = self.metric.distance(p, self.seeds[i].point);
      let better = match *best {
        None => true,
        Some((best_d, best_i)) => d < best_d || (d == best_d && i < best_i)
      };
      if better {
        *best = Some((d, i));
      }
    }
  }

  /// Chebyshev distance from `p` to anything outside the block of cells `[min, max]`.
  fn unexplored_bound(&self, p: Point, min: Point2D<usize, ()>, max: Point2D<usize, ()>) -> f64 {
    let edge = |cell: usize, origin: f64| origin + cell as f64 * self.cell_size;
    // slack absorbs rounding in cell_of
    let slack = self.cell_size * 1e-9;
    [
      (min.x > 0).then(|| p.x - edge(min.x, self.origin.x)),
      (max.x + 1 < self.cols).then(|| edge(max.x + 1, self.origin.x) - p.x),
      (min.y > 0).then(|| p.y - edge(min.y, self.origin.y)),
      (max.y + 1 < self.rows).then(|| edge(max.y + 1, self.origin.y) - p.y),
    ].into_iter()
      .flatten()
      .fold(f64::INFINITY, f64::min) - slack
  }
}

impl NearestSeed for GridIndex<'_> {
  fn nearest(&self, p: Point) -> Option<SeedId> {
    if self.seeds.is_empty() {
      return None;
    }
    let (cx, cy) = self.cell_of(p);
    let mut best = None;
    self.visit(&self.outliers, p, &mut best);

    for r in 0.. {
      let min = Point2D::new(cx.saturating_sub(r), cy.saturating_sub(r));
      let max = Point2D::new((cx + r).min(self.cols - 1), (cy + r).min(self.rows - 1));

      for y in min.y..=max.y {
        let on_ring_row = y + r == cy || y == cy + r;
        if on_ring_row {
          (min.x..=max.x).for_each(|x| self.visit_cell(x, y, p, &mut best));
        } else {
          if cx >= r { self.visit_cell(cx - r, y, p, &mut best); }
          if cx + r < self.cols { self.visit_cell(cx + r, y, p, &mut best); }
        }
      }

      let exhausted = min.x == 0 && min.y == 0 && max.x + 1 == self.cols && max.y + 1 == self.rows;
      match best {
        _ if exhausted => break,
        Some((d, _)) if d < self.unexplored_bound(p, min, max) => break,
        _ => {}
      }
    }

    best.map(|(_, i)| self.seeds[i].id)
  }
}
