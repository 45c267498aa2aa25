//! Per-pixel nearest-seed rasterization.
//!
//! A pass assigns every pixel of the canvas to its nearest seed under the selected [`Metric`],
//! counting the pixels of each seed along the way. The canvas is split into tiles, processed
//! either on the calling thread or as one rayon task per tile.

use {
  crate::{
    error::{Error, Result},
    geometry::{Canvas, Tile, full_tile, tile_area},
    locus::LocusSizes,
    metric::Metric,
    partition::partition,
    seeds::Seed
  },
  std::sync::atomic::{AtomicBool, Ordering}
};

mod buffer;
mod index;
mod query;
mod region;
mod schedule;

pub use {
  buffer::{Cell, PixelBuffer},
  index::GridIndex,
  query::{NearestSeed, Scan, nearest_seed, relevant_seeds},
  schedule::Schedule
};

/// Nearest-seed search strategy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Search {
  /// Per-tile culling: seeds farther than twice the tile diagonal from the tile are skipped.
  /// Fast, but may miss the true nearest seed when seeds are sparse relative to the tiles.
  #[default]
  TileCulling,
  /// Every pixel scans every seed.
  Exhaustive,
  /// Exact lookup through a [`GridIndex`] built once per pass.
  GridIndex,
}

/// Parameters of a render pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RenderConfig {
  pub metric: Metric,
  pub schedule: Schedule,
  pub search: Search,
}

impl RenderConfig {
  pub fn new() -> Self {
    Self::default()
  }
  pub fn with_metric(mut self, metric: Metric) -> Self {
    self.metric = metric;
    self
  }
  pub fn with_schedule(mut self, schedule: Schedule) -> Self {
    self.schedule = schedule;
    self
  }
  pub fn with_search(mut self, search: Search) -> Self {
    self.search = search;
    self
  }
}

/// Result of a completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Render {
  pub pixels: PixelBuffer,
  pub locus_sizes: LocusSizes,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
  Idle,
  Rendering,
}

/// Runs render passes, one at a time.
///
/// A pass always runs to completion. Requesting a pass while another one is in flight on the
/// same renderer fails with [`Error::Busy`].
#[derive(Debug, Default)]
pub struct Renderer {
  rendering: AtomicBool,
}

/// Returns the renderer to `Idle` when the pass ends, unwinding included.
struct PassGuard<'a>(&'a AtomicBool);

impl Drop for PassGuard<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

impl Renderer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> State {
    match self.rendering.load(Ordering::Acquire) {
      true => State::Rendering,
      false => State::Idle,
    }
  }

  pub fn render(&self, seeds: &[Seed], canvas: Canvas, config: &RenderConfig) -> Result<Render> {
    validate(seeds, canvas, config)?;
    let _guard = self.rendering
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .map(|_| PassGuard(&self.rendering))
      .map_err(|_| Error::Busy)?;
    render_pass(seeds, canvas, config)
  }
}

/// Single pass without a [`Renderer`].
pub fn render(seeds: &[Seed], canvas: Canvas, config: &RenderConfig) -> Result<Render> {
  validate(seeds, canvas, config)?;
  render_pass(seeds, canvas, config)
}

fn validate(seeds: &[Seed], canvas: Canvas, config: &RenderConfig) -> Result<()> {
  if canvas.width == 0 || canvas.height == 0 {
    return Err(Error::invalid(format!(
      "canvas must be non-empty, got {}x{}", canvas.width, canvas.height
    )));
  }
  if config.schedule.part_count() == Some(0) {
    return Err(Error::invalid("part count must be positive"));
  }
  if let Some(seed) = seeds.iter().find(|s| !(s.point.x.is_finite() && s.point.y.is_finite())) {
    return Err(Error::invalid(format!("seed {:?} has non-finite coordinates", seed.id)));
  }
  Ok(())
}

fn render_pass(seeds: &[Seed], canvas: Canvas, config: &RenderConfig) -> Result<Render> {
  let mut pixels = PixelBuffer::new(canvas);
  if seeds.is_empty() {
    return Ok(Render { pixels, locus_sizes: LocusSizes::new() });
  }

  let tiles = match config.schedule.part_count() {
    None => vec![full_tile(canvas)],
    Some(parts) => partition(canvas, parts)?,
  };
  tracing::debug!(
    seeds = seeds.len(), tiles = tiles.len(),
    metric = %config.metric, search = ?config.search, schedule = ?config.schedule,
    "render pass"
  );

  let (metric, mode) = (config.metric, config.schedule);
  let locus_sizes = match config.search {
    Search::TileCulling =>
      dispatch(&mut pixels, &tiles, mode, |tile| Scan::culled(seeds, tile, metric)),
    Search::Exhaustive =>
      dispatch(&mut pixels, &tiles, mode, |_| Scan::all(seeds, metric)),
    Search::GridIndex => {
      let index = &GridIndex::new(seeds, canvas, metric);
      dispatch(&mut pixels, &tiles, mode, move |_| index)
    }
  };

  let unassigned = tile_area(full_tile(canvas)) as u64 - locus_sizes.total();
  if unassigned > 0 {
    tracing::warn!(unassigned, "pass left pixels without a seed");
  }
  Ok(Render { pixels, locus_sizes })
}

fn dispatch<Q: NearestSeed>(
  pixels: &mut PixelBuffer,
  tiles: &[Tile],
  mode: Schedule,
  query: impl Fn(Tile) -> Q + Sync
) -> LocusSizes {
  match mode {
    Schedule::Single => schedule::run_single(pixels, tiles[0], query),
    Schedule::Parallel | Schedule::Tiles(_) => schedule::run_parallel(pixels, tiles, query),
  }
}
