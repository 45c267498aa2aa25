//! Brute-force Voronoi rasterization in ℝ².
//!
//! Every pixel of a canvas is assigned to its nearest seed under one of three metrics, and the
//! number of pixels of each seed (its *locus size*) is recorded. Seeds with a disproportionately
//! small locus can then be pruned and the diagram rendered again.
//!
//! The crate is split into [`raster`] for the render pass itself, [`prune`] for the pruning
//! policy, and a few leaf modules: [`metric`], [`partition`], [`seeds`], [`locus`].
//! Displaying the result is left to the caller, [`drawing`] offers a simple PNG
//! export (requires `drawing` feature).
//!
//! # Basic usage
//! ```
//! # use voronoi_raster::{
//! #   error::Result,
//! #   geometry::{Canvas, Point},
//! #   metric::Metric,
//! #   prune::Pruning,
//! #   raster::{Renderer, RenderConfig, Schedule, Search},
//! #   seeds::SeedSet,
//! # };
//! # fn main() -> Result<()> {
//! let mut seeds = SeedSet::from_points([
//!   Point::new(10.0, 10.0),
//!   Point::new(50.0, 20.0),
//!   Point::new(52.0, 21.0),
//!   Point::new(30.0, 50.0),
//! ])?;
//! let canvas = Canvas::new(64, 64);
//! let config = RenderConfig::new()
//!   .with_metric(Metric::Manhattan)
//!   .with_schedule(Schedule::Parallel)
//!   .with_search(Search::GridIndex);
//!
//! let renderer = Renderer::new();
//! let pass = renderer.render(seeds.as_slice(), canvas, &config)?;
//! assert_eq!(pass.locus_sizes.total(), 64 * 64);
//!
//! // drop seeds whose locus is below half of the average, then render again
//! let selected = Pruning::new(0.5)?.select(&seeds, &pass.locus_sizes);
//! seeds.apply_pruning(&selected);
//! let pass = renderer.render(seeds.as_slice(), canvas, &config)?;
//! # let _ = pass;
//! #   Ok(())
//! # }
//! ```
//!
//! # On tiles and determinism
//! The canvas is split into a near-square grid of tiles, one rayon task per tile. Each task
//! owns the rows of its tile and counts into its own [`LocusSizes`](locus::LocusSizes), which
//! are summed once all tasks have joined. The outcome does not depend on completion order.
//!
//! With the default [`Search::TileCulling`](raster::Search::TileCulling), seeds far from a tile
//! are skipped for that tile. This is a heuristic: with sparse seeds and small tiles, a parallel
//! pass may differ from a single-threaded one, or leave pixels unassigned.
//! [`Search::GridIndex`](raster::Search::GridIndex) is exact and usually faster.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod geometry;
pub mod metric;
pub mod partition;
pub mod seeds;
pub mod locus;
pub mod prune;
pub mod raster;
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub mod drawing;

/// Time an expression and report it through `tracing`.
#[macro_export]
macro_rules! profile(
  ($title: literal, $body: expr) => {{
    let t0 = std::time::Instant::now();
    let ret = $body;
    $crate::tracing::info!(elapsed_ms = t0.elapsed().as_millis() as u64, "{} profile", $title);
    ret
  }}
);

#[doc(hidden)]
pub use tracing;

#[cfg(test)] mod tests;
