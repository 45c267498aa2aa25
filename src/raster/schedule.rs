use {
  super::{
    buffer::PixelBuffer,
    query::NearestSeed,
    region::{process_region, split_tiles}
  },
  crate::{
    geometry::Tile,
    locus::LocusSizes
  },
  rayon::prelude::*
};

/// How a pass is spread over threads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Schedule {
  /// One tile covering the whole canvas, processed on the calling thread.
  #[default]
  Single,
  /// One task per tile, tile count equal to the size of the rayon pool.
  Parallel,
  /// One task per tile with an explicit part count.
  Tiles(usize),
}

impl Schedule {
  /// Requested part count, `None` for single-threaded passes.
  pub fn part_count(self) -> Option<usize> {
    match self {
      Schedule::Single => None,
      Schedule::Parallel => Some(rayon::current_num_threads().max(1)),
      Schedule::Tiles(n) => Some(n),
    }
  }
}

/// Process one region synchronously on the calling thread.
pub(crate) fn run_single<Q: NearestSeed>(
  pixels: &mut PixelBuffer,
  tile: Tile,
  query: impl Fn(Tile) -> Q
) -> LocusSizes {
  let width = pixels.width();
  split_tiles(pixels.cells_mut(), width, &[tile])
    .into_iter()
    .map(|view| {
      let query = query(view.tile);
      process_region(view, &query)
    })
    .fold(LocusSizes::new(), LocusSizes::merge)
}

/// Process every tile as a separate task on the rayon pool and block until all are done.
///
/// Each task owns the rows of its tile and counts into its own map; the maps are summed
/// when the tasks join.
pub(crate) fn run_parallel<Q: NearestSeed>(
  pixels: &mut PixelBuffer,
  tiles: &[Tile],
  query: impl Fn(Tile) -> Q + Sync
) -> LocusSizes {
  let width = pixels.width();
  split_tiles(pixels.cells_mut(), width, tiles)
    .into_par_iter()
    .map(|view| {
      let query = query(view.tile);
      process_region(view, &query)
    })
    .reduce(LocusSizes::new, LocusSizes::merge)
}
