use {
  super::{buffer::Cell, query::NearestSeed},
  crate::{
    geometry::{Tile, sample_point},
    locus::LocusSizes
  },
  euclid::Point2D
};

/// Mutable rows of one tile, borrowed from the shared pixel buffer.
/// `rows[i]` holds pixels `tile.min.x .. tile.max.x` of canvas row `tile.min.y + i`.
pub(crate) struct TileView<'a> {
  pub tile: Tile,
  pub rows: Vec<&'a mut [Cell]>,
}

/// Split a row-major buffer into disjoint per-tile views.
///
/// `tiles` must exactly cover the `width`-wide buffer without overlap.
pub(crate) fn split_tiles<'a>(cells: &'a mut [Cell], width: u32, tiles: &[Tile]) -> Vec<TileView<'a>> {
  let mut views = tiles.iter()
    .map(|&tile| TileView { tile, rows: Vec::with_capacity(tile.height() as usize) })
    .collect::<Vec<_>>();
  let mut by_x = (0..tiles.len()).collect::<Vec<_>>();
  by_x.sort_by_key(|&i| tiles[i].min.x);

  for (y, mut row) in cells.chunks_mut(width as usize).enumerate() {
    let y = y as u32;
    for &i in by_x.iter().filter(|&&i| tiles[i].y_range().contains(&y)) {
      debug_assert_eq!(
        width as usize - row.len(), tiles[i].min.x as usize,
        "tiles do not cover row {y}"
      );
      let (segment, rest) = std::mem::take(&mut row).split_at_mut(tiles[i].width() as usize);
      views[i].rows.push(segment);
      row = rest;
    }
  }
  views
}

/// Assign every pixel of the tile to its nearest seed and count the tile's locus sizes.
/// Pixels without a candidate stay untouched.
pub(crate) fn process_region(view: TileView, query: &impl NearestSeed) -> LocusSizes {
  let TileView { tile, rows } = view;
  let mut locus = LocusSizes::new();

  for (y, row) in tile.y_range().zip(rows) {
    for (x, cell) in tile.x_range().zip(row.iter_mut()) {
      if let Some(seed) = query.nearest(sample_point(Point2D::new(x, y))) {
        *cell = Some(seed);
        locus.increment(seed);
      }
    }
  }

  tracing::trace!(
    x = tile.min.x, y = tile.min.y, w = tile.width(), h = tile.height(),
    seeds = locus.len(), "tile done"
  );
  locus
}
