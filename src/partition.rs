use {
  crate::{
    error::{Error, Result},
    geometry::{Canvas, Tile, full_tile}
  },
  euclid::Point2D,
  itertools::iproduct
};

/// Grid dimensions `(columns, rows)` used for `part_count` parts:
/// `floor(sqrt(part_count))` columns and as many rows as needed to hold every part.
pub fn grid_shape(part_count: usize) -> (usize, usize) {
  let cols = integer_sqrt(part_count).max(1);
  (cols, part_count.saturating_sub(1) / cols + 1)
}

fn integer_sqrt(n: usize) -> usize {
  let mut root = (n as f64).sqrt() as usize;
  // float sqrt may be off by one for large counts
  while root.checked_mul(root).map_or(true, |sq| sq > n) { root -= 1; }
  while (root + 1).checked_mul(root + 1).map_or(false, |sq| sq <= n) { root += 1; }
  root
}

/// Split the canvas into a near-square grid of disjoint tiles that cover it exactly.
///
/// Tiles are returned in row-major order. The last column and the last row absorb the
/// division remainder. Tiles that end up empty (canvas narrower than the grid) are skipped.
pub fn partition(canvas: Canvas, part_count: usize) -> Result<Vec<Tile>> {
  if part_count == 0 {
    return Err(Error::invalid("part count must be positive"));
  }
  if canvas.width == 0 || canvas.height == 0 {
    return Err(Error::invalid(format!(
      "canvas must be non-empty, got {}x{}", canvas.width, canvas.height
    )));
  }
  if part_count == 1 {
    return Ok(vec![full_tile(canvas)]);
  }

  let (cols, rows) = grid_shape(part_count);
  let (columns, col_bounds) = spans(cols, canvas.width);
  let (rows, row_bounds) = spans(rows, canvas.height);

  Ok(iproduct!(rows, columns)
    .map(|(row, col)| {
      let (x0, x1) = col_bounds(col);
      let (y0, y1) = row_bounds(row);
      Tile::new(Point2D::new(x0, y0), Point2D::new(x1, y1))
    })
    .filter(|tile| !tile.is_empty())
    .collect())
}

/// Split `total` pixels into `n` spans, the last one absorbing the remainder.
/// Returns the indices of the non-empty spans and the bounds of span `i`.
fn spans(n: usize, total: u32) -> (std::ops::Range<usize>, impl Fn(usize) -> (u32, u32)) {
  let step = (total as usize / n) as u32;
  // with more spans than pixels only the last one is non-empty
  let non_empty = if step == 0 { n - 1..n } else { 0..n };
  let bounds = move |i: usize| {
    let start = i as u32 * step;
    (start, if i + 1 == n { total } else { start + step })
  };
  (non_empty, bounds)
}
