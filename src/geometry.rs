//! .
//!
//! The origin of coordinate system is in top-left corner. Seeds live in continuous pixel
//! coordinates, pixel `(x, y)` is sampled at the point `(x, y)`.

use euclid::{Box2D, Point2D, Size2D};

/// Pixel coordinate basis
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PixelSpace;

pub type Point = Point2D<f64, PixelSpace>;
/// Half-open block of pixels `[min, max)`.
pub type Tile = Box2D<u32, PixelSpace>;
pub type Canvas = Size2D<u32, PixelSpace>;

/// Tile covering the whole canvas.
pub fn full_tile(canvas: Canvas) -> Tile {
  Box2D::from_size(canvas)
}

#[inline]
pub fn sample_point(pixel: Point2D<u32, PixelSpace>) -> Point {
  pixel.to_f64()
}

/// Euclidean length of the tile diagonal.
pub fn diagonal(tile: Tile) -> f64 {
  tile.size().to_f64().to_vector().length()
}

/// Closest point to `point` on the closed rectangle spanned by `tile`.
pub fn clamp_to_tile(point: Point, tile: Tile) -> Point {
  let bounds = tile.to_f64();
  point.clamp(bounds.min, bounds.max)
}

/// Whether `point` lies inside the half-open tile rectangle.
pub fn tile_contains(tile: Tile, point: Point) -> bool {
  tile.to_f64().contains(point)
}

/// Number of pixels in the tile.
pub fn tile_area(tile: Tile) -> usize {
  tile.width() as usize * tile.height() as usize
}
