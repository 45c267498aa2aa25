use {
  crate::{
    geometry::{Canvas, PixelSpace},
    seeds::SeedId
  },
  euclid::Point2D
};

/// A pixel: the seed it was assigned to, or `None` for background.
pub type Cell = Option<SeedId>;

/// Row-major pixel assignment of a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
  size: Canvas,
  cells: Vec<Cell>,
}

impl PixelBuffer {
  /// Fully unassigned buffer.
  pub fn new(size: Canvas) -> Self {
    Self {
      size,
      cells: vec![None; size.width as usize * size.height as usize]
    }
  }

  pub fn size(&self) -> Canvas {
    self.size
  }

  pub fn width(&self) -> u32 {
    self.size.width
  }

  pub fn height(&self) -> u32 {
    self.size.height
  }

  /// Panics if `(x, y)` is outside of the canvas.
  pub fn get(&self, x: u32, y: u32) -> Cell {
    assert!(x < self.size.width && y < self.size.height, "pixel ({x}, {y}) out of bounds");
    self.cells[y as usize * self.size.width as usize + x as usize]
  }

  pub fn cells(&self) -> &[Cell] {
    &self.cells
  }

  pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
    &mut self.cells
  }

  pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
    self.cells.chunks(self.size.width.max(1) as usize)
  }

  pub fn pixels(&self) -> impl Iterator<Item = (Point2D<u32, PixelSpace>, Cell)> + '_ {
    let width = self.size.width.max(1) as usize;
    self.cells.iter().enumerate().map(move |(i, &cell)| (
      Point2D::new((i % width) as u32, (i / width) as u32),
      cell
    ))
  }

  /// Number of background pixels.
  pub fn unassigned(&self) -> usize {
    self.cells.iter().filter(|cell| cell.is_none()).count()
  }
}
