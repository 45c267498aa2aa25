//! Presentation helpers: colour each locus and export the canvas as an image.
//! Colours are cosmetic and play no part in the render pass.

use {
  crate::{
    raster::{Cell, PixelBuffer, Render},
    seeds::{Seed, SeedId}
  },
  anyhow::{Context, Result},
  image::{Rgba, RgbaImage},
  rand::prelude::*,
  rayon::prelude::*,
  std::{collections::HashMap, path::Path}
};

pub trait Draw<Backend> {
  fn draw(&self, image: &mut Backend);
}

/// One colour per seed.
#[derive(Debug, Clone)]
pub struct Palette {
  colors: HashMap<SeedId, Rgba<u8>>,
  pub background: Rgba<u8>,
}

impl Palette {
  /// Random opaque colours, reproducible for the same `rng_seed`.
  pub fn random(seeds: &[Seed], rng_seed: u64) -> Self {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(rng_seed);
    let colors = seeds.iter()
      .map(|seed| (seed.id, Rgba([rng.gen_range(48..=255), rng.gen_range(48..=255), rng.gen_range(48..=255), 255])))
      .collect();
    Self { colors, background: Rgba([255, 255, 255, 255]) }
  }

  pub fn color(&self, cell: Cell) -> Rgba<u8> {
    cell.and_then(|id| self.colors.get(&id).copied())
      .unwrap_or(self.background)
  }
}

/// Pixel buffer coloured through a palette.
pub struct Cells<'a> {
  pub pixels: &'a PixelBuffer,
  pub palette: &'a Palette,
}

impl Draw<RgbaImage> for Cells<'_> {
  fn draw(&self, image: &mut RgbaImage) {
    let width = self.pixels.width() as usize;
    if image.dimensions() != (self.pixels.width(), self.pixels.height()) {
      *image = RgbaImage::new(self.pixels.width(), self.pixels.height());
    }
    if width == 0 {
      return;
    }
    let raw: &mut [u8] = image;
    raw.par_chunks_mut(width * 4)
      .zip(self.pixels.cells().par_chunks(width))
      .for_each(|(out, row)| out.chunks_mut(4)
        .zip(row)
        .for_each(|(px, &cell)| px.copy_from_slice(&self.palette.color(cell).0))
      );
  }
}

/// Seed markers, 3×3 squares.
pub struct Sites<'a> {
  pub seeds: &'a [Seed],
  pub color: Rgba<u8>,
}

impl Draw<RgbaImage> for Sites<'_> {
  fn draw(&self, image: &mut RgbaImage) {
    let (w, h) = (image.width() as i64, image.height() as i64);
    for seed in self.seeds {
      let (cx, cy) = (seed.point.x.round() as i64, seed.point.y.round() as i64);
      itertools::iproduct!(cy - 1..=cy + 1, cx - 1..=cx + 1)
        .filter(|&(y, x)| (0..w).contains(&x) && (0..h).contains(&y))
        .for_each(|(y, x)| image.put_pixel(x as u32, y as u32, self.color));
    }
  }
}

/// Coloured diagram with seed markers.
pub fn to_image(render: &Render, seeds: &[Seed], palette: &Palette) -> RgbaImage {
  let mut image = RgbaImage::new(render.pixels.width(), render.pixels.height());
  Cells { pixels: &render.pixels, palette }.draw(&mut image);
  Sites { seeds, color: Rgba([0, 0, 0, 255]) }.draw(&mut image);
  image
}

pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  image.save(path)
    .with_context(|| format!("failed to write {}", path.display()))
}
