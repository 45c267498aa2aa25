use {
  crate::{
    error::Error,
    geometry::{Canvas, Point, Tile, full_tile, tile_area},
    locus::LocusSizes,
    metric::Metric,
    partition::{grid_shape, partition},
    prune::{Pruning, ZeroLocus, prune},
    seeds::{SeedId, SeedSet}
  },
  anyhow::Result,
  euclid::Point2D,
  proptest::prelude::*,
  std::collections::BTreeSet
};

fn tile(x0: u32, y0: u32, x1: u32, y1: u32) -> Tile {
  Tile::new(Point2D::new(x0, y0), Point2D::new(x1, y1))
}

#[test] fn metric_unit_values() {
  let (a, b) = (Point::new(0.0, 0.0), Point::new(3.0, 4.0));
  assert_eq!(Metric::Euclidean.distance(a, b), 5.0);
  assert_eq!(Metric::Manhattan.distance(a, b), 7.0);
  assert_eq!(Metric::Chebyshev.distance(a, b), 4.0);
}

#[test] fn metric_symmetric_and_zero() {
  let points = [
    Point::new(0.0, 0.0), Point::new(-2.5, 7.0), Point::new(13.0, -1.25), Point::new(1e6, 3.0)
  ];
  for metric in Metric::ALL {
    for &a in &points {
      assert_eq!(metric.distance(a, a), 0.0);
      for &b in &points {
        let d = metric.distance(a, b);
        assert_eq!(d, metric.distance(b, a), "{metric} not symmetric");
        assert!(d >= 0.0);
        assert_eq!(d == 0.0, a == b);
      }
    }
  }
}

#[test] fn metric_parse() -> Result<()> {
  assert_eq!("euclidean".parse::<Metric>()?, Metric::Euclidean);
  assert_eq!(" Manhattan ".parse::<Metric>()?, Metric::Manhattan);
  assert_eq!("CHEBYSHEV".parse::<Metric>()?, Metric::Chebyshev);
  for metric in Metric::ALL {
    assert_eq!(metric.to_string().parse::<Metric>()?, metric);
  }
  assert!(matches!("taxicab".parse::<Metric>(), Err(Error::InvalidArgument(_))));
  Ok(())
}

#[test] fn grid_shape_near_square() {
  assert_eq!(grid_shape(1), (1, 1));
  assert_eq!(grid_shape(3), (1, 3));
  assert_eq!(grid_shape(4), (2, 2));
  assert_eq!(grid_shape(6), (2, 3));
  assert_eq!(grid_shape(8), (2, 4));
  assert_eq!(grid_shape(9), (3, 3));
  assert_eq!(grid_shape(12), (3, 4));
  assert_eq!(grid_shape(16), (4, 4));
}

#[test] fn partition_single_part_is_canvas() -> Result<()> {
  let canvas = Canvas::new(7, 5);
  assert_eq!(partition(canvas, 1)?, vec![full_tile(canvas)]);
  Ok(())
}

#[test] fn partition_remainder_goes_to_last_row_and_column() -> Result<()> {
  assert_eq!(partition(Canvas::new(10, 7), 4)?, vec![
    tile(0, 0, 5, 3), tile(5, 0, 10, 3),
    tile(0, 3, 5, 7), tile(5, 3, 10, 7),
  ]);
  assert_eq!(partition(Canvas::new(11, 10), 3)?, vec![
    tile(0, 0, 11, 3), tile(0, 3, 11, 6), tile(0, 6, 11, 10),
  ]);
  Ok(())
}

#[test] fn partition_invalid_arguments() {
  assert!(matches!(partition(Canvas::new(10, 10), 0), Err(Error::InvalidArgument(_))));
  assert!(matches!(partition(Canvas::new(0, 10), 4), Err(Error::InvalidArgument(_))));
}

#[test] fn partition_skips_empty_tiles() -> Result<()> {
  // 3 columns on a 2 pixel wide canvas
  let tiles = partition(Canvas::new(2, 9), 9)?;
  assert!(tiles.iter().all(|t| !t.is_empty()));
  assert_eq!(tiles.iter().map(|&t| tile_area(t)).sum::<usize>(), 18);
  Ok(())
}

#[test] fn partition_huge_part_count() -> Result<()> {
  let (cols, rows) = grid_shape(usize::MAX);
  assert!(cols as u128 * rows as u128 >= usize::MAX as u128);
  assert!(rows - cols <= 2);

  let canvas = Canvas::new(10, 10);
  for parts in [1_000_000_000, usize::MAX] {
    assert_eq!(partition(canvas, parts)?, vec![full_tile(canvas)]);
  }
  // more columns than pixels, few enough rows
  let tiles = partition(Canvas::new(3, 400), 10_000)?;
  assert_eq!(tiles.len(), 100);
  assert!(tiles.iter().all(|t| t.width() == 3 && t.height() == 4));
  Ok(())
}

proptest! {
  #[test]
  fn partition_covers_canvas_exactly(w in 1u32..300, h in 1u32..300, parts in 1usize..80) {
    let canvas = Canvas::new(w, h);
    let full = full_tile(canvas);
    let tiles = partition(canvas, parts).unwrap();

    prop_assert!(tiles.iter().all(|t| full.contains_box(t)));
    prop_assert_eq!(tiles.iter().map(|&t| tile_area(t)).sum::<usize>(), w as usize * h as usize);
    for (i, a) in tiles.iter().enumerate() {
      for b in &tiles[i + 1..] {
        prop_assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
      }
    }
  }
}

#[test] fn seeds_keep_identity_apart_from_position() -> Result<()> {
  let mut seeds = SeedSet::new();
  let a = seeds.push(Point::new(1.0, 1.0))?;
  let b = seeds.push(Point::new(1.0, 1.0))?;
  assert_ne!(a, b);

  seeds.remove(a);
  assert_eq!(seeds.ids().collect::<Vec<_>>(), vec![b]);
  // identifiers are never reused
  let c = seeds.push(Point::new(1.0, 1.0))?;
  assert!(c != a && c != b);
  Ok(())
}

#[test] fn seeds_reject_non_finite() {
  let mut seeds = SeedSet::new();
  assert!(matches!(seeds.push(Point::new(f64::NAN, 0.0)), Err(Error::InvalidArgument(_))));
  assert!(matches!(seeds.push(Point::new(0.0, f64::INFINITY)), Err(Error::InvalidArgument(_))));
  assert!(seeds.is_empty());
}

#[test] fn locus_increment_and_merge() {
  let (a, b, c) = (SeedId(0), SeedId(1), SeedId(2));
  let mut left = LocusSizes::new();
  (0..3).for_each(|_| left.increment(a));
  left.increment(b);
  let mut right = LocusSizes::new();
  right.increment(b);
  right.increment(c);

  let merged = left.merge(right);
  assert_eq!((merged.get(a), merged.get(b), merged.get(c)), (3, 2, 1));
  assert_eq!(merged.total(), 6);
  assert_eq!(merged.mean(), Some(2.0));
  assert_eq!(merged.get(SeedId(9)), 0);
  assert_eq!(LocusSizes::new().mean(), None);
}

fn three_seeds() -> Result<(SeedSet, [SeedId; 3], LocusSizes)> {
  let mut seeds = SeedSet::new();
  let a = seeds.push(Point::new(0.0, 0.0))?;
  let b = seeds.push(Point::new(1.0, 0.0))?;
  let c = seeds.push(Point::new(2.0, 0.0))?;
  let locus = [(a, 10), (b, 1), (c, 9)].into_iter().collect();
  Ok((seeds, [a, b, c], locus))
}

#[test] fn prune_below_fraction_of_average() -> Result<()> {
  let (_, [_, b, _], locus) = three_seeds()?;
  // avg = 6.67, threshold = 3.33
  assert_eq!(prune(&locus, 0.5)?, BTreeSet::from([b]));
  assert!(prune(&locus, 0.1)?.is_empty());
  assert_eq!(prune(&locus, 1.0)?.len(), 1);
  assert!(prune(&LocusSizes::new(), 0.5)?.is_empty());
  Ok(())
}

#[test] fn prune_rejects_non_positive_fraction() {
  for fraction in [0.0, -0.5, f64::NAN] {
    assert!(matches!(Pruning::new(fraction), Err(Error::InvalidArgument(_))));
    assert!(matches!(prune(&LocusSizes::new(), fraction), Err(Error::InvalidArgument(_))));
  }
}

#[test] fn prune_zero_locus_policy() -> Result<()> {
  let (mut seeds, [a, b, c], locus) = three_seeds()?;
  let d = seeds.push(Point::new(500.0, 500.0))?;

  let retain = Pruning::new(0.5)?;
  assert_eq!(retain.zero_locus(), ZeroLocus::Retain);
  assert_eq!(retain.select(&seeds, &locus), BTreeSet::from([b]));

  let drop_empty = retain.with_zero_locus(ZeroLocus::Prune);
  let selected = drop_empty.select(&seeds, &locus);
  assert_eq!(selected, BTreeSet::from([b, d]));

  assert_eq!(seeds.apply_pruning(&selected), 2);
  assert_eq!(seeds.ids().collect::<Vec<_>>(), vec![a, c]);
  Ok(())
}

#[cfg(feature = "random")]
#[test] fn scatter_stays_on_canvas() {
  use rand::SeedableRng;

  let mut rng = rand_pcg::Pcg64::seed_from_u64(0);
  let mut seeds = SeedSet::new();
  seeds.push(Point::new(-5.0, -5.0)).unwrap();
  let canvas = Canvas::new(40, 30);
  seeds.scatter(100, canvas, &mut rng);

  assert_eq!(seeds.len(), 100);
  assert!(seeds.iter().all(|s| (0.0..40.0).contains(&s.point.x) && (0.0..30.0).contains(&s.point.y)));
  assert_eq!(seeds.ids().collect::<BTreeSet<_>>().len(), 100);
  assert!(seeds.get(SeedId(0)).is_none());
}

#[cfg(feature = "drawing")]
#[test] fn drawing_empty_buffer() {
  use crate::{drawing::{Cells, Draw, Palette}, raster::PixelBuffer};

  let pixels = PixelBuffer::new(Canvas::new(0, 5));
  assert_eq!(pixels.pixels().count(), 0);
  let mut image = image::RgbaImage::new(4, 4);
  Cells { pixels: &pixels, palette: &Palette::random(&[], 0) }.draw(&mut image);
  assert_eq!(image.dimensions(), (0, 5));
}

#[cfg(feature = "drawing")]
#[test] fn drawing_colours_every_locus() -> Result<()> {
  use crate::{
    drawing::{Cells, Draw, Palette},
    raster::{render, RenderConfig, Search}
  };

  let seeds = SeedSet::from_points([Point::new(2.0, 2.0), Point::new(12.0, 7.0)])?;
  let canvas = Canvas::new(16, 10);
  let pass = render(seeds.as_slice(), canvas, &RenderConfig::new().with_search(Search::GridIndex))?;
  let palette = Palette::random(seeds.as_slice(), 1);

  let mut image = image::RgbaImage::new(1, 1);
  Cells { pixels: &pass.pixels, palette: &palette }.draw(&mut image);
  assert_eq!(image.dimensions(), (16, 10));
  for (pixel, cell) in pass.pixels.pixels() {
    assert_eq!(*image.get_pixel(pixel.x, pixel.y), palette.color(cell));
  }
  Ok(())
}
