use {
  anyhow::Result,
  clap::{Parser, ValueEnum},
  humansize::{FileSize, file_size_opts},
  rand::SeedableRng,
  std::path::PathBuf,
  tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt},
  voronoi_raster::{
    drawing::{self, Palette},
    geometry::Canvas,
    metric::Metric,
    profile,
    prune::{Pruning, ZeroLocus},
    raster::{Cell, Render, RenderConfig, Renderer, Schedule, Search},
    seeds::SeedSet
  }
};

#[derive(Debug, Copy, Clone, ValueEnum)]
enum SearchArg { Culling, Exhaustive, Grid }

/// Render a Voronoi diagram of random seeds, optionally prune small loci and render again.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
  /// Number of random seeds
  #[arg(short = 'n', long, default_value_t = 64)]
  seeds: usize,
  #[arg(long, default_value_t = 800)]
  width: u32,
  #[arg(long, default_value_t = 600)]
  height: u32,
  /// euclidean, manhattan or chebyshev
  #[arg(short, long, default_value = "euclidean")]
  metric: Metric,
  /// One task per tile on all cores
  #[arg(short, long)]
  parallel: bool,
  /// Explicit tile count, implies --parallel
  #[arg(long)]
  tiles: Option<usize>,
  #[arg(long, value_enum, default_value = "culling")]
  search: SearchArg,
  /// Prune seeds whose locus is below this fraction of the average, then render again
  #[arg(long)]
  prune: Option<f64>,
  /// Also prune seeds that received no pixel
  #[arg(long)]
  prune_empty: bool,
  /// RNG seed for seed placement and colours
  #[arg(long, default_value_t = 0)]
  rng_seed: u64,
  #[arg(short, long, default_value = "out.png")]
  out: PathBuf,
}

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voronoi_raster=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().without_time())
    .init();

  let args = Args::parse();
  let canvas = Canvas::new(args.width, args.height);
  let config = RenderConfig::new()
    .with_metric(args.metric)
    .with_schedule(match (args.tiles, args.parallel) {
      (Some(n), _) => Schedule::Tiles(n),
      (None, true) => Schedule::Parallel,
      (None, false) => Schedule::Single,
    })
    .with_search(match args.search {
      SearchArg::Culling => Search::TileCulling,
      SearchArg::Exhaustive => Search::Exhaustive,
      SearchArg::Grid => Search::GridIndex,
    });

  let mut rng = rand_pcg::Pcg64::seed_from_u64(args.rng_seed);
  let mut seeds = SeedSet::new();
  seeds.scatter(args.seeds, canvas, &mut rng);

  let renderer = Renderer::new();
  let mut pass = profile!("render", renderer.render(seeds.as_slice(), canvas, &config)?);
  report(&pass);

  if let Some(fraction) = args.prune {
    let pruning = Pruning::new(fraction)?.with_zero_locus(match args.prune_empty {
      true => ZeroLocus::Prune,
      false => ZeroLocus::Retain,
    });
    let selected = pruning.select(&seeds, &pass.locus_sizes);
    let removed = seeds.apply_pruning(&selected);
    tracing::info!(removed, remaining = seeds.len(), "pruned");
    pass = profile!("render", renderer.render(seeds.as_slice(), canvas, &config)?);
    report(&pass);
  }

  let palette = Palette::random(seeds.as_slice(), args.rng_seed);
  drawing::save_png(&drawing::to_image(&pass, seeds.as_slice(), &palette), &args.out)?;
  tracing::info!(path = %args.out.display(), "saved");
  Ok(())
}

fn report(pass: &Render) {
  let buffer_size = (pass.pixels.cells().len() * std::mem::size_of::<Cell>())
    .file_size(file_size_opts::CONVENTIONAL)
    .unwrap_or_default();
  tracing::info!(
    seeds = pass.locus_sizes.len(),
    unassigned = pass.pixels.unassigned(),
    mean_locus = pass.locus_sizes.mean().unwrap_or(0.0),
    buffer = %buffer_size,
    "pass complete"
  );
}
