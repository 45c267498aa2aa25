use {
  crate::error::{Error, Result},
  euclid::Point2D,
  num_traits::Float,
  std::{fmt, str::FromStr}
};

/// Distance function used to assign pixels to seeds.
/// Selected once per render pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Metric {
  /// `sqrt(dx² + dy²)`
  #[default]
  Euclidean,
  /// `|dx| + |dy|`
  Manhattan,
  /// `max(|dx|, |dy|)`
  Chebyshev,
}

impl Metric {
  pub const ALL: [Metric; 3] = [Metric::Euclidean, Metric::Manhattan, Metric::Chebyshev];

  /// Symmetric, non-negative, zero iff `a == b`.
  #[inline]
  pub fn distance<T: Float, U>(self, a: Point2D<T, U>, b: Point2D<T, U>) -> T {
    let (dx, dy) = ((a.x - b.x).abs(), (a.y - b.y).abs());
    match self {
      Metric::Euclidean => (dx * dx + dy * dy).sqrt(),
      Metric::Manhattan => dx + dy,
      Metric::Chebyshev => dx.max(dy),
    }
  }

  /// Canonical identifier accepted by [`Metric::from_str`].
  pub fn name(self) -> &'static str {
    match self {
      Metric::Euclidean => "euclidean",
      Metric::Manhattan => "manhattan",
      Metric::Chebyshev => "chebyshev",
    }
  }
}

impl fmt::Display for Metric {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Metric {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Metric::ALL.into_iter()
      .find(|metric| metric.name().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| Error::invalid(format!(
        "unknown metric {s:?}, expected one of: euclidean, manhattan, chebyshev"
      )))
  }
}
