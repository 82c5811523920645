//! Positional cross-checks between two catalog entries for the same star.

use exofuse_core::StarSystem;

use crate::names::NameMatcher;

/// Default maximum great-circle separation for two positions to count as the
/// same star.
pub const DEFAULT_MAX_SEPARATION_DEG: f64 = 0.05;

/// Largest tolerated ratio between two catalogued distances.
pub const MAX_DISTANCE_RATIO: f64 = 1.5;

/// A coordinate of exactly zero is indistinguishable from "not published".
fn usable(value: Option<f64>) -> Option<f64> {
  value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Haversine great-circle separation in degrees.
pub fn angular_separation(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
  let (dec1, dec2) = (dec1.to_radians(), dec2.to_radians());
  let d_dec = dec2 - dec1;
  let d_ra = (ra2 - ra1).to_radians();
  let h = (d_dec / 2.0).sin().powi(2)
    + dec1.cos() * dec2.cos() * (d_ra / 2.0).sin().powi(2);
  (2.0 * h.min(1.0).sqrt().asin()).to_degrees()
}

/// True when all four coordinates are usable and lie within `max_degrees`.
pub fn are_coordinates_close(
  ra1: Option<f64>,
  dec1: Option<f64>,
  ra2: Option<f64>,
  dec2: Option<f64>,
  max_degrees: f64,
) -> bool {
  match (usable(ra1), usable(dec1), usable(ra2), usable(dec2)) {
    (Some(ra1), Some(dec1), Some(ra2), Some(dec2)) => {
      angular_separation(ra1, dec1, ra2, dec2) <= max_degrees
    }
    _ => false,
  }
}

/// Full identity check: similar names, and no available positional or
/// distance evidence against the match.
pub fn verify_match(
  matcher: &mut NameMatcher,
  a: &StarSystem,
  b: &StarSystem,
) -> bool {
  if !matcher.are_similar(&a.hostname, &b.hostname) {
    return false;
  }

  let positions = [a.star.ra, a.star.dec, b.star.ra, b.star.dec];
  if positions.iter().all(|v| usable(*v).is_some())
    && !are_coordinates_close(
      a.star.ra,
      a.star.dec,
      b.star.ra,
      b.star.dec,
      DEFAULT_MAX_SEPARATION_DEG,
    )
  {
    return false;
  }

  if let (Some(d1), Some(d2)) = (usable(a.star.sy_dist), usable(b.star.sy_dist))
  {
    let (near, far) = if d1 < d2 { (d1, d2) } else { (d2, d1) };
    if far / near > MAX_DISTANCE_RATIO {
      return false;
    }
  }

  true
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use exofuse_core::DataSource;

  use super::*;

  fn system(name: &str, ra: f64, dec: f64, dist: f64) -> StarSystem {
    let mut s = StarSystem::new(name, DataSource::Archive);
    s.star.ra = Some(ra);
    s.star.dec = Some(dec);
    s.star.sy_dist = Some(dist);
    s
  }

  #[test]
  fn separation_scales_with_declination() {
    assert_relative_eq!(
      angular_separation(10.0, 20.0, 10.02, 20.0),
      0.02 * 20f64.to_radians().cos(),
      epsilon = 1e-6
    );
    assert_relative_eq!(angular_separation(0.0, 0.0, 0.0, 1.0), 1.0, epsilon = 1e-9);
  }

  #[test]
  fn closeness_threshold() {
    let close = |ra2| are_coordinates_close(Some(10.0), Some(20.0), Some(ra2), Some(20.0), 0.05);
    assert!(close(10.02));
    assert!(!close(10.5));
  }

  #[test]
  fn missing_or_zero_coordinates_are_never_close() {
    assert!(!are_coordinates_close(None, Some(1.0), Some(1.0), Some(1.0), 1.0));
    assert!(!are_coordinates_close(Some(0.0), Some(1.0), Some(0.0), Some(1.0), 1.0));
  }

  #[test]
  fn verify_match_requires_similar_names() {
    let mut m = NameMatcher::new();
    let a = system("Kepler-10", 10.0, 20.0, 170.0);
    let b = system("WASP-12", 10.0, 20.0, 170.0);
    assert!(!verify_match(&mut m, &a, &b));
  }

  #[test]
  fn verify_match_vetoes_on_position_or_distance() {
    let mut m = NameMatcher::new();
    let a = system("HD 1", 10.0, 20.0, 100.0);
    assert!(verify_match(&mut m, &a, &system("HD1 b", 10.01, 20.0, 120.0)));
    assert!(!verify_match(&mut m, &a, &system("HD1 b", 12.0, 20.0, 100.0)));
    assert!(!verify_match(&mut m, &a, &system("HD1 b", 10.0, 20.0, 200.0)));
  }

  #[test]
  fn verify_match_skips_unavailable_evidence() {
    let mut m = NameMatcher::new();
    let a = system("HD 1", 10.0, 20.0, 100.0);
    let b = StarSystem::new("hd 1", DataSource::Community);
    assert!(verify_match(&mut m, &a, &b));
  }
}
