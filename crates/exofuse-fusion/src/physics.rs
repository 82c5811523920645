//! Derived physical quantities.
//!
//! Every function is pure and returns `None` when its inputs are
//! insufficient; `None` means "could not be determined", never an error.

use std::f64::consts::PI;

use exofuse_core::{HabitableZone, StellarFields};

/// Earth mass in grams.
pub const EARTH_MASS_G: f64 = 5.972e27;
/// Earth mean radius in centimetres.
pub const EARTH_RADIUS_CM: f64 = 6.371e8;
/// Stefan–Boltzmann constant, W·m⁻²·K⁻⁴.
pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;
/// Nominal solar radius in metres.
pub const SOLAR_RADIUS_M: f64 = 6.957e8;
/// Nominal solar luminosity in watts.
pub const SOLAR_LUMINOSITY_W: f64 = 3.828e26;

/// Stellar flux (in Earth units) at the inner and outer habitable-zone edges.
const HZ_INNER_FLUX: f64 = 1.1;
const HZ_OUTER_FLUX: f64 = 0.53;

// ─── Planets ─────────────────────────────────────────────────────────────────

/// Bulk density in g/cm³ from mass (M⊕) and radius (R⊕).
pub fn density(mass_earth: Option<f64>, radius_earth: Option<f64>) -> Option<f64> {
  let mass = mass_earth?;
  let radius = radius_earth?;
  if radius <= 0.0 || mass < 0.0 {
    return None;
  }
  let radius_cm = radius * EARTH_RADIUS_CM;
  let volume = 4.0 / 3.0 * PI * radius_cm.powi(3);
  Some(mass * EARTH_MASS_G / volume)
}

/// Incident flux relative to Earth's, by the inverse-square law.
pub fn insolation(
  luminosity_solar: Option<f64>,
  semi_major_axis_au: Option<f64>,
) -> Option<f64> {
  let luminosity = luminosity_solar?;
  let a = semi_major_axis_au?;
  if a <= 0.0 {
    return None;
  }
  Some(luminosity / (a * a))
}

// ─── Stars ───────────────────────────────────────────────────────────────────

/// Linear luminosity in L☉ from the Stefan–Boltzmann law.
pub fn stefan_boltzmann_luminosity(
  teff_k: Option<f64>,
  radius_solar: Option<f64>,
) -> Option<f64> {
  let teff = teff_k?;
  let radius = radius_solar?;
  if teff <= 0.0 || radius <= 0.0 {
    return None;
  }
  let radius_m = radius * SOLAR_RADIUS_M;
  let watts = 4.0 * PI * radius_m.powi(2) * STEFAN_BOLTZMANN * teff.powi(4);
  Some(watts / SOLAR_LUMINOSITY_W)
}

/// Linear luminosity in L☉ from the main-sequence mass–luminosity relation.
pub fn mass_luminosity(mass_solar: Option<f64>) -> Option<f64> {
  let m = mass_solar?;
  if m <= 0.0 {
    return None;
  }
  let l = if m < 0.43 {
    0.23 * m.powf(2.3)
  } else if m < 2.0 {
    m.powi(4)
  } else if m < 20.0 {
    1.4 * m.powf(3.5)
  } else {
    // Continuous with the 3.5 regime at 20 M☉.
    1.4 * 20f64.powf(1.5) * m.powi(2)
  };
  Some(l)
}

/// Main-sequence luminosity (L☉) at sub-type 0 of each class and at the
/// start of the next class.
const SPECTRAL_LUMINOSITY: [(char, f64, f64); 7] = [
  ('O', 1.0e6, 3.0e4),
  ('B', 3.0e4, 54.0),
  ('A', 54.0, 6.5),
  ('F', 6.5, 1.5),
  ('G', 1.5, 0.6),
  ('K', 0.6, 0.08),
  ('M', 0.08, 2.0e-4),
];

/// Parse the numeric sub-type following the class letter (`G2.5V` → 2.5).
/// Defaults to the middle of the decade when absent.
fn spectral_subtype(spectype: &str) -> f64 {
  let rest: String = spectype
    .trim()
    .chars()
    .skip(1)
    .take_while(|c| c.is_ascii_digit() || *c == '.')
    .collect();
  rest
    .parse::<f64>()
    .map(|s| s.clamp(0.0, 9.9))
    .unwrap_or(5.0)
}

/// Coarse luminosity (L☉) from spectral class and sub-type, interpolated in
/// log space across the class decade.
pub fn spectral_luminosity(spectype: Option<&str>) -> Option<f64> {
  let spectype = spectype?;
  let class = spectype.trim().chars().next()?.to_ascii_uppercase();
  let (_, at_zero, at_ten) =
    SPECTRAL_LUMINOSITY.iter().find(|(c, _, _)| *c == class)?;
  let t = spectral_subtype(spectype) / 10.0;
  let log_l = at_zero.log10() + (at_ten.log10() - at_zero.log10()) * t;
  Some(10f64.powf(log_l))
}

/// Best available linear luminosity estimate (L☉), in decreasing order of
/// accuracy: Stefan–Boltzmann, mass–luminosity, spectral class.
pub fn stellar_luminosity(star: &StellarFields) -> Option<f64> {
  stefan_boltzmann_luminosity(star.st_teff, star.st_rad)
    .or_else(|| mass_luminosity(star.st_mass))
    .or_else(|| spectral_luminosity(star.st_spectype.as_deref()))
}

/// Linear luminosity (L☉) for insolation: the catalogued `st_lum` when
/// present, otherwise [`stellar_luminosity`].
pub fn known_or_estimated_luminosity(star: &StellarFields) -> Option<f64> {
  star
    .st_lum
    .map(|log_l| 10f64.powf(log_l))
    .or_else(|| stellar_luminosity(star))
}

/// Bolometric correction (magnitudes) by spectral class.
pub fn bolometric_correction(class: Option<char>) -> f64 {
  match class {
    Some('B') => -2.0,
    Some('A') => -0.3,
    Some('F') => -0.15,
    Some('G') => -0.4,
    Some('K') => -0.8,
    Some('M') => -2.0,
    _ => -0.4,
  }
}

/// Habitable-zone edges from catalogued luminosity, or from a
/// bolometric-corrected Stefan–Boltzmann estimate.
pub fn habitable_zone(star: &StellarFields) -> Option<HabitableZone> {
  let log_l = match star.st_lum {
    Some(log_l) => log_l,
    None => {
      let l = stefan_boltzmann_luminosity(star.st_teff, star.st_rad)?;
      l.log10() - bolometric_correction(star.spectral_class()) / 2.5
    }
  };
  let luminosity = 10f64.powf(log_l);
  if !luminosity.is_finite() {
    return None;
  }
  Some(HabitableZone {
    inner_au: (luminosity / HZ_INNER_FLUX).sqrt(),
    outer_au: (luminosity / HZ_OUTER_FLUX).sqrt(),
  })
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  fn star() -> StellarFields { StellarFields::default() }

  #[test]
  fn earth_density() {
    assert_relative_eq!(density(Some(1.0), Some(1.0)).unwrap(), 5.51, epsilon = 0.01);
  }

  #[test]
  fn density_needs_both_inputs() {
    assert_eq!(density(None, Some(1.0)), None);
    assert_eq!(density(Some(1.0), None), None);
    assert_eq!(density(Some(1.0), Some(0.0)), None);
  }

  #[test]
  fn insolation_inverse_square() {
    assert_relative_eq!(insolation(Some(1.0), Some(1.0)).unwrap(), 1.0);
    assert_relative_eq!(insolation(Some(4.0), Some(2.0)).unwrap(), 1.0);
    assert_relative_eq!(insolation(Some(1.0), Some(0.5)).unwrap(), 4.0);
    assert_eq!(insolation(Some(1.0), None), None);
  }

  #[test]
  fn sun_luminosity_from_stefan_boltzmann() {
    let l = stefan_boltzmann_luminosity(Some(5772.0), Some(1.0)).unwrap();
    assert_relative_eq!(l, 1.0, epsilon = 0.01);
  }

  #[test]
  fn mass_luminosity_regimes() {
    assert_relative_eq!(mass_luminosity(Some(1.0)).unwrap(), 1.0);
    assert_relative_eq!(mass_luminosity(Some(0.2)).unwrap(), 0.23 * 0.2f64.powf(2.3));
    assert_relative_eq!(mass_luminosity(Some(10.0)).unwrap(), 1.4 * 10f64.powf(3.5));
    let below = mass_luminosity(Some(19.999)).unwrap();
    let above = mass_luminosity(Some(20.0)).unwrap();
    assert_relative_eq!(below, above, max_relative = 1e-3);
  }

  #[test]
  fn spectral_table_interpolates_within_class() {
    let g0 = spectral_luminosity(Some("G0")).unwrap();
    let g5 = spectral_luminosity(Some("G5 V")).unwrap();
    let k0 = spectral_luminosity(Some("K0")).unwrap();
    assert_relative_eq!(g0, 1.5, epsilon = 1e-9);
    assert!(g0 > g5 && g5 > k0);
    assert_eq!(spectral_luminosity(Some("X9")), None);
    assert_eq!(spectral_luminosity(None), None);
  }

  #[test]
  fn stellar_luminosity_prefers_direct_measurement() {
    let mut s = star();
    s.st_mass = Some(2.0);
    s.st_spectype = Some("M5".into());
    assert_relative_eq!(stellar_luminosity(&s).unwrap(), 1.4 * 2f64.powf(3.5));
    s.st_teff = Some(5772.0);
    s.st_rad = Some(1.0);
    assert_relative_eq!(stellar_luminosity(&s).unwrap(), 1.0, epsilon = 0.01);
    assert_eq!(stellar_luminosity(&star()), None);
  }

  #[test]
  fn catalogued_luminosity_is_log_scale() {
    let mut s = star();
    s.st_lum = Some(0.0);
    s.st_teff = Some(3000.0);
    s.st_rad = Some(0.2);
    assert_relative_eq!(known_or_estimated_luminosity(&s).unwrap(), 1.0);
  }

  #[test]
  fn habitable_zone_for_the_sun() {
    let mut s = star();
    s.st_lum = Some(0.0);
    let hz = habitable_zone(&s).unwrap();
    assert_relative_eq!(hz.inner_au, (1.0f64 / 1.1).sqrt());
    assert_relative_eq!(hz.outer_au, (1.0f64 / 0.53).sqrt());
  }

  #[test]
  fn habitable_zone_falls_back_to_bolometric_estimate() {
    let mut s = star();
    s.st_teff = Some(5772.0);
    s.st_rad = Some(1.0);
    s.st_spectype = Some("G2".into());
    let hz = habitable_zone(&s).unwrap();
    let l = 10f64.powf(stefan_boltzmann_luminosity(Some(5772.0), Some(1.0)).unwrap().log10() + 0.4 / 2.5);
    assert_relative_eq!(hz.inner_au, (l / 1.1).sqrt(), epsilon = 1e-9);
  }

  #[test]
  fn no_habitable_zone_without_luminosity() {
    let mut s = star();
    s.st_mass = Some(1.0);
    assert_eq!(habitable_zone(&s), None);
  }
}
