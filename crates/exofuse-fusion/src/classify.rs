//! Descriptive planet taxonomy.
//!
//! [`RULES`] is evaluated top to bottom and the first matching rule labels
//! the planet. Thresholds are in Earth units, AU and kelvin.

use exofuse_core::{Planet, PlanetType};

/// The measurements the rules look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct Measurements {
  pub radius:     Option<f64>,
  pub mass:       Option<f64>,
  pub density:    Option<f64>,
  pub eqt:        Option<f64>,
  pub orbit_au:   Option<f64>,
  pub insolation: Option<f64>,
}

impl Measurements {
  pub fn of(planet: &Planet) -> Self {
    Self {
      radius:     planet.pl_rade,
      mass:       planet.best_mass(),
      density:    planet.pl_dens,
      eqt:        planet.pl_eqt,
      orbit_au:   planet.pl_orbsmax,
      insolation: planet.pl_insol,
    }
  }

  /// Density > 3 if known, else radius < 1.6, else mass < 10.
  pub fn is_rocky(&self) -> bool {
    if let Some(d) = self.density {
      d > 3.0
    } else if let Some(r) = self.radius {
      r < 1.6
    } else {
      lt(self.mass, 10.0)
    }
  }

  /// Insolation in [0.25, 2], else eqt in [200, 300] K, else orbit in
  /// [0.95, 1.67] AU.
  pub fn is_temperate(&self) -> bool {
    if let Some(s) = self.insolation {
      (0.25..=2.0).contains(&s)
    } else if let Some(t) = self.eqt {
      (200.0..=300.0).contains(&t)
    } else {
      self.orbit_au.is_some_and(|a| (0.95..=1.67).contains(&a))
    }
  }

  fn is_giant(&self) -> bool { gt(self.mass, 100.0) || gt(self.radius, 8.0) }

  fn super_earth_sized(&self) -> bool {
    within(self.radius, 1.25, 2.0) || within(self.mass, 2.0, 10.0)
  }

  fn earth_sized(&self) -> bool {
    within(self.radius, 0.8, 1.25) || within(self.mass, 0.5, 2.0)
  }
}

fn gt(v: Option<f64>, bound: f64) -> bool { v.is_some_and(|v| v > bound) }

fn lt(v: Option<f64>, bound: f64) -> bool { v.is_some_and(|v| v < bound) }

/// Half-open `[lo, hi)`.
fn within(v: Option<f64>, lo: f64, hi: f64) -> bool {
  v.is_some_and(|v| (lo..hi).contains(&v))
}

// ─── Rules ───────────────────────────────────────────────────────────────────

pub struct Rule {
  pub label:   PlanetType,
  pub applies: fn(&Measurements) -> bool,
}

pub const RULES: &[Rule] = &[
  Rule {
    label:   PlanetType::Unknown,
    applies: |m| m.radius.is_none() && m.mass.is_none(),
  },
  Rule {
    label:   PlanetType::UltraHotJupiter,
    applies: |m| gt(m.eqt, 2000.0) && m.is_giant(),
  },
  Rule {
    label:   PlanetType::HotJupiter,
    applies: |m| lt(m.orbit_au, 0.1) && m.is_giant(),
  },
  Rule {
    label:   PlanetType::SuperJovian,
    applies: |m| gt(m.mass, 635.0) || gt(m.radius, 15.0),
  },
  Rule {
    label:   PlanetType::GasGiant,
    applies: |m| gt(m.mass, 95.0) || gt(m.radius, 8.0),
  },
  Rule {
    label:   PlanetType::MiniNeptune,
    applies: |m| {
      within(m.radius, 2.0, 4.0)
        && (lt(m.density, 3.0) || (m.density.is_none() && lt(m.mass, 20.0)))
    },
  },
  Rule {
    label:   PlanetType::HabitableSuperEarth,
    applies: |m| m.super_earth_sized() && m.is_rocky() && m.is_temperate(),
  },
  Rule {
    label:   PlanetType::SuperEarth,
    applies: |m| m.super_earth_sized() && m.is_rocky(),
  },
  Rule {
    label:   PlanetType::MiniNeptune,
    applies: |m| m.super_earth_sized(),
  },
  Rule {
    label:   PlanetType::HabitableEarthLike,
    applies: |m| m.earth_sized() && m.is_rocky() && m.is_temperate(),
  },
  Rule {
    label:   PlanetType::EarthLike,
    applies: |m| m.earth_sized() && m.is_rocky(),
  },
  Rule {
    label:   PlanetType::SubEarth,
    applies: |m| (lt(m.radius, 0.8) || lt(m.mass, 0.5)) && m.is_rocky(),
  },
  Rule {
    label:   PlanetType::OceanWorld,
    applies: |m| {
      m.density.is_some_and(|d| d > 1.0 && d < 3.0) && lt(m.radius, 4.0)
    },
  },
  Rule {
    label:   PlanetType::LavaWorld,
    applies: |m| gt(m.eqt, 1500.0) && m.is_rocky(),
  },
  Rule {
    label:   PlanetType::Unclassified,
    applies: |m| m.radius.is_some() || m.mass.is_some(),
  },
];

/// Label a planet from its current measurements.
pub fn classify(planet: &Planet) -> PlanetType {
  let m = Measurements::of(planet);
  RULES
    .iter()
    .find(|rule| (rule.applies)(&m))
    .map_or(PlanetType::Unknown, |rule| rule.label)
}
