//! Star systems — the unit the engine emits.

use serde::{Deserialize, Serialize};

use crate::{
  fill_null,
  planet::Planet,
  provenance::{DataFields, DataSource},
};

// ─── Stellar parameters ──────────────────────────────────────────────────────

/// Position and physical parameters of a host star. Every field is
/// independently nullable; catalogs rarely publish all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StellarFields {
  /// Right ascension, decimal degrees.
  pub ra:          Option<f64>,
  /// Declination, decimal degrees.
  pub dec:         Option<f64>,
  /// Distance from the Sun in parsecs.
  pub sy_dist:     Option<f64>,
  /// Effective temperature in kelvin.
  pub st_teff:     Option<f64>,
  /// Radius in solar radii.
  pub st_rad:      Option<f64>,
  /// Mass in solar masses.
  pub st_mass:     Option<f64>,
  /// Luminosity as log10(L / L☉), the way the archive publishes it.
  pub st_lum:      Option<f64>,
  pub st_spectype: Option<String>,
}

impl StellarFields {
  /// Field names in wire order.
  pub const FIELDS: [&'static str; 8] = [
    "ra",
    "dec",
    "sy_dist",
    "st_teff",
    "st_rad",
    "st_mass",
    "st_lum",
    "st_spectype",
  ];

  /// Fill every empty field from `other`, never replacing a present value.
  /// Returns the names of the fields that changed.
  pub fn fill_from(&mut self, other: &StellarFields) -> Vec<&'static str> {
    let mut changed = Vec::new();
    let mut note = |hit: bool, name: &'static str| {
      if hit {
        changed.push(name);
      }
    };
    note(fill_null(&mut self.ra, &other.ra), "ra");
    note(fill_null(&mut self.dec, &other.dec), "dec");
    note(fill_null(&mut self.sy_dist, &other.sy_dist), "sy_dist");
    note(fill_null(&mut self.st_teff, &other.st_teff), "st_teff");
    note(fill_null(&mut self.st_rad, &other.st_rad), "st_rad");
    note(fill_null(&mut self.st_mass, &other.st_mass), "st_mass");
    note(fill_null(&mut self.st_lum, &other.st_lum), "st_lum");
    note(fill_null(&mut self.st_spectype, &other.st_spectype), "st_spectype");
    changed
  }

  /// Names of the fields that currently hold a value.
  pub fn present_fields(&self) -> Vec<&'static str> {
    let present = [
      self.ra.is_some(),
      self.dec.is_some(),
      self.sy_dist.is_some(),
      self.st_teff.is_some(),
      self.st_rad.is_some(),
      self.st_mass.is_some(),
      self.st_lum.is_some(),
      self.st_spectype.is_some(),
    ];
    Self::FIELDS
      .iter()
      .zip(present)
      .filter_map(|(name, set)| set.then_some(*name))
      .collect()
  }

  /// Names of the fields that are still null.
  pub fn missing_fields(&self) -> Vec<&'static str> {
    let present = self.present_fields();
    Self::FIELDS
      .iter()
      .copied()
      .filter(|f| !present.contains(f))
      .collect()
  }

  /// The leading spectral class letter, upper-cased (e.g. `G` for `G2 V`).
  pub fn spectral_class(&self) -> Option<char> {
    self
      .st_spectype
      .as_deref()
      .and_then(|s| s.trim().chars().next())
      .map(|c| c.to_ascii_uppercase())
  }
}

// ─── Habitable zone ──────────────────────────────────────────────────────────

/// Inner and outer edges of the circumstellar habitable zone, in AU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitableZone {
  pub inner_au: f64,
  pub outer_au: f64,
}

// ─── StarSystem ──────────────────────────────────────────────────────────────

/// A host star and its planets, as emitted by the fusion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
  /// Canonical display name. Not unique across catalogs before fusion.
  pub hostname:       String,
  #[serde(flatten)]
  pub star:           StellarFields,
  pub planets:        Vec<Planet>,
  #[serde(rename = "dataSource")]
  pub data_source:    DataSource,
  #[serde(rename = "dataFields")]
  pub data_fields:    DataFields,
  /// Derived once the system survives fusion; `None` when no luminosity can
  /// be obtained.
  pub habitable_zone: Option<HabitableZone>,
}

impl StarSystem {
  /// An empty system with no parameters and no planets.
  pub fn new(hostname: impl Into<String>, data_source: DataSource) -> Self {
    Self {
      hostname: hostname.into(),
      star: StellarFields::default(),
      planets: Vec::new(),
      data_source,
      data_fields: DataFields::default(),
      habitable_zone: None,
    }
  }
}
