//! Planets and the descriptive planet taxonomy.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::fill_null;

// ─── Taxonomy ────────────────────────────────────────────────────────────────

/// Descriptive planet class assigned by the classifier.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
)]
pub enum PlanetType {
  #[serde(rename = "Ultra-hot Jupiter")]
  #[strum(serialize = "Ultra-hot Jupiter")]
  UltraHotJupiter,
  #[serde(rename = "Hot Jupiter")]
  #[strum(serialize = "Hot Jupiter")]
  HotJupiter,
  #[serde(rename = "Super-Jovian")]
  #[strum(serialize = "Super-Jovian")]
  SuperJovian,
  #[serde(rename = "Gas Giant")]
  #[strum(serialize = "Gas Giant")]
  GasGiant,
  #[serde(rename = "Mini-Neptune")]
  #[strum(serialize = "Mini-Neptune")]
  MiniNeptune,
  #[serde(rename = "Habitable Super-Earth")]
  #[strum(serialize = "Habitable Super-Earth")]
  HabitableSuperEarth,
  #[serde(rename = "Super-Earth")]
  #[strum(serialize = "Super-Earth")]
  SuperEarth,
  #[serde(rename = "Habitable Earth-like")]
  #[strum(serialize = "Habitable Earth-like")]
  HabitableEarthLike,
  #[serde(rename = "Earth-like")]
  #[strum(serialize = "Earth-like")]
  EarthLike,
  #[serde(rename = "Sub-Earth")]
  #[strum(serialize = "Sub-Earth")]
  SubEarth,
  #[serde(rename = "Ocean World")]
  #[strum(serialize = "Ocean World")]
  OceanWorld,
  #[serde(rename = "Lava World")]
  #[strum(serialize = "Lava World")]
  LavaWorld,
  /// Some size data exists but no rule matched.
  Unclassified,
  /// Neither radius nor mass is known.
  #[default]
  Unknown,
}

// ─── Planet ──────────────────────────────────────────────────────────────────

/// A planet record. `pl_name` is unique only within its owning system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Planet {
  pub pl_name:     String,
  /// Semi-major axis in AU.
  pub pl_orbsmax:  Option<f64>,
  /// Radius in Earth radii.
  pub pl_rade:     Option<f64>,
  /// Mass in Earth masses.
  pub pl_masse:    Option<f64>,
  /// Projected mass (M·sin i) in Earth masses.
  pub pl_bmasse:   Option<f64>,
  pub pl_orbeccen: Option<f64>,
  /// Equilibrium temperature in kelvin.
  pub pl_eqt:      Option<f64>,
  /// Bulk density in g/cm³.
  pub pl_dens:     Option<f64>,
  /// Insolation flux relative to Earth.
  pub pl_insol:    Option<f64>,
  /// Orbital period in days.
  pub pl_orbper:   Option<f64>,
  pub molecules:   BTreeSet<String>,
  pub pl_type:     PlanetType,
}

impl Planet {
  /// Measured field names in wire order; `pl_name` and `pl_type` excluded.
  pub const FIELDS: [&'static str; 10] = [
    "pl_orbsmax",
    "pl_rade",
    "pl_masse",
    "pl_bmasse",
    "pl_orbeccen",
    "pl_eqt",
    "pl_dens",
    "pl_insol",
    "pl_orbper",
    "molecules",
  ];

  pub fn new(pl_name: impl Into<String>) -> Self {
    Self {
      pl_name: pl_name.into(),
      ..Self::default()
    }
  }

  /// Direct mass if known, else the projected mass.
  pub fn best_mass(&self) -> Option<f64> { self.pl_masse.or(self.pl_bmasse) }

  /// Fill every empty measurement from `other`. Returns `true` if anything
  /// changed. Derived fields are filled like any other field; callers decide
  /// whether to recompute them.
  pub fn fill_from(&mut self, other: &Planet) -> bool {
    let mut changed = false;
    changed |= fill_null(&mut self.pl_orbsmax, &other.pl_orbsmax);
    changed |= fill_null(&mut self.pl_rade, &other.pl_rade);
    changed |= fill_null(&mut self.pl_masse, &other.pl_masse);
    changed |= fill_null(&mut self.pl_bmasse, &other.pl_bmasse);
    changed |= fill_null(&mut self.pl_orbeccen, &other.pl_orbeccen);
    changed |= fill_null(&mut self.pl_eqt, &other.pl_eqt);
    changed |= fill_null(&mut self.pl_dens, &other.pl_dens);
    changed |= fill_null(&mut self.pl_insol, &other.pl_insol);
    changed |= fill_null(&mut self.pl_orbper, &other.pl_orbper);
    if self.molecules.is_empty() && !other.molecules.is_empty() {
      self.molecules = other.molecules.clone();
      changed = true;
    }
    changed
  }

  /// Names of the measured fields that hold a value.
  pub fn present_fields(&self) -> Vec<&'static str> {
    let missing = self.missing_fields();
    Self::FIELDS
      .iter()
      .copied()
      .filter(|f| !missing.contains(f))
      .collect()
  }

  /// Names of the measured fields that are still empty.
  pub fn missing_fields(&self) -> Vec<&'static str> {
    let present = [
      self.pl_orbsmax.is_some(),
      self.pl_rade.is_some(),
      self.pl_masse.is_some(),
      self.pl_bmasse.is_some(),
      self.pl_orbeccen.is_some(),
      self.pl_eqt.is_some(),
      self.pl_dens.is_some(),
      self.pl_insol.is_some(),
      self.pl_orbper.is_some(),
      !self.molecules.is_empty(),
    ];
    Self::FIELDS
      .iter()
      .zip(present)
      .filter_map(|(name, set)| (!set).then_some(*name))
      .collect()
  }
}
