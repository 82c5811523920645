//! Provenance tags — which catalog a record or field came from.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One of the two upstream catalogs.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Catalog {
  /// The structured tabular archive (NASA Exoplanet Archive TAP rows).
  Archive,
  /// The community-maintained CSV catalog.
  Community,
}

/// Record-level provenance of a [`crate::StarSystem`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
  Archive,
  Community,
  Both,
}

impl From<Catalog> for DataSource {
  fn from(catalog: Catalog) -> Self {
    match catalog {
      Catalog::Archive => Self::Archive,
      Catalog::Community => Self::Community,
    }
  }
}

impl DataSource {
  /// Note a contribution from `catalog`. A contribution from the other
  /// catalog upgrades the tag to [`DataSource::Both`]; it never downgrades.
  pub fn absorb(&mut self, catalog: Catalog) {
    if *self != Self::Both && *self != Self::from(catalog) {
      *self = Self::Both;
    }
  }
}

/// Per-field provenance sets. Serialised as arrays of field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFields {
  pub archive:    BTreeSet<String>,
  pub community:  BTreeSet<String>,
  pub calculated: BTreeSet<String>,
}

impl DataFields {
  /// Record that `catalog` contributed each of `fields`.
  pub fn record<'a, I>(&mut self, catalog: Catalog, fields: I)
  where
    I: IntoIterator<Item = &'a str>,
  {
    let set = match catalog {
      Catalog::Archive => &mut self.archive,
      Catalog::Community => &mut self.community,
    };
    set.extend(fields.into_iter().map(str::to_owned));
  }

  /// Record that `field` was calculated rather than read from a catalog.
  pub fn record_calculated(&mut self, field: &str) {
    self.calculated.insert(field.to_owned());
  }
}
