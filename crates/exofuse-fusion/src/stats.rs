//! Counters describing one fusion run.

use std::collections::BTreeMap;

use exofuse_core::StarSystem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionStats {
  /// Raw rows handed to the engine.
  pub archive_rows:             usize,
  pub community_rows:           usize,
  /// Rows the codec refused (missing host name, unconfirmed status).
  pub rejected_rows:            usize,
  /// Whether a community catalog took part at all.
  pub community_available:      bool,
  /// Distinct host stars in each catalog after grouping.
  pub archive_stars:            usize,
  pub community_stars:          usize,
  /// Community stars resolved through the name registry.
  pub name_matches:             usize,
  /// Community stars resolved only by the positional scan.
  pub coordinate_matches:       usize,
  /// Community stars emitted as new systems.
  pub new_community_stars:      usize,
  /// Community planets appended to a system.
  pub new_community_planets:    usize,
  /// Community planets that duplicated an existing planet.
  pub planets_deduplicated:     usize,
  pub molecules_backfilled:     usize,
  /// Systems dropped for lacking `sy_dist`.
  pub dropped_without_distance: usize,
  /// Emitted totals.
  pub systems:                  usize,
  pub planets:                  usize,
  /// Per-field count of emitted records still lacking the field.
  pub missing_fields:           BTreeMap<String, usize>,
}

impl FusionStats {
  /// Fill the output totals and missing-field tallies from the final systems.
  pub(crate) fn tally(&mut self, systems: &[StarSystem]) {
    self.systems = systems.len();
    self.planets = systems.iter().map(|s| s.planets.len()).sum();
    self.missing_fields.clear();

    let missing = systems.iter().flat_map(|s| {
      s.star
        .missing_fields()
        .into_iter()
        .chain(s.planets.iter().flat_map(|p| p.missing_fields()))
    });
    for field in missing {
      *self.missing_fields.entry(field.to_string()).or_default() += 1;
    }
  }
}
