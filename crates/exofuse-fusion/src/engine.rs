//! The record-fusion pass.
//!
//! A [`Fusion`] owns every piece of state for one run (systems under
//! construction, the name registry, the similarity cache) and is consumed by
//! [`Fusion::run`]. Archive rows are always processed completely before any
//! community row is looked at.

use std::collections::HashMap;

use exofuse_catalog::{CatalogRow, Decoded, decode_archive, decode_community};
use exofuse_core::{Catalog, Planet, RawRow, StarSystem};
use serde::{Deserialize, Serialize};

use crate::{
  classify::classify,
  coords::verify_match,
  names::{NameMatcher, NameRegistry, planets_match},
  physics::{density, habitable_zone, insolation, known_or_estimated_luminosity},
  stats::FusionStats,
};

/// Fused systems and the counters describing how they were built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FusionOutput {
  pub systems: Vec<StarSystem>,
  pub stats:   FusionStats,
}

/// One catalog's view of a star after its rows have been grouped.
#[derive(Debug)]
struct Staged {
  system:          StarSystem,
  alternate_names: Vec<String>,
}

enum Resolution {
  Name(usize),
  Coordinates(usize),
  Unmatched,
}

#[derive(Debug, Default)]
pub struct Fusion {
  matcher:       NameMatcher,
  registry:      NameRegistry,
  systems:       Vec<StarSystem>,
  /// Primary name → index into `systems`.
  by_primary:    HashMap<String, usize>,
  /// Systems `[0, archive_stars)` came from the archive.
  archive_stars: usize,
  stats:         FusionStats,
}

impl Fusion {
  pub fn new() -> Self { Self::default() }

  pub fn run(
    mut self,
    archive: &[RawRow],
    community: Option<&[RawRow]>,
  ) -> FusionOutput {
    self.stats.archive_rows = archive.len();
    let archive = self.accept(Catalog::Archive, decode_archive(archive));
    for staged in group(archive) {
      self.insert(staged);
    }
    self.archive_stars = self.systems.len();
    self.stats.archive_stars = self.archive_stars;

    if let Some(rows) = community {
      self.stats.community_available = true;
      self.stats.community_rows = rows.len();
      let community = self.accept(Catalog::Community, decode_community(rows));
      let staged = group(community);
      self.stats.community_stars = staged.len();
      for star in staged {
        self.absorb(star);
      }
    }

    self.finish()
  }

  fn accept(&mut self, catalog: Catalog, decoded: Decoded) -> Vec<CatalogRow> {
    for error in &decoded.rejected {
      tracing::debug!(%catalog, %error, "skipping row");
    }
    self.stats.rejected_rows += decoded.rejected.len();
    decoded.rows
  }

  /// Add a staged star as its own system and register its names.
  fn insert(&mut self, staged: Staged) {
    let index = self.systems.len();
    let hostname = staged.system.hostname.clone();
    self.registry.register(&hostname, &staged.alternate_names);
    self.by_primary.entry(hostname).or_insert(index);
    self.systems.push(staged.system);
  }

  /// Exact and variant lookups over every name of the star come before any
  /// similarity scan, so an alternate name outranks a substring hit on the
  /// hostname.
  fn resolve(&mut self, staged: &Staged) -> Resolution {
    let names: Vec<&str> = std::iter::once(staged.system.hostname.as_str())
      .chain(staged.alternate_names.iter().map(String::as_str))
      .collect();

    let exact = names.iter().find_map(|name| self.registry.lookup(name));
    let primary = match exact {
      Some(primary) => Some(primary),
      None => names
        .iter()
        .find_map(|name| self.registry.scan(&mut self.matcher, name)),
    };
    if let Some(&index) = primary.and_then(|p| self.by_primary.get(p)) {
      return Resolution::Name(index);
    }

    for index in 0..self.archive_stars {
      if verify_match(&mut self.matcher, &self.systems[index], &staged.system) {
        return Resolution::Coordinates(index);
      }
    }

    Resolution::Unmatched
  }

  /// Match a community star against what is already known, merging or
  /// inserting it.
  fn absorb(&mut self, staged: Staged) {
    let index = match self.resolve(&staged) {
      Resolution::Name(index) => {
        self.stats.name_matches += 1;
        index
      }
      Resolution::Coordinates(index) => {
        self.stats.coordinate_matches += 1;
        index
      }
      Resolution::Unmatched => {
        tracing::debug!(hostname = %staged.system.hostname, "new community star");
        self.stats.new_community_stars += 1;
        self.stats.new_community_planets += staged.system.planets.len();
        self.insert(staged);
        return;
      }
    };

    tracing::debug!(
      community = %staged.system.hostname,
      matched = %self.systems[index].hostname,
      "merging community star"
    );
    let primary = self.systems[index].hostname.clone();
    self.registry.register(&primary, &staged.alternate_names);
    self.merge(index, staged.system);
  }

  /// Fill-null merge of `incoming` into `self.systems[index]`.
  fn merge(&mut self, index: usize, incoming: StarSystem) {
    let target = &mut self.systems[index];

    let filled = target.star.fill_from(&incoming.star);
    let mut contributed = !filled.is_empty();
    target.data_fields.record(Catalog::Community, filled);

    let calculated = incoming.data_fields.calculated;
    for planet in incoming.planets {
      let existing = target
        .planets
        .iter_mut()
        .find(|p| planets_match(&p.pl_name, &planet.pl_name));
      match existing {
        Some(existing) => {
          self.stats.planets_deduplicated += 1;
          if existing.molecules.is_empty() && !planet.molecules.is_empty() {
            existing.molecules = planet.molecules;
            target.data_fields.record(Catalog::Community, ["molecules"]);
            self.stats.molecules_backfilled += 1;
            contributed = true;
          }
        }
        None => {
          let present = planet.present_fields();
          for field in present.iter().chain(&["pl_type"]) {
            if calculated.contains(*field) {
              target.data_fields.record_calculated(field);
            }
          }
          target.data_fields.record(Catalog::Community, present);
          target.planets.push(planet);
          self.stats.new_community_planets += 1;
          contributed = true;
        }
      }
    }

    if contributed {
      target.data_source.absorb(Catalog::Community);
    }
  }

  fn finish(mut self) -> FusionOutput {
    let (mut systems, dropped): (Vec<_>, Vec<_>) = self
      .systems
      .into_iter()
      .partition(|s| s.star.sy_dist.is_some());
    for system in &dropped {
      tracing::debug!(hostname = %system.hostname, "dropping system without distance");
    }
    self.stats.dropped_without_distance = dropped.len();

    for system in &mut systems {
      if let Some(zone) = habitable_zone(&system.star) {
        system.habitable_zone = Some(zone);
        system.data_fields.record_calculated("habitable_zone");
      }
    }

    self.stats.tally(&systems);
    let stats = self.stats;
    tracing::info!(
      archive_rows = stats.archive_rows,
      community_rows = stats.community_rows,
      rejected_rows = stats.rejected_rows,
      archive_stars = stats.archive_stars,
      name_matches = stats.name_matches,
      coordinate_matches = stats.coordinate_matches,
      new_community_stars = stats.new_community_stars,
      new_community_planets = stats.new_community_planets,
      planets_deduplicated = stats.planets_deduplicated,
      molecules_backfilled = stats.molecules_backfilled,
      dropped = stats.dropped_without_distance,
      systems = stats.systems,
      planets = stats.planets,
      cached_pairs = self.matcher.cached_pairs(),
      "fusion complete"
    );
    for (field, count) in &stats.missing_fields {
      tracing::debug!(field = %field, count, "missing after fusion");
    }

    FusionOutput { systems, stats }
  }
}

// ─── Grouping ────────────────────────────────────────────────────────────────

/// Group decoded rows by raw host name. The first row of a star initialises
/// it; later rows only fill nulls. Planets are deduplicated by name.
fn group(rows: Vec<CatalogRow>) -> Vec<Staged> {
  let mut staged: Vec<Staged> = Vec::new();
  let mut index: HashMap<String, usize> = HashMap::new();

  for row in rows {
    let i = *index.entry(row.hostname.clone()).or_insert_with(|| {
      staged.push(Staged {
        system:          StarSystem::new(row.hostname.clone(), row.catalog.into()),
        alternate_names: Vec::new(),
      });
      staged.len() - 1
    });
    let entry = &mut staged[i];

    let filled = entry.system.star.fill_from(&row.star);
    entry.system.data_fields.record(row.catalog, filled);

    for name in row.alternate_names {
      if name != entry.system.hostname && !entry.alternate_names.contains(&name) {
        entry.alternate_names.push(name);
      }
    }

    if let Some(planet) = row.planet {
      entry
        .system
        .data_fields
        .record(row.catalog, planet.present_fields());
      let existing = entry
        .system
        .planets
        .iter_mut()
        .find(|p| planets_match(&p.pl_name, &planet.pl_name));
      match existing {
        Some(existing) => {
          existing.fill_from(&planet);
        }
        None => entry.system.planets.push(planet),
      }
    }
  }

  for entry in &mut staged {
    derive_planets(&mut entry.system);
  }
  staged
}

// ─── Derived fields ──────────────────────────────────────────────────────────

fn derive_planets(system: &mut StarSystem) {
  let luminosity = known_or_estimated_luminosity(&system.star);
  for planet in &mut system.planets {
    for field in derive_planet(planet, luminosity) {
      system.data_fields.record_calculated(field);
    }
  }
}

/// Fill `pl_dens` and `pl_insol` when absent and assign `pl_type`. Returns
/// the names of the fields computed.
pub(crate) fn derive_planet(
  planet: &mut Planet,
  luminosity: Option<f64>,
) -> Vec<&'static str> {
  let mut computed = Vec::new();
  if planet.pl_dens.is_none()
    && let Some(d) = density(planet.best_mass(), planet.pl_rade)
  {
    planet.pl_dens = Some(d);
    computed.push("pl_dens");
  }
  if planet.pl_insol.is_none()
    && let Some(s) = insolation(luminosity, planet.pl_orbsmax)
  {
    planet.pl_insol = Some(s);
    computed.push("pl_insol");
  }
  planet.pl_type = classify(planet);
  computed.push("pl_type");
  computed
}
