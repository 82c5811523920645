//! Community CSV catalog: text → [`RawRow`]s → [`CatalogRow`]s.
//!
//! The community catalog's headers drift between exports, so every field is
//! looked up through a list of aliases. Giant-planet mass and radius are
//! published in Jupiter units and converted to Earth units here.

use exofuse_core::{Catalog, Planet, RawRow, StellarFields};
use serde_json::Value;

use crate::{
  CatalogRow,
  angle::{dec_cell, ra_cell},
  error::{Error, Result},
  value::{cell, list, number, scaled, text},
};

/// Earth masses per Jupiter mass.
pub const JUPITER_MASS_EARTH: f64 = 317.83;
/// Earth radii per Jupiter radius.
pub const JUPITER_RADIUS_EARTH: f64 = 11.209;

// ─── Column aliases ──────────────────────────────────────────────────────────

const PLANET_NAME: &[&str] = &["name", "pl_name", "planet_name"];
const STAR_NAME: &[&str] = &["star_name", "hostname", "host_name"];
const STAR_ALIASES: &[&str] = &["star_alternate_names", "star_aliases"];
const STATUS: &[&str] = &["planet_status", "status"];
const RA: &[&str] = &["ra", "ra_deg", "ra_str"];
const DEC: &[&str] = &["dec", "dec_deg", "dec_str"];
const DISTANCE: &[&str] = &["star_distance", "distance", "sy_dist"];
const TEFF: &[&str] = &["star_teff", "teff", "st_teff"];
const STAR_RADIUS: &[&str] = &["star_radius", "st_rad"];
const STAR_MASS: &[&str] = &["star_mass", "st_mass"];
const SPECTRAL_TYPE: &[&str] =
  &["star_sp_type", "spType", "spectral_type", "st_spectype"];
const MOLECULES: &[&str] = &["molecules", "detected_molecules"];

const MASS: &[(&str, f64)] = &[("mass", JUPITER_MASS_EARTH), ("pl_masse", 1.0)];
const MASS_SINI: &[(&str, f64)] =
  &[("mass_sini", JUPITER_MASS_EARTH), ("pl_bmasse", 1.0)];
const RADIUS: &[(&str, f64)] =
  &[("radius", JUPITER_RADIUS_EARTH), ("pl_rade", 1.0)];
const SEMI_MAJOR_AXIS: &[(&str, f64)] =
  &[("semi_major_axis", 1.0), ("pl_orbsmax", 1.0)];
const ECCENTRICITY: &[(&str, f64)] = &[("eccentricity", 1.0), ("pl_orbeccen", 1.0)];
const PERIOD: &[(&str, f64)] = &[("orbital_period", 1.0), ("pl_orbper", 1.0)];
const EQUILIBRIUM_TEMP: &[(&str, f64)] =
  &[("temp_calculated", 1.0), ("pl_eqt", 1.0)];

fn num(row: &RawRow, columns: &[&str]) -> Option<f64> {
  cell(row, columns).and_then(number)
}

// ─── CSV ─────────────────────────────────────────────────────────────────────

/// Parse community CSV text into raw rows of string cells.
///
/// Lines starting with `#` are comments. Ragged rows are tolerated; blank
/// cells are omitted from the row.
pub(crate) fn parse_csv(input: &str) -> Result<Vec<RawRow>> {
  let mut reader = csv::ReaderBuilder::new()
    .flexible(true)
    .comment(Some(b'#'))
    .trim(csv::Trim::All)
    .from_reader(input.as_bytes());

  let headers = reader.headers()?.clone();
  if headers.iter().all(str::is_empty) {
    return Err(Error::MissingHeader);
  }

  let mut rows = Vec::new();
  for record in reader.records() {
    let record = record?;
    let row: RawRow = headers
      .iter()
      .zip(record.iter())
      .filter(|(h, v)| !h.is_empty() && !v.is_empty())
      .map(|(h, v)| (h.to_owned(), Value::String(v.to_owned())))
      .collect();
    if !row.is_empty() {
      rows.push(row);
    }
  }
  Ok(rows)
}

// ─── Row decoder ─────────────────────────────────────────────────────────────

pub(crate) fn decode_row(row: &RawRow) -> Result<CatalogRow> {
  let planet_name = cell(row, PLANET_NAME).and_then(text);

  if let Some(status) = cell(row, STATUS).and_then(text)
    && !status.eq_ignore_ascii_case("confirmed")
  {
    return Err(Error::Unconfirmed {
      name: planet_name.unwrap_or_default(),
      status,
    });
  }

  let hostname = cell(row, STAR_NAME)
    .and_then(text)
    .ok_or(Error::MissingColumn("star_name"))?;

  let alternate_names = cell(row, STAR_ALIASES).map(list).unwrap_or_default();

  let star = StellarFields {
    ra:          cell(row, RA).and_then(ra_cell),
    dec:         cell(row, DEC).and_then(dec_cell),
    sy_dist:     num(row, DISTANCE),
    st_teff:     num(row, TEFF),
    st_rad:      num(row, STAR_RADIUS),
    st_mass:     num(row, STAR_MASS),
    st_lum:      None,
    st_spectype: cell(row, SPECTRAL_TYPE).and_then(text),
  };

  let planet = planet_name.map(|name| Planet {
    pl_orbsmax: scaled(row, SEMI_MAJOR_AXIS),
    pl_rade: scaled(row, RADIUS),
    pl_masse: scaled(row, MASS),
    pl_bmasse: scaled(row, MASS_SINI),
    pl_orbeccen: scaled(row, ECCENTRICITY),
    pl_eqt: scaled(row, EQUILIBRIUM_TEMP),
    pl_orbper: scaled(row, PERIOD),
    molecules: cell(row, MOLECULES)
      .map(list)
      .unwrap_or_default()
      .into_iter()
      .collect(),
    ..Planet::new(name)
  });

  Ok(CatalogRow {
    catalog: Catalog::Community,
    hostname,
    alternate_names,
    star,
    planet,
  })
}
