//! Archive row decoder.
//!
//! Archive rows are JSON objects keyed by the archive's own column names
//! (`hostname`, `pl_name`, `st_teff`, …). Each row describes one planet
//! solution together with its host star.

use exofuse_core::{Catalog, Planet, RawRow, StellarFields};

use crate::{
  CatalogRow,
  angle::{dec_cell, ra_cell},
  error::{Error, Result},
  value::{cell, number, text},
};

fn num(row: &RawRow, column: &str) -> Option<f64> {
  cell(row, &[column]).and_then(number)
}

pub(crate) fn decode_row(row: &RawRow) -> Result<CatalogRow> {
  let hostname = cell(row, &["hostname"])
    .and_then(text)
    .ok_or(Error::MissingColumn("hostname"))?;

  let star = StellarFields {
    ra:          cell(row, &["ra"]).and_then(ra_cell),
    dec:         cell(row, &["dec"]).and_then(dec_cell),
    sy_dist:     num(row, "sy_dist"),
    st_teff:     num(row, "st_teff"),
    st_rad:      num(row, "st_rad"),
    st_mass:     num(row, "st_mass"),
    st_lum:      num(row, "st_lum"),
    st_spectype: cell(row, &["st_spectype"]).and_then(text),
  };

  let planet = cell(row, &["pl_name"]).and_then(text).map(|name| Planet {
    pl_orbsmax: num(row, "pl_orbsmax"),
    pl_rade: num(row, "pl_rade"),
    pl_masse: num(row, "pl_masse"),
    pl_bmasse: num(row, "pl_bmasse"),
    pl_orbeccen: num(row, "pl_orbeccen"),
    pl_eqt: num(row, "pl_eqt"),
    pl_dens: num(row, "pl_dens"),
    pl_insol: num(row, "pl_insol"),
    pl_orbper: num(row, "pl_orbper"),
    ..Planet::new(name)
  });

  Ok(CatalogRow {
    catalog: Catalog::Archive,
    hostname,
    alternate_names: Vec::new(),
    star,
    planet,
  })
}
