//! Row codec for the two upstream catalogs.
//!
//! Converts raw archive JSON rows and community CSV text into uniform
//! [`CatalogRow`]s. Pure synchronous; no HTTP or fusion logic.
//!
//! # Quick start
//!
//! ```no_run
//! use exofuse_catalog::{decode_community, parse_community_csv};
//!
//! let csv = "name,star_name,star_distance\nKepler-10 c,Kepler-10,172.9\n";
//! let rows = parse_community_csv(csv).unwrap();
//! let decoded = decode_community(&rows);
//! println!("{} rows, {} rejected", decoded.rows.len(), decoded.rejected.len());
//! ```

mod angle;
mod archive;
mod community;
pub mod error;
mod value;

pub use angle::{parse_dec, parse_ra};
pub use community::{JUPITER_MASS_EARTH, JUPITER_RADIUS_EARTH};
pub use error::{Error, Result};
use exofuse_core::{Catalog, Planet, RawRow, StellarFields};

// ─── Public types ────────────────────────────────────────────────────────────

/// One decoded catalog row: a host star and at most one of its planets.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
  pub catalog:         Catalog,
  /// The host name exactly as the catalog spells it.
  pub hostname:        String,
  /// Other published names of the host star.
  pub alternate_names: Vec<String>,
  pub star:            StellarFields,
  pub planet:          Option<Planet>,
}

/// The result of decoding a batch of raw rows.
///
/// A malformed row lands in `rejected` without aborting the rest.
#[derive(Debug, Default)]
pub struct Decoded {
  pub rows:     Vec<CatalogRow>,
  pub rejected: Vec<Error>,
}

impl FromIterator<Result<CatalogRow>> for Decoded {
  fn from_iter<I: IntoIterator<Item = Result<CatalogRow>>>(iter: I) -> Self {
    let mut decoded = Decoded::default();
    for result in iter {
      match result {
        Ok(row) => decoded.rows.push(row),
        Err(e) => decoded.rejected.push(e),
      }
    }
    decoded
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Decode archive rows (JSON objects keyed by archive column names).
pub fn decode_archive(rows: &[RawRow]) -> Decoded {
  rows.iter().map(archive::decode_row).collect()
}

/// Decode community rows produced by [`parse_community_csv`].
pub fn decode_community(rows: &[RawRow]) -> Decoded {
  rows.iter().map(community::decode_row).collect()
}

/// Parse the community catalog's CSV text into raw rows.
///
/// Fails only when the text is not CSV at all (no header, broken quoting);
/// callers treat that as "community catalog unavailable".
pub fn parse_community_csv(input: &str) -> Result<Vec<RawRow>> {
  community::parse_csv(input)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn decode_collects_rejections_without_aborting() {
    let rows: Vec<RawRow> = vec![
      json!({ "hostname": "HD 1", "pl_name": "HD 1 b" }),
      json!({ "pl_name": "orphan b" }),
      json!({ "hostname": "HD 2" }),
    ]
    .into_iter()
    .map(|v| v.as_object().cloned().unwrap())
    .collect();

    let decoded = decode_archive(&rows);
    assert_eq!(decoded.rows.len(), 2);
    assert_eq!(decoded.rejected.len(), 1);
  }
}
