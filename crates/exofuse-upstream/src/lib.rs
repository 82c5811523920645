//! Where catalog data comes from.
//!
//! Three [`exofuse_core::CatalogSource`] implementations:
//! - [`HttpCatalog`]: the live archive TAP service and community CSV export
//! - [`FileCatalog`]: local dumps for offline runs
//! - [`MemoryCatalog`]: fixed rows for tests

mod file;
mod http;
mod memory;

pub mod error;

use exofuse_core::RawRow;
use serde_json::Value;

pub use error::{Error, Result};
pub use file::FileCatalog;
pub use http::{ARCHIVE_QUERY, ARCHIVE_TAP_URL, COMMUNITY_CSV_URL, HttpCatalog};
pub use memory::MemoryCatalog;

/// Accept a JSON array of objects as archive rows.
pub(crate) fn rows_from_json(value: Value) -> Result<Vec<RawRow>> {
  let Value::Array(items) = value else {
    return Err(Error::NotRows);
  };
  items
    .into_iter()
    .map(|item| match item {
      Value::Object(row) => Ok(row),
      _ => Err(Error::NotRows),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn rows_must_be_objects() {
    assert_eq!(rows_from_json(json!([{ "a": 1 }, {}])).unwrap().len(), 2);
    assert!(matches!(rows_from_json(json!([1])), Err(Error::NotRows)));
    assert!(matches!(rows_from_json(json!({})), Err(Error::NotRows)));
  }
}
