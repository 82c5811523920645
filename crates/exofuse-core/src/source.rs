//! The `CatalogSource` trait — where raw catalog data comes from.
//!
//! The trait is implemented by `exofuse-upstream` (HTTP, local files,
//! in-memory). Higher layers (`exofuse-api`, the server binary) depend on this
//! abstraction, not on any concrete transport.

use std::future::Future;

/// One undecoded catalog row: column name → JSON value. Archive rows arrive
/// as JSON objects; community CSV rows are lifted into this shape with string
/// values.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// Abstraction over the two upstream catalogs.
///
/// Both methods return `Send` futures so callers can join them on a
/// multi-threaded runtime. A failed fetch is fatal for the caller's fusion
/// run; there is no partial-dataset mode.
pub trait CatalogSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch every archive row (one row per planet solution).
  fn archive_rows(
    &self,
  ) -> impl Future<Output = Result<Vec<RawRow>, Self::Error>> + Send + '_;

  /// Fetch the community catalog as raw CSV text, or `None` if this source
  /// has no community catalog configured.
  fn community_csv(
    &self,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;
}
