//! Fixed in-memory catalogs.

use std::convert::Infallible;

use exofuse_core::{CatalogSource, RawRow};

/// Serves the rows and CSV text it was built with. Used by tests and by
/// callers that already hold the data.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
  pub archive:   Vec<RawRow>,
  pub community: Option<String>,
}

impl MemoryCatalog {
  pub fn new(archive: Vec<RawRow>, community: Option<String>) -> Self {
    Self { archive, community }
  }
}

impl CatalogSource for MemoryCatalog {
  type Error = Infallible;

  async fn archive_rows(&self) -> Result<Vec<RawRow>, Infallible> {
    Ok(self.archive.clone())
  }

  async fn community_csv(&self) -> Result<Option<String>, Infallible> {
    Ok(self.community.clone())
  }
}
