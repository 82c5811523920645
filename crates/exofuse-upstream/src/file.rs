//! Catalogs read from local files, for offline runs and fixtures.

use std::path::{Path, PathBuf};

use exofuse_core::{CatalogSource, RawRow};

use crate::{
  error::{Error, Result},
  rows_from_json,
};

/// An archive JSON dump (array of row objects) and an optional community
/// CSV export on disk.
#[derive(Debug, Clone)]
pub struct FileCatalog {
  archive:   PathBuf,
  community: Option<PathBuf>,
}

impl FileCatalog {
  pub fn new(archive: impl Into<PathBuf>, community: Option<PathBuf>) -> Self {
    Self {
      archive: archive.into(),
      community,
    }
  }
}

async fn read(path: &Path) -> Result<String> {
  tokio::fs::read_to_string(path)
    .await
    .map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })
}

impl CatalogSource for FileCatalog {
  type Error = Error;

  async fn archive_rows(&self) -> Result<Vec<RawRow>> {
    let text = read(&self.archive).await?;
    rows_from_json(serde_json::from_str(&text)?)
  }

  async fn community_csv(&self) -> Result<Option<String>> {
    match &self.community {
      Some(path) => Ok(Some(read(path).await?)),
      None => Ok(None),
    }
  }
}
