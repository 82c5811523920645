//! Error type for `exofuse-upstream`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The upstream answered with a non-success status.
  #[error("{url} responded with status {status}")]
  Status { url: String, status: u16 },

  #[error("reading {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The archive payload was JSON but not an array of objects.
  #[error("archive payload is not an array of row objects")]
  NotRows,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
