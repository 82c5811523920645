//! The fused dataset, fetched once and shared until it goes stale.

use std::sync::Arc;

use axum::body::Bytes;
use chrono::{DateTime, Duration, Utc};
use exofuse_core::CatalogSource;
use exofuse_fusion::{FusionStats, fuse_with_csv};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::error::ApiError;

/// One week.
pub const DEFAULT_MAX_AGE_HOURS: i64 = 24 * 7;

/// One fusion result, serialised once for every reader.
#[derive(Debug)]
pub struct Snapshot {
  /// The emitted systems as a JSON array.
  pub body:       Bytes,
  pub etag:       String,
  pub stats:      FusionStats,
  pub fetched_at: DateTime<Utc>,
}

/// Strong ETag over a response body.
pub fn compute_etag(body: &[u8]) -> String {
  format!("\"{}\"", hex::encode(Sha256::digest(body)))
}

/// Holds the latest [`Snapshot`] for a catalog source.
///
/// The lock is held across a rebuild, so concurrent requests that find the
/// dataset stale wait for a single fetch instead of starting their own.
pub struct DatasetCache<S> {
  source:  Arc<S>,
  max_age: Duration,
  current: Mutex<Option<Arc<Snapshot>>>,
}

impl<S> DatasetCache<S>
where
  S: CatalogSource + 'static,
{
  pub fn new(source: Arc<S>, max_age: Duration) -> Self {
    Self {
      source,
      max_age,
      current: Mutex::new(None),
    }
  }

  /// The cached snapshot, rebuilt first if missing or older than `max_age`.
  pub async fn get(&self) -> Result<Arc<Snapshot>, ApiError> {
    let mut current = self.current.lock().await;
    if let Some(snapshot) = current.as_ref()
      && Utc::now() - snapshot.fetched_at < self.max_age
    {
      return Ok(snapshot.clone());
    }
    let snapshot = Arc::new(self.build().await?);
    *current = Some(snapshot.clone());
    Ok(snapshot)
  }

  /// Rebuild unconditionally. On failure the previous snapshot is kept.
  pub async fn refresh(&self) -> Result<Arc<Snapshot>, ApiError> {
    let mut current = self.current.lock().await;
    let snapshot = Arc::new(self.build().await?);
    *current = Some(snapshot.clone());
    Ok(snapshot)
  }

  async fn build(&self) -> Result<Snapshot, ApiError> {
    let (archive, community) = tokio::try_join!(
      self.source.archive_rows(),
      self.source.community_csv()
    )
    .map_err(|e| ApiError::Upstream(Box::new(e)))?;

    let output = tokio::task::spawn_blocking(move || {
      fuse_with_csv(&archive, community.as_deref())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("fusion task failed: {e}")))?;

    let body = serde_json::to_vec(&output.systems)
      .map_err(|e| ApiError::Internal(format!("serialising systems: {e}")))?;
    let etag = compute_etag(&body);

    Ok(Snapshot {
      body: Bytes::from(body),
      etag,
      stats: output.stats,
      fetched_at: Utc::now(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn etag_is_quoted_sha256() {
    let etag = compute_etag(b"[]");
    assert!(etag.starts_with('"') && etag.ends_with('"'));
    assert_eq!(etag.len(), 64 + 2);
    assert_eq!(etag, compute_etag(b"[]"));
    assert_ne!(etag, compute_etag(b"[{}]"));
  }
}
