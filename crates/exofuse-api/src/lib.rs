//! JSON REST API for exofuse.
//!
//! Exposes an axum [`Router`] backed by any [`exofuse_core::CatalogSource`].
//! Logging layers and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", exofuse_api::api_router(state))
//! ```

pub mod cache;
pub mod error;
pub mod exoplanets;
pub mod spectra;

use std::sync::Arc;

use axum::{
  Json,
  Router,
  extract::{Path, State},
  routing::{get, post},
};
use exofuse_core::CatalogSource;
use serde_json::Value;

pub use cache::{DEFAULT_MAX_AGE_HOURS, DatasetCache, Snapshot};
pub use error::ApiError;
pub use spectra::SpectraConfig;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub cache:   Arc<DatasetCache<S>>,
  /// `None` disables `/planet-spectra`.
  pub spectra: Option<Arc<SpectraConfig>>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      cache:   self.cache.clone(),
      spectra: self.spectra.clone(),
    }
  }
}

impl<S> AppState<S>
where
  S: CatalogSource + 'static,
{
  pub fn new(
    source: S,
    max_age: chrono::Duration,
    spectra: Option<SpectraConfig>,
  ) -> Self {
    Self {
      cache:   Arc::new(DatasetCache::new(Arc::new(source), max_age)),
      spectra: spectra.map(Arc::new),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: CatalogSource + 'static,
{
  Router::new()
    .route("/exoplanets", get(exoplanets::list::<S>))
    .route("/exoplanets/stats", get(exoplanets::stats::<S>))
    .route("/exoplanets/refresh", post(exoplanets::refresh::<S>))
    .route("/planet-spectra/{name}", get(planet_spectra::<S>))
    .with_state(state)
}

/// `GET /planet-spectra/{name}`
async fn planet_spectra<S>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: CatalogSource + 'static,
{
  let config = state
    .spectra
    .as_ref()
    .ok_or_else(|| ApiError::NotFound("planet spectra are not configured".into()))?;
  spectra::run(config, &name).await.map(Json)
}

#[cfg(test)]
mod tests;
