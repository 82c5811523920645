//! HTTP server for exofuse.
//!
//! Hosts the JSON API under `/api` with request tracing, backed by the live
//! catalogs over HTTP.

use std::time::Duration;

use axum::Router;
use exofuse_api::{AppState, DEFAULT_MAX_AGE_HOURS, SpectraConfig};
use exofuse_core::CatalogSource;
use exofuse_upstream::{ARCHIVE_TAP_URL, COMMUNITY_CSV_URL, HttpCatalog};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered with
/// `EXOFUSE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  /// Archive TAP endpoint.
  #[serde(default = "default_archive_url")]
  pub archive_url:         String,
  /// Community CSV export. Empty disables the community catalog.
  #[serde(default = "default_community_url")]
  pub community_url:       String,
  #[serde(default = "default_cache_max_age_hours")]
  pub cache_max_age_hours: i64,
  #[serde(default = "default_fetch_timeout_secs")]
  pub fetch_timeout_secs:  u64,
  /// External spectra program; absent disables `/api/planet-spectra`.
  #[serde(default)]
  pub spectra:             Option<SpectraConfig>,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }
fn default_archive_url() -> String { ARCHIVE_TAP_URL.to_string() }
fn default_community_url() -> String { COMMUNITY_CSV_URL.to_string() }
fn default_cache_max_age_hours() -> i64 { DEFAULT_MAX_AGE_HOURS }
fn default_fetch_timeout_secs() -> u64 { 120 }

impl ServerConfig {
  /// Build the live catalog source this configuration describes.
  pub fn http_catalog(&self) -> exofuse_upstream::Result<HttpCatalog> {
    let community = Some(self.community_url.trim())
      .filter(|url| !url.is_empty())
      .map(str::to_string);
    HttpCatalog::new(
      &self.archive_url,
      community,
      Duration::from_secs(self.fetch_timeout_secs),
    )
  }

  /// Build handler state over `source`.
  pub fn state<S: CatalogSource + 'static>(&self, source: S) -> AppState<S> {
    AppState::new(
      source,
      chrono::Duration::hours(self.cache_max_age_hours),
      self.spectra.clone(),
    )
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// The full application: API under `/api` plus request tracing.
pub fn router<S: CatalogSource + 'static>(state: AppState<S>) -> Router {
  Router::new()
    .nest("/api", exofuse_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}
