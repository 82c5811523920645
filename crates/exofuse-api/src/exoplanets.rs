//! Handlers for `/exoplanets`.

use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use exofuse_core::CatalogSource;
use exofuse_fusion::FusionStats;
use serde::Serialize;

use crate::{AppState, cache::Snapshot, error::ApiError};

/// `GET /exoplanets/stats` and `POST /exoplanets/refresh` response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
  pub fetched_at: DateTime<Utc>,
  #[serde(flatten)]
  pub stats:      FusionStats,
}

impl From<&Snapshot> for StatsResponse {
  fn from(snapshot: &Snapshot) -> Self {
    Self {
      fetched_at: snapshot.fetched_at,
      stats:      snapshot.stats.clone(),
    }
  }
}

/// Whether an `If-None-Match` header matches `etag`.
fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
  headers
    .get(header::IF_NONE_MATCH)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| {
      v.split(',')
        .map(|tag| tag.trim().trim_start_matches("W/"))
        .any(|tag| tag == etag || tag == "*")
    })
}

/// `GET /exoplanets`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Result<Response, ApiError>
where
  S: CatalogSource + 'static,
{
  let snapshot = state.cache.get().await?;

  if etag_matches(&headers, &snapshot.etag) {
    return Ok(
      (StatusCode::NOT_MODIFIED, [(header::ETAG, snapshot.etag.clone())])
        .into_response(),
    );
  }

  Ok(
    (
      [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (header::ETAG, snapshot.etag.clone()),
      ],
      snapshot.body.clone(),
    )
      .into_response(),
  )
}

/// `GET /exoplanets/stats`
pub async fn stats<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<StatsResponse>, ApiError>
where
  S: CatalogSource + 'static,
{
  let snapshot = state.cache.get().await?;
  Ok(Json(StatsResponse::from(snapshot.as_ref())))
}

/// `POST /exoplanets/refresh`
pub async fn refresh<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<StatsResponse>, ApiError>
where
  S: CatalogSource + 'static,
{
  let snapshot = state.cache.refresh().await?;
  tracing::info!(systems = snapshot.stats.systems, "dataset refreshed");
  Ok(Json(StatsResponse::from(snapshot.as_ref())))
}
