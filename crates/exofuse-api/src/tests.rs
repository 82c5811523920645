//! Router tests against in-memory catalogs.

use std::sync::{
  Arc,
  atomic::{AtomicUsize, Ordering},
};

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use exofuse_core::{CatalogSource, RawRow};
use exofuse_upstream::MemoryCatalog;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{AppState, SpectraConfig, api_router};

fn kepler_10() -> MemoryCatalog {
  let archive = json!([{
    "hostname": "Kepler-10",
    "pl_name": "Kepler-10 b",
    "sy_dist": 173.0,
    "st_teff": 5700.0,
    "st_rad": 1.06,
    "pl_rade": 1.47,
    "pl_masse": 3.3,
  }]);
  let rows: Vec<RawRow> = archive
    .as_array()
    .unwrap()
    .iter()
    .map(|v| v.as_object().cloned().unwrap())
    .collect();
  MemoryCatalog::new(
    rows,
    Some("name,star_name,spType\nKepler-10 c,Kepler-10,G\n".to_string()),
  )
}

fn state<S: CatalogSource + 'static>(source: S) -> AppState<S> {
  AppState::new(source, chrono::Duration::hours(1), None)
}

async fn send<S: CatalogSource + 'static>(
  state: &AppState<S>,
  method: &str,
  uri: &str,
  headers: Vec<(header::HeaderName, &str)>,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  for (k, v) in headers {
    builder = builder.header(k, v);
  }
  let req = builder.body(Body::empty()).unwrap();
  api_router(state.clone()).oneshot(req).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

/// Counts archive fetches; optionally fails them.
struct CountingCatalog {
  inner:   MemoryCatalog,
  fetches: Arc<AtomicUsize>,
  fail:    bool,
}

impl CatalogSource for CountingCatalog {
  type Error = std::io::Error;

  async fn archive_rows(&self) -> Result<Vec<RawRow>, std::io::Error> {
    self.fetches.fetch_add(1, Ordering::SeqCst);
    if self.fail {
      return Err(std::io::Error::other("archive unreachable"));
    }
    Ok(self.inner.archive.clone())
  }

  async fn community_csv(&self) -> Result<Option<String>, std::io::Error> {
    Ok(self.inner.community.clone())
  }
}

fn counting(fail: bool) -> (CountingCatalog, Arc<AtomicUsize>) {
  let fetches = Arc::new(AtomicUsize::new(0));
  let catalog = CountingCatalog {
    inner: kepler_10(),
    fetches: fetches.clone(),
    fail,
  };
  (catalog, fetches)
}

// ─── /exoplanets ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_fused_systems_with_etag() {
  let s = state(kepler_10());
  let resp = send(&s, "GET", "/exoplanets", vec![]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(resp.headers().contains_key(header::ETAG));
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

  let body = json_body(resp).await;
  let systems = body.as_array().unwrap();
  assert_eq!(systems.len(), 1);
  assert_eq!(systems[0]["hostname"], "Kepler-10");
  assert_eq!(systems[0]["dataSource"], "BOTH");
  assert_eq!(systems[0]["st_spectype"], "G");
  assert_eq!(systems[0]["planets"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn matching_if_none_match_is_not_modified() {
  let s = state(kepler_10());
  let first = send(&s, "GET", "/exoplanets", vec![]).await;
  let etag = first.headers()[header::ETAG].to_str().unwrap().to_string();

  let resp = send(&s, "GET", "/exoplanets", vec![(header::IF_NONE_MATCH, etag.as_str())]).await;
  assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
  assert_eq!(resp.headers()[header::ETAG], etag.as_str());

  let resp = send(&s, "GET", "/exoplanets", vec![(header::IF_NONE_MATCH, "\"stale\"")]).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn dataset_is_fetched_once_until_refreshed() {
  let (catalog, fetches) = counting(false);
  let s = state(catalog);

  send(&s, "GET", "/exoplanets", vec![]).await;
  send(&s, "GET", "/exoplanets/stats", vec![]).await;
  assert_eq!(fetches.load(Ordering::SeqCst), 1);

  let resp = send(&s, "POST", "/exoplanets/refresh", vec![]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn stale_dataset_is_refetched() {
  let (catalog, fetches) = counting(false);
  let s = AppState::new(catalog, chrono::Duration::zero(), None);
  send(&s, "GET", "/exoplanets", vec![]).await;
  send(&s, "GET", "/exoplanets", vec![]).await;
  assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
  let (catalog, _) = counting(true);
  let s = state(catalog);
  let resp = send(&s, "GET", "/exoplanets", vec![]).await;
  assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
  let body = json_body(resp).await;
  assert!(body["error"].as_str().unwrap().contains("archive unreachable"));
}

// ─── /exoplanets/stats ───────────────────────────────────────────────────────

#[tokio::test]
async fn stats_describe_the_cached_run() {
  let s = state(kepler_10());
  let resp = send(&s, "GET", "/exoplanets/stats", vec![]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = json_body(resp).await;
  assert_eq!(body["systems"], 1);
  assert_eq!(body["planets"], 2);
  assert_eq!(body["name_matches"], 1);
  assert!(body["fetched_at"].is_string());
}

// ─── /planet-spectra ─────────────────────────────────────────────────────────

#[tokio::test]
async fn spectra_not_configured_is_not_found() {
  let s = state(kepler_10());
  let resp = send(&s, "GET", "/planet-spectra/Kepler-10%20b", vec![]).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[cfg(unix)]
#[tokio::test]
async fn spectra_runs_configured_program() {
  let config = SpectraConfig {
    program:     "sh".into(),
    args:        vec![
      "-c".into(),
      r#"printf '{"planet":"%s","wavelengths":[1.1,1.2]}' "$1""#.into(),
      "sh".into(),
    ],
    working_dir: None,
  };
  let s = AppState::new(kepler_10(), chrono::Duration::hours(1), Some(config));
  let resp = send(&s, "GET", "/planet-spectra/Kepler-10%20b", vec![]).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = json_body(resp).await;
  assert_eq!(body["planet"], "Kepler-10 b");
}

#[cfg(unix)]
#[tokio::test]
async fn failing_spectra_program_is_internal_error() {
  let config = SpectraConfig {
    program:     "sh".into(),
    args:        vec!["-c".into(), "echo no data >&2; exit 1".into(), "sh".into()],
    working_dir: None,
  };
  let s = AppState::new(kepler_10(), chrono::Duration::hours(1), Some(config));
  let resp = send(&s, "GET", "/planet-spectra/nowhere", vec![]).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let body = json_body(resp).await;
  assert!(body["details"].as_str().unwrap().contains("no data"));
}
