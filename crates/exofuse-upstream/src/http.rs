//! Live catalogs over HTTP.

use std::time::Duration;

use exofuse_core::{CatalogSource, RawRow};
use reqwest::Client;

use crate::{
  error::{Error, Result},
  rows_from_json,
};

/// Synchronous TAP endpoint of the archive.
pub const ARCHIVE_TAP_URL: &str =
  "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";

/// Community catalog CSV export.
pub const COMMUNITY_CSV_URL: &str = "https://exoplanet.eu/catalog/csv/";

/// Every published confirmed planet solution, one row per solution.
pub const ARCHIVE_QUERY: &str = "\
SELECT pl_name, hostname, ra, dec, sy_dist, st_teff, st_rad, st_mass, st_lum, \
st_spectype, pl_orbsmax, pl_rade, pl_masse, pl_bmasse, pl_orbeccen, pl_eqt, \
pl_dens, pl_insol, pl_orbper \
FROM ps WHERE soltype = 'Published Confirmed' ORDER BY pl_name";

/// Fetches the archive through its TAP query interface and the community
/// catalog as CSV.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
  client:        Client,
  archive_url:   String,
  community_url: Option<String>,
}

impl HttpCatalog {
  /// `community_url = None` disables the community catalog.
  pub fn new(
    archive_url: impl Into<String>,
    community_url: Option<String>,
    timeout: Duration,
  ) -> Result<Self> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self {
      client,
      archive_url: archive_url.into(),
      community_url,
    })
  }

  async fn get(
    &self,
    request: reqwest::RequestBuilder,
    url: &str,
  ) -> Result<reqwest::Response> {
    let resp = request.send().await?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        url:    url.to_string(),
        status: resp.status().as_u16(),
      });
    }
    Ok(resp)
  }
}

impl CatalogSource for HttpCatalog {
  type Error = Error;

  async fn archive_rows(&self) -> Result<Vec<RawRow>> {
    tracing::info!(url = %self.archive_url, "fetching archive");
    let request = self
      .client
      .get(&self.archive_url)
      .query(&[("query", ARCHIVE_QUERY), ("format", "json")]);
    let resp = self.get(request, &self.archive_url).await?;
    let rows = rows_from_json(resp.json().await?)?;
    tracing::info!(rows = rows.len(), "fetched archive");
    Ok(rows)
  }

  async fn community_csv(&self) -> Result<Option<String>> {
    let Some(url) = &self.community_url else {
      return Ok(None);
    };
    tracing::info!(%url, "fetching community catalog");
    let resp = self.get(self.client.get(url), url).await?;
    let text = resp.text().await?;
    tracing::info!(bytes = text.len(), "fetched community catalog");
    Ok(Some(text))
  }
}

#[cfg(test)]
mod tests {
  use axum::{Json, Router, http::StatusCode, routing::get};
  use serde_json::json;

  use super::*;

  /// Serve `app` on an ephemeral port and return its base URL.
  async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
  }

  #[tokio::test]
  async fn fetches_rows_and_csv() {
    let app = Router::new()
      .route(
        "/tap",
        get(|| async { Json(json!([{ "hostname": "HD 1", "pl_name": "HD 1 b" }])) }),
      )
      .route("/csv", get(|| async { "name,star_name\nHD 1 b,HD 1\n" }));
    let base = serve(app).await;

    let catalog = HttpCatalog::new(
      format!("{base}/tap"),
      Some(format!("{base}/csv")),
      Duration::from_secs(5),
    )
    .unwrap();

    let rows = catalog.archive_rows().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["hostname"], "HD 1");
    let csv = catalog.community_csv().await.unwrap().unwrap();
    assert!(csv.starts_with("name,star_name"));
  }

  #[tokio::test]
  async fn non_success_status_is_an_error() {
    let app = Router::new().route("/tap", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let base = serve(app).await;
    let catalog =
      HttpCatalog::new(format!("{base}/tap"), None, Duration::from_secs(5)).unwrap();

    let err = catalog.archive_rows().await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 503, .. }));
    assert!(catalog.community_csv().await.unwrap().is_none());
  }
}
