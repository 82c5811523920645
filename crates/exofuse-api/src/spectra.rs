//! Atmospheric spectra, produced by an external program.
//!
//! The program receives the planet name as its last argument and must print
//! a single JSON document on stdout.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;

use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct SpectraConfig {
  /// Executable to run, e.g. `python3`.
  pub program:     PathBuf,
  /// Arguments placed before the planet name.
  #[serde(default)]
  pub args:        Vec<String>,
  #[serde(default)]
  pub working_dir: Option<PathBuf>,
}

pub async fn run(config: &SpectraConfig, planet: &str) -> Result<Value, ApiError> {
  let planet = planet.trim();
  if planet.is_empty() || planet.starts_with('-') {
    return Err(ApiError::BadRequest(format!("invalid planet name: {planet:?}")));
  }

  let mut command = Command::new(&config.program);
  command.args(&config.args).arg(planet).kill_on_drop(true);
  if let Some(dir) = &config.working_dir {
    command.current_dir(dir);
  }

  tracing::info!(planet, program = %config.program.display(), "running spectra program");
  let output = command.output().await.map_err(|e| ApiError::Spectra {
    message: "failed to start spectra program".into(),
    details: e.to_string(),
  })?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    tracing::warn!(planet, status = %output.status, %stderr, "spectra program failed");
    return Err(ApiError::Spectra {
      message: "spectra program exited with non-zero code".into(),
      details: stderr,
    });
  }

  serde_json::from_slice(&output.stdout).map_err(|_| ApiError::Spectra {
    message: "spectra program output is not JSON".into(),
    details: String::from_utf8_lossy(&output.stdout).into_owned(),
  })
}

#[cfg(all(test, unix))]
mod tests {
  use super::*;

  fn shell(script: &str) -> SpectraConfig {
    SpectraConfig {
      program:     "sh".into(),
      args:        vec!["-c".into(), script.into(), "sh".into()],
      working_dir: None,
    }
  }

  #[tokio::test]
  async fn passes_planet_name_and_parses_stdout() {
    let config = shell(r#"printf '{"planet":"%s"}' "$1""#);
    let value = run(&config, "Kepler-10 b").await.unwrap();
    assert_eq!(value["planet"], "Kepler-10 b");
  }

  #[tokio::test]
  async fn non_zero_exit_reports_stderr() {
    let err = run(&shell("echo boom >&2; exit 3"), "x").await.unwrap_err();
    match err {
      ApiError::Spectra { details, .. } => assert!(details.contains("boom")),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[tokio::test]
  async fn non_json_output_is_an_error() {
    let err = run(&shell("echo hello"), "x").await.unwrap_err();
    assert!(matches!(err, ApiError::Spectra { ref details, .. } if details.contains("hello")));
  }

  #[tokio::test]
  async fn rejects_option_like_names() {
    let err = run(&shell("true"), "--help").await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
  }
}
