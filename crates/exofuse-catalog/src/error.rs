//! Error types for the exofuse-catalog codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("row has no usable {0} column")]
  MissingColumn(&'static str),

  #[error("planet {name:?} has status {status:?}, not Confirmed")]
  Unconfirmed { name: String, status: String },

  #[error("CSV input has no header row")]
  MissingHeader,

  #[error("malformed sexagesimal angle: {0:?}")]
  MalformedAngle(String),

  #[error("{axis} out of range: {value}")]
  OutOfRange { axis: &'static str, value: f64 },

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
