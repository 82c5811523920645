//! Sky-coordinate parsing.
//!
//! Accepted forms, for both right ascension and declination:
//! - decimal degrees (`"297.69"`, JSON numbers)
//! - colon or space separated sexagesimal (`"19:50:47.0"`, `"+08 52 06"`)
//! - unit-lettered sexagesimal (`"19h50m47s"`, `"08d52m06s"`)
//!
//! Sexagesimal right ascension is in hours; declination in degrees.

use serde_json::Value;

use crate::{
  error::{Error, Result},
  value::number,
};

#[derive(Clone, Copy)]
enum Axis {
  RightAscension,
  Declination,
}

impl Axis {
  fn name(self) -> &'static str {
    match self {
      Axis::RightAscension => "right ascension",
      Axis::Declination => "declination",
    }
  }

  /// Degrees per leading sexagesimal unit.
  fn unit_degrees(self) -> f64 {
    match self {
      Axis::RightAscension => 15.0,
      Axis::Declination => 1.0,
    }
  }

  fn check(self, degrees: f64) -> Result<f64> {
    let ok = match self {
      Axis::RightAscension => (0.0..360.0).contains(&degrees),
      Axis::Declination => (-90.0..=90.0).contains(&degrees),
    };
    if ok {
      Ok(degrees)
    } else {
      Err(Error::OutOfRange {
        axis:  self.name(),
        value: degrees,
      })
    }
  }
}

/// Parse a right ascension string into decimal degrees.
pub fn parse_ra(input: &str) -> Result<f64> {
  parse_angle(input, Axis::RightAscension)
}

/// Parse a declination string into decimal degrees.
pub fn parse_dec(input: &str) -> Result<f64> {
  parse_angle(input, Axis::Declination)
}

/// Lenient cell reader: any failure reads as `None`.
pub(crate) fn ra_cell(value: &Value) -> Option<f64> {
  angle_cell(value, Axis::RightAscension)
}

pub(crate) fn dec_cell(value: &Value) -> Option<f64> {
  angle_cell(value, Axis::Declination)
}

fn angle_cell(value: &Value, axis: Axis) -> Option<f64> {
  match value {
    Value::String(s) => parse_angle(s, axis).ok(),
    other => number(other).and_then(|d| axis.check(d).ok()),
  }
}

fn parse_angle(input: &str, axis: Axis) -> Result<f64> {
  let trimmed = input.trim();
  let malformed = || Error::MalformedAngle(input.to_string());

  if let Ok(degrees) = trimmed.parse::<f64>() {
    if !degrees.is_finite() {
      return Err(malformed());
    }
    return axis.check(degrees);
  }

  let negative = trimmed.starts_with('-');
  let unsigned = trimmed.trim_start_matches(['-', '+']);

  let parts: Vec<f64> = unsigned
    .split(|c: char| {
      c == ':'
        || c.is_whitespace()
        || matches!(c, 'h' | 'm' | 's' | 'd' | '°' | '\'' | '"')
    })
    .filter(|p| !p.is_empty())
    .map(|p| p.parse::<f64>().map_err(|_| malformed()))
    .collect::<Result<_>>()?;

  if parts.len() < 2 || parts.len() > 3 {
    return Err(malformed());
  }
  let lead = parts[0];
  let minutes = parts[1];
  let seconds = parts.get(2).copied().unwrap_or(0.0);
  if lead < 0.0 || !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds)
  {
    return Err(malformed());
  }

  let magnitude = (lead + minutes / 60.0 + seconds / 3600.0) * axis.unit_degrees();
  axis.check(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn decimal_degrees_pass_through() {
    assert_relative_eq!(parse_ra("297.69").unwrap(), 297.69);
    assert_relative_eq!(parse_dec("-12.5").unwrap(), -12.5);
  }

  #[test]
  fn colon_sexagesimal_ra_is_hours() {
    assert_relative_eq!(parse_ra("19:50:47").unwrap(), 297.695_833_333, epsilon = 1e-6);
    assert_relative_eq!(parse_ra("12 30").unwrap(), 187.5, epsilon = 1e-9);
  }

  #[test]
  fn negative_zero_degree_declination_keeps_sign() {
    assert_relative_eq!(parse_dec("-00:30:00").unwrap(), -0.5, epsilon = 1e-9);
    assert_relative_eq!(parse_dec("+08 52 06").unwrap(), 8.868_333_333, epsilon = 1e-6);
  }

  #[test]
  fn lettered_sexagesimal() {
    assert_relative_eq!(parse_ra("19h50m47s").unwrap(), 297.695_833_333, epsilon = 1e-6);
    assert_relative_eq!(parse_dec("-45d30m").unwrap(), -45.5, epsilon = 1e-9);
  }

  #[test]
  fn rejects_garbage_and_out_of_range() {
    assert!(matches!(parse_ra("abc"), Err(Error::MalformedAngle(_))));
    assert!(matches!(parse_ra("25:00:00"), Err(Error::OutOfRange { .. })));
    assert!(matches!(parse_dec("95"), Err(Error::OutOfRange { .. })));
    assert!(matches!(parse_dec("10:75:00"), Err(Error::MalformedAngle(_))));
  }

  #[test]
  fn cells_degrade_to_none() {
    assert_eq!(ra_cell(&json!("not an angle")), None);
    assert_eq!(ra_cell(&json!(400.0)), None);
    assert_eq!(dec_cell(&json!(-30.0)), Some(-30.0));
  }
}
