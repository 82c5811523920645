//! Lenient cell readers. A cell that fails to parse reads as `None`; dirty
//! upstream data degrades one field at a time, never a whole row.

use exofuse_core::RawRow;
use serde_json::Value;

/// The first of `columns` that holds a non-null, non-blank value.
pub(crate) fn cell<'a>(row: &'a RawRow, columns: &[&str]) -> Option<&'a Value> {
  columns
    .iter()
    .filter_map(|c| row.get(*c))
    .find(|v| match v {
      Value::Null => false,
      Value::String(s) => !s.trim().is_empty(),
      _ => true,
    })
}

/// Parse a finite number from a JSON number or a numeric string.
pub(crate) fn number(value: &Value) -> Option<f64> {
  let n = match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  }?;
  n.is_finite().then_some(n)
}

/// Trimmed, non-empty text. Numbers are rendered as text.
pub(crate) fn text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => {
      let s = s.trim();
      (!s.is_empty()).then(|| s.to_owned())
    }
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// A comma-separated list, trimmed, blanks dropped.
pub(crate) fn list(value: &Value) -> Vec<String> {
  let Some(raw) = text(value) else {
    return Vec::new();
  };
  raw
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
    .collect()
}

/// First numeric cell among `(column, scale)` pairs, multiplied by its scale.
/// A present-but-unparsable cell does not fall through to later aliases.
pub(crate) fn scaled(row: &RawRow, columns: &[(&str, f64)]) -> Option<f64> {
  columns.iter().find_map(|(column, scale)| {
    cell(row, &[*column]).map(|v| number(v).map(|n| n * scale))
  })?
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn row(v: Value) -> RawRow { v.as_object().cloned().unwrap() }

  #[test]
  fn number_accepts_numbers_and_numeric_strings() {
    assert_eq!(number(&json!(1.5)), Some(1.5));
    assert_eq!(number(&json!(" 2.25 ")), Some(2.25));
    assert_eq!(number(&json!("n/a")), None);
    assert_eq!(number(&json!("")), None);
    assert_eq!(number(&json!("NaN")), None);
    assert_eq!(number(&json!(null)), None);
  }

  #[test]
  fn cell_skips_blank_aliases() {
    let r = row(json!({ "star_sp_type": "  ", "spType": "G2 V" }));
    assert_eq!(
      cell(&r, &["star_sp_type", "spType"]).and_then(text),
      Some("G2 V".to_string())
    );
  }

  #[test]
  fn list_splits_on_commas() {
    assert_eq!(list(&json!("H2O, CO2,,Na ")), vec!["H2O", "CO2", "Na"]);
    assert!(list(&json!(null)).is_empty());
  }

  #[test]
  fn scaled_applies_first_present_alias() {
    let r = row(json!({ "mass": "2", "pl_masse": 5.0 }));
    assert_eq!(scaled(&r, &[("mass", 10.0), ("pl_masse", 1.0)]), Some(20.0));
    let r = row(json!({ "pl_masse": 5.0 }));
    assert_eq!(scaled(&r, &[("mass", 10.0), ("pl_masse", 1.0)]), Some(5.0));
    let r = row(json!({ "mass": "junk", "pl_masse": 5.0 }));
    assert_eq!(scaled(&r, &[("mass", 10.0), ("pl_masse", 1.0)]), None);
  }
}
