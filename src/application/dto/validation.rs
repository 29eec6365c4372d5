//! # Request Schema Validation
//!
//! Structural checks on decoded request bodies, reported as a list of
//! [`FieldViolation`]s.
//!
//! Each violation names where the offending value lives (`["body", "nome"]`,
//! `["path", "id"]`, ...), a message and a machine-readable type.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Location of the value, starting with `body`, `path` or `query`.
    pub loc: Vec<String>,
    /// Human-readable message.
    pub msg: String,
    /// Violation type, e.g. `missing` or `string_too_short`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Offending input, when there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    /// Constraint parameters, e.g. `{"min_length": 3}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldViolation {
    fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| (*s).to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
            input: None,
            ctx: None,
        }
    }

    /// A required field is absent.
    #[must_use]
    pub fn missing(loc: &[&str]) -> Self {
        Self::new(loc, "Field required", "missing")
    }

    /// A string is shorter than `min` characters.
    #[must_use]
    pub fn too_short(loc: &[&str], min: usize, input: &str) -> Self {
        Self {
            input: Some(json!(input)),
            ctx: Some(json!({ "min_length": min })),
            ..Self::new(
                loc,
                format!("String should have at least {min} characters"),
                "string_too_short",
            )
        }
    }

    /// A string is longer than `max` characters.
    #[must_use]
    pub fn too_long(loc: &[&str], max: usize, input: &str) -> Self {
        Self {
            input: Some(json!(input)),
            ctx: Some(json!({ "max_length": max })),
            ..Self::new(
                loc,
                format!("String should have at most {max} characters"),
                "string_too_long",
            )
        }
    }

    /// A number is greater than `max`.
    #[must_use]
    pub fn too_large(loc: &[&str], max: impl fmt::Display, input: impl fmt::Display) -> Self {
        Self {
            input: Some(json!(input.to_string())),
            ctx: Some(json!({ "le": max.to_string() })),
            ..Self::new(
                loc,
                format!("Input should be less than or equal to {max}"),
                "less_than_equal",
            )
        }
    }

    /// A path or query value is not an integer.
    #[must_use]
    pub fn int_parsing(loc: &[&str], input: &str) -> Self {
        Self {
            input: Some(json!(input)),
            ..Self::new(
                loc,
                "Input should be a valid integer, unable to parse string as an integer",
                "int_parsing",
            )
        }
    }

    /// The body is not valid JSON.
    #[must_use]
    pub fn json_invalid(error: impl Into<String>) -> Self {
        Self {
            ctx: Some(json!({ "error": error.into() })),
            ..Self::new(&["body"], "JSON decode error", "json_invalid")
        }
    }

    /// A value has the wrong shape or type.
    #[must_use]
    pub fn value_error(loc: &[&str], msg: impl Into<String>) -> Self {
        Self::new(loc, msg, "value_error")
    }
}

/// A decoded request whose fields carry structural constraints.
pub trait RequestSchema {
    /// Body fields that must be present.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Returns every constraint the request breaks, in field order.
    fn violations(&self) -> Vec<FieldViolation>;
}

/// Returns a `missing` violation for each required field absent from `body`.
#[must_use]
pub fn missing_fields(
    body: &serde_json::Map<String, Value>,
    required: &[&str],
) -> Vec<FieldViolation> {
    required
        .iter()
        .filter(|field| !body.contains_key(**field))
        .map(|field| FieldViolation::missing(&["body", field]))
        .collect()
}

/// Pushes a violation if `value` is not between `min` and `max` characters.
pub fn check_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
    violations: &mut Vec<FieldViolation>,
) {
    let chars = value.chars().count();
    if chars < min {
        violations.push(FieldViolation::too_short(&["body", field], min, value));
    } else if chars > max {
        violations.push(FieldViolation::too_long(&["body", field], max, value));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn too_short_matches_wire_shape() {
        let v = FieldViolation::too_short(&["body", "nome"], 3, "F");
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({
                "ctx": {"min_length": 3},
                "input": "F",
                "loc": ["body", "nome"],
                "msg": "String should have at least 3 characters",
                "type": "string_too_short"
            })
        );
    }

    #[test]
    fn missing_has_no_input_or_ctx() {
        let v = FieldViolation::missing(&["body", "nome"]);
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({"loc": ["body", "nome"], "msg": "Field required", "type": "missing"})
        );
    }

    #[test]
    fn too_large_carries_bound_in_ctx() {
        let v = FieldViolation::too_large(&["body", "valor"], 1000, "5000");
        assert_eq!(v.kind, "less_than_equal");
        assert_eq!(v.ctx, Some(json!({"le": "1000"})));
        assert_eq!(v.input, Some(json!("5000")));
    }

    #[test]
    fn missing_fields_reports_each_absent_key() {
        let body = json!({"descricao": "Luz", "tipo": null});
        let missing = missing_fields(body.as_object().unwrap(), &["descricao", "valor", "tipo"]);
        assert_eq!(missing, vec![FieldViolation::missing(&["body", "valor"])]);
    }

    #[test]
    fn check_length_counts_characters_not_bytes() {
        let mut out = Vec::new();
        check_length("nome", "Açú", 3, 255, &mut out);
        assert!(out.is_empty());

        check_length("nome", "ab", 3, 255, &mut out);
        check_length("nome", &"x".repeat(256), 3, 255, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, "string_too_short");
        assert_eq!(out[1].kind, "string_too_long");
    }
}
