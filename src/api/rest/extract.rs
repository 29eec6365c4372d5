//! # Request Extractors
//!
//! Extractors that report malformed input as schema violations instead of
//! axum's plain-text rejections.

use crate::api::rest::error::ApiError;
use crate::application::dto::FieldViolation;
use crate::application::dto::validation::{RequestSchema, missing_fields};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON body decoded into `T` and checked against its [`RequestSchema`].
///
/// Rejections, in order:
/// 1. body is not JSON: `json_invalid`
/// 2. body is not an object: `value_error` at `["body"]`
/// 3. required keys absent: one `missing` per key
/// 4. a field has the wrong type: `value_error` at `["body"]`
/// 5. field constraints broken: whatever [`RequestSchema::violations`] reports
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + RequestSchema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid(FieldViolation::json_invalid(e.body_text())))?;
        decode(&bytes).map(Self)
    }
}

/// Decodes and checks a raw request body.
pub fn decode<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + RequestSchema,
{
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::invalid(FieldViolation::json_invalid(e.to_string())))?;

    let Some(object) = value.as_object() else {
        return Err(ApiError::invalid(FieldViolation::value_error(
            &["body"],
            "Input should be a valid dictionary",
        )));
    };

    let missing = missing_fields(object, T::REQUIRED_FIELDS);
    if !missing.is_empty() {
        return Err(ApiError::InvalidRequest(missing));
    }

    let decoded: T = serde_json::from_value(value)
        .map_err(|e| ApiError::invalid(FieldViolation::value_error(&["body"], e.to_string())))?;

    let violations = decoded.violations();
    if violations.is_empty() {
        Ok(decoded)
    } else {
        Err(ApiError::InvalidRequest(violations))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::dto::{CounterpartyRequest, EntryRequest};

    fn violations<T: DeserializeOwned + RequestSchema + std::fmt::Debug>(
        body: &str,
    ) -> Vec<FieldViolation> {
        match decode::<T>(body.as_bytes()).unwrap_err() {
            ApiError::InvalidRequest(v) => v,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn valid_body_decodes() {
        let req: CounterpartyRequest = decode(br#"{"nome": "Fornecedor 1"}"#).unwrap();
        assert_eq!(req.nome, "Fornecedor 1");
    }

    #[test]
    fn broken_json_is_json_invalid() {
        let v = violations::<CounterpartyRequest>("{\"nome\": ");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, "json_invalid");
    }

    #[test]
    fn array_body_is_rejected() {
        let v = violations::<CounterpartyRequest>("[1, 2]");
        assert_eq!(v[0].loc, vec!["body"]);
        assert_eq!(v[0].kind, "value_error");
    }

    #[test]
    fn every_missing_field_is_listed() {
        let v = violations::<EntryRequest>(r#"{"descricao": "Luz"}"#);
        let locs: Vec<_> = v.iter().map(|x| x.loc[1].as_str()).collect();
        assert_eq!(locs, vec!["valor", "tipo", "data_previsao"]);
        assert!(v.iter().all(|x| x.kind == "missing"));
    }

    #[test]
    fn wrong_type_is_value_error() {
        let v = violations::<EntryRequest>(
            r#"{"descricao": "Luz", "valor": "abc", "tipo": "Pagar", "data_previsao": "2025-05-01"}"#,
        );
        assert_eq!(v[0].kind, "value_error");
    }

    #[test]
    fn constraint_violations_are_reported() {
        let v = violations::<CounterpartyRequest>(r#"{"nome": "F"}"#);
        assert_eq!(v[0].kind, "string_too_short");
        assert_eq!(v[0].loc, vec!["body", "nome"]);
    }
}
