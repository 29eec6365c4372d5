//! # REST Error Responses
//!
//! Maps failures to HTTP status codes and JSON bodies.
//!
//! | Failure | Status | Body |
//! |---|---|---|
//! | record not found | 404 | `{"message": "Oops! ... não encontrado(a)."}` |
//! | field rule | 400 | `{"detail": "<message>"}` |
//! | monthly quota | 422 | `{"detail": "<message>"}` |
//! | request schema | 422 | `{"detail": [<violation>, ...]}` |
//! | forecast overflow | 500 | `{"detail": "<message>"}` |
//! | storage | 500 | `{"detail": "<message>"}` |
//!
//! Storage causes are logged and never sent to the client.

use crate::application::dto::FieldViolation;
use crate::application::error::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Body of a generic server error.
pub const INTERNAL_ERROR_DETAIL: &str = "Erro interno do servidor";

/// Error returned by REST handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A use case failed.
    Application(ApplicationError),
    /// The request did not match the expected schema.
    InvalidRequest(Vec<FieldViolation>),
}

impl ApiError {
    /// Creates a schema error with a single violation.
    #[must_use]
    pub fn invalid(violation: FieldViolation) -> Self {
        Self::InvalidRequest(vec![violation])
    }

    /// Returns the HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Application(err) => match err {
                ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
                ApplicationError::Domain(e) if e.is_quota() => StatusCode::UNPROCESSABLE_ENTITY,
                ApplicationError::Domain(e) if e.is_arithmetic() => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                ApplicationError::Domain(_) => StatusCode::BAD_REQUEST,
                ApplicationError::Repository(_) | ApplicationError::Persistence { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self::Application(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::InvalidRequest(violations) => json!({ "detail": violations }),
            Self::Application(ApplicationError::NotFound(description)) => {
                json!({ "message": format!("Oops! {description} não encontrado(a).") })
            }
            Self::Application(ApplicationError::Domain(e)) => json!({ "detail": e.to_string() }),
            Self::Application(ApplicationError::Persistence { message, source }) => {
                error!(error = %source, "{message}");
                json!({ "detail": message })
            }
            Self::Application(ApplicationError::Repository(e)) => {
                error!(error = %e, "storage failure");
                json!({ "detail": INTERNAL_ERROR_DETAIL })
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for REST handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::value_objects::EntryId;
    use crate::infrastructure::persistence::RepositoryError;
    use serde_json::Value;

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_uses_message_key() {
        let (status, body) =
            body_of(ApplicationError::entry_not_found(EntryId::new(999)).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"message": "Oops! Conta com ID 999 não encontrado(a)."})
        );
    }

    #[tokio::test]
    async fn field_rule_is_bad_request() {
        let (status, body) =
            body_of(ApplicationError::from(DomainError::NonPositiveAmount).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": "Valor deve ser positivo"}));
    }

    #[tokio::test]
    async fn quota_is_unprocessable() {
        let err = DomainError::MonthlyQuotaExceeded {
            year: 2025,
            month: 5,
            limit: 5,
        };
        let (status, body) = body_of(ApplicationError::from(err).into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({"detail": "Limite de contas atingido para o mês"}));
    }

    #[tokio::test]
    async fn forecast_overflow_is_server_error() {
        let err = ApplicationError::from(DomainError::ForecastOverflow { month: 5 });
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"detail": "Total do mês 5 excede o valor máximo representável"})
        );
    }

    #[tokio::test]
    async fn repository_cause_is_hidden() {
        let err = ApplicationError::from(RepositoryError::query("relation does not exist"));
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Erro interno do servidor"}));
    }

    #[tokio::test]
    async fn persistence_uses_fixed_message() {
        let err = ApplicationError::persistence(
            ApplicationError::CREATE_ENTRY_FAILED,
            RepositoryError::unavailable("down"),
        );
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Erro ao criar conta"}));
    }

    #[tokio::test]
    async fn schema_violations_are_listed() {
        let err = ApiError::invalid(FieldViolation::missing(&["body", "nome"]));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({"detail": [{"loc": ["body", "nome"], "msg": "Field required", "type": "missing"}]})
        );
    }
}
