//! # Logging Middleware
//!
//! Per-request structured logging and request id propagation.
//!
//! Every request gets a request id, taken from the incoming request id
//! header when present or generated otherwise. The id is stored in the
//! request extensions, recorded on the request span and echoed in the
//! response headers. Completion is logged at a level chosen by status class.
//!
//! # Usage
//!
//! ```ignore
//! use axum::middleware::from_fn_with_state;
//! use contas_api::api::middleware::logging::{LoggingState, logging_middleware};
//!
//! let app = router.layer(from_fn_with_state(
//!     Arc::new(LoggingState::default()),
//!     logging_middleware,
//! ));
//! ```

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Span, debug, error, info, instrument, warn};
use uuid::Uuid;

// ============================================================================
// Configuration
// ============================================================================

/// Logging middleware configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Whether to log request headers at debug level.
    pub log_headers: bool,
    /// Headers whose values are replaced by `[REDACTED]` in logs.
    pub redacted_headers: Vec<String>,
    /// Header carrying the request id.
    pub request_id_header: HeaderName,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_headers: false,
            redacted_headers: vec!["authorization".to_string(), "cookie".to_string()],
            request_id_header: HeaderName::from_static("x-request-id"),
        }
    }
}

impl LoggingConfig {
    /// Enables header logging.
    #[must_use]
    pub fn with_headers(mut self) -> Self {
        self.log_headers = true;
        self
    }
}

// ============================================================================
// Request ID
// ============================================================================

/// A unique request identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generates a random request id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_headers(headers: &HeaderMap, name: &HeaderName) -> Self {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
            .map(|s| Self(s.to_string()))
            .unwrap_or_else(Self::generate)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns header name/value pairs with sensitive values redacted.
#[must_use]
pub fn redact_headers(headers: &HeaderMap, redacted_names: &[String]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if redacted_names
                .iter()
                .any(|r| r.eq_ignore_ascii_case(name.as_str()))
            {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.as_str().to_string(), value)
        })
        .collect()
}

// ============================================================================
// Middleware
// ============================================================================

/// Shared state of the logging middleware.
#[derive(Debug, Clone, Default)]
pub struct LoggingState {
    /// Configuration.
    pub config: LoggingConfig,
}

impl LoggingState {
    /// Creates logging state from a configuration.
    #[must_use]
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }
}

/// Logs each request and tags it with a request id.
#[instrument(skip_all, fields(request_id))]
pub async fn logging_middleware(
    State(state): State<Arc<LoggingState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let config = &state.config;

    let request_id = RequestId::from_headers(request.headers(), &config.request_id_header);
    Span::current().record("request_id", request_id.as_str());
    request.extensions_mut().insert(request_id.clone());

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if config.log_headers {
        let headers = redact_headers(request.headers(), &config.redacted_headers);
        debug!(%method, %path, ?headers, "request headers");
    }
    debug!(%method, %path, query = ?request.uri().query(), "request started");

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response
            .headers_mut()
            .insert(config.request_id_header.clone(), value);
    }

    let status = response.status();
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    if status.is_server_error() {
        error!(%method, %path, status = status.as_u16(), duration_ms, "request failed");
    } else if status.is_client_error() {
        warn!(%method, %path, status = status.as_u16(), duration_ms, "request rejected");
    } else {
        info!(%method, %path, status = status.as_u16(), duration_ms, "request completed");
    }

    response
}
