//! # REST Handlers
//!
//! Request handlers for the ledger endpoints.
//!
//! # Endpoints
//!
//! ## Entries
//! - `GET /contas-a-pagar-e-receber` - List entries
//! - `GET /contas-a-pagar-e-receber/{id}` - Get entry by ID
//! - `POST /contas-a-pagar-e-receber` - Create entry
//! - `PUT /contas-a-pagar-e-receber/{id}` - Update entry
//! - `DELETE /contas-a-pagar-e-receber/{id}` - Delete entry
//! - `POST /contas-a-pagar-e-receber/{id}/baixar` - Settle entry
//! - `GET /contas-a-pagar-e-receber/previsao-gastos-do-mes?ano=YYYY` - Forecast
//!
//! ## Counterparties
//! - `GET /fornecedor-cliente` - List counterparties
//! - `GET /fornecedor-cliente/{id}` - Get counterparty by ID
//! - `POST /fornecedor-cliente` - Create counterparty
//! - `PUT /fornecedor-cliente/{id}` - Rename counterparty
//! - `DELETE /fornecedor-cliente/{id}` - Delete counterparty
//! - `GET /fornecedor-cliente/{id}/contas-a-pagar-e-receber` - Its entries

use crate::api::rest::error::{ApiError, ApiResult};
use crate::api::rest::extract::ValidatedJson;
use crate::application::dto::{
    CounterpartyRequest, CounterpartyResponse, EntryRequest, EntryResponse, FieldViolation,
    ForecastResponse,
};
use crate::application::use_cases::{
    CounterpartyUseCases, EntryDetails, EntryUseCases, ForecastUseCase, SettleEntryUseCase,
};
use crate::domain::services::MonthlyQuota;
use crate::domain::value_objects::{CounterpartyId, EntryId};
use crate::infrastructure::persistence::Store;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for REST handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Counterparty workflows.
    pub counterparties: CounterpartyUseCases,
    /// Entry workflows.
    pub entries: EntryUseCases,
    /// Settlement.
    pub settle: SettleEntryUseCase,
    /// Spending forecast.
    pub forecast: ForecastUseCase,
}

impl AppState {
    /// Wires every use case to the same store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, quota: MonthlyQuota) -> Self {
        Self {
            counterparties: CounterpartyUseCases::new(Arc::clone(&store)),
            entries: EntryUseCases::new(Arc::clone(&store), quota),
            settle: SettleEntryUseCase::new(Arc::clone(&store)),
            forecast: ForecastUseCase::new(store),
        }
    }
}

// ============================================================================
// Entry Handlers
// ============================================================================

/// List all entries.
#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<EntryResponse>>> {
    let entries = state.entries.list().await?;
    Ok(Json(entries.iter().map(to_response).collect()))
}

/// Get an entry by ID.
///
/// # Errors
///
/// 404 if the entry does not exist.
#[instrument(skip(state))]
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<EntryResponse>> {
    let id = parse_entry_id(&id)?;
    let details = state.entries.get(id).await?;
    Ok(Json(to_response(&details)))
}

/// Create an entry.
///
/// # Errors
///
/// 404 for an unknown counterparty, 422 when the month is full, 400 when a
/// field rule fails and 500 if the insert fails.
#[instrument(skip(state, request), fields(request = %request))]
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<EntryRequest>,
) -> ApiResult<(StatusCode, Json<EntryResponse>)> {
    let details = state.entries.create(&request).await?;
    Ok((StatusCode::CREATED, Json(to_response(&details))))
}

/// Replace an entry's fields.
#[instrument(skip(state, request), fields(request = %request))]
pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<EntryRequest>,
) -> ApiResult<Json<EntryResponse>> {
    let id = parse_entry_id(&id)?;
    let details = state.entries.update(id, &request).await?;
    Ok(Json(to_response(&details)))
}

/// Delete an entry.
#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_entry_id(&id)?;
    state.entries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Settle an entry as of today.
#[instrument(skip(state))]
pub async fn settle_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<EntryResponse>> {
    let id = parse_entry_id(&id)?;
    let details = state.settle.execute(id).await?;
    Ok(Json(to_response(&details)))
}

/// Query string of the forecast endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastQuery {
    /// Year to forecast; the current year when absent.
    pub ano: Option<String>,
}

/// Payable totals per month of a year.
///
/// # Errors
///
/// 422 if `ano` is not an integer.
#[instrument(skip(state))]
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ForecastQuery>,
) -> ApiResult<Json<Vec<ForecastResponse>>> {
    let year = match query.ano.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ApiError::invalid(FieldViolation::int_parsing(&["query", "ano"], raw)))?,
        None => Local::now().year(),
    };
    let totals = state.forecast.execute(year).await?;
    Ok(Json(totals.into_iter().map(ForecastResponse::from).collect()))
}

// ============================================================================
// Counterparty Handlers
// ============================================================================

/// List all counterparties.
///
/// # Errors
///
/// 404 when there are none.
#[instrument(skip(state))]
pub async fn list_counterparties(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CounterpartyResponse>>> {
    let all = state.counterparties.list().await?;
    Ok(Json(all.into_iter().map(CounterpartyResponse::from).collect()))
}

/// Get a counterparty by ID.
#[instrument(skip(state))]
pub async fn get_counterparty(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CounterpartyResponse>> {
    let id = parse_counterparty_id(&id)?;
    let counterparty = state.counterparties.get(id).await?;
    Ok(Json(CounterpartyResponse::from(counterparty)))
}

/// Create a counterparty.
#[instrument(skip(state))]
pub async fn create_counterparty(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CounterpartyRequest>,
) -> ApiResult<(StatusCode, Json<CounterpartyResponse>)> {
    let counterparty = state.counterparties.create(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CounterpartyResponse::from(counterparty)),
    ))
}

/// Rename a counterparty.
#[instrument(skip(state))]
pub async fn update_counterparty(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<CounterpartyRequest>,
) -> ApiResult<Json<CounterpartyResponse>> {
    let id = parse_counterparty_id(&id)?;
    let counterparty = state.counterparties.update(id, &request).await?;
    Ok(Json(CounterpartyResponse::from(counterparty)))
}

/// Delete a counterparty. Its entries stay, without a counterparty.
#[instrument(skip(state))]
pub async fn delete_counterparty(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_counterparty_id(&id)?;
    state.counterparties.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Entries referencing a counterparty.
#[instrument(skip(state))]
pub async fn counterparty_entries(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<EntryResponse>>> {
    let id = parse_counterparty_id(&id)?;
    let entries = state.counterparties.entries_for(id).await?;
    Ok(Json(entries.iter().map(to_response).collect()))
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

fn to_response(details: &EntryDetails) -> EntryResponse {
    EntryResponse::new(&details.entry, details.counterparty.as_ref())
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::invalid(FieldViolation::int_parsing(&["path", "id"], raw)))
}

fn parse_entry_id(raw: &str) -> Result<EntryId, ApiError> {
    parse_id(raw).map(EntryId::new)
}

fn parse_counterparty_id(raw: &str) -> Result<CounterpartyId, ApiError> {
    parse_id(raw).map(CounterpartyId::new)
}
