//! HTTP API server for the Tessera node.
//!
//! Every response is wrapped in an [`ApiEnvelope`]: `{ success, data?, error? }`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

use tessera_core::{CompositionRule, Credential, Issuer};
use tessera_verify::{resolve_trust, IssuerIndex, VerifyError};

use crate::state::NodeState;

// --- Envelope ---

#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error response: an HTTP status plus a failed envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<VerifyError> for ApiError {
    fn from(err: VerifyError) -> Self {
        let status = match err {
            VerifyError::InvalidIdentity(_) => StatusCode::BAD_REQUEST,
            VerifyError::CollaboratorUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiEnvelope::<()>::err(self.message))).into_response()
    }
}

// --- Response types ---

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct IssuerResponse {
    #[serde(flatten)]
    pub issuer: Issuer,
    /// Issuer exists and is currently active.
    pub authorized: bool,
}

#[derive(Deserialize)]
pub struct RulesQuery {
    #[serde(rename = "definedBy")]
    pub defined_by: Option<String>,
}

// --- Handlers ---

pub async fn handle_health(State(state): State<Arc<NodeState>>) -> Json<ApiEnvelope<HealthResponse>> {
    Json(ApiEnvelope::ok(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    }))
}

/// Verify an identity against the store as it stands at request time.
pub async fn handle_verify(
    State(state): State<Arc<NodeState>>,
    Path(address): Path<String>,
) -> Response {
    let now = chrono::Utc::now().timestamp();
    let sources = state.sources();

    match state.verifier.run(&address, &sources, now, |report| {
        Json(ApiEnvelope::ok(report)).into_response()
    }) {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(address = %address, error = %e, "verification rejected");
            ApiError::from(e).into_response()
        }
    }
}

pub async fn handle_credentials(
    State(state): State<Arc<NodeState>>,
    Path(address): Path<String>,
) -> Result<Json<ApiEnvelope<Vec<Credential>>>, ApiError> {
    state.verifier.check_identity(&address)?;
    Ok(Json(ApiEnvelope::ok(state.store.list_credentials(&address))))
}

pub async fn handle_issuer(
    State(state): State<Arc<NodeState>>,
    Path(address): Path<String>,
) -> Result<Json<ApiEnvelope<IssuerResponse>>, ApiError> {
    let issuers = state.store.list_issuers();
    let index = IssuerIndex::build(&issuers);
    let trust = resolve_trust(&address, &index);

    let issuer = trust.issuer.ok_or_else(|| {
        ApiError::new(StatusCode::NOT_FOUND, format!("issuer not found: {}", address))
    })?;

    Ok(Json(ApiEnvelope::ok(IssuerResponse {
        issuer: issuer.clone(),
        authorized: trust.authorized,
    })))
}

pub async fn handle_rules(
    State(state): State<Arc<NodeState>>,
    Query(query): Query<RulesQuery>,
) -> Json<ApiEnvelope<Vec<CompositionRule>>> {
    let rules = match query.defined_by {
        Some(issuer) => state.store.rules_defined_by(&issuer),
        None => state.store.list_rules(),
    };
    Json(ApiEnvelope::ok(rules))
}

// --- Server ---

pub fn build_router(state: Arc<NodeState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handle_health))
        .route("/api/v1/verify/{address}", get(handle_verify))
        .route("/api/v1/credentials/{address}", get(handle_credentials))
        .route("/api/v1/issuers/{address}", get(handle_issuer))
        .route("/api/v1/rules", get(handle_rules))
        .with_state(state)
}

pub async fn start_api_server(listen_addr: SocketAddr, state: Arc<NodeState>) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(listener, app).await?;
    Ok(())
}
