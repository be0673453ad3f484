//! HTTP request handlers for the Basket service.
//!
//! Text analysis, shopping list saving, health and static front-end routes
//! using axum.

use crate::store::{ListStore, StoreError};
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use basket_domain::{CompletionProvider, ShoppingItemRecord};
use basket_extractor::ShoppingItemAnalyzer;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Format of the `created_at` stamp on saved lists
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Indian Standard Time, UTC+05:30
const IST_OFFSET_MINUTES: i64 = 5 * 60 + 30;

/// Shared application state
pub struct AppState<L>
where
    L: CompletionProvider,
{
    /// Analyzer shared by every request
    pub analyzer: Arc<ShoppingItemAnalyzer<L>>,
    /// Where saved lists go
    pub store: Arc<dyn ListStore>,
    /// Directory holding the built front-end
    pub static_dir: Arc<PathBuf>,
}

impl<L> Clone for AppState<L>
where
    L: CompletionProvider,
{
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            store: Arc::clone(&self.store),
            static_dir: Arc::clone(&self.static_dir),
        }
    }
}

/// Analyze request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Free-text shopping item
    #[serde(default)]
    pub text: Option<String>,
}

/// Save list response
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveListResponse {
    /// Always true on this path
    pub success: bool,
    /// Id assigned by the store
    pub id: String,
    /// `billNumber` from the posted document, if any
    #[serde(rename = "billNumber")]
    pub bill_number: Value,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "connected" or "unavailable"
    pub store: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed or empty request body
    BadRequest(&'static str),
    /// Store rejected the write
    Store(StoreError),
    /// No route or static file matched
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Resource not found" })),
            )
                .into_response(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

/// Timestamp in IST, as stored on saved lists
pub fn ist_timestamp(now: DateTime<Utc>) -> String {
    (now.naive_utc() + Duration::minutes(IST_OFFSET_MINUTES))
        .format(CREATED_AT_FORMAT)
        .to_string()
}

/// POST /api/analyze - Analyze one line of text
///
/// Extraction failures still answer 200 with the fallback record.
async fn analyze<L>(
    State(state): State<AppState<L>>,
    body: Bytes,
) -> Result<Json<ShoppingItemRecord>, AppError>
where
    L: CompletionProvider + 'static,
{
    let text = serde_json::from_slice::<AnalyzeRequest>(&body)
        .ok()
        .and_then(|request| request.text)
        .filter(|text| !text.is_empty())
        .ok_or(AppError::BadRequest("No text provided"))?;

    info!(chars = text.chars().count(), "Analyzing text");
    let record = state.analyzer.analyze_record(&text).await;

    Ok(Json(record))
}

/// POST /api - Save a shopping list
async fn save_list<L>(
    State(state): State<AppState<L>>,
    body: Bytes,
) -> Result<(StatusCode, Json<SaveListResponse>), AppError>
where
    L: CompletionProvider + 'static,
{
    let mut document = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) if !map.is_empty() => map,
        _ => return Err(AppError::BadRequest("No data provided")),
    };

    document.insert(
        "created_at".to_string(),
        Value::String(ist_timestamp(Utc::now())),
    );
    let bill_number = document.get("billNumber").cloned().unwrap_or(Value::Null);

    let id = state.store.insert(document).await.map_err(|e| {
        error!(error = %e, "Failed to save shopping list");
        AppError::from(e)
    })?;
    info!(id = %id, bill_number = %bill_number, "Saved shopping list");

    Ok((
        StatusCode::CREATED,
        Json(SaveListResponse {
            success: true,
            id,
            bill_number,
        }),
    ))
}

/// OPTIONS /api - Plain preflight acknowledgement
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// POST /api/transcribe - Speech is handled in the browser
async fn transcribe() -> Json<Value> {
    Json(json!({ "message": "Using Web Speech API instead" }))
}

/// GET /health - Service and store health
async fn health_check<L>(State(state): State<AppState<L>>) -> Json<HealthCheckResponse>
where
    L: CompletionProvider + 'static,
{
    let (status, store) = match state.store.ping().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            warn!(error = %e, "List store health check failed");
            ("degraded", "unavailable")
        }
    };

    Json(HealthCheckResponse {
        status: status.to_string(),
        store: store.to_string(),
    })
}

/// Everything else - files from the static directory, `index.html` at `/`
async fn serve_static<L>(State(state): State<AppState<L>>, request: Request) -> Response
where
    L: CompletionProvider + 'static,
{
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return AppError::NotFound.into_response();
    }

    let response = match ServeDir::new(state.static_dir.as_path())
        .oneshot(request)
        .await
    {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if response.status() == StatusCode::NOT_FOUND {
        return AppError::NotFound.into_response();
    }
    response.map(Body::new)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the axum router with all routes
pub fn create_router<L>(state: AppState<L>) -> AxumRouter
where
    L: CompletionProvider + 'static,
{
    AxumRouter::new()
        .route("/api/analyze", post(analyze::<L>))
        .route("/api", post(save_list::<L>).options(preflight))
        .route("/api/transcribe", post(transcribe))
        .route("/health", get(health_check::<L>))
        .fallback(serve_static::<L>)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
