//! HTTP request handlers for the NER service.
//!
//! Implements the form page, the JSON extraction endpoints, echo and health
//! check using axum.

use crate::render::render_page;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router as AxumRouter,
};
use drugner_annotator::{annotate, AnnotateError};
use drugner_domain::{Entity, EntityExtractor, TextBlock};
use drugner_model::{ExtractionResponse, ModelError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Extractor shared across requests
pub type SharedExtractor = Arc<dyn EntityExtractor<Error = ModelError> + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Entity extractor backing every NER endpoint
    pub extractor: SharedExtractor,
    /// Model name reported by the health check
    pub model_name: Arc<str>,
    /// Text pre-filled on the landing page
    pub placeholder_text: Arc<str>,
    /// Longest accepted input, in characters
    pub max_text_length: usize,
}

/// Form body for the page endpoint
#[derive(Debug, Deserialize)]
pub struct NerForm {
    /// Text to analyse
    #[serde(default)]
    pub text: String,
}

/// JSON body for the NER endpoints
#[derive(Debug, Deserialize)]
pub struct NerRequest {
    /// Text to analyse
    #[serde(default)]
    pub text: String,
}

/// Echo request and response body
#[derive(Debug, Serialize, Deserialize)]
pub struct EchoMessage {
    /// Message to echo back
    #[serde(default)]
    pub message: String,
}

/// Annotated block as exchanged over JSON
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockView {
    /// Block text
    pub text: String,
    /// Entity label, null for plain text
    pub label: Option<String>,
    /// Display class, null for plain text
    pub class: Option<String>,
}

impl From<TextBlock> for BlockView {
    fn from(block: TextBlock) -> Self {
        Self {
            text: block.text,
            label: block.label,
            class: block.class,
        }
    }
}

/// Annotated blocks response
#[derive(Debug, Serialize, Deserialize)]
pub struct BlocksResponse {
    /// Blocks in text order
    pub blocks: Vec<BlockView>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Configured model name
    pub model: String,
    /// Whether the model has been loaded yet
    pub model_loaded: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub code: u16,
    /// Error message
    pub message: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Entity spans failed validation
    Validation(AnnotateError),
    /// Input exceeds the configured limit
    TextTooLong {
        /// Input length in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },
    /// Extractor failed
    Model(ModelError),
    /// Internal server error
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::TextTooLong { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Model(e) if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Model(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Validation(e) => format!("Invalid entity spans: {}", e),
            AppError::TextTooLong { len, max } => {
                format!("Text too long: {} chars (max: {})", len, max)
            }
            AppError::Model(e) => e.to_string(),
            AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!("Request failed ({}): {}", status, message);
        } else {
            warn!("Request rejected ({}): {}", status, message);
        }

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

impl From<AnnotateError> for AppError {
    fn from(e: AnnotateError) -> Self {
        AppError::Validation(e)
    }
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        AppError::Model(e)
    }
}

/// Run the extractor off the async executor
///
/// Inference is blocking and may be slow, especially on the first call when
/// the model loads.
async fn extract_entities(state: &AppState, text: &str) -> Result<Vec<Entity>, AppError> {
    let len = text.chars().count();
    if len > state.max_text_length {
        return Err(AppError::TextTooLong {
            len,
            max: state.max_text_length,
        });
    }

    let extractor = Arc::clone(&state.extractor);
    let text = text.to_string();

    let entities = tokio::task::spawn_blocking(move || extractor.extract(&text))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    info!("Extracted {} entities from {} chars", entities.len(), len);
    Ok(entities)
}

/// GET / - Landing page with the placeholder text
async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.placeholder_text, None))
}

/// POST /echo - Echo the message back
async fn echo(Json(request): Json<EchoMessage>) -> Json<EchoMessage> {
    Json(request)
}

/// POST /ner/drug - Highlight entities in form-submitted text
async fn ner_page(
    State(state): State<AppState>,
    Form(form): Form<NerForm>,
) -> Result<Html<String>, AppError> {
    let entities = extract_entities(&state, &form.text).await?;
    let sequence = annotate(&entities, &form.text)?;

    Ok(Html(render_page(&form.text, Some(&sequence))))
}

/// POST /ner/drug.json - Extracted entities as JSON
async fn ner_json(
    State(state): State<AppState>,
    Json(request): Json<NerRequest>,
) -> Result<Json<ExtractionResponse>, AppError> {
    let entities = extract_entities(&state, &request.text).await?;
    Ok(Json(ExtractionResponse::from(entities.as_slice())))
}

/// POST /ner/drug/blocks.json - Annotated blocks as JSON
async fn ner_blocks(
    State(state): State<AppState>,
    Json(request): Json<NerRequest>,
) -> Result<Json<BlocksResponse>, AppError> {
    let entities = extract_entities(&state, &request.text).await?;
    let sequence = annotate(&entities, &request.text)?;

    Ok(Json(BlocksResponse {
        blocks: sequence.into_iter().map(BlockView::from).collect(),
    }))
}

/// GET /health - Service health
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        model: state.model_name.to_string(),
        model_loaded: state.extractor.is_loaded(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/", get(index))
        .route("/echo", post(echo))
        .route("/ner/drug", post(ner_page))
        .route("/ner/drug.json", post(ner_json))
        .route("/ner/drug/blocks.json", post(ner_blocks))
        .route("/health", get(health_check))
        .with_state(state)
}
