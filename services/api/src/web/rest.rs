//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints, the router that mounts them,
//! and the master definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storybook_core::{Book, PortError};
use tower_http::cors::{Any, CorsLayer};
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        latest_book_handler,
        generate_book_handler,
        generate_story_handler,
        health_handler,
    ),
    components(
        schemas(BookResponse, GenerateStoryRequest, StoryResponse, ErrorResponse, HealthResponse)
    ),
    tags(
        (name = "Children's Books API", description = "Fetch or generate short Arabic children's books.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// A book as returned to clients.
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    title: String,
    content: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            title: book.title,
            content: book.content,
        }
    }
}

/// Body of a one-off story request.
#[derive(Deserialize, ToSchema)]
pub struct GenerateStoryRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StoryResponse {
    story: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(status: StatusCode, error: &str) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                error: error.to_string(),
            }),
        )
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    msg: String,
}

//=========================================================================================
// Router
//=========================================================================================

/// Builds the complete application router, Swagger UI included.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let api_router = Router::new()
        .route("/", get(health_handler))
        .route("/books/latest", get(latest_book_handler))
        .route("/books/generate", get(generate_book_handler))
        .route("/api/generate", post(generate_story_handler))
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024))
        .layer(cors)
        .with_state(app_state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Every failure becomes a generic 500; the detail only goes to the log.
fn internal_error(action: &str, e: PortError) -> (StatusCode, String) {
    error!("Failed to {}: {:?}", action, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to {}", action),
    )
}

/// Return the most recent book.
///
/// When no book has been stored yet, one is generated and saved first.
#[utoipa::path(
    get,
    path = "/books/latest",
    responses(
        (status = 200, description = "The most recent book", body = BookResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn latest_book_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<BookResponse>, (StatusCode, String)> {
    app_state
        .books
        .latest()
        .await
        .map(|book| Json(book.into()))
        .map_err(|e| internal_error("load the latest book", e))
}

/// Generate, store and return a new book.
#[utoipa::path(
    get,
    path = "/books/generate",
    responses(
        (status = 200, description = "The newly generated book", body = BookResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn generate_book_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<BookResponse>, (StatusCode, String)> {
    app_state
        .books
        .generate(None)
        .await
        .map(|book| Json(book.into()))
        .map_err(|e| internal_error("generate a book", e))
}

/// Write a one-off story about the given subject.
///
/// The story is returned directly and is not added to the book store.
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateStoryRequest,
    responses(
        (status = 200, description = "The generated story", body = StoryResponse),
        (status = 400, description = "The prompt is missing or blank", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn generate_story_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<GenerateStoryRequest>,
) -> Result<Json<StoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let prompt = payload.prompt.unwrap_or_default();
    if prompt.trim().is_empty() {
        return Err(ErrorResponse::new(
            StatusCode::BAD_REQUEST,
            "prompt required in body",
        ));
    }

    match app_state.books.story(&prompt).await {
        Ok(story) => Ok(Json(StoryResponse { story })),
        Err(e) => {
            error!("Failed to generate story: {:?}", e);
            Err(ErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate story",
            ))
        }
    }
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "The service is running", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        msg: "Children AI Books backend running".to_string(),
    })
}
