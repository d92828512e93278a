//! HTTP read API.
//!
//! Serves persisted samples as JSON. The store is opened once at startup and
//! shared by all handlers through Axum's `State` extractor.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/samples/{sample_id}` | The sample having this `Sample_ID` |
//! | `GET`  | `/sampleid/{sample_id}` | Redirects to `/samples/{sample_id}` |
//! | `GET`  | `/` | Redirects to `/docs` |
//! | `GET`  | `/docs` | HTML page rendering the API description |
//! | `GET`  | `/openapi.json` | OpenAPI document |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Failed to find a sample having Sample_ID: 'x'" } }
//! ```
//!
//! Error codes: `not_found` (404), `internal` (500).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::Config;
use crate::get::{get_sample, not_found_message};
use crate::models::Record;
use crate::sqlite_store::SqliteStore;
use crate::store::SampleStore;

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SampleStore>,
}

/// Builds the router over an already-opened store.
pub fn router(store: Arc<dyn SampleStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/docs", get(handle_docs))
        .route("/openapi.json", get(handle_openapi))
        .route("/health", get(handle_health))
        .route("/sampleid/{sample_id}", get(handle_sampleid_redirect))
        .route("/samples/{sample_id}", get(handle_get_sample))
        .layer(cors)
        .with_state(AppState { store })
}

/// Starts the HTTP server on `[server].bind` and runs until Ctrl-C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(SqliteStore::open(config).await?);
    store.ensure_indexes().await?;

    let app = router(store.clone());
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("sediment API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    store.close().await;
    info!("server stopped");
    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(err: anyhow::Error) -> AppError {
    error!("store error: {:#}", err);
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: err.to_string(),
    }
}

// ============ Handlers ============

async fn handle_root() -> Redirect {
    Redirect::temporary("/docs")
}

/// The captured id arrives decoded, so it is encoded again before going
/// back into a `Location` header.
async fn handle_sampleid_redirect(Path(sample_id): Path<String>) -> Redirect {
    let segment = utf8_percent_encode(&sample_id, PATH_SEGMENT);
    Redirect::temporary(&format!("/samples/{}", segment))
}

/// Handler for `GET /samples/{sample_id}`.
async fn handle_get_sample(
    State(state): State<AppState>,
    Path(sample_id): Path<String>,
) -> Result<Json<Record>, AppError> {
    match get_sample(state.store.as_ref(), &sample_id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(not_found(not_found_message(&sample_id))),
        Err(e) => Err(internal(e)),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn handle_openapi() -> Json<Value> {
    Json(openapi_document())
}

const DOCS_PAGE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>sediment-api</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <noscript><a href="/openapi.json">/openapi.json</a></noscript>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });</script>
</body>
</html>
"##;

async fn handle_docs() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

/// OpenAPI 3 description of the public endpoints.
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "sediment-api",
            "description": "Sediment API",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/samples/{sample_id}": {
                "get": {
                    "tags": ["samples"],
                    "summary": "Get a sample",
                    "description": "Gets the sample having the specified `Sample_ID`.",
                    "operationId": "get_sample",
                    "parameters": [{
                        "name": "sample_id",
                        "in": "path",
                        "required": true,
                        "description": "The `Sample_ID` of the sample you want to get",
                        "schema": { "type": "string" }
                    }],
                    "responses": {
                        "200": {
                            "description": "The sample having the specified `Sample_ID`",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "additionalProperties": { "type": ["string", "null"] }
                                    }
                                }
                            }
                        },
                        "404": {
                            "description": "No sample has the specified `Sample_ID`",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Error" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Error": {
                    "type": "object",
                    "properties": {
                        "error": {
                            "type": "object",
                            "properties": {
                                "code": { "type": "string" },
                                "message": { "type": "string" }
                            },
                            "required": ["code", "message"]
                        }
                    },
                    "required": ["error"]
                }
            }
        }
    })
}
