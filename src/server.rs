//! Review HTTP server.
//!
//! Serves the filtered, sentiment-annotated review collection as JSON.
//! Routing by path is not done: every path answers the same way.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | any  | Reviews matching `location`, `start_date`, `end_date` |
//! | other  | any  | `405 Method Not Allowed` with `Allow: GET` |
//!
//! # Error Contract
//!
//! All error responses carry a JSON body:
//!
//! ```json
//! { "error": "invalid start_date 'not-a-date': expected a date formatted as YYYY-MM-DD" }
//! ```
//!
//! | Status | Cause |
//! |--------|-------|
//! | 400 | Malformed query parameter |
//! | 405 | Method other than `GET` |
//! | 500 | Corrupt record in the loaded dataset (details are logged only) |
//!
//! `OPTIONS` and `HEAD` are not special-cased: they get the same 405 as
//! any other non-`GET` method.

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::filter::FilterError;
use crate::pipeline::ReviewPipeline;
use crate::query::{self, QueryError};

/// Shared application state passed to the handler via Axum's `State` extractor.
///
/// The pipeline holds the review collection behind an `Arc`, so cloning per
/// request is cheap and never copies the data.
#[derive(Clone)]
struct AppState {
    pipeline: ReviewPipeline,
}

/// Loads the dataset and lexicon from `config`, binds to
/// `[server].host:port` and serves until interrupted.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pipeline = ReviewPipeline::from_config(config)?;
    let bind_addr = config.server.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", bind_addr);
    serve(listener, pipeline).await
}

/// Serves `pipeline` on an already-bound listener.
///
/// Shuts down cleanly on Ctrl-C.
pub async fn serve(listener: TcpListener, pipeline: ReviewPipeline) -> anyhow::Result<()> {
    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn router(pipeline: ReviewPipeline) -> Router {
    Router::new()
        .fallback(handle_request)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { pipeline })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

// ============ Error response ============

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
    allow: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(json!({ "error": self.message }))).into_response();
        if let Some(allow) = self.allow {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
        allow: None,
    }
}

/// Constructs a 405 error advertising the supported methods.
fn method_not_allowed(method: &Method) -> ApiError {
    ApiError {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: format!("method {} is not supported; use GET", method),
        allow: Some("GET"),
    }
}

/// Constructs a 500 error. The caller only ever sees the generic message.
fn internal(message: impl Into<String>) -> ApiError {
    ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
        allow: None,
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        tracing::debug!(param = err.param(), "rejected query: {}", err);
        bad_request(err.to_string())
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        tracing::error!("dataset integrity error: {}", err);
        internal("the review dataset contains a malformed record")
    }
}

// ============ Request handler ============

/// Handler for every request.
///
/// `GET` interprets the query string, runs the filter pipeline on a
/// blocking worker and responds with the pretty-printed JSON array. Any
/// other method gets a `405`.
async fn handle_request(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    if method != Method::GET {
        return Err(method_not_allowed(&method));
    }

    let Query(params) = Query::<Vec<(String, String)>>::try_from_uri(&uri)
        .map_err(|e| bad_request(format!("malformed query string: {}", e.body_text())))?;
    let spec = query::interpret(&params)?;

    let pipeline = state.pipeline.clone();
    let body = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ApiError> {
        let annotated = pipeline.run(&spec)?;
        serde_json::to_vec_pretty(&annotated)
            .map_err(|e| internal(format!("failed to serialize reviews: {}", e)))
    })
    .await
    .map_err(|e| {
        tracing::error!("request worker failed: {}", e);
        internal("request worker failed")
    })??;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            (header::CONTENT_LENGTH, HeaderValue::from(body.len())),
        ],
        body,
    )
        .into_response())
}
