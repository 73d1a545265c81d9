use axum::{
    routing::{get, post},
    Router,
    extract::{Form, FromRequest, Json, Request, State},
    http::header,
    response::{Html, IntoResponse},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::api::models::{DownloadRequest, SummarizeRequest, SummarizeResponse};
use crate::api::page::INDEX_HTML;
use crate::api::response;
use crate::error::{AppError, Result};
use crate::AppState;

/// File name offered by the download action.
pub const DOWNLOAD_FILENAME: &str = "summary.txt";

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/summarize", post(summarize_handler))
        .route("/api/download", post(download_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<impl IntoResponse> {
    info!(url = %req.url, "Processing summarize request");
    let start_time = std::time::Instant::now();

    let result = state.summarizer.summarize(&req.url).await;

    let elapsed = start_time.elapsed();
    match result {
        Ok(summary) => {
            info!(url = %summary.url, ?elapsed, "Successfully summarized URL");
            let model = &state.config.generation.model_id;
            Ok(response::success(SummarizeResponse::new(summary, model)))
        }
        Err(err) => {
            if err.is_warning() {
                warn!(?elapsed, "{}", err);
            } else {
                error!(url = %req.url, ?elapsed, "{}", err);
            }
            Err(err)
        }
    }
}

/// Echoes a summary back as a `summary.txt` attachment.
///
/// JSON bodies are returned byte for byte. Form bodies have their CRLF line
/// breaks folded to `\n`, since browsers submit textarea line breaks as CRLF.
async fn download_handler(request: Request) -> Result<impl IntoResponse> {
    let is_json = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"));

    let body = if is_json {
        let Json(req) = Json::<DownloadRequest>::from_request(request, &())
            .await
            .map_err(|e| AppError::ParseError(e.body_text()))?;
        req.summary
    } else {
        let Form(req) = Form::<DownloadRequest>::from_request(request, &())
            .await
            .map_err(|e| AppError::ParseError(e.body_text()))?;
        req.summary.replace("\r\n", "\n")
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        body,
    ))
}
