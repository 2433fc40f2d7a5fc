//! Request handling: validates the download request, runs the resolver,
//! and shapes the outcome into the response envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use grabcore::resolve::{default_file_name, SaveType};
use grabcore::{extract_shortcode, ResolveError, Resolver};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

/// Body of `POST /api/download`.
///
/// `url` is optional at the serde level so that a missing URL maps to the
/// service's own 400 envelope instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadRequest {
    pub url: Option<String>,
    #[serde(rename = "saveType", default)]
    pub save_type: SaveType,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}

/// Success envelope, HTTP 200.
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
    pub message: String,
    #[serde(rename = "mediaType")]
    pub media_type: &'static str,
    pub shortcode: String,
}

/// Failure envelope, HTTP 4xx/5xx. `code` is the stable machine category,
/// `error` the human-readable text.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ResolveError> for ErrorResponse {
    fn from(err: &ResolveError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
            code: err.code(),
            details: err.details().map(String::from),
        }
    }
}

/// HTTP status for each failure category.
fn status_for(err: &ResolveError) -> StatusCode {
    match err {
        ResolveError::MissingUrl | ResolveError::InvalidUrl | ResolveError::UnsupportedMediaForAudio => {
            StatusCode::BAD_REQUEST
        }
        ResolveError::ResolutionFailed => StatusCode::NOT_FOUND,
        ResolveError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// POST /api/download — resolve an Instagram URL to a downloadable file.
///
/// The extractor rejection is taken explicitly so a malformed body still
/// gets the failure envelope instead of axum's plain-text 400 — nothing
/// leaves this handler un-enveloped.
pub async fn download_handler(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Response {
    let outcome = match payload {
        Ok(Json(request)) => process_request(&state.resolver, request).await,
        Err(rejection) => Err(ResolveError::Upstream(rejection.body_text())),
    };

    match outcome {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            log::warn!("Download request failed ({}): {}", err.code(), err);
            (status_for(&err), Json(ErrorResponse::from(&err))).into_response()
        }
    }
}

/// The full validate → extract → resolve → shape pipeline.
///
/// Shared with the CLI `resolve` subcommand, which runs it without the
/// HTTP layer.
pub async fn process_request(resolver: &Resolver, request: DownloadRequest) -> Result<DownloadResponse, ResolveError> {
    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(ResolveError::MissingUrl)?;

    log::info!("Processing Instagram URL: {}", url);

    let shortcode = extract_shortcode(url)?;
    log::info!("Extracted shortcode: {}", shortcode);

    let candidate = resolver.resolve(&shortcode).await?;
    let is_video = candidate.has_video();

    if request.save_type == SaveType::Audio && !is_video {
        return Err(ResolveError::UnsupportedMediaForAudio);
    }

    // Resolver guarantees a usable URL on success; keep the guard anyway
    // so a misbehaving strategy cannot produce a success without one.
    let download_url = candidate
        .download_url()
        .ok_or(ResolveError::ResolutionFailed)?
        .to_string();

    let file_name = request
        .file_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| default_file_name(&shortcode, is_video));

    // Audio is a documented stub: the video URL is returned with an
    // advisory, never a silent substitution.
    let message = if request.save_type == SaveType::Audio {
        "Video download ready! Use a video-to-audio converter for audio extraction.".to_string()
    } else {
        "Download ready!".to_string()
    };

    log::info!("Successfully resolved media for {}: {}", shortcode, download_url);

    Ok(DownloadResponse {
        success: true,
        file_name,
        download_url,
        message,
        media_type: if is_video { "video" } else { "image" },
        shortcode,
    })
}
