//! Share link handlers.
//!
//! The open, verify and resolve endpoints take the share link's own query
//! string (`?shareView=true&file=...&cid=...`) so a viewer can forward the
//! URL it was opened with unchanged.

use axum::Json;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use tracing::info;

use pinshare_share::{ShareError, ShareRequest, ShareSession};

use crate::dto::request::{CreateShareRequest, VerifyPasswordRequest};
use crate::dto::response::{ApiResponse, CreateShareResponse, ShareViewResponse};
use crate::error::ApiError;
use crate::extractors::ValidJson;
use crate::state::AppState;

fn open_session(state: &AppState, query: Option<String>) -> Result<ShareSession, ApiError> {
    let query = query.unwrap_or_default();
    state
        .evaluator
        .open_url(&format!("?{query}"))?
        .ok_or_else(|| {
            ShareError::InvalidLink {
                reason: "not a share link",
            }
            .into()
        })
}

/// POST /api/shares
pub async fn create_share(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateShareRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateShareResponse>>), ApiError> {
    let descriptor = ShareRequest::from(req).into_descriptor(
        &state.verifier,
        state.clock.now(),
        state.config.share.max_expiry_days,
    )?;
    let url = state.codec.encode(&descriptor)?;

    info!(
        content_id = %descriptor.content_id,
        protected = descriptor.is_protected,
        expires = ?descriptor.expires_at,
        "Share link created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CreateShareResponse {
            url,
            content_id: descriptor.content_id,
            display_name: descriptor.display_name,
            is_protected: descriptor.is_protected,
            expires_at: descriptor.expires_at,
        })),
    ))
}

/// GET /api/shares/open?{share query}
///
/// Unprotected links come back with their URLs; protected ones report
/// `unverified` and no URLs.
pub async fn open_share(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<ShareViewResponse>>, ApiError> {
    let mut session = open_session(&state, query)?;
    let urls = if session.state().allows_reveal() {
        Some(state.evaluator.reveal(&mut session)?.urls)
    } else {
        None
    };
    Ok(Json(ApiResponse::ok(ShareViewResponse::new(
        &session,
        state.clock.now(),
        urls,
    ))))
}

/// POST /api/shares/verify?{share query}
pub async fn verify_share(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    ValidJson(req): ValidJson<VerifyPasswordRequest>,
) -> Result<Json<ApiResponse<ShareViewResponse>>, ApiError> {
    let mut session = open_session(&state, query)?;
    state.evaluator.submit_password(&mut session, &req.password)?;
    let revealed = state.evaluator.reveal(&mut session)?;
    Ok(Json(ApiResponse::ok(ShareViewResponse::new(
        &session,
        state.clock.now(),
        Some(revealed.urls),
    ))))
}

/// GET /api/shares/resolve?{share query}
pub async fn resolve_share(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<ShareViewResponse>>, ApiError> {
    let mut session = open_session(&state, query)?;
    let revealed = state.evaluator.reveal(&mut session)?;
    Ok(Json(ApiResponse::ok(ShareViewResponse::new(
        &session,
        state.clock.now(),
        Some(revealed.urls),
    ))))
}
