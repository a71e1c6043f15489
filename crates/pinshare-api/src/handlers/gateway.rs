//! Gateway URL handler.

use axum::Json;
use axum::extract::{Path, Query, State};

use pinshare_gateway::ResolvedUrls;

use crate::dto::request::GatewayQuery;
use crate::dto::response::ApiResponse;
use crate::state::AppState;

/// GET /api/gateways/{cid}
///
/// Never fails: an implausible id resolves to the placeholder object.
pub async fn resolve_urls(
    State(state): State<AppState>,
    Path(cid): Path<String>,
    Query(query): Query<GatewayQuery>,
) -> Json<ApiResponse<ResolvedUrls>> {
    Json(ApiResponse::ok(
        state.resolver.resolve(&cid, query.filename.as_deref()),
    ))
}
