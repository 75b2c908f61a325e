//! Personal access token handlers. All of them require a browser session.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use secretlink_core::error::AppError;
use secretlink_core::types::ApiTokenId;

use crate::dto::request::CreateTokenRequest;
use crate::dto::response::{CreatedTokenResponse, PatResponse};
use crate::error::ApiResult;
use crate::extractors::caller::SESSION_ONLY;
use crate::extractors::{Caller, ValidJson};
use crate::state::AppState;

/// GET /users/tokens
pub async fn list_tokens(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<Vec<PatResponse>>> {
    let user_id = caller.require(SESSION_ONLY, &[])?;
    let tokens = state.token_service.list(user_id).await?;
    Ok(Json(tokens.into_iter().map(PatResponse::from).collect()))
}

/// POST /users/tokens
pub async fn create_token(
    State(state): State<AppState>,
    caller: Caller,
    ValidJson(req): ValidJson<CreateTokenRequest>,
) -> ApiResult<(StatusCode, Json<CreatedTokenResponse>)> {
    let user_id = caller.require(SESSION_ONLY, &[])?;
    let created = state
        .token_service
        .create(user_id, req.label.as_deref(), req.scopes.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// DELETE /users/tokens/{id}
pub async fn revoke_token(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let user_id = caller.require(SESSION_ONLY, &[])?;
    let id: ApiTokenId = id
        .parse()
        .map_err(|_| AppError::not_found("Token not found"))?;
    state.token_service.revoke(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
