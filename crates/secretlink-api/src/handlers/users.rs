//! Account handlers: signup, login, logout, me, purge, account deletion,
//! password change.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};

use crate::cookie;
use crate::dto::request::{ChangePasswordRequest, LoginRequest, SignupRequest};
use crate::dto::response::UserResponse;
use crate::error::ApiResult;
use crate::extractors::caller::SESSION_ONLY;
use crate::extractors::{Caller, ValidJson};
use crate::state::AppState;

/// POST /users/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SignupRequest>,
) -> ApiResult<Response> {
    let grant = state.user_service.signup(&req.email, &req.password).await?;
    let set_cookie = cookie::issue(&state.config.session, &grant.token)?;
    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, set_cookie)],
        Json(UserResponse::from(grant.user)),
    )
        .into_response())
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> ApiResult<Response> {
    let grant = state.user_service.login(&req.email, &req.password).await?;
    let set_cookie = cookie::issue(&state.config.session, &grant.token)?;
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, set_cookie)],
        Json(UserResponse::from(grant.user)),
    )
        .into_response())
}

/// POST /users/logout
pub async fn logout(State(state): State<AppState>, caller: Caller) -> ApiResult<Response> {
    caller.require(SESSION_ONLY, &[])?;
    let set_cookie = cookie::clear(&state.config.session)?;
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, set_cookie)]).into_response())
}

/// GET /users/me
pub async fn me(State(state): State<AppState>, caller: Caller) -> ApiResult<Json<UserResponse>> {
    let user_id = caller.require(SESSION_ONLY, &[])?;
    let user = state.user_service.me(user_id).await?;
    Ok(Json(user.into()))
}

/// DELETE /users/me/purge
pub async fn purge_me(State(state): State<AppState>, caller: Caller) -> ApiResult<StatusCode> {
    let user_id = caller.require(SESSION_ONLY, &[])?;
    state.user_service.purge(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users/me
///
/// Removes the account with everything it owns and ends the session.
pub async fn delete_me(State(state): State<AppState>, caller: Caller) -> ApiResult<Response> {
    let user_id = caller.require(SESSION_ONLY, &[])?;
    state.user_service.delete_account(user_id).await?;
    let set_cookie = cookie::clear(&state.config.session)?;
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, set_cookie)]).into_response())
}

/// POST /users/password
pub async fn change_password(
    State(state): State<AppState>,
    caller: Caller,
    ValidJson(req): ValidJson<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    let user_id = caller.require(SESSION_ONLY, &[])?;
    state
        .user_service
        .change_password(user_id, &req.current_password, &req.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
