//! Link handlers: create, bulk create, redeem, delete, status.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use secretlink_entity::link::LinkStatus;
use secretlink_entity::token::Scope;
use secretlink_service::{BulkLinkRow, RedeemedSecret};

use crate::dto::request::{CreateLinkRequest, RedeemQuery, StatusQuery};
use crate::dto::response::{BulkCreateResponse, CreateLinkResponse};
use crate::error::ApiResult;
use crate::extractors::caller::ANY_METHOD;
use crate::extractors::{Caller, ClientMeta, JsonBody, QueryParams, ValidJson};
use crate::state::AppState;

/// POST /links
pub async fn create_link(
    State(state): State<AppState>,
    ClientMeta(ctx): ClientMeta,
    ValidJson(req): ValidJson<CreateLinkRequest>,
) -> ApiResult<(StatusCode, Json<CreateLinkResponse>)> {
    let result = state.link_service.create_anonymous(&ctx, &req.secret).await?;
    Ok((StatusCode::CREATED, Json(CreateLinkResponse { result })))
}

/// POST /links/bulk
pub async fn create_links(
    State(state): State<AppState>,
    caller: Caller,
    ClientMeta(ctx): ClientMeta,
    JsonBody(rows): JsonBody<Vec<BulkLinkRow>>,
) -> ApiResult<(StatusCode, Json<BulkCreateResponse>)> {
    let user_id = caller.require(ANY_METHOD, &[Scope::LinksWrite])?;
    let results = state.link_service.create_bulk(&ctx, user_id, &rows).await?;
    Ok((StatusCode::CREATED, Json(BulkCreateResponse { results })))
}

/// GET /links/redeem/{token}
pub async fn redeem_link(
    State(state): State<AppState>,
    ClientMeta(ctx): ClientMeta,
    Path(token): Path<String>,
    QueryParams(query): QueryParams<RedeemQuery>,
) -> ApiResult<Json<RedeemedSecret>> {
    let redeemed = state
        .link_service
        .redeem(&ctx, &token, query.pass.as_deref())
        .await?;
    Ok(Json(redeemed))
}

/// DELETE /links/{token}
pub async fn delete_link(
    State(state): State<AppState>,
    caller: Caller,
    ClientMeta(ctx): ClientMeta,
    Path(token): Path<String>,
) -> ApiResult<StatusCode> {
    let user_id = caller.require(ANY_METHOD, &[Scope::LinksDelete])?;
    state.link_service.delete(&ctx, user_id, &token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /links/status
pub async fn link_status(
    State(state): State<AppState>,
    caller: Caller,
    QueryParams(query): QueryParams<StatusQuery>,
) -> ApiResult<Json<Vec<LinkStatus>>> {
    let user_id = caller.require(ANY_METHOD, &[Scope::LinksRead])?;
    let statuses = state
        .link_service
        .list_status(user_id, query.since, query.until)
        .await?;
    Ok(Json(statuses))
}
