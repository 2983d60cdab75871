use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::taxonomy::{StatusList, StatusPayload},
    error::AppResult,
    models::Status,
    response::{ApiResponse, Deleted, accepted, created},
    routes::params::{DescriptionQuery, PrefixQuery},
    services::status_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_statuses).post(create_status))
        .route("/search", get(search_statuses))
        .route("/code", get(statuses_by_code))
        .route(
            "/{id}",
            get(get_status).put(update_status).delete(delete_status),
        )
}

#[utoipa::path(
    get,
    path = "/api/statuses",
    responses(
        (status = 200, description = "List statuses", body = ApiResponse<StatusList>)
    ),
    tag = "Statuses"
)]
pub async fn list_statuses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<StatusList>>> {
    let resp = status_service::list_statuses(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/statuses/{id}",
    params(("id" = i32, Path, description = "Status ID")),
    responses(
        (status = 200, description = "Get status", body = ApiResponse<Status>),
        (status = 404, description = "Status not found"),
    ),
    tag = "Statuses"
)]
pub async fn get_status(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Status>>> {
    let resp = status_service::get_status(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/statuses",
    request_body = StatusPayload,
    responses(
        (status = 201, description = "Create status", body = ApiResponse<Status>),
        (status = 409, description = "Code already in use"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Statuses"
)]
pub async fn create_status(
    State(state): State<AppState>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Status>>)> {
    let resp = status_service::create_status(&state, payload).await?;
    Ok(created(resp))
}

#[utoipa::path(
    put,
    path = "/api/statuses/{id}",
    params(("id" = i32, Path, description = "Status ID")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Update status", body = ApiResponse<Status>),
        (status = 404, description = "Status not found"),
        (status = 409, description = "Code already in use"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Statuses"
)]
pub async fn update_status(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<ApiResponse<Status>>> {
    let resp = status_service::update_status(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/statuses/{id}",
    params(("id" = i32, Path, description = "Status ID")),
    responses(
        (status = 202, description = "Status deleted", body = ApiResponse<Deleted>),
        (status = 404, description = "Status not found"),
        (status = 409, description = "Status still referenced by products"),
    ),
    tag = "Statuses"
)]
pub async fn delete_status(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<Deleted>>)> {
    let resp = status_service::delete_status(&state, id).await?;
    Ok(accepted(resp))
}

#[utoipa::path(
    get,
    path = "/api/statuses/search",
    params(DescriptionQuery),
    responses(
        (status = 200, description = "Statuses whose description contains the text", body = ApiResponse<StatusList>)
    ),
    tag = "Statuses"
)]
pub async fn search_statuses(
    State(state): State<AppState>,
    Query(query): Query<DescriptionQuery>,
) -> AppResult<Json<ApiResponse<StatusList>>> {
    let resp = status_service::search_statuses(&state, &query.description).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/statuses/code",
    params(PrefixQuery),
    responses(
        (status = 200, description = "Statuses whose code starts with the prefix", body = ApiResponse<StatusList>)
    ),
    tag = "Statuses"
)]
pub async fn statuses_by_code(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> AppResult<Json<ApiResponse<StatusList>>> {
    let resp = status_service::statuses_by_code_prefix(&state, &query.prefix).await?;
    Ok(Json(resp))
}
