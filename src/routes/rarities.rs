use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::taxonomy::{RarityList, RarityPayload},
    error::AppResult,
    models::Rarity,
    response::{ApiResponse, Deleted, accepted, created},
    routes::params::{NameQuery, PrefixQuery},
    services::rarity_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rarities).post(create_rarity))
        .route("/search", get(search_rarities))
        .route("/color", get(rarities_by_color))
        .route(
            "/{id}",
            get(get_rarity).put(update_rarity).delete(delete_rarity),
        )
}

#[utoipa::path(
    get,
    path = "/api/rarities",
    responses(
        (status = 200, description = "List rarities", body = ApiResponse<RarityList>)
    ),
    tag = "Rarities"
)]
pub async fn list_rarities(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RarityList>>> {
    let resp = rarity_service::list_rarities(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/rarities/{id}",
    params(("id" = i32, Path, description = "Rarity ID")),
    responses(
        (status = 200, description = "Get rarity", body = ApiResponse<Rarity>),
        (status = 404, description = "Rarity not found"),
    ),
    tag = "Rarities"
)]
pub async fn get_rarity(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Rarity>>> {
    let resp = rarity_service::get_rarity(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/rarities",
    request_body = RarityPayload,
    responses(
        (status = 201, description = "Create rarity", body = ApiResponse<Rarity>),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Rarities"
)]
pub async fn create_rarity(
    State(state): State<AppState>,
    Json(payload): Json<RarityPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Rarity>>)> {
    let resp = rarity_service::create_rarity(&state, payload).await?;
    Ok(created(resp))
}

#[utoipa::path(
    put,
    path = "/api/rarities/{id}",
    params(("id" = i32, Path, description = "Rarity ID")),
    request_body = RarityPayload,
    responses(
        (status = 200, description = "Update rarity", body = ApiResponse<Rarity>),
        (status = 404, description = "Rarity not found"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Rarities"
)]
pub async fn update_rarity(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(payload): Json<RarityPayload>,
) -> AppResult<Json<ApiResponse<Rarity>>> {
    let resp = rarity_service::update_rarity(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/rarities/{id}",
    params(("id" = i32, Path, description = "Rarity ID")),
    responses(
        (status = 202, description = "Rarity deleted", body = ApiResponse<Deleted>),
        (status = 404, description = "Rarity not found"),
        (status = 409, description = "Rarity still referenced by products"),
    ),
    tag = "Rarities"
)]
pub async fn delete_rarity(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<Deleted>>)> {
    let resp = rarity_service::delete_rarity(&state, id).await?;
    Ok(accepted(resp))
}

#[utoipa::path(
    get,
    path = "/api/rarities/search",
    params(NameQuery),
    responses(
        (status = 200, description = "Rarities whose name contains the text", body = ApiResponse<RarityList>)
    ),
    tag = "Rarities"
)]
pub async fn search_rarities(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<ApiResponse<RarityList>>> {
    let resp = rarity_service::search_rarities(&state, &query.name).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/rarities/color",
    params(PrefixQuery),
    responses(
        (status = 200, description = "Rarities whose color starts with the prefix", body = ApiResponse<RarityList>)
    ),
    tag = "Rarities"
)]
pub async fn rarities_by_color(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> AppResult<Json<ApiResponse<RarityList>>> {
    let resp = rarity_service::rarities_by_color_prefix(&state, &query.prefix).await?;
    Ok(Json(resp))
}
