use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::taxonomy::{CollectionList, CollectionPayload},
    error::AppResult,
    models::Collection,
    response::{ApiResponse, created},
    routes::params::{NameQuery, Pagination},
    services::collection_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_collections).post(create_collection))
        .route("/search", get(search_collections))
        .route("/starts-with", get(collections_starting_with))
        .route(
            "/{id}",
            get(get_collection)
                .put(update_collection)
                .delete(delete_collection),
        )
}

#[utoipa::path(
    get,
    path = "/api/collections",
    params(Pagination),
    responses(
        (status = 200, description = "One page of collections", body = ApiResponse<CollectionList>)
    ),
    tag = "Collections"
)]
pub async fn list_collections(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CollectionList>>> {
    let resp = collection_service::list_collections(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/collections/{id}",
    params(("id" = i32, Path, description = "Collection ID")),
    responses(
        (status = 200, description = "Get collection", body = ApiResponse<Collection>),
        (status = 404, description = "Collection not found"),
    ),
    tag = "Collections"
)]
pub async fn get_collection(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Collection>>> {
    let resp = collection_service::get_collection(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/collections",
    request_body = CollectionPayload,
    responses(
        (status = 201, description = "Create collection", body = ApiResponse<Collection>),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Collections"
)]
pub async fn create_collection(
    State(state): State<AppState>,
    Json(payload): Json<CollectionPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Collection>>)> {
    let resp = collection_service::create_collection(&state, payload).await?;
    Ok(created(resp))
}

#[utoipa::path(
    put,
    path = "/api/collections/{id}",
    params(("id" = i32, Path, description = "Collection ID")),
    request_body = CollectionPayload,
    responses(
        (status = 200, description = "Update collection", body = ApiResponse<Collection>),
        (status = 404, description = "Collection not found"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Collections"
)]
pub async fn update_collection(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(payload): Json<CollectionPayload>,
) -> AppResult<Json<ApiResponse<Collection>>> {
    let resp = collection_service::update_collection(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/collections/{id}",
    params(("id" = i32, Path, description = "Collection ID")),
    responses(
        (status = 204, description = "Collection deleted"),
        (status = 404, description = "Collection not found"),
        (status = 409, description = "Collection still referenced by products"),
    ),
    tag = "Collections"
)]
pub async fn delete_collection(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    collection_service::delete_collection(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/collections/search",
    params(NameQuery),
    responses(
        (status = 200, description = "Collections whose name contains the text", body = ApiResponse<CollectionList>)
    ),
    tag = "Collections"
)]
pub async fn search_collections(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<ApiResponse<CollectionList>>> {
    let resp = collection_service::search_collections(&state, &query.name).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/collections/starts-with",
    params(NameQuery),
    responses(
        (status = 200, description = "Collections whose name starts with the text", body = ApiResponse<CollectionList>)
    ),
    tag = "Collections"
)]
pub async fn collections_starting_with(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<ApiResponse<CollectionList>>> {
    let resp = collection_service::collections_starting_with(&state, &query.name).await?;
    Ok(Json(resp))
}
