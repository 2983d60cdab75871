use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::taxonomy::{CategoryList, CategoryPayload},
    error::AppResult,
    models::Category,
    response::{ApiResponse, created},
    routes::params::NameQuery,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/search", get(search_categories))
        .route("/starts-with", get(categories_starting_with))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List categories", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Get category", body = ApiResponse<Category>),
        (status = 404, description = "Category not found"),
    ),
    tag = "Categories"
)]
pub async fn get_category(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::get_category(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Create category", body = ApiResponse<Category>),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let resp = category_service::create_category(&state, payload).await?;
    Ok(created(resp))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Update category", body = ApiResponse<Category>),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Categories"
)]
pub async fn update_category(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = category_service::update_category(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by products"),
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    category_service::delete_category(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/categories/search",
    params(NameQuery),
    responses(
        (status = 200, description = "Categories whose name contains the text", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn search_categories(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::search_categories(&state, &query.name).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories/starts-with",
    params(NameQuery),
    responses(
        (status = 200, description = "Categories whose name starts with the text", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn categories_starting_with(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::categories_starting_with(&state, &query.name).await?;
    Ok(Json(resp))
}
