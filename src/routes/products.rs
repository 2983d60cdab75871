use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    catalog::ProductFilter,
    dto::products::{ProductList, ProductPayload, RatingSummary},
    error::AppResult,
    models::Product,
    response::{ApiResponse, created},
    routes::params::{FilterQuery, NameQuery},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/filter", get(filter_products))
        .route("/search", get(search_products))
        .route("/category/{id}", get(products_by_category))
        .route("/collection/{id}", get(products_by_collection))
        .route("/rarity/{id}", get(products_by_rarity))
        .route("/status/{id}", get(products_by_status))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/rating", get(average_rating))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 422, description = "Validation failed"),
        (status = 409, description = "Unknown taxonomy reference"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, payload).await?;
    Ok(created(resp))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Update product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product and its ratings deleted"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    product_service::delete_product(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/products/search",
    params(NameQuery),
    responses(
        (status = 200, description = "Products whose name contains the text", body = ApiResponse<ProductList>),
        (status = 400, description = "Blank search text"),
    ),
    tag = "Products"
)]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::search_products(&state, &query.name).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/filter",
    params(FilterQuery),
    responses(
        (status = 200, description = "Products matching every supplied criterion", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn filter_products(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::filter_products(&state, ProductFilter::from(query)).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/rating",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Average rating of a product", body = ApiResponse<RatingSummary>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn average_rating(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RatingSummary>>> {
    let resp = product_service::average_rating(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/category/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "Products in a category", body = ApiResponse<ProductList>)),
    tag = "Products"
)]
pub async fn products_by_category(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::products_by_category(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/collection/{id}",
    params(("id" = i32, Path, description = "Collection ID")),
    responses((status = 200, description = "Products in a collection", body = ApiResponse<ProductList>)),
    tag = "Products"
)]
pub async fn products_by_collection(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::products_by_collection(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/rarity/{id}",
    params(("id" = i32, Path, description = "Rarity ID")),
    responses((status = 200, description = "Products of a rarity", body = ApiResponse<ProductList>)),
    tag = "Products"
)]
pub async fn products_by_rarity(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::products_by_rarity(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/status/{id}",
    params(("id" = i32, Path, description = "Status ID")),
    responses((status = 200, description = "Products with a status", body = ApiResponse<ProductList>)),
    tag = "Products"
)]
pub async fn products_by_status(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::products_by_status(&state, id).await?))
}
