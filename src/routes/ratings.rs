use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::ratings::{RatingList, RatingPayload},
    error::AppResult,
    models::Rating,
    response::{ApiResponse, Deleted, accepted, created},
    routes::params::NameQuery,
    services::rating_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ratings).post(create_rating))
        .route("/product/{id}", get(ratings_by_product))
        .route("/score/{score}", get(ratings_by_score))
        .route("/customer", get(ratings_by_customer))
        .route(
            "/{id}",
            get(get_rating).put(update_rating).delete(delete_rating),
        )
}

#[utoipa::path(
    get,
    path = "/api/ratings",
    responses(
        (status = 200, description = "List ratings", body = ApiResponse<RatingList>)
    ),
    tag = "Ratings"
)]
pub async fn list_ratings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RatingList>>> {
    let resp = rating_service::list_ratings(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/ratings/{id}",
    params(("id" = i32, Path, description = "Rating ID")),
    responses(
        (status = 200, description = "Get rating", body = ApiResponse<Rating>),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn get_rating(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Rating>>> {
    let resp = rating_service::get_rating(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/ratings",
    request_body = RatingPayload,
    responses(
        (status = 201, description = "Create rating", body = ApiResponse<Rating>),
        (status = 409, description = "Unknown product"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Ratings"
)]
pub async fn create_rating(
    State(state): State<AppState>,
    Json(payload): Json<RatingPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Rating>>)> {
    let resp = rating_service::create_rating(&state, payload).await?;
    Ok(created(resp))
}

#[utoipa::path(
    put,
    path = "/api/ratings/{id}",
    params(("id" = i32, Path, description = "Rating ID")),
    request_body = RatingPayload,
    responses(
        (status = 200, description = "Update rating", body = ApiResponse<Rating>),
        (status = 404, description = "Rating not found"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Ratings"
)]
pub async fn update_rating(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(payload): Json<RatingPayload>,
) -> AppResult<Json<ApiResponse<Rating>>> {
    let resp = rating_service::update_rating(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/ratings/{id}",
    params(("id" = i32, Path, description = "Rating ID")),
    responses(
        (status = 202, description = "Rating deleted", body = ApiResponse<Deleted>),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn delete_rating(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<Deleted>>)> {
    let resp = rating_service::delete_rating(&state, id).await?;
    Ok(accepted(resp))
}

#[utoipa::path(
    get,
    path = "/api/ratings/product/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Ratings of a product", body = ApiResponse<RatingList>)
    ),
    tag = "Ratings"
)]
pub async fn ratings_by_product(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RatingList>>> {
    let resp = rating_service::ratings_by_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/ratings/score/{score}",
    params(("score" = i16, Path, description = "Exact score, 1 to 5")),
    responses(
        (status = 200, description = "Ratings with the given score", body = ApiResponse<RatingList>)
    ),
    tag = "Ratings"
)]
pub async fn ratings_by_score(
    Path(score): Path<i16>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RatingList>>> {
    let resp = rating_service::ratings_by_score(&state, score).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/ratings/customer",
    params(NameQuery),
    responses(
        (status = 200, description = "Ratings whose customer name contains the text", body = ApiResponse<RatingList>)
    ),
    tag = "Ratings"
)]
pub async fn ratings_by_customer(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<ApiResponse<RatingList>>> {
    let resp = rating_service::ratings_by_customer(&state, &query.name).await?;
    Ok(Json(resp))
}
