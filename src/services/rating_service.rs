use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    catalog::validation::validate_rating,
    dto::ratings::{RatingList, RatingPayload},
    entity::ratings::{ActiveModel, Column, Entity as Ratings, Model as RatingModel},
    error::{AppError, AppResult},
    models::Rating,
    response::{ApiResponse, Deleted, Meta},
    services::contains_pattern,
    state::AppState,
};

const RESOURCE: &str = "Rating";

pub async fn list_ratings(state: &AppState) -> AppResult<ApiResponse<RatingList>> {
    ratings_where(state, Condition::all()).await
}

pub async fn get_rating(state: &AppState, id: i32) -> AppResult<ApiResponse<Rating>> {
    let result = Ratings::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(rating_from_entity);
    let result = match result {
        Some(r) => r,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };
    Ok(ApiResponse::success("Rating", result, None))
}

pub async fn create_rating(
    state: &AppState,
    payload: RatingPayload,
) -> AppResult<ApiResponse<Rating>> {
    validate_rating(&payload).map_err(AppError::rejected(RESOURCE))?;
    let active = ActiveModel {
        id: NotSet,
        customer_name: Set(payload.customer_name),
        product_id: Set(payload.product_id.unwrap_or_default()),
        score: Set(payload.score.unwrap_or_default()),
        comment: Set(payload.comment),
        created_at: Set(Utc::now().into()),
    };
    let rating = active.insert(&state.orm).await?;
    tracing::info!(rating_id = rating.id, product_id = rating.product_id, "rating created");

    Ok(ApiResponse::success(
        "Rating created",
        rating_from_entity(rating),
        Some(Meta::empty()),
    ))
}

/// Overwrites everything except the creation timestamp.
pub async fn update_rating(
    state: &AppState,
    id: i32,
    payload: RatingPayload,
) -> AppResult<ApiResponse<Rating>> {
    validate_rating(&payload).map_err(AppError::rejected(RESOURCE))?;
    let existing = Ratings::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };

    let mut active: ActiveModel = existing.into();
    active.customer_name = Set(payload.customer_name);
    active.product_id = Set(payload.product_id.unwrap_or_default());
    active.score = Set(payload.score.unwrap_or_default());
    active.comment = Set(payload.comment);
    let rating = active.update(&state.orm).await?;
    tracing::info!(rating_id = id, "rating updated");

    Ok(ApiResponse::success(
        "Updated",
        rating_from_entity(rating),
        Some(Meta::empty()),
    ))
}

pub async fn delete_rating(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let result = Ratings::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tracing::info!(rating_id = id, "rating deleted");
    Ok(ApiResponse::success("Deleted", Deleted { id }, Some(Meta::empty())))
}

pub async fn ratings_by_product(
    state: &AppState,
    product_id: i32,
) -> AppResult<ApiResponse<RatingList>> {
    ratings_where(state, Condition::all().add(Column::ProductId.eq(product_id))).await
}

pub async fn ratings_by_score(state: &AppState, score: i16) -> AppResult<ApiResponse<RatingList>> {
    ratings_where(state, Condition::all().add(Column::Score.eq(score))).await
}

/// Case-insensitive substring match on the customer name.
pub async fn ratings_by_customer(
    state: &AppState,
    name: &str,
) -> AppResult<ApiResponse<RatingList>> {
    let condition =
        Condition::all().add(Expr::col(Column::CustomerName).ilike(contains_pattern(name)));
    ratings_where(state, condition).await
}

async fn ratings_where(
    state: &AppState,
    condition: Condition,
) -> AppResult<ApiResponse<RatingList>> {
    let items: Vec<Rating> = Ratings::find()
        .filter(condition)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(rating_from_entity)
        .collect();
    tracing::debug!(count = items.len(), "ratings loaded");
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Ratings", RatingList { items }, Some(meta)))
}

pub(crate) fn rating_from_entity(model: RatingModel) -> Rating {
    Rating {
        id: model.id,
        customer_name: model.customer_name,
        product_id: model.product_id,
        score: model.score,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
