use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    catalog::validation::validate_rarity,
    dto::taxonomy::{RarityList, RarityPayload},
    entity::rarities::{ActiveModel, Column, Entity as Rarities, Model as RarityModel},
    error::{AppError, AppResult},
    models::Rarity,
    response::{ApiResponse, Deleted, Meta},
    services::{contains_pattern, prefix_pattern},
    state::AppState,
};

const RESOURCE: &str = "Rarity";

pub async fn list_rarities(state: &AppState) -> AppResult<ApiResponse<RarityList>> {
    let items: Vec<Rarity> = Rarities::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(rarity_from_entity)
        .collect();
    tracing::debug!(count = items.len(), "rarities listed");
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Rarities", RarityList { items }, Some(meta)))
}

pub async fn get_rarity(state: &AppState, id: i32) -> AppResult<ApiResponse<Rarity>> {
    let result = Rarities::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(rarity_from_entity);
    let result = match result {
        Some(r) => r,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };
    Ok(ApiResponse::success("Rarity", result, None))
}

pub async fn create_rarity(
    state: &AppState,
    payload: RarityPayload,
) -> AppResult<ApiResponse<Rarity>> {
    validate_rarity(&payload).map_err(AppError::rejected(RESOURCE))?;
    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        color: Set(payload.color),
    };
    let rarity = active.insert(&state.orm).await?;
    tracing::info!(rarity_id = rarity.id, "rarity created");

    Ok(ApiResponse::success(
        "Rarity created",
        rarity_from_entity(rarity),
        Some(Meta::empty()),
    ))
}

pub async fn update_rarity(
    state: &AppState,
    id: i32,
    payload: RarityPayload,
) -> AppResult<ApiResponse<Rarity>> {
    validate_rarity(&payload).map_err(AppError::rejected(RESOURCE))?;
    let existing = Rarities::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.color = Set(payload.color);
    let rarity = active.update(&state.orm).await?;
    tracing::info!(rarity_id = id, "rarity updated");

    Ok(ApiResponse::success(
        "Updated",
        rarity_from_entity(rarity),
        Some(Meta::empty()),
    ))
}

pub async fn delete_rarity(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let result = Rarities::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tracing::info!(rarity_id = id, "rarity deleted");
    Ok(ApiResponse::success("Deleted", Deleted { id }, Some(Meta::empty())))
}

pub async fn search_rarities(state: &AppState, name: &str) -> AppResult<ApiResponse<RarityList>> {
    let items = Rarities::find()
        .filter(Expr::col(Column::Name).ilike(contains_pattern(name)))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(rarity_from_entity)
        .collect();
    Ok(ApiResponse::success("Rarities", RarityList { items }, None))
}

pub async fn rarities_by_color_prefix(
    state: &AppState,
    prefix: &str,
) -> AppResult<ApiResponse<RarityList>> {
    let items = Rarities::find()
        .filter(Expr::col(Column::Color).ilike(prefix_pattern(prefix)))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(rarity_from_entity)
        .collect();
    Ok(ApiResponse::success("Rarities", RarityList { items }, None))
}

pub(crate) fn rarity_from_entity(model: RarityModel) -> Rarity {
    Rarity {
        id: model.id,
        name: model.name,
        color: model.color,
    }
}
