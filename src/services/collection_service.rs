use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::{
    catalog::validation::validate_collection,
    dto::taxonomy::{CollectionList, CollectionPayload},
    entity::collections::{ActiveModel, Column, Entity as Collections, Model as CollectionModel},
    error::{AppError, AppResult},
    models::Collection,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{contains_pattern, prefix_pattern},
    state::AppState,
};

const RESOURCE: &str = "Collection";

pub async fn list_collections(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CollectionList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Collections::find().order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(collection_from_entity)
        .collect();

    tracing::debug!(page, limit, total, "collections listed");
    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Collections", CollectionList { items }, Some(meta)))
}

pub async fn get_collection(state: &AppState, id: i32) -> AppResult<ApiResponse<Collection>> {
    let result = Collections::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(collection_from_entity);
    let result = match result {
        Some(c) => c,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };
    Ok(ApiResponse::success("Collection", result, None))
}

pub async fn create_collection(
    state: &AppState,
    payload: CollectionPayload,
) -> AppResult<ApiResponse<Collection>> {
    validate_collection(&payload).map_err(AppError::rejected(RESOURCE))?;
    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        release_date: Set(payload.release_date),
        image_url: Set(payload.image_url),
        description: Set(payload.description),
        code: Set(payload.code),
    };
    let collection = active.insert(&state.orm).await?;
    tracing::info!(collection_id = collection.id, "collection created");

    Ok(ApiResponse::success(
        "Collection created",
        collection_from_entity(collection),
        Some(Meta::empty()),
    ))
}

pub async fn update_collection(
    state: &AppState,
    id: i32,
    payload: CollectionPayload,
) -> AppResult<ApiResponse<Collection>> {
    validate_collection(&payload).map_err(AppError::rejected(RESOURCE))?;
    let existing = Collections::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.release_date = Set(payload.release_date);
    active.image_url = Set(payload.image_url);
    active.description = Set(payload.description);
    active.code = Set(payload.code);
    let collection = active.update(&state.orm).await?;
    tracing::info!(collection_id = id, "collection updated");

    Ok(ApiResponse::success(
        "Updated",
        collection_from_entity(collection),
        Some(Meta::empty()),
    ))
}

pub async fn delete_collection(state: &AppState, id: i32) -> AppResult<()> {
    let result = Collections::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tracing::info!(collection_id = id, "collection deleted");
    Ok(())
}

pub async fn search_collections(
    state: &AppState,
    name: &str,
) -> AppResult<ApiResponse<CollectionList>> {
    let items = Collections::find()
        .filter(Expr::col(Column::Name).ilike(contains_pattern(name)))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(collection_from_entity)
        .collect();
    Ok(ApiResponse::success("Collections", CollectionList { items }, None))
}

pub async fn collections_starting_with(
    state: &AppState,
    prefix: &str,
) -> AppResult<ApiResponse<CollectionList>> {
    let items = Collections::find()
        .filter(Expr::col(Column::Name).ilike(prefix_pattern(prefix)))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(collection_from_entity)
        .collect();
    Ok(ApiResponse::success("Collections", CollectionList { items }, None))
}

pub(crate) fn collection_from_entity(model: CollectionModel) -> Collection {
    Collection {
        id: model.id,
        name: model.name,
        release_date: model.release_date,
        image_url: model.image_url,
        description: model.description,
        code: model.code,
    }
}
