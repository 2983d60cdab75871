use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    catalog::validation::validate_category,
    dto::taxonomy::{CategoryList, CategoryPayload},
    entity::categories::{ActiveModel, Column, Entity as Categories, Model as CategoryModel},
    error::{AppError, AppResult},
    models::Category,
    response::{ApiResponse, Meta},
    services::{contains_pattern, prefix_pattern},
    state::AppState,
};

const RESOURCE: &str = "Category";

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items: Vec<Category> = Categories::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();
    tracing::debug!(count = items.len(), "categories listed");
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn get_category(state: &AppState, id: i32) -> AppResult<ApiResponse<Category>> {
    let result = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(category_from_entity);
    let result = match result {
        Some(c) => c,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };
    Ok(ApiResponse::success("Category", result, None))
}

pub async fn create_category(
    state: &AppState,
    payload: CategoryPayload,
) -> AppResult<ApiResponse<Category>> {
    validate_category(&payload).map_err(AppError::rejected(RESOURCE))?;
    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        description: Set(payload.description),
        image_url: Set(payload.image_url),
    };
    let category = active.insert(&state.orm).await?;
    tracing::info!(category_id = category.id, "category created");

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    id: i32,
    payload: CategoryPayload,
) -> AppResult<ApiResponse<Category>> {
    validate_category(&payload).map_err(AppError::rejected(RESOURCE))?;
    let existing = Categories::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.description = Set(payload.description);
    active.image_url = Set(payload.image_url);
    let category = active.update(&state.orm).await?;
    tracing::info!(category_id = id, "category updated");

    Ok(ApiResponse::success(
        "Updated",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(state: &AppState, id: i32) -> AppResult<()> {
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tracing::info!(category_id = id, "category deleted");
    Ok(())
}

pub async fn search_categories(
    state: &AppState,
    name: &str,
) -> AppResult<ApiResponse<CategoryList>> {
    let items = Categories::find()
        .filter(Expr::col(Column::Name).ilike(contains_pattern(name)))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();
    Ok(ApiResponse::success("Categories", CategoryList { items }, None))
}

pub async fn categories_starting_with(
    state: &AppState,
    prefix: &str,
) -> AppResult<ApiResponse<CategoryList>> {
    let items = Categories::find()
        .filter(Expr::col(Column::Name).ilike(prefix_pattern(prefix)))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();
    Ok(ApiResponse::success("Categories", CategoryList { items }, None))
}

pub(crate) fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        description: model.description,
        image_url: model.image_url,
    }
}
