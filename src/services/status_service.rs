use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    catalog::validation::validate_status,
    dto::taxonomy::{StatusList, StatusPayload},
    entity::statuses::{ActiveModel, Column, Entity as Statuses, Model as StatusModel},
    error::{AppError, AppResult},
    models::Status,
    response::{ApiResponse, Deleted, Meta},
    services::{contains_pattern, prefix_pattern},
    state::AppState,
};

const RESOURCE: &str = "Status";

pub async fn list_statuses(state: &AppState) -> AppResult<ApiResponse<StatusList>> {
    let items: Vec<Status> = Statuses::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(status_from_entity)
        .collect();
    tracing::debug!(count = items.len(), "statuses listed");
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Statuses", StatusList { items }, Some(meta)))
}

pub async fn get_status(state: &AppState, id: i32) -> AppResult<ApiResponse<Status>> {
    let result = Statuses::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(status_from_entity);
    let result = match result {
        Some(s) => s,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };
    Ok(ApiResponse::success("Status", result, None))
}

/// A duplicate code is rejected by the store's unique index and surfaces as a conflict.
pub async fn create_status(
    state: &AppState,
    payload: StatusPayload,
) -> AppResult<ApiResponse<Status>> {
    validate_status(&payload).map_err(AppError::rejected(RESOURCE))?;
    let active = ActiveModel {
        id: NotSet,
        code: Set(payload.code),
        description: Set(payload.description),
    };
    let status = active.insert(&state.orm).await?;
    tracing::info!(status_id = status.id, code = %status.code, "status created");

    Ok(ApiResponse::success(
        "Status created",
        status_from_entity(status),
        Some(Meta::empty()),
    ))
}

pub async fn update_status(
    state: &AppState,
    id: i32,
    payload: StatusPayload,
) -> AppResult<ApiResponse<Status>> {
    validate_status(&payload).map_err(AppError::rejected(RESOURCE))?;
    let existing = Statuses::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };

    let mut active: ActiveModel = existing.into();
    active.code = Set(payload.code);
    active.description = Set(payload.description);
    let status = active.update(&state.orm).await?;
    tracing::info!(status_id = id, "status updated");

    Ok(ApiResponse::success(
        "Updated",
        status_from_entity(status),
        Some(Meta::empty()),
    ))
}

pub async fn delete_status(state: &AppState, id: i32) -> AppResult<ApiResponse<Deleted>> {
    let result = Statuses::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tracing::info!(status_id = id, "status deleted");
    Ok(ApiResponse::success("Deleted", Deleted { id }, Some(Meta::empty())))
}

pub async fn search_statuses(
    state: &AppState,
    description: &str,
) -> AppResult<ApiResponse<StatusList>> {
    let items = Statuses::find()
        .filter(Expr::col(Column::Description).ilike(contains_pattern(description)))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(status_from_entity)
        .collect();
    Ok(ApiResponse::success("Statuses", StatusList { items }, None))
}

pub async fn statuses_by_code_prefix(
    state: &AppState,
    prefix: &str,
) -> AppResult<ApiResponse<StatusList>> {
    let items = Statuses::find()
        .filter(Expr::col(Column::Code).ilike(prefix_pattern(prefix)))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(status_from_entity)
        .collect();
    Ok(ApiResponse::success("Statuses", StatusList { items }, None))
}

pub(crate) fn status_from_entity(model: StatusModel) -> Status {
    Status {
        id: model.id,
        code: model.code,
        description: model.description,
    }
}
