use anyhow::anyhow;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, LoaderTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    catalog::{ProductFilter, WriteMode, pricing, validation::validate_product},
    dto::products::{ProductList, ProductPayload, RatingInput, RatingSummary},
    entity::{
        Categories, Collections, Rarities, Statuses,
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        ratings::{
            self, ActiveModel as RatingActive, Column as RatingCol, Entity as Ratings,
        },
    },
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    services::{
        category_service::category_from_entity, collection_service::collection_from_entity,
        contains_pattern, rarity_service::rarity_from_entity, rating_service::rating_from_entity,
        status_service::status_from_entity,
    },
    state::AppState,
};

const RESOURCE: &str = "Product";

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items = load_products(&state.orm, Condition::all()).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = find_product(&state.orm, id).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    payload: ProductPayload,
) -> AppResult<ApiResponse<Product>> {
    check(&payload, WriteMode::Create)?;

    let txn = state.orm.begin().await?;
    // Every unwrap_or_default below reads a field the validator has required.
    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name.clone().unwrap_or_default()),
        description: Set(payload.description.clone()),
        price: Set(payload.price.unwrap_or_default()),
        original_price: Set(payload.original_price.unwrap_or_default()),
        stock: Set(payload.stock.unwrap_or_default()),
        image_url: Set(payload.image_url.clone()),
        card_number: Set(payload.card_number.unwrap_or_default()),
        category_id: Set(payload.category_id.unwrap_or_default()),
        collection_id: Set(payload.collection_id.unwrap_or_default()),
        rarity_id: Set(payload.rarity_id.unwrap_or_default()),
        status_id: Set(payload.status_id.unwrap_or_default()),
        creation_date: Set(Utc::now().date_naive()),
    };
    let model = active.insert(&txn).await?;

    if let Some(inputs) = &payload.ratings {
        insert_ratings(&txn, model.id, inputs).await?;
    }
    txn.commit().await?;

    tracing::info!(product_id = model.id, "product created");
    let product = find_product(&state.orm, model.id).await?;
    Ok(ApiResponse::success("Product created", product, Some(Meta::empty())))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: ProductPayload,
) -> AppResult<ApiResponse<Product>> {
    check(&payload, WriteMode::Update)?;

    let txn = state.orm.begin().await?;
    let existing = Products::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };

    merge_update(existing, &payload).update(&txn).await?;

    if let Some(inputs) = &payload.ratings {
        let removed = Ratings::delete_many()
            .filter(RatingCol::ProductId.eq(id))
            .exec(&txn)
            .await?;
        insert_ratings(&txn, id, inputs).await?;
        tracing::debug!(
            product_id = id,
            removed = removed.rows_affected,
            added = inputs.len(),
            "product ratings replaced"
        );
    }
    txn.commit().await?;

    tracing::info!(product_id = id, "product updated");
    let product = find_product(&state.orm, id).await?;
    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

pub async fn delete_product(state: &AppState, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    Ratings::delete_many()
        .filter(RatingCol::ProductId.eq(id))
        .exec(&txn)
        .await?;
    let result = Products::delete_by_id(id).exec(&txn).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found(RESOURCE, id));
    }
    txn.commit().await?;

    tracing::info!(product_id = id, "product deleted");
    Ok(())
}

/// Case-insensitive substring search on the product name.
pub async fn search_products(state: &AppState, name: &str) -> AppResult<ApiResponse<ProductList>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("search term must not be empty".into()));
    }
    let condition = Condition::all().add(Expr::col(Column::Name).ilike(contains_pattern(name)));
    products_where(state, condition).await
}

pub async fn products_by_category(
    state: &AppState,
    category_id: i32,
) -> AppResult<ApiResponse<ProductList>> {
    products_where(state, Condition::all().add(Column::CategoryId.eq(category_id))).await
}

pub async fn products_by_collection(
    state: &AppState,
    collection_id: i32,
) -> AppResult<ApiResponse<ProductList>> {
    products_where(state, Condition::all().add(Column::CollectionId.eq(collection_id))).await
}

pub async fn products_by_rarity(
    state: &AppState,
    rarity_id: i32,
) -> AppResult<ApiResponse<ProductList>> {
    products_where(state, Condition::all().add(Column::RarityId.eq(rarity_id))).await
}

pub async fn products_by_status(
    state: &AppState,
    status_id: i32,
) -> AppResult<ApiResponse<ProductList>> {
    products_where(state, Condition::all().add(Column::StatusId.eq(status_id))).await
}

/// Loads the whole catalog once and keeps the products matching every
/// constrained dimension of `filter`, in catalog order.
pub async fn filter_products(
    state: &AppState,
    filter: ProductFilter,
) -> AppResult<ApiResponse<ProductList>> {
    let all = load_products(&state.orm, Condition::all()).await?;
    let scanned = all.len();
    let items = if filter.is_unconstrained() {
        all
    } else {
        filter.apply(all)
    };
    tracing::debug!(scanned, matched = items.len(), "products filtered");

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

/// Mean score over the product's current ratings, `0` when it has none.
pub async fn average_rating(state: &AppState, id: i32) -> AppResult<ApiResponse<RatingSummary>> {
    let exists = Products::find_by_id(id).one(&state.orm).await?;
    if exists.is_none() {
        return Err(AppError::not_found(RESOURCE, id));
    }

    let scores: Vec<i16> = Ratings::find()
        .filter(RatingCol::ProductId.eq(id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|rating| rating.score)
        .collect();

    let summary = RatingSummary {
        product_id: id,
        average_rating: pricing::average_score(&scores),
        rating_count: scores.len(),
    };
    Ok(ApiResponse::success("Average rating", summary, None))
}

async fn products_where(
    state: &AppState,
    condition: Condition,
) -> AppResult<ApiResponse<ProductList>> {
    let items = load_products(&state.orm, condition).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

fn check(payload: &ProductPayload, mode: WriteMode) -> AppResult<()> {
    validate_product(payload, mode).map_err(|violations| {
        tracing::warn!(?mode, count = violations.len(), "product rejected by validation");
        AppError::Validation(violations)
    })
}

/// Scalars are always overwritten; taxonomy ids only when supplied.
/// `creation_date` is never touched.
fn merge_update(existing: ProductModel, payload: &ProductPayload) -> ActiveModel {
    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name.clone().unwrap_or_default());
    active.description = Set(payload.description.clone());
    active.price = Set(payload.price.unwrap_or_default());
    active.original_price = Set(payload.original_price.unwrap_or_default());
    active.stock = Set(payload.stock.unwrap_or_default());
    active.image_url = Set(payload.image_url.clone());
    active.card_number = Set(payload.card_number.unwrap_or_default());

    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(collection_id) = payload.collection_id {
        active.collection_id = Set(collection_id);
    }
    if let Some(rarity_id) = payload.rarity_id {
        active.rarity_id = Set(rarity_id);
    }
    if let Some(status_id) = payload.status_id {
        active.status_id = Set(status_id);
    }
    active
}

async fn insert_ratings<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
    inputs: &[RatingInput],
) -> AppResult<()> {
    if inputs.is_empty() {
        return Ok(());
    }
    let now = Utc::now();
    let rows = inputs.iter().map(|input| RatingActive {
        id: NotSet,
        customer_name: Set(input.customer_name.clone()),
        product_id: Set(product_id),
        score: Set(input.score.unwrap_or_default()),
        comment: Set(input.comment.clone()),
        created_at: Set(now.into()),
    });
    Ratings::insert_many(rows).exec(db).await?;
    Ok(())
}

async fn find_product<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<Product> {
    let model = Products::find_by_id(id).one(db).await?;
    let model = match model {
        Some(p) => p,
        None => return Err(AppError::not_found(RESOURCE, id)),
    };
    let mut products = hydrate(db, vec![model]).await?;
    products
        .pop()
        .ok_or_else(|| AppError::not_found(RESOURCE, id))
}

async fn load_products<C: ConnectionTrait>(db: &C, condition: Condition) -> AppResult<Vec<Product>> {
    let models = Products::find()
        .filter(condition)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    hydrate(db, models).await
}

/// Attaches taxonomy and ratings to product rows with one query per relation.
async fn hydrate<C: ConnectionTrait>(db: &C, models: Vec<ProductModel>) -> AppResult<Vec<Product>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let mut categories = models.load_one(Categories, db).await?.into_iter();
    let mut collections = models.load_one(Collections, db).await?.into_iter();
    let mut rarities = models.load_one(Rarities, db).await?.into_iter();
    let mut statuses = models.load_one(Statuses, db).await?.into_iter();
    let mut ratings = models
        .load_many(Ratings::find().order_by_asc(ratings::Column::Id), db)
        .await?
        .into_iter();

    let mut products = Vec::with_capacity(models.len());
    for model in models {
        let (Some(category), Some(collection), Some(rarity), Some(status)) = (
            categories.next().flatten(),
            collections.next().flatten(),
            rarities.next().flatten(),
            statuses.next().flatten(),
        ) else {
            return Err(anyhow!("product {} has a dangling taxonomy reference", model.id).into());
        };
        let ratings = ratings.next().unwrap_or_default();

        let product = Product {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            original_price: model.original_price,
            stock: model.stock,
            image_url: model.image_url,
            card_number: model.card_number,
            creation_date: model.creation_date,
            category: category_from_entity(category),
            collection: collection_from_entity(collection),
            rarity: rarity_from_entity(rarity),
            status: status_from_entity(status),
            ratings: ratings.into_iter().map(rating_from_entity).collect(),
            average_rating: 0.0,
            discount_percentage: Default::default(),
            has_discount: false,
        };
        products.push(product.refresh_derived());
    }
    Ok(products)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn existing() -> ProductModel {
        ProductModel {
            id: 7,
            name: "Charizard".into(),
            description: Some("Holo".into()),
            price: Decimal::new(5000, 2),
            original_price: Decimal::new(10000, 2),
            stock: 3,
            image_url: None,
            card_number: 4,
            category_id: 1,
            collection_id: 2,
            rarity_id: 3,
            status_id: 4,
            creation_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn payload() -> ProductPayload {
        ProductPayload {
            name: Some("Charizard 1st Edition".into()),
            description: None,
            price: Some(Decimal::new(9000, 2)),
            original_price: Some(Decimal::new(10000, 2)),
            stock: Some(1),
            card_number: Some(4),
            ..Default::default()
        }
    }

    #[test]
    fn omitted_taxonomy_keeps_existing_reference() {
        let active = merge_update(existing(), &payload());
        assert!(!active.rarity_id.is_set());
        assert_eq!(active.rarity_id.clone().unwrap(), 3);
        assert_eq!(active.category_id.clone().unwrap(), 1);
        assert_eq!(active.collection_id.clone().unwrap(), 2);
        assert_eq!(active.status_id.clone().unwrap(), 4);
    }

    #[test]
    fn supplied_taxonomy_replaces_reference() {
        let payload = ProductPayload {
            rarity_id: Some(9),
            ..payload()
        };
        let active = merge_update(existing(), &payload);
        assert!(active.rarity_id.is_set());
        assert_eq!(active.rarity_id.clone().unwrap(), 9);
    }

    #[test]
    fn scalars_are_always_overwritten() {
        let active = merge_update(existing(), &payload());
        assert_eq!(active.name.clone().unwrap(), "Charizard 1st Edition");
        assert_eq!(active.description.clone().unwrap(), None);
        assert_eq!(active.price.clone().unwrap(), Decimal::new(9000, 2));
        assert_eq!(active.stock.clone().unwrap(), 1);
        assert!(!active.creation_date.is_set());
    }
}
