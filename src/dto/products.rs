use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

/// Body for both product create and full update.
///
/// Scalar fields are always written. On update a missing taxonomy id keeps
/// the current reference, and `ratings`, when present, replaces the whole set.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub original_price: Option<Decimal>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub card_number: Option<i32>,
    pub category_id: Option<i32>,
    pub collection_id: Option<i32>,
    pub rarity_id: Option<i32>,
    pub status_id: Option<i32>,
    pub ratings: Option<Vec<RatingInput>>,
}

/// A rating attached through a product payload; the product is implied.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RatingInput {
    #[serde(default)]
    pub customer_name: String,
    pub score: Option<i16>,
    pub comment: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingSummary {
    pub product_id: i32,
    pub average_rating: f64,
    pub rating_count: usize,
}
