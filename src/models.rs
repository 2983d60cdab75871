use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::pricing;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Collection {
    pub id: i32,
    pub name: String,
    pub release_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rarity {
    pub id: i32,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Status {
    pub id: i32,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rating {
    pub id: i32,
    pub customer_name: String,
    pub product_id: i32,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A card as served by the API: taxonomy embedded by value, ratings owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[schema(value_type = String)]
    pub original_price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub card_number: i32,
    pub creation_date: NaiveDate,
    pub category: Category,
    pub collection: Collection,
    pub rarity: Rarity,
    pub status: Status,
    pub ratings: Vec<Rating>,
    pub average_rating: f64,
    #[schema(value_type = String)]
    pub discount_percentage: Decimal,
    pub has_discount: bool,
}

impl Product {
    /// Recomputes the derived fields from the current price and rating set.
    pub fn refresh_derived(mut self) -> Self {
        self.average_rating = self.average_rating();
        self.discount_percentage = self.discount_percentage();
        self.has_discount = self.has_discount();
        self
    }

    pub fn scores(&self) -> Vec<i16> {
        self.ratings.iter().map(|rating| rating.score).collect()
    }

    pub fn average_rating(&self) -> f64 {
        pricing::average_score(&self.scores())
    }

    pub fn discount_percentage(&self) -> Decimal {
        pricing::discount_percentage(Some(self.price), Some(self.original_price))
    }

    pub fn has_discount(&self) -> bool {
        self.price < self.original_price
    }
}
