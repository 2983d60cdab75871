use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Rating;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RatingPayload {
    #[serde(default)]
    pub customer_name: String,
    pub product_id: Option<i32>,
    pub score: Option<i16>,
    pub comment: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct RatingList {
    #[schema(value_type = Vec<Rating>)]
    pub items: Vec<Rating>,
}
