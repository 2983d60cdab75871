use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, Collection, Rarity, Status};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CategoryPayload {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CollectionPayload {
    #[serde(default)]
    pub name: String,
    pub release_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RarityPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StatusPayload {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CollectionList {
    #[schema(value_type = Vec<Collection>)]
    pub items: Vec<Collection>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct RarityList {
    #[schema(value_type = Vec<Rarity>)]
    pub items: Vec<Rarity>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct StatusList {
    #[schema(value_type = Vec<Status>)]
    pub items: Vec<Status>,
}
