use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    catalog::FieldViolation,
    dto::{
        products::{ProductList, ProductPayload, RatingInput, RatingSummary},
        ratings::{RatingList, RatingPayload},
        taxonomy::{
            CategoryList, CategoryPayload, CollectionList, CollectionPayload, RarityList,
            RarityPayload, StatusList, StatusPayload,
        },
    },
    models::{Category, Collection, Product, Rarity, Rating, Status},
    response::{ApiResponse, Deleted, Meta},
    routes::{categories, collections, health, params, products, rarities, ratings, statuses},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Catalog API",
        description = "Catalog of collectible cards with their taxonomy and customer ratings. All routes are public."
    ),
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::search_products,
        products::filter_products,
        products::average_rating,
        products::products_by_category,
        products::products_by_collection,
        products::products_by_rarity,
        products::products_by_status,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        categories::search_categories,
        categories::categories_starting_with,
        collections::list_collections,
        collections::get_collection,
        collections::create_collection,
        collections::update_collection,
        collections::delete_collection,
        collections::search_collections,
        collections::collections_starting_with,
        rarities::list_rarities,
        rarities::get_rarity,
        rarities::create_rarity,
        rarities::update_rarity,
        rarities::delete_rarity,
        rarities::search_rarities,
        rarities::rarities_by_color,
        statuses::list_statuses,
        statuses::get_status,
        statuses::create_status,
        statuses::update_status,
        statuses::delete_status,
        statuses::search_statuses,
        statuses::statuses_by_code,
        ratings::list_ratings,
        ratings::get_rating,
        ratings::create_rating,
        ratings::update_rating,
        ratings::delete_rating,
        ratings::ratings_by_product,
        ratings::ratings_by_score,
        ratings::ratings_by_customer
    ),
    components(
        schemas(
            Product,
            Category,
            Collection,
            Rarity,
            Status,
            Rating,
            ProductPayload,
            RatingInput,
            CategoryPayload,
            CollectionPayload,
            RarityPayload,
            StatusPayload,
            RatingPayload,
            ProductList,
            CategoryList,
            CollectionList,
            RarityList,
            StatusList,
            RatingList,
            RatingSummary,
            FieldViolation,
            Deleted,
            params::Pagination,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<RatingSummary>,
            ApiResponse<Deleted>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Card endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Collections", description = "Collection endpoints"),
        (name = "Rarities", description = "Rarity endpoints"),
        (name = "Statuses", description = "Status endpoints"),
        (name = "Ratings", description = "Customer rating endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
