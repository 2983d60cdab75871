use axum::Router;

use crate::state::AppState;

pub mod categories;
pub mod collections;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod rarities;
pub mod ratings;
pub mod statuses;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/collections", collections::router())
        .nest("/rarities", rarities::router())
        .nest("/statuses", statuses::router())
        .nest("/ratings", ratings::router())
}
