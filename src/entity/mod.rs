pub mod categories;
pub mod collections;
pub mod products;
pub mod rarities;
pub mod ratings;
pub mod statuses;

pub use categories::Entity as Categories;
pub use collections::Entity as Collections;
pub use products::Entity as Products;
pub use rarities::Entity as Rarities;
pub use ratings::Entity as Ratings;
pub use statuses::Entity as Statuses;
