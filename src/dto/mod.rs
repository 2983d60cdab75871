pub mod products;
pub mod ratings;
pub mod taxonomy;
