use rust_decimal::Decimal;

use crate::catalog::pricing;
use crate::models::Product;

/// The eight independent filter dimensions over the product catalog.
///
/// An empty list or `None` leaves that dimension unconstrained; every
/// constrained dimension must hold for a product to match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category_ids: Vec<i32>,
    pub collection_ids: Vec<i32>,
    pub rarity_ids: Vec<i32>,
    pub status_ids: Vec<i32>,
    pub rating_buckets: Vec<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub name: Option<String>,
}

impl ProductFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.category_ids.is_empty()
            && self.collection_ids.is_empty()
            && self.rarity_ids.is_empty()
            && self.status_ids.is_empty()
            && self.rating_buckets.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.name_needle().is_none()
    }

    /// Keeps the matching products in their original order.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let needle = self.name_needle();
        products
            .into_iter()
            .filter(|product| self.matches_with(product, needle.as_deref()))
            .collect()
    }

    fn matches_with(&self, product: &Product, needle: Option<&str>) -> bool {
        id_in(&self.category_ids, product.category.id)
            && id_in(&self.collection_ids, product.collection.id)
            && id_in(&self.rarity_ids, product.rarity.id)
            && id_in(&self.status_ids, product.status.id)
            && self.rating_matches(product)
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && needle.is_none_or(|needle| product.name.to_lowercase().contains(needle))
    }

    // A product without ratings never matches a bucket, not even bucket 0.
    fn rating_matches(&self, product: &Product) -> bool {
        if self.rating_buckets.is_empty() {
            return true;
        }
        if product.ratings.is_empty() {
            return false;
        }
        let bucket = pricing::rating_bucket(product.average_rating());
        self.rating_buckets.contains(&bucket)
    }

    fn name_needle(&self) -> Option<String> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase)
    }
}

fn id_in(ids: &[i32], id: i32) -> bool {
    ids.is_empty() || ids.contains(&id)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::models::{Category, Collection, Rarity, Rating, Status};

    fn product(id: i32, name: &str, price: i64, scores: &[i16]) -> Product {
        let ratings = scores
            .iter()
            .enumerate()
            .map(|(idx, score)| Rating {
                id: id * 100 + idx as i32,
                customer_name: format!("customer-{idx}"),
                product_id: id,
                score: *score,
                comment: None,
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            })
            .collect();
        Product {
            id,
            name: name.to_string(),
            description: None,
            price: Decimal::new(price, 0),
            original_price: Decimal::new(100, 0),
            stock: 1,
            image_url: None,
            card_number: id,
            creation_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: Category {
                id: id % 2 + 1,
                name: "Fire".into(),
                description: None,
                image_url: None,
            },
            collection: Collection {
                id: 10,
                name: "Base Set".into(),
                release_date: None,
                image_url: None,
                description: None,
                code: Some("BS".into()),
            },
            rarity: Rarity {
                id,
                name: "Rare".into(),
                color: "gold".into(),
            },
            status: Status {
                id: 1,
                code: "NEW".into(),
                description: "New".into(),
            },
            ratings,
            average_rating: 0.0,
            discount_percentage: Decimal::ZERO,
            has_discount: false,
        }
        .refresh_derived()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Charizard", 50, &[5, 4]),
            product(2, "Blastoise", 30, &[4, 4, 5]),
            product(3, "Dark Charizard", 80, &[]),
            product(4, "Pikachu", 5, &[1, 2]),
        ]
    }

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let filter = ProductFilter::default();
        assert!(filter.is_unconstrained());
        assert_eq!(filter.apply(catalog()), catalog());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = ProductFilter {
            min_price: Some(Decimal::new(30, 0)),
            max_price: Some(Decimal::new(50, 0)),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![1, 2]);
    }

    #[test]
    fn name_match_ignores_case() {
        let filter = ProductFilter {
            name: Some("chARiz".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![1, 3]);
    }

    #[test]
    fn empty_name_is_unconstrained() {
        let filter = ProductFilter {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_unconstrained());
        assert_eq!(filter.apply(catalog()).len(), 4);
    }

    #[test]
    fn whitespace_name_matches_names_with_a_space() {
        let filter = ProductFilter {
            name: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![3]);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let filter = ProductFilter {
            category_ids: vec![2],
            name: Some("charizard".into()),
            ..Default::default()
        };
        // category 2 holds ids 1 and 3, both named Charizard
        assert_eq!(ids(&filter.apply(catalog())), vec![1, 3]);

        let narrowed = ProductFilter {
            rarity_ids: vec![3],
            ..filter
        };
        assert_eq!(ids(&narrowed.apply(catalog())), vec![3]);
    }

    #[test]
    fn id_sets_match_any_member() {
        let filter = ProductFilter {
            rarity_ids: vec![2, 4, 99],
            collection_ids: vec![10],
            status_ids: vec![1],
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![2, 4]);
    }

    #[test]
    fn rating_bucket_rounds_half_up() {
        // Charizard averages 4.5, Blastoise 4.33.., Pikachu 1.5
        let fives = ProductFilter {
            rating_buckets: vec![5],
            ..Default::default()
        };
        assert_eq!(ids(&fives.apply(catalog())), vec![1]);

        let fours = ProductFilter {
            rating_buckets: vec![4],
            ..Default::default()
        };
        assert_eq!(ids(&fours.apply(catalog())), vec![2]);

        let twos = ProductFilter {
            rating_buckets: vec![2],
            ..Default::default()
        };
        assert_eq!(ids(&twos.apply(catalog())), vec![4]);
    }

    #[test]
    fn unrated_products_never_match_a_bucket() {
        let unrated = product(3, "Dark Charizard", 80, &[]);
        for bucket in [0, 1] {
            let filter = ProductFilter {
                rating_buckets: vec![bucket],
                ..Default::default()
            };
            assert!(filter.apply(vec![unrated.clone()]).is_empty());
        }
    }
}
