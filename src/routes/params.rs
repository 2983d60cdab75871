use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::ProductFilter;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

/// Query string of `GET /api/products/filter`.
///
/// Id lists are comma separated (`categories=1,2`); an absent or empty list
/// places no constraint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    #[serde(default, deserialize_with = "id_list")]
    #[param(value_type = Option<String>)]
    pub categories: Vec<i32>,
    #[serde(default, deserialize_with = "id_list")]
    #[param(value_type = Option<String>)]
    pub collections: Vec<i32>,
    #[serde(default, deserialize_with = "id_list")]
    #[param(value_type = Option<String>)]
    pub rarities: Vec<i32>,
    #[serde(default, deserialize_with = "id_list")]
    #[param(value_type = Option<String>)]
    pub statuses: Vec<i32>,
    #[serde(default, deserialize_with = "id_list")]
    #[param(value_type = Option<String>)]
    pub ratings: Vec<i32>,
    #[param(value_type = Option<String>)]
    pub min_price: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub max_price: Option<Decimal>,
    pub name: Option<String>,
}

impl From<FilterQuery> for ProductFilter {
    fn from(query: FilterQuery) -> Self {
        ProductFilter {
            category_ids: query.categories,
            collection_ids: query.collections,
            rarity_ids: query.rarities,
            status_ids: query.statuses,
            rating_buckets: query.ratings,
            min_price: query.min_price,
            max_price: query.max_price,
            name: query.name,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrefixQuery {
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DescriptionQuery {
    #[serde(default)]
    pub description: String,
}

fn id_list<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_id_list(raw.as_deref().unwrap_or_default()).map_err(serde::de::Error::custom)
}

fn parse_id_list(raw: &str) -> Result<Vec<i32>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i32>().map_err(|_| format!("invalid id `{s}`")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_id_list("1,2, 3"), Ok(vec![1, 2, 3]));
        assert_eq!(parse_id_list(""), Ok(vec![]));
        assert_eq!(parse_id_list("4,,"), Ok(vec![4]));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(parse_id_list("1,abc").is_err());
    }

    #[test]
    fn pagination_clamps_inputs() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(500),
        };
        assert_eq!(p.normalize(), (1, 100, 0));

        let p = Pagination {
            page: Some(3),
            per_page: None,
        };
        assert_eq!(p.normalize(), (3, 20, 40));
    }

    #[test]
    fn empty_name_is_no_constraint() {
        let query = FilterQuery {
            categories: vec![1],
            name: Some(String::new()),
            ..Default::default()
        };
        let filter = ProductFilter::from(query);
        assert_eq!(filter.category_ids, vec![1]);

        let name_only = ProductFilter::from(FilterQuery {
            name: Some(String::new()),
            ..Default::default()
        });
        assert!(name_only.is_unconstrained());
    }

    #[test]
    fn whitespace_name_still_constrains() {
        let filter = ProductFilter::from(FilterQuery {
            name: Some(" ".into()),
            ..Default::default()
        });
        assert_eq!(filter.name.as_deref(), Some(" "));
        assert!(!filter.is_unconstrained());
    }
}
