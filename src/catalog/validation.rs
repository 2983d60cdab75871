use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::{
    products::{ProductPayload, RatingInput},
    ratings::RatingPayload,
    taxonomy::{CategoryPayload, CollectionPayload, RarityPayload, StatusPayload},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

pub type ValidationResult = Result<(), Vec<FieldViolation>>;

/// Whether a product payload is about to be inserted or applied to an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

#[derive(Debug, Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    fn required_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        match value {
            Some(value) if !value.trim().is_empty() => self.max_len(field, Some(value), max),
            _ => self.push(field, "is required"),
        }
    }

    fn max_len(&mut self, field: &str, value: Option<&str>, max: usize) {
        if value.is_some_and(|value| value.chars().count() > max) {
            self.push(field, format!("must be at most {max} characters"));
        }
    }

    fn positive(&mut self, field: &str, value: Option<Decimal>) {
        match value {
            None => self.push(field, "is required"),
            Some(value) if value <= Decimal::ZERO => self.push(field, "must be greater than 0"),
            Some(_) => {}
        }
    }

    fn required<T>(&mut self, field: &str, value: Option<T>) {
        if value.is_none() {
            self.push(field, "is required");
        }
    }

    fn score(&mut self, field: &str, value: Option<i16>) {
        match value {
            None => self.push(field, "is required"),
            Some(score) if !(1..=5).contains(&score) => {
                self.push(field, "must be between 1 and 5")
            }
            Some(_) => {}
        }
    }

    fn finish(self) -> ValidationResult {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

/// Pre-save checks for a product write.
///
/// Name, price, original price, stock and card number are checked the same
/// way for create and update. Taxonomy references are only required on
/// create, since an update keeps the current reference when one is omitted.
pub fn validate_product(payload: &ProductPayload, mode: WriteMode) -> ValidationResult {
    let mut v = Violations::default();

    v.required_text("name", payload.name.as_deref(), 100);
    v.max_len("description", payload.description.as_deref(), 500);
    v.positive("price", payload.price);
    v.positive("original_price", payload.original_price);
    match payload.stock {
        None => v.push("stock", "is required"),
        Some(stock) if stock < 0 => v.push("stock", "must not be negative"),
        Some(_) => {}
    }
    v.max_len("image_url", payload.image_url.as_deref(), 255);
    v.required("card_number", payload.card_number);

    if mode == WriteMode::Create {
        v.required("category_id", payload.category_id);
        v.required("collection_id", payload.collection_id);
        v.required("rarity_id", payload.rarity_id);
        v.required("status_id", payload.status_id);
    }

    for (idx, rating) in payload.ratings.iter().flatten().enumerate() {
        rating_input(&mut v, &format!("ratings[{idx}]."), rating);
    }

    v.finish()
}

fn rating_input(v: &mut Violations, prefix: &str, rating: &RatingInput) {
    v.required_text(&format!("{prefix}customer_name"), Some(rating.customer_name.as_str()), 100);
    v.score(&format!("{prefix}score"), rating.score);
    v.max_len(&format!("{prefix}comment"), rating.comment.as_deref(), 2000);
}

pub fn validate_rating(payload: &RatingPayload) -> ValidationResult {
    let mut v = Violations::default();
    v.required_text("customer_name", Some(payload.customer_name.as_str()), 100);
    v.required("product_id", payload.product_id);
    v.score("score", payload.score);
    v.max_len("comment", payload.comment.as_deref(), 2000);
    v.finish()
}

pub fn validate_category(payload: &CategoryPayload) -> ValidationResult {
    let mut v = Violations::default();
    v.required_text("name", Some(payload.name.as_str()), 50);
    v.max_len("image_url", payload.image_url.as_deref(), 255);
    v.finish()
}

pub fn validate_collection(payload: &CollectionPayload) -> ValidationResult {
    let mut v = Violations::default();
    v.required_text("name", Some(payload.name.as_str()), 100);
    v.max_len("image_url", payload.image_url.as_deref(), 255);
    v.max_len("code", payload.code.as_deref(), 10);
    v.finish()
}

pub fn validate_rarity(payload: &RarityPayload) -> ValidationResult {
    let mut v = Violations::default();
    v.required_text("name", Some(payload.name.as_str()), 30);
    v.required_text("color", Some(payload.color.as_str()), 20);
    v.finish()
}

pub fn validate_status(payload: &StatusPayload) -> ValidationResult {
    let mut v = Violations::default();
    v.required_text("code", Some(payload.code.as_str()), 5);
    if !payload.code.is_empty() && !payload.code.chars().all(|c| c.is_ascii_uppercase()) {
        v.push("code", "must contain only uppercase letters");
    }
    v.required_text("description", Some(payload.description.as_str()), 50);
    v.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product() -> ProductPayload {
        ProductPayload {
            name: Some("Charizard".into()),
            price: Some(Decimal::new(5000, 2)),
            original_price: Some(Decimal::new(10000, 2)),
            stock: Some(3),
            card_number: Some(4),
            category_id: Some(1),
            collection_id: Some(1),
            rarity_id: Some(1),
            status_id: Some(1),
            ..Default::default()
        }
    }

    fn fields(result: ValidationResult) -> Vec<String> {
        result
            .unwrap_err()
            .into_iter()
            .map(|violation| violation.field)
            .collect()
    }

    #[test]
    fn complete_product_passes_both_modes() {
        assert!(validate_product(&valid_product(), WriteMode::Create).is_ok());
        assert!(validate_product(&valid_product(), WriteMode::Update).is_ok());
    }

    #[test]
    fn scalar_checks_are_identical_for_create_and_update() {
        let payload = ProductPayload {
            name: Some("   ".into()),
            price: Some(Decimal::ZERO),
            stock: Some(-1),
            ..valid_product()
        };
        let create = fields(validate_product(&payload, WriteMode::Create));
        let update = fields(validate_product(&payload, WriteMode::Update));
        assert_eq!(create, vec!["name", "price", "stock"]);
        assert_eq!(create, update);
    }

    #[test]
    fn missing_price_and_stock_are_rejected() {
        let payload = ProductPayload {
            price: None,
            stock: None,
            ..valid_product()
        };
        assert_eq!(
            fields(validate_product(&payload, WriteMode::Update)),
            vec!["price", "stock"]
        );
    }

    #[test]
    fn taxonomy_is_required_only_on_create() {
        let payload = ProductPayload {
            rarity_id: None,
            status_id: None,
            ..valid_product()
        };
        assert_eq!(
            fields(validate_product(&payload, WriteMode::Create)),
            vec!["rarity_id", "status_id"]
        );
        assert!(validate_product(&payload, WriteMode::Update).is_ok());
    }

    #[test]
    fn embedded_ratings_are_checked() {
        let payload = ProductPayload {
            ratings: Some(vec![
                RatingInput {
                    customer_name: "Ash".into(),
                    score: Some(5),
                    comment: None,
                },
                RatingInput {
                    customer_name: String::new(),
                    score: Some(6),
                    comment: None,
                },
            ]),
            ..valid_product()
        };
        assert_eq!(
            fields(validate_product(&payload, WriteMode::Update)),
            vec!["ratings[1].customer_name", "ratings[1].score"]
        );
    }

    #[test]
    fn name_length_is_bounded() {
        let payload = ProductPayload {
            name: Some("x".repeat(101)),
            ..valid_product()
        };
        let violations = validate_product(&payload, WriteMode::Create).unwrap_err();
        assert_eq!(violations[0].message, "must be at most 100 characters");
    }

    #[test]
    fn status_code_must_be_uppercase_letters() {
        let ok = StatusPayload {
            code: "NEW".into(),
            description: "New".into(),
        };
        assert!(validate_status(&ok).is_ok());

        let lower = StatusPayload {
            code: "new".into(),
            ..ok.clone()
        };
        assert_eq!(fields(validate_status(&lower)), vec!["code"]);

        let long = StatusPayload {
            code: "MINTED".into(),
            ..ok
        };
        assert_eq!(fields(validate_status(&long)), vec!["code"]);
    }

    #[test]
    fn rating_score_is_bounded() {
        let payload = RatingPayload {
            customer_name: "Misty".into(),
            product_id: Some(1),
            score: Some(0),
            comment: None,
        };
        assert_eq!(fields(validate_rating(&payload)), vec!["score"]);
    }

    #[test]
    fn rarity_requires_name_and_color() {
        assert_eq!(
            fields(validate_rarity(&RarityPayload::default())),
            vec!["name", "color"]
        );
    }
}
