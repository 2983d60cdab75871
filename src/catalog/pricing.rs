use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept on the discount ratio before it is scaled to a percentage.
const DISCOUNT_SCALE: u32 = 4;

/// Arithmetic mean of the given rating scores, `0.0` when there are none.
pub fn average_score(scores: &[i16]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: i64 = scores.iter().map(|score| i64::from(*score)).sum();
    sum as f64 / scores.len() as f64
}

/// Integer bucket an average falls into; halves round up (4.5 -> 5).
pub fn rating_bucket(average: f64) -> i32 {
    (average + 0.5).floor() as i32
}

/// Discount of `price` against `original_price` as a percentage.
///
/// The ratio `(original - price) / original` is rounded half-up to four
/// fractional digits and then scaled by 100, so a 25% cut yields `25.0000`.
/// Missing prices, a zero original price, or `price >= original_price` all
/// yield zero; the result is never negative.
pub fn discount_percentage(price: Option<Decimal>, original_price: Option<Decimal>) -> Decimal {
    let (Some(price), Some(original_price)) = (price, original_price) else {
        return Decimal::ZERO;
    };
    if price >= original_price {
        return Decimal::ZERO;
    }

    let Some(ratio) = (original_price - price).checked_div(original_price) else {
        return Decimal::ZERO;
    };
    let mut ratio = ratio.round_dp_with_strategy(DISCOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    ratio.rescale(DISCOUNT_SCALE);
    ratio * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_no_scores_is_zero() {
        assert_eq!(average_score(&[]), 0.0);
    }

    #[test]
    fn average_follows_running_mean() {
        let mut scores = vec![4, 5, 3];
        let before = average_score(&scores);
        let n = scores.len() as f64;
        scores.push(1);
        let after = average_score(&scores);
        assert!((after - (before * n + 1.0) / (n + 1.0)).abs() < f64::EPSILON);
        assert!((after - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn bucket_rounds_half_up() {
        assert_eq!(rating_bucket(4.5), 5);
        assert_eq!(rating_bucket(4.4), 4);
        assert_eq!(rating_bucket(2.5), 3);
        assert_eq!(rating_bucket(0.0), 0);
    }

    #[test]
    fn quarter_discount_is_exact() {
        let pct = discount_percentage(Some(Decimal::new(75, 0)), Some(Decimal::new(100, 0)));
        assert_eq!(pct, Decimal::new(25, 0));
        assert_eq!(pct.to_string(), "25.0000");
    }

    #[test]
    fn half_discount_on_two_decimal_prices() {
        let pct = discount_percentage(Some(Decimal::new(5000, 2)), Some(Decimal::new(10000, 2)));
        assert_eq!(pct.to_string(), "50.0000");
    }

    #[test]
    fn ratio_is_rounded_before_scaling() {
        // 1/3 -> 0.3333 -> 33.3300
        let pct = discount_percentage(Some(Decimal::new(2, 0)), Some(Decimal::new(3, 0)));
        assert_eq!(pct.to_string(), "33.3300");
        // 2/3 -> 0.66666.. rounds half-up to 0.6667
        let pct = discount_percentage(Some(Decimal::new(1, 0)), Some(Decimal::new(3, 0)));
        assert_eq!(pct, Decimal::new(666700, 4));
    }

    #[test]
    fn no_discount_is_zero() {
        let same = discount_percentage(Some(Decimal::new(100, 0)), Some(Decimal::new(100, 0)));
        let markup = discount_percentage(Some(Decimal::new(120, 0)), Some(Decimal::new(100, 0)));
        assert_eq!(same, Decimal::ZERO);
        assert_eq!(markup, Decimal::ZERO);
        assert_eq!(discount_percentage(None, Some(Decimal::ONE)), Decimal::ZERO);
        assert_eq!(discount_percentage(Some(Decimal::ONE), None), Decimal::ZERO);
    }
}
