use bigdecimal::{BigDecimal, ToPrimitive};

/// Normalize a monetary value to 2 decimal places.
pub fn normalize_scale(value: &BigDecimal) -> BigDecimal {
    value.with_scale(2)
}

/// Sum a series of prices. An empty series totals zero.
pub fn sum_prices<'a, I>(prices: I) -> BigDecimal
where
    I: IntoIterator<Item = &'a BigDecimal>,
{
    prices
        .into_iter()
        .fold(BigDecimal::from(0), |acc, price| acc + price)
}

/// Convert a major-unit price into provider minor units (cents).
///
/// Sub-cent precision is dropped by scale normalization first, so 12.509
/// becomes 1250, never a fractional cent.
pub fn to_minor_units(value: &BigDecimal) -> Option<i64> {
    (normalize_scale(value) * BigDecimal::from(100))
        .with_scale(0)
        .to_i64()
}

/// Compare two monetary values allowing a tolerance in cents after
/// normalization.
pub fn nearly_equal(a: &BigDecimal, b: &BigDecimal, cents_tolerance: i64) -> bool {
    let diff = (normalize_scale(a) - normalize_scale(b)).with_scale(2);
    let cents = diff.to_f64().unwrap_or(0.0) * 100.0;
    cents.abs() <= cents_tolerance as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::parse_bytes(s.as_bytes(), 10).unwrap()
    }

    #[test]
    fn normalize_drops_sub_cent_digits() {
        assert_eq!(normalize_scale(&dec("12.3456")).to_string(), "12.34");
        assert_eq!(normalize_scale(&dec("6")).to_string(), "6.00");
    }

    #[test]
    fn sum_of_empty_series_is_zero() {
        let prices: Vec<BigDecimal> = Vec::new();
        assert_eq!(sum_prices(&prices), BigDecimal::from(0));
    }

    #[test]
    fn sum_accumulates_mixed_scales() {
        let prices = vec![dec("10"), dec("15.5")];
        assert!(nearly_equal(&sum_prices(&prices), &dec("25.5"), 0));
    }

    #[test]
    fn minor_units_round_trip() {
        assert_eq!(to_minor_units(&dec("25.00")), Some(2500));
        assert_eq!(to_minor_units(&dec("9.5")), Some(950));
        assert_eq!(to_minor_units(&dec("12.509")), Some(1250));
    }
}
