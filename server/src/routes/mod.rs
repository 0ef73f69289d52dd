pub mod activities;
pub mod auth;
pub mod clients;
pub mod opportunities;
pub mod partners;
pub mod transactions;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Currency columns are decimals in the store but plain numbers on the
/// wire; a missing amount renders as 0.
pub(crate) fn money(value: Option<Decimal>) -> f64 {
    value.and_then(|d| d.to_f64()).unwrap_or(0.0)
}

/// Same coercion for amounts that stay null when absent.
pub(crate) fn optional_money(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|d| d.to_f64())
}

pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default()
}

/// JSON array columns are non-null in the store; absent input becomes `[]`.
pub(crate) fn json_array(value: Option<serde_json::Value>) -> serde_json::Value {
    value.unwrap_or_else(|| serde_json::Value::Array(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_money_reads_as_zero() {
        assert_eq!(money(None), 0.0);
        assert_eq!(money(Some(Decimal::new(123_45, 2))), 123.45);
    }

    #[test]
    fn optional_money_stays_null() {
        assert_eq!(optional_money(None), None);
        assert_eq!(optional_money(Some(Decimal::new(10, 0))), Some(10.0));
    }

    #[test]
    fn decimal_round_trips_plain_amounts() {
        assert_eq!(money(Some(to_decimal(1500.5))), 1500.5);
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }
}
