//! Unit and property tests for the Money module

use core_kernel::{Currency, Money, MoneyError};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(500.50), Currency::ZAR);
        assert_eq!(m.amount(), dec!(500.50));
        assert_eq!(m.currency(), Currency::ZAR);
    }

    #[test]
    fn test_zero_is_not_positive() {
        let m = Money::new(Decimal::ZERO, Currency::ZAR);
        assert!(!m.is_positive());
    }

    #[test]
    fn test_negative_is_not_positive() {
        let m = Money::new(dec!(-1), Currency::ZAR);
        assert!(!m.is_positive());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_fractional_hours() {
        let rate = Money::new(dec!(450), Currency::ZAR);
        assert_eq!(rate.multiply(dec!(7.5)).unwrap().amount(), dec!(3375));
    }

    #[test]
    fn test_multiply_reports_overflow() {
        let rate = Money::new(dec!(500), Currency::ZAR);
        assert_eq!(
            rate.multiply(Decimal::MAX),
            Err(MoneyError::Overflow {
                amount: dec!(500),
                factor: Decimal::MAX,
            })
        );
    }

    #[test]
    fn test_serde_shape() {
        let m = Money::new(dec!(500), Currency::ZAR);
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json["currency"], "ZAR");
    }
}

proptest! {
    #[test]
    fn multiply_matches_decimal_product(rate_cents in 1i64..10_000_000, hours_tenths in 1i64..7_440) {
        let rate = Decimal::new(rate_cents, 2);
        let hours = Decimal::new(hours_tenths, 1);
        let total = Money::new(rate, Currency::ZAR).multiply(hours).unwrap();
        prop_assert_eq!(total.amount(), (rate * hours).round_dp(4));
        prop_assert!(total.is_positive());
    }
}
