//! Property-based tests for deposit settlement.

use super::Settlement;
use crate::money::Money;
use proptest::prelude::*;

fn settle(total: i64, paid: i64, deposit: i64) -> Settlement {
    Settlement::compute(Money::new(total), Money::new(paid), Money::new(deposit))
}

proptest! {
    // A guest is never refunded and charged at once
    #[test]
    fn never_both_refund_and_owe(
        total in 0i64..10_000_000,
        paid in 0i64..10_000_000,
        deposit in 0i64..10_000_000
    ) {
        let s = settle(total, paid, deposit);
        prop_assert!(!(s.to_refund.is_positive() && s.balance_owed.is_positive()));
        prop_assert!(!s.to_refund.is_negative());
        prop_assert!(!s.balance_owed.is_negative());
        prop_assert_eq!(s.final_balance_after_deposit, s.balance_owed);
    }

    // owed - refund == balance - deposit in every deposit branch
    #[test]
    fn deposit_applied_exactly(
        total in 0i64..10_000_000,
        paid in 0i64..10_000_000,
        deposit in 1i64..10_000_000
    ) {
        let s = settle(total, paid, deposit);
        prop_assert_eq!(s.balance_owed - s.to_refund, s.balance - s.deposit_held);
    }

    // Bounded inputs, negative adjustments included, settle without overflow
    #[test]
    fn limits_settle_without_overflow(
        total in 0i64..=Money::LIMIT.minor_units(),
        paid in -Money::LIMIT.minor_units()..=Money::LIMIT.minor_units(),
        deposit_share in 0u32..=100
    ) {
        let deposit = total / 100 * i64::from(deposit_share);
        let s = settle(total, paid, deposit);
        prop_assert_eq!(s.balance, Money::new(total - paid));
        prop_assert!(!s.to_refund.is_negative());
    }
}
