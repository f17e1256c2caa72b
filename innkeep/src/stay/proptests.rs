//! Property-based tests for stay date ranges.

use super::StayDates;
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap() + Days::new(u64::from(n))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in 0u32..60, la in 1u32..20, b in 0u32..60, lb in 1u32..20) {
        let x = StayDates::new(day(a), day(a + la)).unwrap();
        let y = StayDates::new(day(b), day(b + lb)).unwrap();
        prop_assert_eq!(x.overlaps(&y), y.overlaps(&x));
    }

    // Overlap means at least one night in common; touching ranges share none
    #[test]
    fn overlap_matches_shared_nights(a in 0u32..60, la in 1u32..20, b in 0u32..60, lb in 1u32..20) {
        let x = StayDates::new(day(a), day(a + la)).unwrap();
        let y = StayDates::new(day(b), day(b + lb)).unwrap();
        let shared = (a..a + la).any(|n| (b..b + lb).contains(&n));
        prop_assert_eq!(x.overlaps(&y), shared);
    }
}
