//! Comprehensive tests for installment allocation and scheduling

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_loans::{allocate, AllocationPlan, LoanError, ScheduleConfig};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Equal mode
// ============================================================================

mod equal_mode {
    use super::*;

    #[test]
    fn test_remainder_absorbed_by_last_installment() {
        let amounts = allocate(Money::new(dec!(100.00)), 3, &AllocationPlan::Equal).unwrap();
        assert_eq!(
            amounts,
            vec![
                Money::new(dec!(33.33)),
                Money::new(dec!(33.33)),
                Money::new(dec!(33.34)),
            ]
        );
        assert_eq!(amounts.iter().copied().sum::<Money>(), Money::new(dec!(100.00)));
    }

    #[test]
    fn test_single_installment_equals_total() {
        let amounts = allocate(Money::new(dec!(250.00)), 1, &AllocationPlan::Equal).unwrap();
        assert_eq!(amounts, vec![Money::new(dec!(250.00))]);
    }

    #[test]
    fn test_exact_division_gives_identical_amounts() {
        let amounts = allocate(Money::new(dec!(1200.00)), 12, &AllocationPlan::Equal).unwrap();
        assert!(amounts.iter().all(|a| *a == Money::new(dec!(100.00))));
    }

    #[test]
    fn test_sub_cent_total_still_sums() {
        let total = Money::new(dec!(0.05));
        let amounts = allocate(total, 3, &AllocationPlan::Equal).unwrap();
        assert_eq!(amounts.iter().copied().sum::<Money>(), total);
    }

    #[test]
    fn test_total_too_small_for_count_rejected() {
        // Absorbing the remainder would leave the last installment at -0.02
        assert!(matches!(
            allocate(Money::new(dec!(0.04)), 7, &AllocationPlan::Equal),
            Err(LoanError::Validation(_))
        ));
        // Same shape with the regular part rounding up from 0.0157
        assert!(matches!(
            allocate(Money::new(dec!(0.11)), 7, &AllocationPlan::Equal),
            Err(LoanError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_total_rejected() {
        assert!(matches!(
            allocate(Money::ZERO, 3, &AllocationPlan::Equal),
            Err(LoanError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_count_rejected() {
        assert!(matches!(
            allocate(Money::new(dec!(100.00)), 0, &AllocationPlan::Equal),
            Err(LoanError::Validation(_))
        ));
    }
}

// ============================================================================
// Custom mode
// ============================================================================

mod custom_mode {
    use super::*;

    #[test]
    fn test_amounts_taken_verbatim_without_redistribution() {
        let plan = AllocationPlan::custom(vec![
            Money::new(dec!(60.00)),
            Money::new(dec!(30.00)),
            Money::new(dec!(10.00)),
        ]);
        let amounts = allocate(Money::new(dec!(100.00)), 3, &plan).unwrap();
        assert_eq!(
            amounts,
            vec![
                Money::new(dec!(60.00)),
                Money::new(dec!(30.00)),
                Money::new(dec!(10.00)),
            ]
        );
    }

    #[test]
    fn test_sum_mismatch_rejected_with_both_sums_in_message() {
        let plan = AllocationPlan::custom(vec![Money::new(dec!(40.00)), Money::new(dec!(50.00))]);
        let err = allocate(Money::new(dec!(100.00)), 2, &plan).unwrap_err();
        let message = err.user_message();
        assert!(message.contains("90.00"));
        assert!(message.contains("100.00"));
    }

    #[test]
    fn test_one_cent_deviation_accepted() {
        // Off by exactly the 0.01 tolerance
        let plan = AllocationPlan::custom(vec![Money::new(dec!(50.00)), Money::new(dec!(50.01))]);
        assert!(allocate(Money::new(dec!(100.00)), 2, &plan).is_ok());

        let plan = AllocationPlan::custom(vec![Money::new(dec!(50.00)), Money::new(dec!(49.99))]);
        assert!(allocate(Money::new(dec!(100.00)), 2, &plan).is_ok());
    }

    #[test]
    fn test_two_cent_deviation_rejected() {
        let plan = AllocationPlan::custom(vec![Money::new(dec!(50.01)), Money::new(dec!(50.01))]);
        assert!(allocate(Money::new(dec!(100.00)), 2, &plan).is_err());
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let plan = AllocationPlan::custom(vec![Money::new(dec!(100.00))]);
        let err = allocate(Money::new(dec!(100.00)), 2, &plan).unwrap_err();
        assert!(err.user_message().contains("Expected 2"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let plan = AllocationPlan::custom(vec![Money::new(dec!(110.00)), Money::new(dec!(-10.00))]);
        assert!(allocate(Money::new(dec!(100.00)), 2, &plan).is_err());
    }

    #[test]
    fn test_zero_amounts_allowed_when_sum_matches() {
        let plan = AllocationPlan::custom(vec![Money::new(dec!(100.00)), Money::ZERO]);
        assert!(allocate(Money::new(dec!(100.00)), 2, &plan).is_ok());
    }
}

// ============================================================================
// Schedule generation
// ============================================================================

mod schedule {
    use super::*;

    #[test]
    fn test_monthly_roll() {
        let dates = ScheduleConfig::default().deduction_dates(date(2024, 1, 15), 3);
        assert_eq!(
            dates,
            vec![date(2024, 2, 10), date(2024, 3, 10), date(2024, 4, 10)]
        );
    }

    #[test]
    fn test_year_boundary_roll() {
        let dates = ScheduleConfig::default().deduction_dates(date(2024, 11, 20), 3);
        assert_eq!(
            dates,
            vec![date(2024, 12, 10), date(2025, 1, 10), date(2025, 2, 10)]
        );
    }

    #[test]
    fn test_long_schedule_spans_multiple_years() {
        let dates = ScheduleConfig::default().deduction_dates(date(2024, 6, 1), 30);
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], date(2024, 7, 10));
        assert_eq!(dates[29], date(2026, 12, 10));
    }

    #[test]
    fn test_configured_payment_day_clamps_in_short_months() {
        let config = ScheduleConfig::new(31).unwrap();
        let dates = config.deduction_dates(date(2024, 1, 5), 3);
        assert_eq!(
            dates,
            vec![date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]
        );
    }
}

// ============================================================================
// Properties
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn equal_split_sums_to_total_with_no_negative_parts(
            total_minor in 1i64..1_000_000_000i64,
            count in 1u32..120u32
        ) {
            let total = Money::from_minor(total_minor);
            match allocate(total, count, &AllocationPlan::Equal) {
                Ok(amounts) => {
                    prop_assert_eq!(amounts.len(), count as usize);
                    prop_assert!(amounts.iter().all(|a| !a.is_negative()));
                    prop_assert_eq!(amounts.into_iter().sum::<Money>(), total);
                }
                // Rejection is only ever the too-small-total validation
                Err(err) => prop_assert!(matches!(err, LoanError::Validation(_))),
            }
        }

        #[test]
        fn equal_split_all_but_last_identical(
            total_minor in 1i64..1_000_000_000i64,
            count in 2u32..120u32
        ) {
            let total = Money::from_minor(total_minor);
            if let Ok(amounts) = allocate(total, count, &AllocationPlan::Equal) {
                let first = amounts[0];
                prop_assert!(amounts[..amounts.len() - 1].iter().all(|a| *a == first));
            }
        }

        #[test]
        fn schedule_dates_are_strictly_increasing(
            year in 2000i32..2100i32,
            month in 1u32..=12u32,
            day in 1u32..=28u32,
            count in 1u32..60u32
        ) {
            let start = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let dates = ScheduleConfig::default().deduction_dates(start, count);

            prop_assert_eq!(dates.len(), count as usize);
            prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(dates[0] > start);
        }
    }
}
