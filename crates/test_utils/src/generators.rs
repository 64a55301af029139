//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::NaiveDate;
use proptest::prelude::*;

use core_kernel::{EmployeeId, Money};
use domain_loans::{AllocationPlan, DeductionMethod};

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(Money::from_minor)
}

/// Strategy for generating valid installment counts (1 to 120)
pub fn installment_count_strategy() -> impl Strategy<Value = u32> {
    1u32..=120u32
}

/// Strategy for generating valid payment days (1 to 31)
pub fn payment_day_strategy() -> impl Strategy<Value = u32> {
    1u32..=31u32
}

/// Strategy for generating loan start dates
///
/// Days are capped at 28 so every generated date exists in every month.
pub fn start_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100i32, 1u32..=12u32, 1u32..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for generating deduction methods
pub fn deduction_method_strategy() -> impl Strategy<Value = DeductionMethod> {
    prop_oneof![
        Just(DeductionMethod::Salary),
        Just(DeductionMethod::Bonus),
        Just(DeductionMethod::Flexible),
    ]
}

/// Strategy for generating EmployeeId values
pub fn employee_id_strategy() -> impl Strategy<Value = EmployeeId> {
    any::<[u8; 16]>().prop_map(|bytes| EmployeeId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating custom allocation plans whose amounts sum
/// exactly to the returned total
///
/// Totals cover at least one major unit per installment, so every
/// generated amount is non-negative.
pub fn custom_plan_strategy() -> impl Strategy<Value = (Money, u32, AllocationPlan)> {
    (1u32..=24u32)
        .prop_flat_map(|count| (Just(count), count as i64 * 100..1_000_000_000i64))
        .prop_map(|(count, total_minor)| {
            let total = Money::from_minor(total_minor);
            let amounts = total
                .allocate_evenly(count)
                .expect("positive total and non-zero count always allocate");
            (total, count, AllocationPlan::custom(amounts))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::test_runner::TestCaseError;

    proptest! {
        #[test]
        fn positive_money_is_always_positive(money in positive_money_strategy()) {
            prop_assert!(money.is_positive());
        }

        #[test]
        fn start_dates_are_valid_in_every_month(date in start_date_strategy()) {
            use chrono::Datelike;
            prop_assert!(date.day() <= 28);
        }

        #[test]
        fn custom_plans_sum_to_total((total, count, plan) in custom_plan_strategy()) {
            let AllocationPlan::Custom { amounts } = plan else {
                return Err(TestCaseError::fail("expected a custom plan"));
            };
            prop_assert_eq!(amounts.len(), count as usize);
            prop_assert!(amounts.iter().all(|a| !a.is_negative()));
            prop_assert_eq!(amounts.into_iter().sum::<Money>(), total);
        }
    }
}
