//! Installment allocation logic
//!
//! Turns a loan total into an ordered sequence of per-installment amounts.
//! Equal mode computes even splits with the last installment absorbing the
//! rounding remainder; custom mode takes caller-supplied amounts verbatim
//! and validates them against the total.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use core_kernel::Money;

/// Maximum accepted distance between a custom amount sum and the loan total
pub const SUM_TOLERANCE: Decimal = dec!(0.01);

/// How installment amounts are derived from the loan total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AllocationPlan {
    /// System computes even splits
    Equal,
    /// Caller supplies exact per-installment amounts
    Custom { amounts: Vec<Money> },
}

impl AllocationPlan {
    /// Convenience constructor for a custom plan
    pub fn custom(amounts: Vec<Money>) -> Self {
        AllocationPlan::Custom { amounts }
    }
}

/// Produces `count` installment amounts summing exactly to `total`
///
/// Amounts are index-aligned to installment sequence numbers `1..=count`.
/// Pure: no side effects, no clock or configuration reads.
///
/// # Errors
///
/// Returns [`LoanError::Validation`] when `total` is not positive, `count`
/// is zero, the total is too small to cover `count` non-negative parts,
/// a custom plan's length does not match `count`, a custom amount is
/// negative, or the custom sum misses `total` by more than 0.01.
pub fn allocate(total: Money, count: u32, plan: &AllocationPlan) -> Result<Vec<Money>, LoanError> {
    if !total.is_positive() {
        return Err(LoanError::validation(format!(
            "Loan total must be positive, got {}",
            total
        )));
    }
    if count == 0 {
        return Err(LoanError::validation(
            "Installment count must be at least 1",
        ));
    }

    match plan {
        AllocationPlan::Equal => allocate_equal(total, count),
        AllocationPlan::Custom { amounts } => allocate_custom(total, count, amounts),
    }
}

fn allocate_equal(total: Money, count: u32) -> Result<Vec<Money>, LoanError> {
    let amounts = total.allocate_evenly(count)?;
    // Rounding the regular part up can overdraw a total too small for the
    // count, which would leave the remainder-absorbing final part negative
    if amounts.iter().any(|a| a.is_negative()) {
        return Err(LoanError::validation(format!(
            "Total {} cannot be split into {} installments",
            total, count
        )));
    }
    Ok(amounts)
}

fn allocate_custom(total: Money, count: u32, amounts: &[Money]) -> Result<Vec<Money>, LoanError> {
    if amounts.len() != count as usize {
        return Err(LoanError::validation(format!(
            "Expected {} installment amounts, got {}",
            count,
            amounts.len()
        )));
    }

    if let Some(negative) = amounts.iter().find(|a| a.is_negative()) {
        return Err(LoanError::validation(format!(
            "Installment amounts must not be negative, got {}",
            negative
        )));
    }

    let sum: Money = amounts.iter().copied().sum();
    let difference = (sum - total).abs();
    if difference.amount() > SUM_TOLERANCE {
        return Err(LoanError::validation(format!(
            "Installment amounts sum to {}, expected {}",
            sum, total
        )));
    }

    Ok(amounts.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_split_absorbs_remainder_in_last() {
        let amounts = allocate(Money::from_major(100), 3, &AllocationPlan::Equal).unwrap();
        assert_eq!(
            amounts,
            vec![
                Money::new(dec!(33.33)),
                Money::new(dec!(33.33)),
                Money::new(dec!(33.34)),
            ]
        );
    }

    #[test]
    fn test_single_installment_equals_total() {
        let amounts = allocate(Money::from_major(250), 1, &AllocationPlan::Equal).unwrap();
        assert_eq!(amounts, vec![Money::from_major(250)]);
    }

    #[test]
    fn test_custom_amounts_taken_verbatim() {
        let plan = AllocationPlan::custom(vec![
            Money::new(dec!(70.00)),
            Money::new(dec!(20.00)),
            Money::new(dec!(10.00)),
        ]);
        let amounts = allocate(Money::from_major(100), 3, &plan).unwrap();
        assert_eq!(amounts[0], Money::new(dec!(70.00)));
    }

    #[test]
    fn test_custom_sum_mismatch_rejected() {
        let plan = AllocationPlan::custom(vec![Money::new(dec!(40.00)), Money::new(dec!(50.00))]);
        let err = allocate(Money::from_major(100), 2, &plan).unwrap_err();
        assert!(matches!(err, LoanError::Validation(_)));
        assert!(err.to_string().contains("90.00"));
        assert!(err.to_string().contains("100.00"));
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = allocate(Money::from_major(100), 0, &AllocationPlan::Equal).unwrap_err();
        assert!(matches!(err, LoanError::Validation(_)));
    }

    #[test]
    fn test_equal_split_rejects_total_too_small_for_count() {
        // 0.04 / 7 rounds the regular part to 0.01, overdrawing the total
        let err = allocate(Money::new(dec!(0.04)), 7, &AllocationPlan::Equal).unwrap_err();
        assert!(matches!(err, LoanError::Validation(_)));
    }

    #[test]
    fn test_non_positive_total_rejected() {
        assert!(allocate(Money::ZERO, 2, &AllocationPlan::Equal).is_err());
        assert!(allocate(Money::from_major(-10), 2, &AllocationPlan::Equal).is_err());
    }
}
