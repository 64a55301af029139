//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_loans::{Installment, InstallmentStatus};

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: Money, expected: Money, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff.amount() <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that money values sum exactly to a total
pub fn assert_money_sum_equals(parts: &[Money], total: Money) {
    let sum: Money = parts.iter().copied().sum();
    assert_eq!(
        sum, total,
        "Sum of parts ({}) doesn't equal total ({})",
        sum, total
    );
}

/// Asserts that installment sequence numbers run contiguously from 1
pub fn assert_contiguous_sequence(installments: &[Installment]) {
    for (index, installment) in installments.iter().enumerate() {
        assert_eq!(
            installment.sequence,
            index as u32 + 1,
            "Installment at position {} has sequence {}, expected {}",
            index,
            installment.sequence,
            index as u32 + 1
        );
    }
}

/// Asserts that installment amounts sum exactly to the loan total
pub fn assert_installments_cover_total(installments: &[Installment], total: Money) {
    let amounts: Vec<Money> = installments.iter().map(|i| i.amount).collect();
    assert_money_sum_equals(&amounts, total);
}

/// Asserts that every installment carries the given status
pub fn assert_all_status(installments: &[Installment], status: InstallmentStatus) {
    for installment in installments {
        assert_eq!(
            installment.status, status,
            "Installment {} has status {:?}, expected {:?}",
            installment.sequence, installment.status, status
        );
    }
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{DateFixtures, IdFixtures};
    use rust_decimal_macros::dec;

    fn installment(sequence: u32, amount: Money) -> Installment {
        Installment::new(
            IdFixtures::loan_id(),
            sequence,
            DateFixtures::ymd(2024, 2, 10),
            amount,
        )
    }

    #[test]
    fn test_assert_money_approx_eq_passes() {
        assert_money_approx_eq(
            Money::new(dec!(100.00)),
            Money::new(dec!(100.01)),
            dec!(0.01),
        );
    }

    #[test]
    #[should_panic(expected = "differ by more than tolerance")]
    fn test_assert_money_approx_eq_fails() {
        assert_money_approx_eq(
            Money::new(dec!(100.00)),
            Money::new(dec!(100.02)),
            dec!(0.01),
        );
    }

    #[test]
    fn test_assert_money_sum_equals() {
        let parts = vec![
            Money::new(dec!(33.33)),
            Money::new(dec!(33.33)),
            Money::new(dec!(33.34)),
        ];
        assert_money_sum_equals(&parts, Money::new(dec!(100.00)));
    }

    #[test]
    fn test_assert_contiguous_sequence() {
        let installments = vec![
            installment(1, Money::new(dec!(50.00))),
            installment(2, Money::new(dec!(50.00))),
        ];
        assert_contiguous_sequence(&installments);
    }

    #[test]
    #[should_panic(expected = "has sequence")]
    fn test_assert_contiguous_sequence_detects_gap() {
        let installments = vec![
            installment(1, Money::new(dec!(50.00))),
            installment(3, Money::new(dec!(50.00))),
        ];
        assert_contiguous_sequence(&installments);
    }

    #[test]
    fn test_assert_all_status() {
        let installments = vec![installment(1, Money::new(dec!(50.00)))];
        assert_all_status(&installments, InstallmentStatus::Pending);
    }
}
