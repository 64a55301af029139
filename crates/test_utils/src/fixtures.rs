//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the payroll
//! loans system. These fixtures are designed to be consistent and
//! predictable for unit tests.

use chrono::NaiveDate;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{CurrencyCode, EmployeeId, InstallmentId, LoanId, Money};

static MID_MONTH_START: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

static YEAR_END_START: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2024, 11, 20).unwrap());

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A round amount that splits unevenly across 3 installments
    pub fn hundred() -> Money {
        Money::new(dec!(100.00))
    }

    /// A typical loan principal that splits evenly across 12 installments
    pub fn principal() -> Money {
        Money::new(dec!(1200.00))
    }

    /// A single-installment loan total
    pub fn small_principal() -> Money {
        Money::new(dec!(250.00))
    }

    /// The smallest representable amount
    pub fn one_cent() -> Money {
        Money::new(dec!(0.01))
    }
}

/// Fixture for schedule date test data
pub struct DateFixtures;

impl DateFixtures {
    /// Mid-month start date; first deduction lands the following month
    pub fn mid_month_start() -> NaiveDate {
        *MID_MONTH_START
    }

    /// Late-year start date whose schedule crosses a year boundary
    pub fn year_end_start() -> NaiveDate {
        *YEAR_END_START
    }

    /// Builds an arbitrary date, panicking on invalid components
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic employee ID for testing
    pub fn employee_id() -> EmployeeId {
        EmployeeId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a second deterministic employee ID for cross-employee tests
    pub fn other_employee_id() -> EmployeeId {
        EmployeeId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic loan ID for testing
    pub fn loan_id() -> LoanId {
        LoanId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic installment ID for testing
    pub fn installment_id() -> InstallmentId {
        InstallmentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// Role granted loan management permission in test permission gates
    pub fn manager_role() -> &'static str {
        "hr_manager"
    }

    /// Role granted nothing in test permission gates
    pub fn viewer_role() -> &'static str {
        "viewer"
    }

    /// Standard currency tag
    pub fn usd() -> CurrencyCode {
        CurrencyCode::usd()
    }

    /// Externally hosted contract URL
    pub fn contract_url() -> &'static str {
        "https://contracts.example.com/agreements/2024-0001.pdf"
    }

    /// Randomized free-text loan notes
    pub fn notes() -> String {
        Sentence(3..8).fake()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_fixtures_are_positive() {
        assert!(MoneyFixtures::hundred().is_positive());
        assert!(MoneyFixtures::principal().is_positive());
        assert!(MoneyFixtures::one_cent().is_positive());
    }

    #[test]
    fn test_date_fixtures_ordering() {
        assert!(DateFixtures::mid_month_start() < DateFixtures::year_end_start());
    }

    #[test]
    fn test_id_fixtures_are_deterministic() {
        assert_eq!(IdFixtures::employee_id(), IdFixtures::employee_id());
        assert_ne!(IdFixtures::employee_id(), IdFixtures::other_employee_id());
    }

    #[test]
    fn test_notes_are_non_empty() {
        assert!(!StringFixtures::notes().is_empty());
    }
}
