//! Installment entity
//!
//! One scheduled partial repayment of a loan. Installments are created in
//! a single batch at loan creation and individually mutated only by the
//! mark-paid transition, which is one-way.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{InstallmentId, LoanId, Money};

use crate::error::LoanError;

/// Installment payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Awaiting deduction
    Pending,
    /// Deducted or otherwise settled (terminal)
    Paid,
}

/// Classification recorded when an installment is marked paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSource {
    Salary,
    KpiBonus,
    EndOfContractBonus,
    Manual,
}

impl PaymentSource {
    /// Parses the snake_case form used by callers
    pub fn parse(value: &str) -> Result<Self, LoanError> {
        match value {
            "salary" => Ok(PaymentSource::Salary),
            "kpi_bonus" => Ok(PaymentSource::KpiBonus),
            "end_of_contract_bonus" => Ok(PaymentSource::EndOfContractBonus),
            "manual" => Ok(PaymentSource::Manual),
            other => Err(LoanError::validation(format!(
                "Unknown payment source: {}",
                other
            ))),
        }
    }
}

/// One scheduled partial repayment of a loan
///
/// Owned exclusively by its loan and cascade-deleted with it. Sequence
/// numbers are 1-based and contiguous within a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installment {
    /// Unique installment identifier
    pub id: InstallmentId,
    /// Owning loan
    pub loan_id: LoanId,
    /// 1-based position within the loan, matching generation order
    pub sequence: u32,
    /// Scheduled deduction date
    pub due_date: NaiveDate,
    /// Amount due
    pub amount: Money,
    /// Payment status
    pub status: InstallmentStatus,
    /// Set iff status is `Paid`
    pub paid_at: Option<DateTime<Utc>>,
    /// Set iff status is `Paid`
    pub payment_source: Option<PaymentSource>,
}

impl Installment {
    /// Creates a new pending installment
    pub fn new(loan_id: LoanId, sequence: u32, due_date: NaiveDate, amount: Money) -> Self {
        Self {
            id: InstallmentId::new_v7(),
            loan_id,
            sequence,
            due_date,
            amount,
            status: InstallmentStatus::Pending,
            paid_at: None,
            payment_source: None,
        }
    }

    /// Marks the installment paid at the given time
    ///
    /// Idempotent: marking an already-paid installment again is a no-op
    /// and leaves the original paid timestamp and source untouched.
    /// Returns true when the call changed state.
    pub fn mark_paid(&mut self, source: PaymentSource, at: DateTime<Utc>) -> bool {
        if self.status == InstallmentStatus::Paid {
            return false;
        }
        self.status = InstallmentStatus::Paid;
        self.paid_at = Some(at);
        self.payment_source = Some(source);
        true
    }

    /// Returns true once the installment has been settled
    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }
}
