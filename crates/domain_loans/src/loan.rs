//! Loan aggregate root
//!
//! The Loan is the consistency boundary for payroll loan administration.
//!
//! # Invariants
//!
//! - The sum of child installment amounts equals `total_amount` (within
//!   0.01) at creation time
//! - Status transitions only `Active -> Paid` and `Active -> Cancelled`;
//!   both targets are terminal
//! - `average_installment` is stored for display only and is never used
//!   in payment arithmetic

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CurrencyCode, EmployeeId, LoanId, Money};

use crate::error::LoanError;

/// Which payroll component installments are conceptually deducted from
///
/// Informational only; no payroll run consumes it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionMethod {
    Salary,
    Bonus,
    Flexible,
}

impl DeductionMethod {
    /// Parses the snake_case form used by callers ("salary", "bonus", "flexible")
    pub fn parse(value: &str) -> Result<Self, LoanError> {
        match value {
            "salary" => Ok(DeductionMethod::Salary),
            "bonus" => Ok(DeductionMethod::Bonus),
            "flexible" => Ok(DeductionMethod::Flexible),
            other => Err(LoanError::validation(format!(
                "Unknown deduction method: {}",
                other
            ))),
        }
    }
}

/// Loan lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Repayment in progress
    Active,
    /// Every installment has been paid (terminal)
    Paid,
    /// Administratively cancelled (terminal)
    Cancelled,
}

impl LoanStatus {
    /// Returns true when no further transitions are allowed
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Paid | LoanStatus::Cancelled)
    }
}

/// Reference to a stored contract document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRef {
    /// External URL supplied by the caller
    pub url: Option<String>,
    /// Path in the blob store for an uploaded document
    pub storage_path: Option<String>,
}

impl ContractRef {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.storage_path.is_none()
    }
}

/// The Loan aggregate root
///
/// # State Machine
///
/// - `Active -> Paid` when every installment is paid
/// - `Active -> Cancelled` on the cancel command
/// - `Paid` and `Cancelled` have no outgoing transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Unique loan identifier
    pub id: LoanId,
    /// Employee the loan is issued to
    pub employee_id: EmployeeId,
    /// Total principal amount
    pub total_amount: Money,
    /// Currency classification tag
    pub currency: CurrencyCode,
    /// Number of installments
    pub installment_count: u32,
    /// total / count, rounded; display only
    pub average_installment: Money,
    /// Loan start date; deductions begin the following month
    pub start_date: NaiveDate,
    /// Payroll component deductions come from
    pub deduction_method: DeductionMethod,
    /// Lifecycle status
    pub status: LoanStatus,
    /// Free-text notes
    pub notes: Option<String>,
    /// Contract document reference, if any
    pub contract: Option<ContractRef>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Loan {
    /// Creates a new active loan
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::Validation`] when the total is not positive or
    /// the installment count is zero.
    pub fn new(
        employee_id: EmployeeId,
        total_amount: Money,
        currency: CurrencyCode,
        installment_count: u32,
        start_date: NaiveDate,
        deduction_method: DeductionMethod,
    ) -> Result<Self, LoanError> {
        if !total_amount.is_positive() {
            return Err(LoanError::validation(format!(
                "Loan total must be positive, got {}",
                total_amount
            )));
        }
        if installment_count == 0 {
            return Err(LoanError::validation(
                "Installment count must be at least 1",
            ));
        }

        let average_installment = total_amount.divide(installment_count.into())?;
        let now = Utc::now();

        Ok(Self {
            id: LoanId::new_v7(),
            employee_id,
            total_amount,
            currency,
            installment_count,
            average_installment,
            start_date,
            deduction_method,
            status: LoanStatus::Active,
            notes: None,
            contract: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attaches free-text notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Attaches a contract reference
    pub fn with_contract(mut self, contract: ContractRef) -> Self {
        if !contract.is_empty() {
            self.contract = Some(contract);
        }
        self
    }

    /// Transitions the loan to `Paid`
    ///
    /// Idempotent on an already-paid loan; rejected on a cancelled one.
    pub fn complete(&mut self) -> Result<(), LoanError> {
        match self.status {
            LoanStatus::Active => {
                self.status = LoanStatus::Paid;
                self.updated_at = Utc::now();
                Ok(())
            }
            LoanStatus::Paid => Ok(()),
            LoanStatus::Cancelled => Err(LoanError::InvalidStateTransition(
                "Cannot complete a cancelled loan".to_string(),
            )),
        }
    }

    /// Transitions the loan to `Cancelled`
    ///
    /// Pending installments are deliberately left untouched; they stay
    /// `Pending` and are never auto-paid or deleted.
    pub fn cancel(&mut self) -> Result<(), LoanError> {
        match self.status {
            LoanStatus::Active => {
                self.status = LoanStatus::Cancelled;
                self.updated_at = Utc::now();
                Ok(())
            }
            terminal => Err(LoanError::InvalidStateTransition(format!(
                "Cannot cancel a loan in status {:?}",
                terminal
            ))),
        }
    }

    /// Returns true while the loan accepts payments
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }
}
