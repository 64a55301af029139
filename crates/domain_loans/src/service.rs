//! Loan lifecycle manager
//!
//! Orchestrates loan creation (allocator + date generator + persistence),
//! payment recording with eager auto-completion, and cancellation. Every
//! mutating operation is gated on the `manage_loans` capability.
//!
//! # Atomicity
//!
//! The store offers no multi-statement transaction boundary, so creation
//! keeps a compensation list and executes it in reverse order when a later
//! step fails: installments are deleted first, then the loan row, leaving
//! no orphaned state visible to callers.
//!
//! # Concurrency
//!
//! Operations are short-lived request/response calls over shared durable
//! state with no in-process locking. Concurrent mark-paid calls against
//! the same loan race on the completeness re-check and resolve
//! last-writer-wins; both racers converge on the same terminal state.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};

use core_kernel::{CurrencyCode, EmployeeId, InstallmentId, LoanId, Money, PortError};

use crate::allocation::{allocate, AllocationPlan};
use crate::error::LoanError;
use crate::installment::{Installment, PaymentSource};
use crate::loan::{ContractRef, DeductionMethod, Loan};
use crate::ports::{ContractStore, LoanAction, LoanStore, PermissionGate};
use crate::schedule::ScheduleConfig;

/// Contract document supplied at creation time
#[derive(Debug, Clone)]
pub struct ContractFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Command input for creating a loan
#[derive(Debug, Clone)]
pub struct CreateLoanRequest {
    /// Employee the loan is issued to
    pub employee_id: EmployeeId,
    /// Total principal amount
    pub total_amount: Money,
    /// Currency classification tag
    pub currency: CurrencyCode,
    /// Number of installments
    pub installment_count: u32,
    /// Loan start date
    pub start_date: NaiveDate,
    /// How per-installment amounts are derived
    pub allocation: AllocationPlan,
    /// Payroll component deductions come from
    pub deduction_method: DeductionMethod,
    /// Installments `1..=already_paid` are marked paid immediately
    pub already_paid: u32,
    /// Free-text notes
    pub notes: Option<String>,
    /// Externally hosted contract URL
    pub contract_url: Option<String>,
    /// Contract document to upload
    pub contract_file: Option<ContractFile>,
}

/// Undo actions recorded during multi-step creation
enum Compensation {
    DeleteLoan(LoanId),
    DeleteInstallments(LoanId),
}

/// The loan lifecycle manager
///
/// Owns the loan/installment state machine and every command exposed to
/// UI callers. Collaborators are injected as port trait objects.
pub struct LoanService {
    store: Arc<dyn LoanStore>,
    permissions: Arc<dyn PermissionGate>,
    contracts: Arc<dyn ContractStore>,
    schedule: ScheduleConfig,
}

impl LoanService {
    /// Creates a service with the default deduction schedule
    pub fn new(
        store: Arc<dyn LoanStore>,
        permissions: Arc<dyn PermissionGate>,
        contracts: Arc<dyn ContractStore>,
    ) -> Self {
        Self {
            store,
            permissions,
            contracts,
            schedule: ScheduleConfig::default(),
        }
    }

    /// Overrides the deduction schedule configuration
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    /// Creates a loan together with its full installment set
    ///
    /// All-or-nothing: on any failure after the loan row is written, the
    /// already-written rows are deleted before the error surfaces. When
    /// `already_paid == installment_count` the loan is completed within
    /// the same operation.
    #[instrument(skip(self, request), fields(employee_id = %request.employee_id))]
    pub async fn create_loan(
        &self,
        actor_role: &str,
        request: CreateLoanRequest,
    ) -> Result<Loan, LoanError> {
        self.require_permission(actor_role).await?;

        if request.already_paid > request.installment_count {
            return Err(LoanError::validation(format!(
                "Already-paid count {} exceeds installment count {}",
                request.already_paid, request.installment_count
            )));
        }

        let amounts = allocate(
            request.total_amount,
            request.installment_count,
            &request.allocation,
        )?;
        let due_dates = self
            .schedule
            .deduction_dates(request.start_date, request.installment_count);

        let mut loan = Loan::new(
            request.employee_id,
            request.total_amount,
            request.currency,
            request.installment_count,
            request.start_date,
            request.deduction_method,
        )?;
        if let Some(notes) = request.notes {
            loan = loan.with_notes(notes);
        }
        loan = loan.with_contract(ContractRef {
            url: request.contract_url,
            storage_path: None,
        });

        let now = Utc::now();
        let installments: Vec<Installment> = amounts
            .into_iter()
            .zip(due_dates)
            .enumerate()
            .map(|(i, (amount, due_date))| {
                let sequence = i as u32 + 1;
                let mut installment = Installment::new(loan.id, sequence, due_date, amount);
                if sequence <= request.already_paid {
                    installment.mark_paid(PaymentSource::Manual, now);
                }
                installment
            })
            .collect();

        let mut compensations = Vec::new();

        self.store.insert_loan(&loan).await?;
        compensations.push(Compensation::DeleteLoan(loan.id));

        if let Err(err) = self.store.insert_installments(&installments).await {
            self.rollback(compensations).await;
            return Err(err.into());
        }
        compensations.push(Compensation::DeleteInstallments(loan.id));

        if let Some(file) = request.contract_file {
            let key = format!("{}/{}", loan.employee_id, loan.id);
            match self
                .contracts
                .upload(&key, file.bytes, &file.content_type)
                .await
            {
                Ok(path) => {
                    let contract = loan.contract.get_or_insert_with(ContractRef::default);
                    contract.storage_path = Some(path);
                }
                Err(err) => {
                    warn!(loan_id = %loan.id, error = %err, "Contract upload failed, rolling back");
                    self.rollback(compensations).await;
                    return Err(LoanError::Storage(err.to_string()));
                }
            }
        }

        if request.already_paid == request.installment_count {
            loan.complete()?;
        }

        // Covers both the stored contract path and immediate completion
        if let Err(err) = self.store.update_loan(&loan).await {
            self.rollback(compensations).await;
            return Err(err.into());
        }

        info!(
            loan_id = %loan.id,
            total = %loan.total_amount,
            installments = loan.installment_count,
            "Loan created"
        );
        Ok(loan)
    }

    /// Records payment of one installment
    ///
    /// Idempotent on an already-paid installment. After every call the
    /// sibling installments are re-read and the loan is completed when all
    /// of them are paid.
    #[instrument(skip(self), fields(installment_id = %installment_id, loan_id = %loan_id))]
    pub async fn mark_installment_paid(
        &self,
        actor_role: &str,
        installment_id: InstallmentId,
        loan_id: LoanId,
        source: PaymentSource,
    ) -> Result<Installment, LoanError> {
        self.require_permission(actor_role).await?;

        let mut installment = self
            .store
            .get_installment(installment_id)
            .await
            .map_err(store_error)?;
        if installment.loan_id != loan_id {
            return Err(LoanError::validation(format!(
                "Installment {} does not belong to loan {}",
                installment_id, loan_id
            )));
        }

        if installment.mark_paid(source, Utc::now()) {
            self.store.update_installment(&installment).await?;
            debug!("Installment marked paid");
        } else {
            debug!("Installment already paid, no-op");
        }

        // Eager re-evaluation, not event-driven: runs on every call
        let siblings = self.store.installments_for_loan(loan_id).await?;
        if !siblings.is_empty() && siblings.iter().all(|i| i.is_paid()) {
            let mut loan = self.store.get_loan(loan_id).await.map_err(store_error)?;
            if loan.is_active() {
                loan.complete()?;
                self.store.update_loan(&loan).await?;
                info!(loan_id = %loan_id, "All installments paid, loan completed");
            }
        }

        Ok(installment)
    }

    /// Cancels an active loan
    ///
    /// Pending installments are left untouched: not auto-paid, not
    /// deleted.
    #[instrument(skip(self), fields(loan_id = %loan_id))]
    pub async fn cancel_loan(&self, actor_role: &str, loan_id: LoanId) -> Result<Loan, LoanError> {
        self.require_permission(actor_role).await?;

        let mut loan = self.store.get_loan(loan_id).await.map_err(store_error)?;
        loan.cancel()?;
        self.store.update_loan(&loan).await?;

        info!(loan_id = %loan_id, "Loan cancelled");
        Ok(loan)
    }

    /// Lists loans issued to one employee
    pub async fn loans_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<Loan>, LoanError> {
        Ok(self.store.loans_for_employee(employee_id).await?)
    }

    /// Lists every loan in the system
    pub async fn all_loans(&self) -> Result<Vec<Loan>, LoanError> {
        Ok(self.store.all_loans().await?)
    }

    /// Installments for a loan, ordered by sequence
    pub async fn installments_for_loan(
        &self,
        loan_id: LoanId,
    ) -> Result<Vec<Installment>, LoanError> {
        Ok(self.store.installments_for_loan(loan_id).await?)
    }

    /// Produces a time-limited URL for a loan's stored contract document
    pub async fn contract_url(&self, loan_id: LoanId, ttl_secs: u64) -> Result<String, LoanError> {
        let loan = self.store.get_loan(loan_id).await.map_err(store_error)?;
        let path = loan
            .contract
            .as_ref()
            .and_then(|c| c.storage_path.as_deref())
            .ok_or_else(|| {
                LoanError::validation(format!("Loan {} has no stored contract document", loan_id))
            })?;
        self.contracts
            .signed_url(path, ttl_secs)
            .await
            .map_err(|err| LoanError::Storage(err.to_string()))
    }

    async fn require_permission(&self, actor_role: &str) -> Result<(), LoanError> {
        let allowed = self
            .permissions
            .has_permission(actor_role, LoanAction::ManageLoans)
            .await?;
        if !allowed {
            debug!(role = actor_role, "Permission denied");
            return Err(LoanError::permission_denied());
        }
        Ok(())
    }

    /// Executes recorded undo actions in reverse order
    ///
    /// Cleanup failures are logged rather than propagated; the original
    /// error is what the caller needs to see.
    async fn rollback(&self, compensations: Vec<Compensation>) {
        for compensation in compensations.into_iter().rev() {
            let result = match compensation {
                Compensation::DeleteInstallments(loan_id) => {
                    self.store.delete_installments_for_loan(loan_id).await
                }
                Compensation::DeleteLoan(loan_id) => self.store.delete_loan(loan_id).await,
            };
            if let Err(err) = result {
                warn!(error = %err, "Compensating delete failed during rollback");
            }
        }
    }
}

/// Maps store lookup failures to domain errors
fn store_error(err: PortError) -> LoanError {
    if err.is_not_found() {
        LoanError::NotFound(err.to_string())
    } else {
        LoanError::Persistence(err)
    }
}
