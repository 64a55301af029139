//! Loan domain ports
//!
//! Port interfaces for the external collaborators the loan lifecycle
//! consumes: durable storage, the role/permission capability check, and
//! the contract document blob store. Adapters (database-backed, external
//! API, or in-memory for tests) implement these traits; the service only
//! ever sees the trait objects.
//!
//! ```rust,ignore
//! use domain_loans::ports::LoanStore;
//! use std::sync::Arc;
//!
//! pub struct LoanService {
//!     store: Arc<dyn LoanStore>,
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, EmployeeId, InstallmentId, LoanId, PortError};

use crate::installment::Installment;
use crate::loan::Loan;

/// Capability required for a loan operation
///
/// Checked against the permission gate before every mutating call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanAction {
    /// Create, pay against, or cancel loans
    ManageLoans,
}

impl LoanAction {
    /// The action key stored alongside roles
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanAction::ManageLoans => "manage_loans",
        }
    }
}

/// Durable storage for loans and their installments
///
/// Record-oriented: the store is not expected to provide multi-statement
/// transactions, which is why loan creation carries its own compensating
/// rollback. Deleting a loan cascades to its installments.
#[async_trait]
pub trait LoanStore: DomainPort {
    /// Persists a new loan row
    async fn insert_loan(&self, loan: &Loan) -> Result<(), PortError>;

    /// Persists all installments for a loan in one batch
    async fn insert_installments(&self, installments: &[Installment]) -> Result<(), PortError>;

    /// Retrieves a loan by ID
    async fn get_loan(&self, id: LoanId) -> Result<Loan, PortError>;

    /// Replaces a loan row
    async fn update_loan(&self, loan: &Loan) -> Result<(), PortError>;

    /// Deletes a loan and, by cascade, its installments
    async fn delete_loan(&self, id: LoanId) -> Result<(), PortError>;

    /// Deletes every installment belonging to a loan
    async fn delete_installments_for_loan(&self, loan_id: LoanId) -> Result<(), PortError>;

    /// Retrieves an installment by ID
    async fn get_installment(&self, id: InstallmentId) -> Result<Installment, PortError>;

    /// Replaces an installment row
    async fn update_installment(&self, installment: &Installment) -> Result<(), PortError>;

    /// All installments for a loan, ordered by sequence
    async fn installments_for_loan(&self, loan_id: LoanId) -> Result<Vec<Installment>, PortError>;

    /// All loans issued to an employee
    async fn loans_for_employee(&self, employee_id: EmployeeId) -> Result<Vec<Loan>, PortError>;

    /// Every loan in the system
    async fn all_loans(&self) -> Result<Vec<Loan>, PortError>;
}

/// Answers "can this actor perform this action"
///
/// Role and permission storage live outside this domain; the gate is the
/// only view the lifecycle has of them.
#[async_trait]
pub trait PermissionGate: DomainPort {
    /// Returns true when the role carries the capability
    async fn has_permission(&self, actor_role: &str, action: LoanAction) -> Result<bool, PortError>;
}

/// Blob storage for contract documents
#[async_trait]
pub trait ContractStore: DomainPort {
    /// Uploads a document, returning its storage path
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, PortError>;

    /// Produces a time-limited URL for a stored document
    async fn signed_url(&self, path: &str, ttl_secs: u64) -> Result<String, PortError>;
}
