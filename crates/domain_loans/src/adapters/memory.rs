//! In-memory adapters
//!
//! Process-local implementations of the loan domain ports, used in tests
//! and as the default wiring when no database is configured. State lives
//! behind `tokio::sync::RwLock`; write-failure injection switches let
//! tests exercise the compensating-rollback paths.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, EmployeeId, InstallmentId, LoanId, PortError};

use crate::installment::Installment;
use crate::loan::Loan;
use crate::ports::{ContractStore, LoanAction, LoanStore, PermissionGate};

/// In-memory loan and installment storage
#[derive(Debug, Default)]
pub struct InMemoryLoanStore {
    loans: RwLock<HashMap<LoanId, Loan>>,
    installments: RwLock<HashMap<InstallmentId, Installment>>,
    fail_installment_inserts: AtomicBool,
}

impl InMemoryLoanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next (and all subsequent) installment batch inserts fail
    pub fn fail_installment_inserts(&self, fail: bool) {
        self.fail_installment_inserts.store(fail, Ordering::Relaxed);
    }

    /// Number of stored loans, for test assertions
    pub async fn loan_count(&self) -> usize {
        self.loans.read().await.len()
    }

    /// Number of stored installments, for test assertions
    pub async fn installment_count(&self) -> usize {
        self.installments.read().await.len()
    }
}

impl DomainPort for InMemoryLoanStore {}

#[async_trait]
impl LoanStore for InMemoryLoanStore {
    async fn insert_loan(&self, loan: &Loan) -> Result<(), PortError> {
        let mut loans = self.loans.write().await;
        if loans.contains_key(&loan.id) {
            return Err(PortError::conflict(format!(
                "Loan {} already exists",
                loan.id
            )));
        }
        loans.insert(loan.id, loan.clone());
        Ok(())
    }

    async fn insert_installments(&self, installments: &[Installment]) -> Result<(), PortError> {
        if self.fail_installment_inserts.load(Ordering::Relaxed) {
            return Err(PortError::connection("Injected installment insert failure"));
        }
        let mut store = self.installments.write().await;
        for installment in installments {
            store.insert(installment.id, installment.clone());
        }
        Ok(())
    }

    async fn get_loan(&self, id: LoanId) -> Result<Loan, PortError> {
        self.loans
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Loan", id))
    }

    async fn update_loan(&self, loan: &Loan) -> Result<(), PortError> {
        let mut loans = self.loans.write().await;
        if !loans.contains_key(&loan.id) {
            return Err(PortError::not_found("Loan", loan.id));
        }
        loans.insert(loan.id, loan.clone());
        Ok(())
    }

    async fn delete_loan(&self, id: LoanId) -> Result<(), PortError> {
        self.loans.write().await.remove(&id);
        // Cascade: installments cannot outlive their loan
        self.installments
            .write()
            .await
            .retain(|_, installment| installment.loan_id != id);
        Ok(())
    }

    async fn delete_installments_for_loan(&self, loan_id: LoanId) -> Result<(), PortError> {
        self.installments
            .write()
            .await
            .retain(|_, installment| installment.loan_id != loan_id);
        Ok(())
    }

    async fn get_installment(&self, id: InstallmentId) -> Result<Installment, PortError> {
        self.installments
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Installment", id))
    }

    async fn update_installment(&self, installment: &Installment) -> Result<(), PortError> {
        let mut installments = self.installments.write().await;
        if !installments.contains_key(&installment.id) {
            return Err(PortError::not_found("Installment", installment.id));
        }
        installments.insert(installment.id, installment.clone());
        Ok(())
    }

    async fn installments_for_loan(&self, loan_id: LoanId) -> Result<Vec<Installment>, PortError> {
        let mut result: Vec<Installment> = self
            .installments
            .read()
            .await
            .values()
            .filter(|installment| installment.loan_id == loan_id)
            .cloned()
            .collect();
        result.sort_by_key(|installment| installment.sequence);
        Ok(result)
    }

    async fn loans_for_employee(&self, employee_id: EmployeeId) -> Result<Vec<Loan>, PortError> {
        let mut result: Vec<Loan> = self
            .loans
            .read()
            .await
            .values()
            .filter(|loan| loan.employee_id == employee_id)
            .cloned()
            .collect();
        result.sort_by_key(|loan| loan.created_at);
        Ok(result)
    }

    async fn all_loans(&self) -> Result<Vec<Loan>, PortError> {
        let mut result: Vec<Loan> = self.loans.read().await.values().cloned().collect();
        result.sort_by_key(|loan| loan.created_at);
        Ok(result)
    }
}

/// Fixed role-to-capability mapping
///
/// Role and permission storage are external to this domain; this gate
/// holds whatever mapping the host application resolved at startup.
#[derive(Debug, Default)]
pub struct StaticPermissionGate {
    grants: HashMap<String, HashSet<&'static str>>,
}

impl StaticPermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants an action to a role
    pub fn allow(mut self, role: impl Into<String>, action: LoanAction) -> Self {
        self.grants
            .entry(role.into())
            .or_default()
            .insert(action.as_str());
        self
    }
}

impl DomainPort for StaticPermissionGate {}

#[async_trait]
impl PermissionGate for StaticPermissionGate {
    async fn has_permission(
        &self,
        actor_role: &str,
        action: LoanAction,
    ) -> Result<bool, PortError> {
        Ok(self
            .grants
            .get(actor_role)
            .is_some_and(|actions| actions.contains(action.as_str())))
    }
}

/// In-memory contract document storage
#[derive(Debug, Default)]
pub struct InMemoryContractStore {
    documents: RwLock<HashMap<String, (Vec<u8>, String)>>,
    fail_uploads: AtomicBool,
}

impl InMemoryContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes uploads fail, for rollback tests
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::Relaxed);
    }

    /// Number of stored documents, for test assertions
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

impl DomainPort for InMemoryContractStore {}

#[async_trait]
impl ContractStore for InMemoryContractStore {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, PortError> {
        if self.fail_uploads.load(Ordering::Relaxed) {
            return Err(PortError::connection("Injected upload failure"));
        }
        let path = format!("contracts/{}", key);
        self.documents
            .write()
            .await
            .insert(path.clone(), (bytes, content_type.to_string()));
        Ok(path)
    }

    async fn signed_url(&self, path: &str, ttl_secs: u64) -> Result<String, PortError> {
        let documents = self.documents.read().await;
        if !documents.contains_key(path) {
            return Err(PortError::not_found("ContractDocument", path));
        }
        Ok(format!("https://files.invalid/{}?expires={}", path, ttl_secs))
    }
}
