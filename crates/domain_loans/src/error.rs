//! Loan domain errors

use core_kernel::{MoneyError, PortError};
use thiserror::Error;

/// Errors that can occur in the loan domain
///
/// Every lifecycle operation returns one of these as a structured value;
/// callers render `user_message()` directly in the UI.
#[derive(Debug, Error)]
pub enum LoanError {
    /// Malformed or out-of-range input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Actor lacks the required capability
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Loan or installment not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transition out of a terminal loan state
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// The underlying store rejected a read or write
    #[error("Persistence error: {0}")]
    Persistence(#[from] PortError),

    /// Contract document upload or retrieval failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Monetary arithmetic failure
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl LoanError {
    pub fn validation(message: impl Into<String>) -> Self {
        LoanError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        LoanError::NotFound(message.into())
    }

    /// The fixed denial message shown when an actor lacks loan management rights
    pub fn permission_denied() -> Self {
        LoanError::PermissionDenied("You do not have permission to manage loans".to_string())
    }

    /// Human-readable message suitable for direct UI display
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
