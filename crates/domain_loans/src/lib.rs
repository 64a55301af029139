//! Loan Domain - Payroll loan administration
//!
//! This crate implements the loan installment engine for the payroll
//! system: allocating a principal across dated installment obligations,
//! tracking payment state, and keeping a loan's aggregate status
//! consistent with its installments as payments are recorded.
//!
//! # Components
//!
//! - [`allocation`] - pure equal/custom installment amount allocation
//! - [`schedule`] - pure fixed-payment-day deduction date generation
//! - [`loan`] / [`installment`] - the aggregates and their state machines
//! - [`service`] - the lifecycle manager exposed to UI callers
//! - [`ports`] - interfaces to storage, permissions, and blob storage
//! - [`adapters`] - in-memory port implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_loans::{LoanService, CreateLoanRequest, AllocationPlan};
//!
//! let service = LoanService::new(store, permissions, contracts);
//! let loan = service.create_loan("hr_manager", request).await?;
//! service
//!     .mark_installment_paid("hr_manager", installment_id, loan.id, PaymentSource::Salary)
//!     .await?;
//! ```

pub mod adapters;
pub mod allocation;
pub mod error;
pub mod installment;
pub mod loan;
pub mod ports;
pub mod schedule;
pub mod service;

pub use adapters::{InMemoryContractStore, InMemoryLoanStore, StaticPermissionGate};
pub use allocation::{allocate, AllocationPlan, SUM_TOLERANCE};
pub use error::LoanError;
pub use installment::{Installment, InstallmentStatus, PaymentSource};
pub use loan::{ContractRef, DeductionMethod, Loan, LoanStatus};
pub use ports::{ContractStore, LoanAction, LoanStore, PermissionGate};
pub use schedule::{ScheduleConfig, DEFAULT_PAYMENT_DAY};
pub use service::{ContractFile, CreateLoanRequest, LoanService};
