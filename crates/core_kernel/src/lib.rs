//! Core Kernel - Foundational types and utilities for the payroll loans system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic and currency-safe rounding
//! - Strongly-typed identifiers
//! - Ports-and-adapters base types

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;

pub use error::CoreError;
pub use identifiers::{EmployeeId, InstallmentId, LoanId};
pub use money::{CurrencyCode, Money, MoneyError};
pub use ports::{DomainPort, PortError};
