//! Adapter implementations for the loan domain ports

mod memory;

pub use memory::{InMemoryContractStore, InMemoryLoanStore, StaticPermissionGate};
