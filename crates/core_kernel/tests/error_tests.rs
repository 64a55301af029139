//! Unit tests for core error types

use core_kernel::{CoreError, MoneyError, PortError};

#[test]
fn test_validation_helper() {
    let err = CoreError::validation("total must be positive");
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(err.to_string().contains("total must be positive"));
}

#[test]
fn test_invalid_state_helper() {
    let err = CoreError::invalid_state("paid -> active");
    assert!(err.to_string().contains("Invalid state transition"));
}

#[test]
fn test_money_error_converts() {
    let err: CoreError = MoneyError::DivisionByZero.into();
    assert!(matches!(err, CoreError::Money(_)));
}

#[test]
fn test_port_error_classification() {
    assert!(PortError::not_found("Installment", "abc").is_not_found());
    assert!(PortError::connection("refused").is_transient());
    assert!(!PortError::internal("bug").is_transient());
}
