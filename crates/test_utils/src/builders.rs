//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;

use core_kernel::{CurrencyCode, EmployeeId, Money};
use domain_loans::{
    AllocationPlan, ContractFile, CreateLoanRequest, DeductionMethod,
};

use crate::fixtures::{DateFixtures, IdFixtures, MoneyFixtures, StringFixtures};

/// Builder for constructing loan creation requests
pub struct CreateLoanRequestBuilder {
    employee_id: EmployeeId,
    total_amount: Money,
    currency: CurrencyCode,
    installment_count: u32,
    start_date: NaiveDate,
    allocation: AllocationPlan,
    deduction_method: DeductionMethod,
    already_paid: u32,
    notes: Option<String>,
    contract_url: Option<String>,
    contract_file: Option<ContractFile>,
}

impl Default for CreateLoanRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateLoanRequestBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            employee_id: IdFixtures::employee_id(),
            total_amount: MoneyFixtures::principal(),
            currency: StringFixtures::usd(),
            installment_count: 12,
            start_date: DateFixtures::mid_month_start(),
            allocation: AllocationPlan::Equal,
            deduction_method: DeductionMethod::Salary,
            already_paid: 0,
            notes: None,
            contract_url: None,
            contract_file: None,
        }
    }

    /// Sets the employee the loan is issued to
    pub fn with_employee_id(mut self, id: EmployeeId) -> Self {
        self.employee_id = id;
        self
    }

    /// Sets the loan total
    pub fn with_total_amount(mut self, total: Money) -> Self {
        self.total_amount = total;
        self
    }

    /// Sets the currency tag
    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the installment count
    pub fn with_installment_count(mut self, count: u32) -> Self {
        self.installment_count = count;
        self
    }

    /// Sets the loan start date
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    /// Switches to a custom allocation with the given amounts
    ///
    /// Also sets the installment count to match the number of amounts.
    pub fn with_custom_amounts(mut self, amounts: Vec<Money>) -> Self {
        self.installment_count = amounts.len() as u32;
        self.allocation = AllocationPlan::custom(amounts);
        self
    }

    /// Sets the deduction method
    pub fn with_deduction_method(mut self, method: DeductionMethod) -> Self {
        self.deduction_method = method;
        self
    }

    /// Marks the first `count` installments as already paid
    pub fn with_already_paid(mut self, count: u32) -> Self {
        self.already_paid = count;
        self
    }

    /// Sets free-text notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets an externally hosted contract URL
    pub fn with_contract_url(mut self, url: impl Into<String>) -> Self {
        self.contract_url = Some(url.into());
        self
    }

    /// Attaches a contract document for upload
    pub fn with_contract_file(mut self, bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        self.contract_file = Some(ContractFile {
            bytes,
            content_type: content_type.into(),
        });
        self
    }

    /// Builds the request
    pub fn build(self) -> CreateLoanRequest {
        CreateLoanRequest {
            employee_id: self.employee_id,
            total_amount: self.total_amount,
            currency: self.currency,
            installment_count: self.installment_count,
            start_date: self.start_date,
            allocation: self.allocation,
            deduction_method: self.deduction_method,
            already_paid: self.already_paid,
            notes: self.notes,
            contract_url: self.contract_url,
            contract_file: self.contract_file,
        }
    }
}
