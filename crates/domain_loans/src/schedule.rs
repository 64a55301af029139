//! Deduction schedule generation
//!
//! Produces the calendar dates installments fall due on. Deductions land
//! on a fixed payment day-of-month, starting in the month after the loan
//! start date and rolling forward one calendar month per installment.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use core_kernel::CoreError;

/// Day-of-month payroll deductions are taken on
pub const DEFAULT_PAYMENT_DAY: u32 = 10;

/// Schedule generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    payment_day: u32,
}

impl ScheduleConfig {
    /// Creates a config with a specific payment day
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Configuration`] when the day is outside `1..=31`.
    pub fn new(payment_day: u32) -> Result<Self, CoreError> {
        if !(1..=31).contains(&payment_day) {
            return Err(CoreError::configuration(format!(
                "Payment day must be between 1 and 31, got {}",
                payment_day
            )));
        }
        Ok(Self { payment_day })
    }

    /// Returns the configured payment day-of-month
    pub fn payment_day(&self) -> u32 {
        self.payment_day
    }

    /// Generates `count` deduction dates for a loan starting on `start`
    ///
    /// Installment `i` (0-based) falls on the payment day of
    /// `start.month + 1 + i`, with month arithmetic overflowing into
    /// subsequent years. When the payment day exceeds the target month's
    /// length the date is clamped to the last day of that month, so a
    /// day-31 config yields Feb 28/29 rather than rolling into March.
    ///
    /// Pure: depends only on the config, never on the wall clock.
    pub fn deduction_dates(&self, start: NaiveDate, count: u32) -> Vec<NaiveDate> {
        (0..count)
            .map(|i| {
                let months_ahead = start.month0() + 1 + i;
                let year = start.year() + (months_ahead / 12) as i32;
                let month = months_ahead % 12 + 1;
                clamped_date(year, month, self.payment_day)
            })
            .collect()
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            payment_day: DEFAULT_PAYMENT_DAY,
        }
    }
}

/// Builds a date, clamping the day to the month's last day when needed
fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        let last_day = days_in_month(year, month);
        NaiveDate::from_ymd_opt(year, month, last_day)
            .expect("last day of month is always constructible")
    })
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month_start
        .expect("first of month is always constructible")
        .pred_opt()
        .expect("month start has a predecessor")
        .day()
}
