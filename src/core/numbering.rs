use chrono::{Datelike, Days, NaiveDate};

use super::error::FactureError;

/// Default payment terms: due 30 days after issue.
pub const DEFAULT_PAYMENT_TERMS_DAYS: u64 = 30;

/// Compute the payment due date from the issue date.
pub fn due_date(issue_date: NaiveDate, days: u64) -> NaiveDate {
    // Days::new cannot overflow for any sane payment term; fall back to
    // the issue date itself if chrono refuses the addition.
    issue_date
        .checked_add_days(Days::new(days))
        .unwrap_or(issue_date)
}

/// Gapless invoice number sequence.
///
/// Generates numbers in the format `FA-YYYYMM-NNN` ("FA-202406-001",
/// "FA-202406-002", ...) and resets the counter when the month advances.
/// The counter is sequential rather than random so that numbering stays
/// gapless, as French bookkeeping expects.
#[derive(Debug, Clone)]
pub struct InvoiceNumberSequence {
    prefix: String,
    year: i32,
    month: u32,
    next_number: u32,
}

impl InvoiceNumberSequence {
    /// New sequence for the month of `date`, starting at 1.
    pub fn new(date: NaiveDate) -> Self {
        Self::with_prefix("FA-", date)
    }

    /// New sequence with a custom prefix ("AV-" for credit notes, ...).
    pub fn with_prefix(prefix: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            prefix: prefix.into(),
            year: date.year(),
            month: date.month(),
            next_number: 1,
        }
    }

    /// Continue an existing sequence from a given counter value.
    pub fn starting_at(prefix: impl Into<String>, date: NaiveDate, next_number: u32) -> Self {
        Self {
            prefix: prefix.into(),
            year: date.year(),
            month: date.month(),
            next_number,
        }
    }

    fn format(&self, number: u32) -> String {
        format!("{}{}{:02}-{:03}", self.prefix, self.year, self.month, number)
    }

    /// Generate and consume the next invoice number.
    pub fn next_number(&mut self) -> String {
        let number = self.format(self.next_number);
        self.next_number += 1;
        number
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    /// Advance to the month of `date`, resetting the counter.
    /// Rejects moves backwards in time; numbering must not rewind.
    pub fn advance_to(&mut self, date: NaiveDate) -> Result<bool, FactureError> {
        let (year, month) = (date.year(), date.month());
        if (year, month) < (self.year, self.month) {
            return Err(FactureError::Numbering(format!(
                "cannot move sequence back to {year}-{month:02} from {}-{:02}",
                self.year, self.month
            )));
        }
        if (year, month) == (self.year, self.month) {
            return Ok(false);
        }
        self.year = year;
        self.month = month;
        self.next_number = 1;
        Ok(true)
    }
}
