//! Poll input validation

use chrono::NaiveDate;

use super::ValidationError;

/// Maximum length for poll names
const MAX_POLL_NAME_LEN: usize = 100;

/// Validated poll name (trimmed, non-empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PollName(String);

impl PollName {
    /// Create a new poll name.
    ///
    /// Surrounding whitespace is trimmed before the checks run. Length is
    /// counted in characters, not bytes.
    ///
    /// # Example
    /// ```
    /// use pollcord_server::models::PollName;
    ///
    /// assert!(PollName::new("Game night").is_ok());
    /// assert!(PollName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "poll name" });
        }

        if trimmed.chars().count() > MAX_POLL_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "poll name",
                max: MAX_POLL_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PollName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Inclusive date range a poll covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Single-day ranges are allowed; an end before the start is not.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidRange {
                start: "start_date",
                end: "end_date",
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}
