//! Check-in / check-out dates

use crate::error::{BookingCoreError, Result};
use chrono::{Days, NaiveDate};

/// Date format used in requests and URLs
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
/// Short date format shown in the search bar
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%y";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), WIRE_DATE_FORMAT)
        .map_err(|_| BookingCoreError::InvalidDate(value.to_string()))
}

/// A validated stay: check-out is strictly after check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_out <= check_in {
            return Err(BookingCoreError::CheckOutNotAfterCheckIn);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Parse both dates as submitted by the date picker
    ///
    /// A missing or empty date is reported before any format problem.
    pub fn parse(check_in: Option<&str>, check_out: Option<&str>) -> Result<Self> {
        let (Some(check_in), Some(check_out)) = (
            check_in.filter(|s| !s.trim().is_empty()),
            check_out.filter(|s| !s.trim().is_empty()),
        ) else {
            return Err(BookingCoreError::MissingDates);
        };
        Self::new(parse_date(check_in)?, parse_date(check_out)?)
    }

    #[inline]
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    #[inline]
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Move check-in; a check-out on or before the new date moves to the next day
    pub fn with_check_in(self, check_in: NaiveDate) -> Self {
        let check_out = if self.check_out <= check_in {
            next_day(check_in)
        } else {
            self.check_out
        };
        Self {
            check_in,
            check_out,
        }
    }

    pub fn check_in_wire(&self) -> String {
        self.check_in.format(WIRE_DATE_FORMAT).to_string()
    }

    pub fn check_out_wire(&self) -> String {
        self.check_out.format(WIRE_DATE_FORMAT).to_string()
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}

/// Search bar label: `"dd/mm/yy — dd/mm/yy"`, or a prompt when no stay is chosen
pub fn format_date_range(stay: Option<&StayDates>) -> String {
    match stay {
        Some(stay) => format!(
            "{} — {}",
            stay.check_in.format(DISPLAY_DATE_FORMAT),
            stay.check_out.format(DISPLAY_DATE_FORMAT)
        ),
        None => "Select dates".to_string(),
    }
}

/// Check-in calendar: past days are disabled
#[inline]
pub fn is_selectable_check_in(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Check-out calendar: days after check-in, or from tomorrow when no check-in is chosen
pub fn is_selectable_check_out(date: NaiveDate, check_in: Option<NaiveDate>, today: NaiveDate) -> bool {
    match check_in {
        Some(check_in) => date > check_in,
        None => date >= next_day(today),
    }
}
