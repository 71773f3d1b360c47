use chrono::{Datelike, Days, NaiveDate};
use crate::errors::ReportError;

/// A calendar month as a half-open date range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportPeriod {
    /// Range covering `month` of `year`; `to` is the 1st of the following month.
    pub fn for_month(month: u32, year: i32) -> Result<Self, ReportError> {
        if year < 1 {
            return Err(ReportError::InvalidDate(format!("year {} is before year 1", year)));
        }
        let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            ReportError::InvalidDate(format!("month {} of year {} is not a valid date", month, year))
        })?;
        // 31 days past the 1st always lands in the next month
        let to = from
            .checked_add_days(Days::new(31))
            .and_then(|d| d.with_day(1))
            .ok_or_else(|| {
                ReportError::InvalidDate(format!("no month follows {}-{:02}", year, month))
            })?;
        Ok(Self { from, to })
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}
