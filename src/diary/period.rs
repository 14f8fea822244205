use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::AppError;

/// Wire format for calendar days crossing the API boundary.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into a calendar day. Days carry no time of day,
/// so everything downstream compares and stores them as-is.
pub fn parse_day(raw: &str) -> Result<NaiveDate, AppError> {
    if raw.is_empty() {
        return Err(AppError::BadRequest("Date is required".to_string()));
    }
    // chrono alone accepts other year widths, single-digit fields and a sign
    if !has_day_shape(raw) {
        return Err(AppError::BadRequest(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            raw
        )));
    }
    NaiveDate::parse_from_str(raw, DAY_FORMAT)
        .map_err(|e| AppError::BadRequest(format!("Invalid date '{}': {}", raw, e)))
}

fn has_day_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Half-open day interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DayRange {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }

    /// Number of distinct days covered by the range.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }
}

impl fmt::Display for DayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

fn out_of_range(day: NaiveDate) -> AppError {
    AppError::BadRequest(format!("Date {} is outside the supported range", day))
}

/// The single day containing `day`.
pub fn day_range(day: NaiveDate) -> Result<DayRange, AppError> {
    let end = day
        .checked_add_days(Days::new(1))
        .ok_or_else(|| out_of_range(day))?;
    Ok(DayRange { start: day, end })
}

/// Sunday-based week containing `day`.
pub fn week_range(day: NaiveDate) -> Result<DayRange, AppError> {
    let back = u64::from(day.weekday().num_days_from_sunday());
    let start = day
        .checked_sub_days(Days::new(back))
        .ok_or_else(|| out_of_range(day))?;
    let end = start
        .checked_add_days(Days::new(7))
        .ok_or_else(|| out_of_range(day))?;
    Ok(DayRange { start, end })
}

/// Month containing `day`. The upper bound is the month's last day, so that
/// day itself falls outside the query range; existing callers rely on this.
pub fn month_range(day: NaiveDate) -> Result<DayRange, AppError> {
    let start = day.with_day(1).ok_or_else(|| out_of_range(day))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .ok_or_else(|| out_of_range(day))?;
    Ok(DayRange { start, end })
}

/// Year containing `day`, bounded above by Dec 31 in the same way as [`month_range`].
pub fn year_range(day: NaiveDate) -> Result<DayRange, AppError> {
    let start = NaiveDate::from_ymd_opt(day.year(), 1, 1).ok_or_else(|| out_of_range(day))?;
    let end = start
        .checked_add_months(Months::new(12))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .ok_or_else(|| out_of_range(day))?;
    Ok(DayRange { start, end })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodType {
    Weekly,
    Monthly,
    Yearly,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Weekly => "weekly",
            PeriodType::Monthly => "monthly",
            PeriodType::Yearly => "yearly",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(PeriodType::Weekly),
            "monthly" => Ok(PeriodType::Monthly),
            "yearly" => Ok(PeriodType::Yearly),
            "" => Err(AppError::BadRequest("Period type is required".to_string())),
            other => Err(AppError::BadRequest(format!("Unknown period type: {}", other))),
        }
    }
}

/// An anchor date expanded into its query range and the day count reported
/// alongside statistics for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub range: DayRange,
    pub length: u32,
}

impl Period {
    pub fn resolve(kind: PeriodType, anchor: NaiveDate) -> Result<Self, AppError> {
        let (range, length) = match kind {
            PeriodType::Weekly => (week_range(anchor)?, 7),
            PeriodType::Monthly => {
                let range = month_range(anchor)?;
                (range, range.end.day())
            }
            PeriodType::Yearly => {
                let range = year_range(anchor)?;
                (range, range.end.ordinal())
            }
        };

        Ok(Self { range, length })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// Accepts `1` or `-1`; an absent value means newest first.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(SortDirection::default()),
            Some("1") => Ok(SortDirection::Ascending),
            Some("-1") => Ok(SortDirection::Descending),
            Some(other) => Err(AppError::BadRequest(format!(
                "Sort must be 1 or -1, got '{}'",
                other
            ))),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}
