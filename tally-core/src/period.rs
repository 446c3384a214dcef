//! Reporting windows: week, month, six-month, and year views plus a
//! navigation offset relative to an injected "today".
//!
//! The resolver never reads the system clock. Callers pass `now` explicitly,
//! which keeps every window computation reproducible.

use anyhow::bail;
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Reporting granularity selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Week,
    Month,
    SixMonth,
    Year,
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "half-year" | "six-month" => Ok(Period::SixMonth),
            "year" => Ok(Period::Year),
            other => bail!("unknown period '{other}' (expected week, month, half-year, or year)"),
        }
    }
}

impl Period {
    /// Bucket label for a date inside a resolved window.
    ///
    /// This is the same labeling the resolver uses to build the axis, so a
    /// date within the window always maps onto a pre-registered bucket.
    pub fn label_for(&self, date: NaiveDate) -> String {
        match self {
            Period::Week => weekday_abbrev(date.weekday()).to_string(),
            Period::Month => date.day().to_string(),
            Period::SixMonth | Period::Year => MONTH_ABBREV[date.month0() as usize].to_string(),
        }
    }
}

/// A resolved calendar interval and its chart axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// One label per bucket, in calendar order. Labels are unique within a
    /// window: no resolvable interval spans more than 12 consecutive months,
    /// so month names cannot repeat even across a year boundary.
    pub labels: Vec<String>,
}

impl PeriodWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Resolve a period and navigation offset into a concrete window.
///
/// `offset` counts whole periods: 0 is the window containing `now`, -1 the
/// previous one, +1 the next. `week_start` is the configured first day of
/// the week (settings default Monday).
pub fn resolve(period: Period, offset: i32, now: NaiveDate, week_start: Weekday) -> PeriodWindow {
    match period {
        Period::Week => {
            let anchor = now + Duration::weeks(offset as i64);
            let back = (anchor.weekday().num_days_from_monday() + 7
                - week_start.num_days_from_monday())
                % 7;
            let start = anchor - Duration::days(back as i64);
            let end = start + Duration::days(6);
            let labels = (0..7)
                .map(|i| weekday_abbrev((start + Duration::days(i)).weekday()).to_string())
                .collect();
            PeriodWindow {
                period,
                start,
                end,
                labels,
            }
        }
        Period::Month => {
            let anchor = shift_months(now, offset);
            let start = month_start(anchor);
            let end = month_end(anchor);
            let labels = (1..=end.day()).map(|d| d.to_string()).collect();
            PeriodWindow {
                period,
                start,
                end,
                labels,
            }
        }
        Period::SixMonth => {
            // Six consecutive months ending at the anchor month.
            let anchor = shift_months(now, offset * 6);
            let start = month_start(shift_months(anchor, -5));
            let end = month_end(anchor);
            let labels = (0..6)
                .map(|i| MONTH_ABBREV[shift_months(start, i).month0() as usize].to_string())
                .collect();
            PeriodWindow {
                period,
                start,
                end,
                labels,
            }
        }
        Period::Year => {
            let year = now.year() + offset;
            let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("invalid year start date");
            let end = NaiveDate::from_ymd_opt(year, 12, 31).expect("invalid year end date");
            let labels = MONTH_ABBREV.iter().map(|m| m.to_string()).collect();
            PeriodWindow {
                period,
                start,
                end,
                labels,
            }
        }
    }
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    if delta >= 0 {
        date.checked_add_months(Months::new(delta as u32))
            .unwrap_or(date)
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
            .unwrap_or(date)
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(shift_months(month_start(date), 1)) - Duration::days(1)
}
