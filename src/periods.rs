use crate::error::{BudgetGridError, Result};
use crate::schema::Cadence;
use chrono::{Days, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FISCAL_START_MONTH: u32 = 4;
pub const DEFAULT_FISCAL_START_YEAR: i32 = 2025;

/// The twelve month window that period labels are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FiscalCalendar {
    start_month: u32,
    start_year: i32,
}

impl Default for FiscalCalendar {
    fn default() -> Self {
        Self {
            start_month: DEFAULT_FISCAL_START_MONTH,
            start_year: DEFAULT_FISCAL_START_YEAR,
        }
    }
}

impl FiscalCalendar {
    pub fn new(start_month: u32, start_year: i32) -> Result<Self> {
        validate_fiscal_start_month(start_month)?;
        Ok(Self {
            start_month,
            start_year,
        })
    }

    /// Reads the start year out of a fiscal year label such as `"2025-26"`,
    /// `"FY 2025-2026"` or `"2025"`. Labels without a four digit year fall back
    /// to the default start year.
    pub fn from_fiscal_year_label(label: &str) -> Self {
        match leading_year(label) {
            Some(start_year) => Self {
                start_year,
                ..Self::default()
            },
            None => {
                debug!(
                    "Fiscal year label '{}' has no four digit year, using {}",
                    label, DEFAULT_FISCAL_START_YEAR
                );
                Self::default()
            }
        }
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn start_date(&self) -> NaiveDate {
        first_of_month(self.start_year, self.start_month)
    }

    pub fn end_date(&self) -> NaiveDate {
        let (year, month) = add_months(self.start_year, self.start_month, 11);
        last_day_of_month(year, month)
    }

    /// `"FY 2025-26"` for a window crossing the calendar year, `"FY 2025"` otherwise.
    pub fn label(&self) -> String {
        if self.start_month == 1 {
            format!("FY {}", self.start_year)
        } else {
            format!(
                "FY {}-{:02}",
                self.start_year,
                (self.start_year + 1).rem_euclid(100)
            )
        }
    }
}

/// One labelled reporting bucket with the dates it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSpan {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Period labels for a cadence over the default April 2025 fiscal year.
pub fn generate_periods(cadence: Cadence) -> Vec<String> {
    generate_periods_for(cadence, &FiscalCalendar::default())
}

pub fn generate_periods_for(cadence: Cadence, calendar: &FiscalCalendar) -> Vec<String> {
    generate_period_spans(cadence, calendar)
        .into_iter()
        .map(|span| span.label)
        .collect()
}

pub fn generate_period_spans(cadence: Cadence, calendar: &FiscalCalendar) -> Vec<PeriodSpan> {
    let step = cadence.months_per_period();

    (0..cadence.period_count() as u32)
        .map(|idx| {
            let (start_year, start_month) =
                add_months(calendar.start_year, calendar.start_month, idx * step);
            let (end_year, end_month) =
                add_months(calendar.start_year, calendar.start_month, (idx + 1) * step - 1);

            let label = match cadence {
                Cadence::Monthly => month_label(start_year, start_month),
                Cadence::Quarterly => format!("Q{} {}", idx + 1, calendar.start_year),
                Cadence::HalfYearly => format!("H{} {}", idx + 1, calendar.start_year),
                Cadence::Yearly => calendar.label(),
            };

            PeriodSpan {
                label,
                start: first_of_month(start_year, start_month),
                end: last_day_of_month(end_year, end_month),
            }
        })
        .collect()
}

pub fn validate_fiscal_start_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(BudgetGridError::InvalidFiscalStartMonth(month));
    }
    Ok(())
}

fn month_label(year: i32, month: u32) -> String {
    first_of_month(year, month).format("%b %Y").to_string()
}

fn add_months(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let zero_based = month - 1 + offset;
    (year + (zero_based / 12) as i32, zero_based % 12 + 1)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = add_months(year, month, 1);

    first_of_month(next_year, next_month)
        .checked_sub_days(Days::new(1))
        .unwrap_or_else(|| first_of_month(year, month))
}

fn leading_year(label: &str) -> Option<i32> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}
