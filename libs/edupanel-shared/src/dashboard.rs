use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    Week,
    #[default]
    Month,
    Year,
    Range,
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Year,
        TimeWindow::Range,
        TimeWindow::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::Range => "range",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WindowError::Unknown(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("unknown time window '{0}'")]
    Unknown(String),
    #[error("range window needs both --from and --to")]
    MissingBounds,
    #[error("range start {from} is after its end {to}")]
    Inverted { from: NaiveDate, to: NaiveDate },
    #[error("date out of supported range")]
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(with = "crate::models::day")]
    pub from: NaiveDate,
    #[serde(with = "crate::models::day")]
    pub to: NaiveDate,
}

pub fn all_time() -> DateRange {
    DateRange {
        from: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN),
        to: NaiveDate::from_ymd_opt(2100, 12, 31).unwrap_or(NaiveDate::MAX),
    }
}

/// Resolves a window selector into the `{from, to}` pair sent to the backend.
///
/// Rolling windows end on `selected` and include it: a week is the seven days
/// up to and including `selected`, a month starts the day after the same date
/// one month earlier. `custom` is only consulted for [`TimeWindow::Range`].
pub fn resolve_window(
    window: TimeWindow,
    selected: NaiveDate,
    custom: (Option<NaiveDate>, Option<NaiveDate>),
) -> Result<DateRange, WindowError> {
    let trailing = |from: Option<NaiveDate>| {
        from.map(|from| DateRange { from, to: selected })
            .ok_or(WindowError::OutOfRange)
    };

    match window {
        TimeWindow::Day => Ok(DateRange {
            from: selected,
            to: selected,
        }),
        TimeWindow::Week => trailing(selected.checked_sub_days(Days::new(6))),
        TimeWindow::Month => trailing(
            selected
                .checked_sub_months(Months::new(1))
                .and_then(|d| d.checked_add_days(Days::new(1))),
        ),
        TimeWindow::Year => trailing(
            selected
                .checked_sub_months(Months::new(12))
                .and_then(|d| d.checked_add_days(Days::new(1))),
        ),
        TimeWindow::Range => match custom {
            (Some(from), Some(to)) if from <= to => Ok(DateRange { from, to }),
            (Some(from), Some(to)) => Err(WindowError::Inverted { from, to }),
            _ => Err(WindowError::MissingBounds),
        },
        TimeWindow::All => Ok(all_time()),
    }
}

/// Aggregate counters for a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub teachers: u64,
    #[serde(default)]
    pub subjects: u64,
    #[serde(default)]
    pub courses: u64,
    #[serde(default)]
    pub lessons: u64,
    #[serde(default)]
    pub orders: u64,
    #[serde(default)]
    pub permissions: u64,
    #[serde(default)]
    pub revenue: f64,
}

impl DashboardStats {
    pub fn cards(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Users", self.users.to_string()),
            ("Teachers", self.teachers.to_string()),
            ("Subjects", self.subjects.to_string()),
            ("Courses", self.courses.to_string()),
            ("Lessons", self.lessons.to_string()),
            ("Orders", self.orders.to_string()),
            ("Permissions", self.permissions.to_string()),
            ("Revenue", format!("{:.2}", self.revenue)),
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.users == 0
            && self.teachers == 0
            && self.subjects == 0
            && self.courses == 0
            && self.lessons == 0
            && self.orders == 0
            && self.permissions == 0
            && self.revenue == 0.0
    }
}
