//! Cycle domain types

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Recurrence of a cycle
///
/// Serialized upper-case; parsed case-insensitively from both strings and
/// JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }

    /// Start and end of the window of this frequency containing `at`.
    ///
    /// The end is the last microsecond before the next window starts.
    pub fn window(&self, at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let date = at.date();
        let start = match self {
            Frequency::Daily => date,
            Frequency::Weekly => {
                date - Duration::days(date.weekday().num_days_from_monday() as i64)
            }
            Frequency::Monthly => date.with_day(1).unwrap_or(date),
            Frequency::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        };
        let next = match self {
            Frequency::Daily => start + Duration::days(1),
            Frequency::Weekly => start + Duration::days(7),
            Frequency::Monthly => start
                .checked_add_months(chrono::Months::new(1))
                .unwrap_or(start + Duration::days(31)),
            Frequency::Yearly => start
                .checked_add_months(chrono::Months::new(12))
                .unwrap_or(start + Duration::days(365)),
        };
        let start = start.and_time(NaiveTime::MIN);
        let end = next.and_time(NaiveTime::MIN) - Duration::microseconds(1);
        (start, end)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known frequency
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown frequency '{0}', expected one of DAILY, WEEKLY, MONTHLY, YEARLY")]
pub struct UnknownFrequency(pub String);

impl FromStr for Frequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == upper)
            .ok_or_else(|| UnknownFrequency(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A recurring time window that scenarios attach to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: String,
    pub name: String,
    pub frequency: Frequency,
    pub properties: HashMap<String, serde_json::Value>,
    pub creation_date: NaiveDateTime,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl Cycle {
    /// Whether `at` falls inside this cycle's window (bounds inclusive)
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start_date <= at && at <= self.end_date
    }
}
