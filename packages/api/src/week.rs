//! # ISO week ranges for timetable lookups
//!
//! Tahvel's timetable endpoint takes an explicit `from`/`thru` pair. Pages address
//! weeks with a `YYYY-WW` token (ISO-8601 year and week number), so this module
//! converts between the two:
//!
//! - [`WeekToken`]: strict parser/formatter for `YYYY-WW`.
//! - [`Week`]: a resolved week, anchored on its Monday.
//! - [`DateRange`]: Monday 00:00:00 to Sunday 23:59:59 UTC, serialized the way the
//!   upstream API expects (`2024-01-01T00:00:00.000Z`).
//! - [`resolve`] / [`resolve_at`]: lenient resolution used by page routes: a missing
//!   or unparseable token both resolve to the current week.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc, Weekday};
use serde::{Serialize, Serializer};

/// Error returned when a week token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid week token `{0}`, expected YYYY-WW")]
pub struct WeekTokenError(String);

/// An ISO year-week pair such as `2024-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekToken {
    year: i32,
    week: u32,
}

impl WeekToken {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// Monday of this ISO week.
    pub fn monday(&self) -> NaiveDate {
        // validated in from_str
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
            .unwrap_or(NaiveDate::MIN)
    }
}

impl FromStr for WeekToken {
    type Err = WeekTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || WeekTokenError(s.to_string());

        let (year, week) = s.trim().split_once('-').ok_or_else(err)?;
        if year.len() != 4 || week.is_empty() || week.len() > 2 {
            return Err(err());
        }
        if !year.bytes().chain(week.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let year: i32 = year.parse().map_err(|_| err())?;
        let week: u32 = week.parse().map_err(|_| err())?;

        // rejects week 0 and week 53 in 52-week years
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(err)?;

        Ok(Self { year, week })
    }
}

impl fmt::Display for WeekToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.week)
    }
}

/// Inclusive timestamp bounds of one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(serialize_with = "serialize_iso")]
    pub from: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso")]
    pub thru: DateTime<Utc>,
}

impl DateRange {
    pub fn from_iso(&self) -> String {
        to_iso(&self.from)
    }

    pub fn thru_iso(&self) -> String {
        to_iso(&self.thru)
    }
}

fn to_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso(ts))
}

/// A resolved week, identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    monday: NaiveDate,
}

impl Week {
    /// The week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        Self { monday }
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    pub fn sunday(&self) -> NaiveDate {
        self.monday + Duration::days(6)
    }

    pub fn range(&self) -> DateRange {
        let from = self.monday.and_time(NaiveTime::MIN).and_utc();
        let thru = from + Duration::days(7) - Duration::seconds(1);
        DateRange { from, thru }
    }

    pub fn token(&self) -> WeekToken {
        let iso = self.monday.iso_week();
        WeekToken {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Human label such as `Jan 1 - Jan 7, 2024`.
    pub fn display(&self) -> String {
        format!(
            "{} - {}",
            self.monday.format("%b %-d"),
            self.sunday().format("%b %-d, %Y")
        )
    }
}

impl From<WeekToken> for Week {
    fn from(token: WeekToken) -> Self {
        Self {
            monday: token.monday(),
        }
    }
}

/// Resolve an optional `YYYY-WW` token against today's date (UTC).
pub fn resolve(token: Option<&str>) -> Week {
    resolve_at(token, Utc::now().date_naive())
}

/// Resolve an optional token against a fixed `today`.
///
/// A token that fails to parse is treated exactly like a missing one.
pub fn resolve_at(token: Option<&str>, today: NaiveDate) -> Week {
    match token.map(str::parse::<WeekToken>) {
        Some(Ok(token)) => token.into(),
        Some(Err(e)) => {
            tracing::debug!("{}, falling back to current week", e);
            Week::containing(today)
        }
        None => Week::containing(today),
    }
}
