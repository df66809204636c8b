// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Datelike;
use chrono::NaiveDate;
use chrono::Weekday;
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::Fallible;

const FORMAT: &str = "%Y-%m-%d";

/// Accepted when reading dates written by browsers' `toLocaleDateString`.
const LOCALE_FORMAT: &str = "%m/%d/%Y";

/// A calendar date in the user's local time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    #[cfg(test)]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, day).expect("valid test date"))
    }

    #[cfg(test)]
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    pub fn parse(s: &str) -> Fallible<Self> {
        let s = s.trim();
        match NaiveDate::parse_from_str(s, FORMAT) {
            Ok(date) => Ok(Self(date)),
            Err(_) => Ok(Self(NaiveDate::parse_from_str(s, LOCALE_FORMAT)?)),
        }
    }

    /// Day of the month, from 1 to 31.
    pub fn day_of_month(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn is_odd_day(self) -> bool {
        self.day_of_month() % 2 == 1
    }

    /// The previous calendar day. `None` only at the start of chrono's range.
    pub fn yesterday(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl ToSql for Date {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Date {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        Date::parse(&string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Date::parse(&string).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_fields() {
        // 2025-01-15 was a Wednesday.
        let date = Date::from_ymd(2025, 1, 15);
        assert_eq!(date.day_of_month(), 15);
        assert_eq!(date.weekday(), Weekday::Wed);
        assert_eq!(date.weekday().num_days_from_sunday(), 3);
        assert!(date.is_odd_day());
        assert!(!Date::from_ymd(2025, 1, 10).is_odd_day());
    }

    #[test]
    fn test_sunday_is_zero() {
        assert_eq!(Date::from_ymd(2025, 1, 12).weekday().num_days_from_sunday(), 0);
        assert_eq!(Date::from_ymd(2025, 1, 18).weekday().num_days_from_sunday(), 6);
    }

    #[test]
    fn test_yesterday_crosses_month() {
        let date = Date::from_ymd(2025, 3, 1);
        assert_eq!(date.yesterday(), Some(Date::from_ymd(2025, 2, 28)));
    }

    #[test]
    fn test_parse() -> Fallible<()> {
        assert_eq!(Date::parse("2025-01-15")?, Date::from_ymd(2025, 1, 15));
        assert_eq!(Date::parse("1/15/2025")?, Date::from_ymd(2025, 1, 15));
        assert!(Date::parse("yesterday").is_err());
        Ok(())
    }
}
