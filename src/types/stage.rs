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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Weekday;

use crate::error::ErrorReport;
use crate::types::date::Date;

/// Where a verse sits in the promotion chain, together with the position that
/// decides which days it is due on.
///
/// The chain only moves forward: `Initial`, `Binary`, `Weekly`, `Monthly`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stage {
    /// New verses. Due every day.
    Initial,
    /// Due on every odd or every even day of the month.
    Binary(Slot),
    /// Due once a week.
    Weekly(Weekday),
    /// Due once a month. Days past the end of a short month are skipped.
    Monthly(DayOfMonth),
}

/// The stage without its position, used for grouping and persistence.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Bucket {
    Daily,
    OddEven,
    DaysOfWeek,
    DatesOfMonth,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Slot {
    Odd,
    Even,
}

/// A day of the month between 1 and 31.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DayOfMonth(u8);

#[derive(Debug, PartialEq)]
pub enum StageError {
    /// The persisted bucket and position do not describe any stage.
    InvalidState {
        bucket: String,
        position: Option<i64>,
    },
}

impl Stage {
    pub fn bucket(self) -> Bucket {
        match self {
            Stage::Initial => Bucket::Daily,
            Stage::Binary(_) => Bucket::OddEven,
            Stage::Weekly(_) => Bucket::DaysOfWeek,
            Stage::Monthly(_) => Bucket::DatesOfMonth,
        }
    }

    /// The persisted position: 1 or 2 for binary slots, 0 to 6 (Sunday
    /// first) for weekdays, 1 to 31 for days of the month.
    pub fn position(self) -> Option<i64> {
        match self {
            Stage::Initial => None,
            Stage::Binary(slot) => Some(slot.position()),
            Stage::Weekly(weekday) => Some(weekday.num_days_from_sunday() as i64),
            Stage::Monthly(day) => Some(day.get() as i64),
        }
    }

    /// Rebuild a stage from its persisted form.
    pub fn decode(bucket: &str, position: Option<i64>) -> Result<Stage, StageError> {
        let invalid = || StageError::InvalidState {
            bucket: bucket.to_string(),
            position,
        };
        let bucket = Bucket::parse(bucket).ok_or_else(invalid)?;
        let stage = match bucket {
            // Daily verses carry no position; a stray one is ignored.
            Bucket::Daily => Some(Stage::Initial),
            Bucket::OddEven => position.and_then(Slot::from_position).map(Stage::Binary),
            Bucket::DaysOfWeek => position.and_then(weekday_from_index).map(Stage::Weekly),
            Bucket::DatesOfMonth => position.and_then(DayOfMonth::from_position).map(Stage::Monthly),
        };
        stage.ok_or_else(invalid)
    }
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Daily,
        Bucket::OddEven,
        Bucket::DaysOfWeek,
        Bucket::DatesOfMonth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Daily => "daily",
            Bucket::OddEven => "oddEven",
            Bucket::DaysOfWeek => "daysOfWeek",
            Bucket::DatesOfMonth => "datesOfMonth",
        }
    }

    pub fn parse(s: &str) -> Option<Bucket> {
        Bucket::ALL.into_iter().find(|bucket| bucket.as_str() == s)
    }

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Daily => "Daily",
            Bucket::OddEven => "Odd/Even Days",
            Bucket::DaysOfWeek => "Days of Week",
            Bucket::DatesOfMonth => "Dates of Month",
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Slot {
    /// The slot a date falls in.
    pub fn of(date: Date) -> Slot {
        if date.is_odd_day() { Slot::Odd } else { Slot::Even }
    }

    pub fn position(self) -> i64 {
        match self {
            Slot::Odd => 1,
            Slot::Even => 2,
        }
    }

    pub fn from_position(position: i64) -> Option<Slot> {
        match position {
            1 => Some(Slot::Odd),
            2 => Some(Slot::Even),
            _ => None,
        }
    }

    pub fn opposite(self) -> Slot {
        match self {
            Slot::Odd => Slot::Even,
            Slot::Even => Slot::Odd,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::Odd => "odd",
            Slot::Even => "even",
        }
    }
}

impl DayOfMonth {
    pub fn new(day: u32) -> Option<DayOfMonth> {
        if (1..=31).contains(&day) {
            Some(DayOfMonth(day as u8))
        } else {
            None
        }
    }

    /// The day of month of a date. Always in range.
    pub fn of(date: Date) -> DayOfMonth {
        DayOfMonth(date.day_of_month() as u8)
    }

    pub fn get(self) -> u32 {
        self.0 as u32
    }

    /// `(day mod 31) + 1`: the following day, wrapping 31 to 1.
    pub fn next(self) -> DayOfMonth {
        DayOfMonth(self.0 % 31 + 1)
    }

    fn from_position(position: i64) -> Option<DayOfMonth> {
        u32::try_from(position).ok().and_then(DayOfMonth::new)
    }
}

/// Map a Sunday-first index (0 to 6) to a weekday.
pub fn weekday_from_index(index: i64) -> Option<Weekday> {
    let weekday = match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        _ => return None,
    };
    Some(weekday)
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

impl Display for StageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StageError::InvalidState {
                bucket,
                position: Some(position),
            } => write!(f, "invalid state: bucket '{bucket}' with position {position}"),
            StageError::InvalidState {
                bucket,
                position: None,
            } => write!(f, "invalid state: bucket '{bucket}' without a position"),
        }
    }
}

impl Error for StageError {}

impl From<StageError> for ErrorReport {
    fn from(value: StageError) -> Self {
        ErrorReport::new(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid() {
        assert_eq!(Stage::decode("daily", None), Ok(Stage::Initial));
        assert_eq!(Stage::decode("oddEven", Some(2)), Ok(Stage::Binary(Slot::Even)));
        assert_eq!(
            Stage::decode("daysOfWeek", Some(0)),
            Ok(Stage::Weekly(Weekday::Sun))
        );
        assert_eq!(
            Stage::decode("datesOfMonth", Some(31)),
            Ok(Stage::Monthly(DayOfMonth::new(31).unwrap()))
        );
    }

    #[test]
    fn test_decode_out_of_domain() {
        for (bucket, position) in [
            ("oddEven", Some(0)),
            ("oddEven", Some(3)),
            ("oddEven", None),
            ("daysOfWeek", Some(7)),
            ("daysOfWeek", Some(9)),
            ("daysOfWeek", Some(-1)),
            ("datesOfMonth", Some(0)),
            ("datesOfMonth", Some(32)),
        ] {
            let result = Stage::decode(bucket, position);
            assert_eq!(
                result,
                Err(StageError::InvalidState {
                    bucket: bucket.to_string(),
                    position
                })
            );
        }
    }

    #[test]
    fn test_decode_unknown_bucket() {
        let err = Stage::decode("yearly", Some(1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid state: bucket 'yearly' with position 1"
        );
    }

    #[test]
    fn test_position_round_trips_through_decode() {
        let stages = [
            Stage::Initial,
            Stage::Binary(Slot::Odd),
            Stage::Weekly(Weekday::Sat),
            Stage::Monthly(DayOfMonth::new(14).unwrap()),
        ];
        for stage in stages {
            let decoded = Stage::decode(stage.bucket().as_str(), stage.position());
            assert_eq!(decoded, Ok(stage));
        }
    }

    #[test]
    fn test_day_of_month_next() {
        assert_eq!(DayOfMonth::new(10).unwrap().next(), DayOfMonth::new(11).unwrap());
        assert_eq!(DayOfMonth::new(30).unwrap().next(), DayOfMonth::new(31).unwrap());
        assert_eq!(DayOfMonth::new(31).unwrap().next(), DayOfMonth::new(1).unwrap());
    }

    #[test]
    fn test_day_of_month_bounds() {
        assert!(DayOfMonth::new(0).is_none());
        assert!(DayOfMonth::new(1).is_some());
        assert!(DayOfMonth::new(31).is_some());
        assert!(DayOfMonth::new(32).is_none());
    }
}
