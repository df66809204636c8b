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

//! The practice streak: how many consecutive days the user has practiced.

use crate::types::date::Date;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Streak {
    pub count: u32,
    /// The calendar day of the last practice session, if any.
    pub last_practice: Option<Date>,
}

impl Streak {
    /// Update the streak at the start of a session on `today`, using the date
    /// recorded by the previous session.
    ///
    /// Practicing yesterday extends the streak and stamps today. Any older
    /// date resets the count to zero and leaves the date alone; completing a
    /// session stamps it through [`Streak::record_practice`]. The result is
    /// idempotent per calendar day: once advanced on `today`, advancing again
    /// on `today` changes nothing.
    pub fn advance(self, today: Date) -> Streak {
        let Some(last_practice) = self.last_practice else {
            return self;
        };
        if Some(last_practice) == today.yesterday() {
            Streak {
                count: self.count.saturating_add(1),
                last_practice: Some(today),
            }
        } else if last_practice != today {
            Streak {
                count: 0,
                last_practice: self.last_practice,
            }
        } else {
            self
        }
    }

    /// Stamp `today` as practiced, after a session completes.
    pub fn record_practice(self, today: Date) -> Streak {
        Streak {
            count: self.count,
            last_practice: Some(today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> Date {
        Date::from_ymd(2025, 3, 1)
    }

    #[test]
    fn test_first_session_is_unchanged() {
        let streak = Streak::default().advance(today());
        assert_eq!(streak, Streak::default());
    }

    #[test]
    fn test_increment_on_consecutive_day() {
        // Crosses the February/March boundary.
        let streak = Streak {
            count: 4,
            last_practice: Some(Date::from_ymd(2025, 2, 28)),
        };
        let streak = streak.advance(today());
        assert_eq!(streak.count, 5);
        assert_eq!(streak.last_practice, Some(today()));
    }

    #[test]
    fn test_increment_saturates() {
        let streak = Streak {
            count: u32::MAX,
            last_practice: Some(Date::from_ymd(2025, 2, 28)),
        };
        let streak = streak.advance(today());
        assert_eq!(streak.count, u32::MAX);
        assert_eq!(streak.last_practice, Some(today()));
    }

    #[test]
    fn test_reset_on_gap() {
        let last = Date::from_ymd(2025, 2, 26);
        let streak = Streak {
            count: 12,
            last_practice: Some(last),
        };
        let streak = streak.advance(today());
        assert_eq!(streak.count, 0);
        assert_eq!(streak.last_practice, Some(last));
    }

    #[test]
    fn test_already_practiced_today() {
        let streak = Streak {
            count: 3,
            last_practice: Some(today()),
        };
        assert_eq!(streak.advance(today()), streak);
    }

    #[test]
    fn test_advance_is_idempotent_per_day() {
        let starts = [
            Streak::default(),
            Streak {
                count: 4,
                last_practice: Some(Date::from_ymd(2025, 2, 28)),
            },
            Streak {
                count: 9,
                last_practice: Some(Date::from_ymd(2025, 1, 1)),
            },
        ];
        for start in starts {
            let once = start.advance(today());
            let twice = once.advance(today());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_record_practice_then_next_day() {
        let streak = Streak::default().record_practice(today());
        assert_eq!(streak.count, 0);
        let tomorrow = Date::from_ymd(2025, 3, 2);
        let streak = streak.advance(tomorrow);
        assert_eq!(streak.count, 1);
        // The session on the next day stamps the same date again.
        let streak = streak.record_practice(tomorrow);
        assert_eq!(streak.advance(tomorrow).count, 1);
    }
}
