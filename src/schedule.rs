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

//! Which verses are due on a given day.
//!
//! Every verse is matched independently against the calendar position of the
//! reference date. Nothing is carried between calls.

use chrono::Weekday;

use crate::types::date::Date;
use crate::types::stage::Bucket;
use crate::types::stage::DayOfMonth;
use crate::types::stage::Slot;
use crate::types::stage::Stage;
use crate::types::verse::Verse;

/// A position on each bucket's cycle.
///
/// For a real date this is "today"; the browse view lets the user pick any
/// weekday or day of month instead.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BucketFilter {
    pub slot: Slot,
    pub weekday: Weekday,
    pub day: DayOfMonth,
}

impl BucketFilter {
    pub fn for_date(date: Date) -> Self {
        Self {
            slot: Slot::of(date),
            weekday: date.weekday(),
            day: DayOfMonth::of(date),
        }
    }
}

/// Whether a verse in `stage` is scheduled at the filter's positions.
pub fn matches(stage: Stage, filter: &BucketFilter) -> bool {
    match stage {
        Stage::Initial => true,
        Stage::Binary(slot) => slot == filter.slot,
        Stage::Weekly(weekday) => weekday == filter.weekday,
        // Day 31 never matches in a 30-day month. That is accepted.
        Stage::Monthly(day) => day == filter.day,
    }
}

pub fn is_due(stage: Stage, today: Date) -> bool {
    matches(stage, &BucketFilter::for_date(today))
}

/// The verses due on `today`, in collection order.
pub fn due_verses(verses: &[Verse], today: Date) -> Vec<&Verse> {
    verses
        .iter()
        .filter(|verse| is_due(verse.stage(), today))
        .collect()
}

pub struct BucketView<'a> {
    pub bucket: Bucket,
    /// Verses in this bucket scheduled at the filter's position.
    pub scheduled: Vec<&'a Verse>,
    /// All verses in this bucket.
    pub total: usize,
}

/// Every verse grouped by bucket, regardless of whether it is due.
pub struct Buckets<'a> {
    pub filter: BucketFilter,
    pub views: Vec<BucketView<'a>>,
}

impl<'a> Buckets<'a> {
    pub fn browse(verses: &'a [Verse], filter: BucketFilter) -> Self {
        let views = Bucket::ALL
            .into_iter()
            .map(|bucket| {
                let members: Vec<&Verse> = verses
                    .iter()
                    .filter(|verse| verse.stage().bucket() == bucket)
                    .collect();
                let total = members.len();
                let scheduled = members
                    .into_iter()
                    .filter(|verse| matches(verse.stage(), &filter))
                    .collect();
                BucketView {
                    bucket,
                    scheduled,
                    total,
                }
            })
            .collect();
        Self { filter, views }
    }

    pub fn view(&self, bucket: Bucket) -> &BucketView<'a> {
        // `views` holds one entry per bucket, in `Bucket::ALL` order.
        let view = &self.views[bucket as usize];
        debug_assert_eq!(view.bucket, bucket);
        view
    }
}
