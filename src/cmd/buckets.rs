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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::schedule::BucketFilter;
use crate::schedule::Buckets;
use crate::types::date::Date;
use crate::types::stage::Bucket;
use crate::types::stage::DayOfMonth;
use crate::types::stage::weekday_from_index;
use crate::types::stage::weekday_name;

/// Browse every bucket. The weekly and monthly buckets show the chosen
/// weekday (0 is Sunday) and day of month, defaulting to today's.
pub fn browse_buckets(
    directory: Option<String>,
    today: Date,
    weekday: Option<u8>,
    day: Option<u8>,
) -> Fallible<()> {
    let filter = browse_filter(today, weekday, day)?;
    let coll = Collection::new(directory)?;
    let buckets = Buckets::browse(&coll.verses, filter);
    print!("{}", render_buckets(&buckets, today));
    Ok(())
}

fn browse_filter(today: Date, weekday: Option<u8>, day: Option<u8>) -> Fallible<BucketFilter> {
    let mut filter = BucketFilter::for_date(today);
    if let Some(index) = weekday {
        filter.weekday = match weekday_from_index(index as i64) {
            Some(weekday) => weekday,
            None => return fail(format!("invalid weekday: {index}")),
        };
    }
    if let Some(day) = day {
        filter.day = match DayOfMonth::new(day as u32) {
            Some(day) => day,
            None => return fail(format!("invalid day of month: {day}")),
        };
    }
    Ok(filter)
}

fn render_buckets(buckets: &Buckets, today: Date) -> String {
    let filter = buckets.filter;
    let current = BucketFilter::for_date(today);
    let mut content = String::new();
    for bucket in Bucket::ALL {
        let view = buckets.view(bucket);
        let (description, is_current) = match bucket {
            Bucket::Daily => ("New verses being learned".to_string(), true),
            Bucket::OddEven => (format!("Verses for {} days", filter.slot.label()), true),
            Bucket::DaysOfWeek => (
                format!("Verses for {}", weekday_name(filter.weekday)),
                filter.weekday == current.weekday,
            ),
            Bucket::DatesOfMonth => (
                format!("Verses for day {}", filter.day.get()),
                filter.day == current.day,
            ),
        };
        content.push_str(&format!("{bucket}"));
        if bucket != Bucket::Daily {
            content.push_str(&format!(
                " ({} shown / {} total)",
                view.scheduled.len(),
                view.total
            ));
        }
        content.push('\n');
        content.push_str(&format!("  {description}"));
        if !is_current {
            content.push_str(" (viewing a different day)");
        }
        content.push('\n');
        if view.scheduled.is_empty() {
            content.push_str("    No verses in this bucket\n");
        }
        for verse in &view.scheduled {
            content.push_str(&format!(
                "    {} ({}): {}\n",
                verse.reference(),
                verse.content().translation,
                verse.content().text
            ));
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use chrono::Weekday;

    use super::*;
    use crate::types::stage::Stage;
    use crate::types::timestamp::Timestamp;
    use crate::types::translation::Translation;
    use crate::types::verse::Verse;
    use crate::types::verse::VerseContent;

    fn verse(reference: &str, stage: Stage) -> Verse {
        let content = VerseContent {
            reference: reference.to_string(),
            text: "...".to_string(),
            translation: Translation::Kjv,
        };
        let added_at = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
        Verse::new(content, added_at).with_stage(stage)
    }

    #[test]
    fn test_browse_filter() -> Fallible<()> {
        let today = Date::from_ymd(2025, 1, 15);
        let filter = browse_filter(today, Some(2), None)?;
        assert_eq!(filter.weekday, Weekday::Tue);
        assert_eq!(filter.day.get(), 15);
        assert!(browse_filter(today, Some(7), None).is_err());
        assert!(browse_filter(today, None, Some(0)).is_err());
        Ok(())
    }

    #[test]
    fn test_render_other_weekday() -> Fallible<()> {
        let verses = vec![
            verse("Genesis 1:1", Stage::Initial),
            verse("Romans 8:28", Stage::Weekly(Weekday::Tue)),
            verse("Isaiah 40:31", Stage::Weekly(Weekday::Wed)),
        ];
        let today = Date::from_ymd(2025, 1, 15);
        let buckets = Buckets::browse(&verses, browse_filter(today, Some(2), None)?);
        let content = render_buckets(&buckets, today);
        assert!(content.contains("Days of Week (1 shown / 2 total)\n"));
        assert!(content.contains("  Verses for Tuesday (viewing a different day)\n"));
        assert!(content.contains("    Romans 8:28 (KJV): ...\n"));
        assert!(!content.contains("Isaiah 40:31"));
        assert!(content.contains("  Verses for odd days\n"));
        assert!(content.contains("Dates of Month (0 shown / 0 total)\n"));
        Ok(())
    }
}
