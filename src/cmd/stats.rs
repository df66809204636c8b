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

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::schedule::due_verses;
use crate::types::date::Date;
use crate::types::outcome::Outcome;
use crate::types::stage::Bucket;

#[derive(ValueEnum, Clone, Copy)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(directory: Option<String>, today: Date, format: StatsFormat) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stats = collect_stats(&coll, today)?;
    match format {
        StatsFormat::Text => {
            println!("Verses:          {}", stats.verse_count);
            println!("  Daily:         {}", stats.daily_count);
            println!("  Odd/Even Days: {}", stats.odd_even_count);
            println!("  Days of Week:  {}", stats.days_of_week_count);
            println!("  Dates of Month:{}", stats.dates_of_month_count);
            println!("Mastered:        {}", stats.mastered_count);
            println!("Due today:       {}", stats.due_today_count);
            println!("Streak:          {}", stats.streak);
            println!("Sessions:        {}", stats.session_count);
            println!("Reviews:         {}", stats.review_count);
            if let Some(last) = &stats.last_session {
                println!(
                    "Last session:    {} mastered, {} still learning",
                    last.mastered, last.still_learning
                );
            }
            if stats.corrupted_count > 0 {
                println!("Corrupted:       {}", stats.corrupted_count);
            }
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{}", stats_json);
        }
    }
    Ok(())
}

fn collect_stats(coll: &Collection, today: Date) -> Fallible<Stats> {
    let in_bucket = |bucket: Bucket| {
        coll.verses
            .iter()
            .filter(|verse| verse.stage().bucket() == bucket)
            .count()
    };
    let profile = coll.db.profile()?;
    let last_reviews = coll.db.last_session_reviews()?;
    let last_session = if last_reviews.is_empty() {
        None
    } else {
        let mastered = last_reviews
            .iter()
            .filter(|review| review.outcome == Outcome::Mastered)
            .count();
        Some(SessionSummary {
            mastered,
            still_learning: last_reviews.len() - mastered,
        })
    };
    Ok(Stats {
        verse_count: coll.verses.len(),
        daily_count: in_bucket(Bucket::Daily),
        odd_even_count: in_bucket(Bucket::OddEven),
        days_of_week_count: in_bucket(Bucket::DaysOfWeek),
        dates_of_month_count: in_bucket(Bucket::DatesOfMonth),
        mastered_count: coll.verses.iter().filter(|verse| verse.mastered()).count(),
        due_today_count: due_verses(&coll.verses, today).len(),
        corrupted_count: coll.corrupted.len(),
        streak: profile.streak,
        last_practice_date: profile.last_practice_date,
        session_count: coll.db.session_count()?,
        review_count: coll.db.review_count()?,
        last_session,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    verse_count: usize,
    daily_count: usize,
    odd_even_count: usize,
    days_of_week_count: usize,
    dates_of_month_count: usize,
    mastered_count: usize,
    due_today_count: usize,
    corrupted_count: usize,
    streak: u32,
    last_practice_date: Option<Date>,
    session_count: usize,
    review_count: usize,
    last_session: Option<SessionSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionSummary {
    mastered: usize,
    still_learning: usize,
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::types::timestamp::Timestamp;
    use crate::types::translation::Translation;
    use crate::types::verse::Verse;
    use crate::types::verse::VerseContent;

    #[test]
    fn test_collect_stats() -> Fallible<()> {
        let dir = tempdir()?;
        let mut coll = Collection::new(Some(dir.path().display().to_string()))?;
        let content = VerseContent {
            reference: "John 11:35".to_string(),
            text: "Jesus wept.".to_string(),
            translation: Translation::Kjv,
        };
        coll.db.insert_verse(&Verse::new(content, Timestamp::now()).to_record())?;
        coll.reload()?;
        let stats = collect_stats(&coll, Date::from_ymd(2025, 1, 15))?;
        assert_eq!(stats.verse_count, 1);
        assert_eq!(stats.daily_count, 1);
        assert_eq!(stats.due_today_count, 1);
        assert_eq!(stats.mastered_count, 0);
        assert_eq!(stats.review_count, 0);
        assert!(stats.last_session.is_none());
        let json = serde_json::to_value(&stats)?;
        assert_eq!(json["dueTodayCount"], 1);
        assert_eq!(json["lastPracticeDate"], serde_json::Value::Null);
        Ok(())
    }
}
