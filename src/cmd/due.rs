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
use crate::schedule::due_verses;
use crate::types::date::Date;
use crate::types::stage::Bucket;
use crate::types::verse::Verse;

pub fn list_due(directory: Option<String>, today: Date) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    print!("{}", render_due(&coll.verses, coll.corrupted.len(), today));
    Ok(())
}

fn render_due(verses: &[Verse], corrupted: usize, today: Date) -> String {
    let due = due_verses(verses, today);
    let mut content = String::new();
    content.push_str(&format!("Due on {today}: {} verses.\n", due.len()));
    for bucket in Bucket::ALL {
        let group: Vec<&&Verse> = due
            .iter()
            .filter(|verse| verse.stage().bucket() == bucket)
            .collect();
        if group.is_empty() {
            continue;
        }
        content.push_str(&format!("\n{bucket}:\n"));
        for verse in group {
            content.push_str(&format!(
                "  {} ({})",
                verse.reference(),
                verse.content().translation
            ));
            if let Some(reviewed_at) = verse.last_reviewed_at() {
                content.push_str(&format!(", last practiced {}", reviewed_at.local_date()));
            }
            content.push('\n');
        }
    }
    if corrupted > 0 {
        content.push_str(&format!(
            "\nwarning: {corrupted} stored verses have invalid scheduling data and were skipped.\n"
        ));
    }
    content
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use chrono::Weekday;

    use super::*;
    use crate::types::stage::Slot;
    use crate::types::stage::Stage;
    use crate::types::timestamp::Timestamp;
    use crate::types::translation::Translation;
    use crate::types::verse::VerseContent;

    fn verse(reference: &str, stage: Stage) -> Verse {
        let content = VerseContent {
            reference: reference.to_string(),
            text: format!("text of {reference}"),
            translation: Translation::Nlt,
        };
        let added_at = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
        Verse::new(content, added_at).with_stage(stage)
    }

    #[test]
    fn test_render_due() {
        let verses = vec![
            verse("Genesis 1:1", Stage::Initial),
            verse("John 3:16", Stage::Binary(Slot::Even)),
            verse("Romans 8:28", Stage::Weekly(Weekday::Wed)),
        ];
        let today = Date::from_ymd(2025, 1, 15);
        let content = render_due(&verses, 1, today);
        assert_eq!(
            content,
            "Due on 2025-01-15: 2 verses.\n\
             \nDaily:\n  Genesis 1:1 (NLT)\n\
             \nDays of Week:\n  Romans 8:28 (NLT)\n\
             \nwarning: 1 stored verses have invalid scheduling data and were skipped.\n"
        );
    }

    #[test]
    fn test_render_due_shows_last_practice() {
        let reviewed_at = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 14, 12, 0, 0).unwrap());
        let verse = verse("Psalm 23:1", Stage::Initial).reviewed(reviewed_at, Stage::Initial, false);
        let content = render_due(&[verse], 0, Date::from_ymd(2025, 1, 15));
        let expected = format!(
            "  Psalm 23:1 (NLT), last practiced {}\n",
            reviewed_at.local_date()
        );
        assert!(content.contains(&expected));
    }
}
