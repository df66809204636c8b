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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::types::stage::Stage;
use crate::types::timestamp::Timestamp;
use crate::types::translation::Translation;
use crate::types::verse_id::VerseId;

#[derive(Clone, PartialEq, Debug)]
pub struct VerseContent {
    /// The scripture reference, e.g. "John 3:16".
    pub reference: String,
    pub text: String,
    pub translation: Translation,
}

/// A verse being memorized, with its scheduling state.
///
/// Verses are immutable snapshots: reviewing one produces a new value.
#[derive(Clone, PartialEq, Debug)]
pub struct Verse {
    id: VerseId,
    content: VerseContent,
    added_at: Timestamp,
    /// Set on every review, whatever the outcome.
    last_reviewed_at: Option<Timestamp>,
    /// Set the first time the verse leaves the daily bucket. Never reset.
    mastered: bool,
    stage: Stage,
}

impl Verse {
    pub fn new(content: VerseContent, added_at: Timestamp) -> Self {
        Self {
            id: VerseId::generate(&content, added_at),
            content,
            added_at,
            last_reviewed_at: None,
            mastered: false,
            stage: Stage::Initial,
        }
    }

    pub fn id(&self) -> &VerseId {
        &self.id
    }

    pub fn content(&self) -> &VerseContent {
        &self.content
    }

    pub fn reference(&self) -> &str {
        &self.content.reference
    }

    pub fn last_reviewed_at(&self) -> Option<Timestamp> {
        self.last_reviewed_at
    }

    pub fn mastered(&self) -> bool {
        self.mastered
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The verse after a review at `reviewed_at`, moved to `stage`.
    pub(crate) fn reviewed(&self, reviewed_at: Timestamp, stage: Stage, mastered: bool) -> Verse {
        let last_reviewed_at = match self.last_reviewed_at {
            Some(previous) if previous > reviewed_at => previous,
            _ => reviewed_at,
        };
        Verse {
            id: self.id.clone(),
            content: self.content.clone(),
            added_at: self.added_at,
            last_reviewed_at: Some(last_reviewed_at),
            mastered: self.mastered || mastered,
            stage,
        }
    }

    #[cfg(test)]
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self.mastered = self.mastered || stage != Stage::Initial;
        self
    }

    /// The stored form of a new or rescheduled verse. Notes are not part of
    /// a verse; rescheduling leaves stored notes alone.
    pub fn to_record(&self) -> VerseRecord {
        VerseRecord {
            id: self.id.clone(),
            reference: self.content.reference.clone(),
            text: self.content.text.clone(),
            translation: self.content.translation.as_str().to_string(),
            date_added: self.added_at,
            last_practiced: self.last_reviewed_at,
            mastered: self.mastered,
            bucket: self.stage.bucket().as_str().to_string(),
            bucket_position: self.stage.position(),
            notes: None,
        }
    }
}

/// The raw persisted form of a verse.
///
/// Records are stored and exchanged as-is, so damaged scheduling data survives
/// a load/save cycle untouched. Only records that decode into a [`Verse`] take
/// part in scheduling.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseRecord {
    pub id: VerseId,
    pub reference: String,
    pub text: String,
    pub translation: String,
    pub date_added: Timestamp,
    #[serde(default)]
    pub last_practiced: Option<Timestamp>,
    #[serde(default)]
    pub mastered: bool,
    pub bucket: String,
    #[serde(default)]
    pub bucket_position: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TryFrom<&VerseRecord> for Verse {
    type Error = ErrorReport;

    fn try_from(record: &VerseRecord) -> Result<Self, Self::Error> {
        let translation = Translation::try_from(record.translation.as_str())?;
        let stage = Stage::decode(&record.bucket, record.bucket_position)?;
        Ok(Verse {
            id: record.id.clone(),
            content: VerseContent {
                reference: record.reference.clone(),
                text: record.text.clone(),
                translation,
            },
            added_at: record.date_added,
            last_reviewed_at: record.last_practiced,
            mastered: record.mastered,
            stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use chrono::Weekday;

    use super::*;
    use crate::error::Fallible;
    use crate::types::stage::Slot;

    fn at(hour: u32) -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 10, hour, 0, 0).unwrap())
    }

    fn verse() -> Verse {
        let content = VerseContent {
            reference: "John 3:16".to_string(),
            text: "For God so loved the world...".to_string(),
            translation: Translation::Kjv,
        };
        Verse::new(content, at(8))
    }

    #[test]
    fn test_new_verse_is_initial() {
        let verse = verse();
        assert_eq!(verse.stage(), Stage::Initial);
        assert!(!verse.mastered());
        assert_eq!(verse.last_reviewed_at(), None);
    }

    #[test]
    fn test_reviewed_never_moves_backward() {
        let verse = verse().reviewed(at(12), Stage::Initial, false);
        let verse = verse.reviewed(at(9), Stage::Initial, false);
        assert_eq!(verse.last_reviewed_at(), Some(at(12)));
    }

    #[test]
    fn test_reviewed_keeps_mastery() {
        let verse = verse().reviewed(at(9), Stage::Binary(Slot::Odd), true);
        let verse = verse.reviewed(at(10), Stage::Binary(Slot::Odd), false);
        assert!(verse.mastered());
    }

    #[test]
    fn test_record_conversion_is_lossless() -> Fallible<()> {
        let verse = verse().reviewed(at(9), Stage::Weekly(Weekday::Thu), true);
        let record = verse.to_record();
        assert_eq!(record.bucket, "daysOfWeek");
        assert_eq!(record.bucket_position, Some(4));
        assert_eq!(Verse::try_from(&record)?, verse);
        Ok(())
    }

    #[test]
    fn test_corrupted_record_does_not_decode() {
        let mut record = verse().to_record();
        record.bucket = "daysOfWeek".to_string();
        record.bucket_position = Some(9);
        assert!(Verse::try_from(&record).is_err());
    }

    #[test]
    fn test_record_reads_browser_blob() -> Fallible<()> {
        let json = r#"{
            "id": "3f1c2a9e-0000-4000-8000-000000000001",
            "reference": "Psalm 23:1",
            "text": "The LORD is my shepherd; I shall not want.",
            "translation": "KJV",
            "dateAdded": "2025-01-02T10:00:00.000Z",
            "mastered": false,
            "bucket": "daily"
        }"#;
        let record: VerseRecord = serde_json::from_str(json)?;
        assert_eq!(record.last_practiced, None);
        assert_eq!(record.bucket_position, None);
        let verse = Verse::try_from(&record)?;
        assert_eq!(verse.stage(), Stage::Initial);
        Ok(())
    }
}
