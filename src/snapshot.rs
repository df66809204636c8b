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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::profile::Profile;
use crate::types::verse::VerseRecord;

/// The whole collection as one JSON document: `{ "user": ..., "verses": [...] }`.
///
/// Verses are written in their raw stored form, damaged ones included, so an
/// export loses nothing.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub user: Profile,
    pub verses: Vec<VerseRecord>,
}

impl Snapshot {
    pub fn of_collection(coll: &Collection) -> Fallible<Self> {
        Ok(Self {
            user: coll.db.profile()?,
            verses: coll.db.verse_records()?,
        })
    }

    pub fn to_json(&self) -> Fallible<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Fallible<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::date::Date;
    use crate::types::stage::Stage;
    use crate::types::verse::Verse;

    /// A blob as saved by the browser version of the app.
    const BROWSER_BLOB: &str = r#"{
        "user": {
            "id": "5b0e7a52-31c4-4a1e-9a9f-1c3f0d2b7e11",
            "name": "Guest User",
            "streak": 2,
            "lastPracticeDate": "1/14/2025"
        },
        "verses": [
            {
                "id": "a1",
                "reference": "Philippians 4:13",
                "text": "I can do all things through Christ which strengtheneth me.",
                "translation": "KJV",
                "dateAdded": "2025-01-02T10:00:00.000Z",
                "lastPracticed": "2025-01-14T07:45:10.123Z",
                "mastered": true,
                "bucket": "daysOfWeek",
                "bucketPosition": 3,
                "notes": "Memorized for the retreat."
            },
            {
                "id": "a2",
                "reference": "Romans 8:28",
                "text": "And we know that all things work together for good.",
                "translation": "NIV",
                "dateAdded": "2025-01-05T10:00:00.000Z",
                "mastered": false,
                "bucket": "daily"
            }
        ]
    }"#;

    #[test]
    fn test_reads_browser_blob() -> Fallible<()> {
        let snapshot = Snapshot::from_json(BROWSER_BLOB)?;
        assert_eq!(snapshot.user.streak, 2);
        assert_eq!(
            snapshot.user.last_practice_date,
            Some(Date::from_ymd(2025, 1, 14))
        );
        assert_eq!(
            snapshot.user.id.as_deref(),
            Some("5b0e7a52-31c4-4a1e-9a9f-1c3f0d2b7e11")
        );
        assert_eq!(snapshot.verses.len(), 2);
        assert_eq!(
            snapshot.verses[0].notes.as_deref(),
            Some("Memorized for the retreat.")
        );
        assert_eq!(snapshot.verses[1].notes, None);
        let verse = Verse::try_from(&snapshot.verses[0])?;
        assert_eq!(verse.stage().bucket().as_str(), "daysOfWeek");
        assert_eq!(Verse::try_from(&snapshot.verses[1])?.stage(), Stage::Initial);
        Ok(())
    }

    #[test]
    fn test_json_is_lossless() -> Fallible<()> {
        let snapshot = Snapshot::from_json(BROWSER_BLOB)?;
        let json = snapshot.to_json()?;
        assert!(json.contains("\"notes\": \"Memorized for the retreat.\""));
        assert!(json.contains("\"id\": \"5b0e7a52-31c4-4a1e-9a9f-1c3f0d2b7e11\""));
        let again = Snapshot::from_json(&json)?;
        assert_eq!(again, snapshot);
        Ok(())
    }
}
