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

use std::env::current_dir;
use std::path::Path;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::verse::Verse;
use crate::types::verse::VerseRecord;

pub const DATABASE_FILE: &str = "verses.db";

/// A collection directory, loaded: its database, settings and verses.
pub struct Collection {
    pub directory: PathBuf,
    pub db: Database,
    pub config: Config,
    /// Verses that take part in scheduling.
    pub verses: Vec<Verse>,
    /// Stored rows whose scheduling data could not be decoded. They are never
    /// due and are left in the database untouched.
    pub corrupted: Vec<VerseRecord>,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory = resolve_directory(directory)?;
        let config = Config::load(&directory)?;
        let db_path = database_path(&directory);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let db: Database = Database::new(db_path)?;
        let (verses, corrupted) = decode_records(db.verse_records()?);
        log::debug!(
            "Loaded {} verses ({} corrupted) from {}.",
            verses.len(),
            corrupted.len(),
            directory.display()
        );
        Ok(Self {
            directory,
            db,
            config,
            verses,
            corrupted,
        })
    }

    /// Reload verses after the database was written to.
    pub fn reload(&mut self) -> Fallible<()> {
        let (verses, corrupted) = decode_records(self.db.verse_records()?);
        self.verses = verses;
        self.corrupted = corrupted;
        Ok(())
    }
}

pub fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    if directory.exists() {
        Ok(directory.canonicalize()?)
    } else {
        fail("directory does not exist.")
    }
}

pub fn database_path(directory: &Path) -> PathBuf {
    directory.join(DATABASE_FILE)
}

/// Split stored rows into verses and rows that fail to decode.
pub fn decode_records(records: Vec<VerseRecord>) -> (Vec<Verse>, Vec<VerseRecord>) {
    let mut verses = Vec::new();
    let mut corrupted = Vec::new();
    for record in records {
        match Verse::try_from(&record) {
            Ok(verse) => verses.push(verse),
            Err(e) => {
                log::warn!(
                    "Verse {} ({}) is excluded from scheduling: {e}",
                    record.id,
                    record.reference
                );
                corrupted.push(record);
            }
        }
    }
    (verses, corrupted)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use tempfile::tempdir;

    use super::*;
    use crate::schedule::due_verses;
    use crate::types::date::Date;
    use crate::types::timestamp::Timestamp;
    use crate::types::translation::Translation;
    use crate::types::verse::VerseContent;

    fn verse(reference: &str) -> Verse {
        let content = VerseContent {
            reference: reference.to_string(),
            text: format!("text of {reference}"),
            translation: Translation::Kjv,
        };
        let added_at = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
        Verse::new(content, added_at)
    }

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
    }

    #[test]
    fn test_empty_directory() -> Fallible<()> {
        let dir = tempdir()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        assert!(coll.verses.is_empty());
        assert!(coll.corrupted.is_empty());
        assert!(database_path(dir.path()).exists());
        Ok(())
    }

    #[test]
    fn test_corrupted_verse_is_never_due() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = Some(dir.path().display().to_string());
        {
            let mut coll = Collection::new(directory.clone())?;
            let mut record = verse("Romans 8:28").to_record();
            record.bucket = "daysOfWeek".to_string();
            record.bucket_position = Some(9);
            coll.db.insert_verse(&record)?;
            coll.db.insert_verse(&verse("Genesis 1:1").to_record())?;
            let mut unknown = verse("John 3:16").to_record();
            unknown.bucket = "yearly".to_string();
            coll.db.insert_verse(&unknown)?;
        }
        let coll = Collection::new(directory)?;
        assert_eq!(coll.verses.len(), 1);
        assert_eq!(coll.corrupted.len(), 2);
        assert_eq!(coll.corrupted[0].bucket_position, Some(9));
        let start = Date::from_ymd(2025, 1, 1).into_inner();
        for today in start.iter_days().take(366).map(Date::new) {
            let due = due_verses(&coll.verses, today);
            assert_eq!(due.len(), 1);
            assert_eq!(due[0].reference(), "Genesis 1:1");
        }
        Ok(())
    }
}
