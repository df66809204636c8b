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

use std::fs::read_to_string;
use std::path::Path;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::snapshot::Snapshot;

/// Load a JSON snapshot into the collection. Verses already present are
/// skipped; the profile is replaced.
pub fn import_snapshot(directory: Option<String>, file: &Path) -> Fallible<()> {
    let json = read_to_string(file)?;
    let snapshot = Snapshot::from_json(&json)?;
    let mut coll = Collection::new(directory)?;
    let added = coll.db.import(&snapshot.user, &snapshot.verses)?;
    coll.reload()?;
    println!("Imported {added} of {} verses.", snapshot.verses.len());
    if !coll.corrupted.is_empty() {
        println!(
            "warning: {} verses have invalid scheduling data and will not be scheduled.",
            coll.corrupted.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;
    use crate::cmd::add::add_verse;
    use crate::types::translation::Translation;
    use crate::types::verse_id::VerseId;

    #[test]
    fn test_export_then_import() -> Fallible<()> {
        let source = tempdir()?;
        let source_dir = Some(source.path().display().to_string());
        add_verse(
            source_dir.clone(),
            "Psalm 23:1".to_string(),
            None,
            Translation::Kjv,
        )?;
        let mut coll = Collection::new(source_dir)?;
        let mut record = coll.db.verse_records()?[0].clone();
        record.id = VerseId::parse("damaged")?;
        record.bucket = "daysOfWeek".to_string();
        record.bucket_position = Some(9);
        coll.db.insert_verse(&record)?;
        let snapshot = Snapshot::of_collection(&coll)?;
        let file = source.path().join("export.json");
        write(&file, snapshot.to_json()?)?;

        let target = tempdir()?;
        let target_dir = Some(target.path().display().to_string());
        import_snapshot(target_dir.clone(), &file)?;
        let imported = Collection::new(target_dir.clone())?;
        assert_eq!(Snapshot::of_collection(&imported)?, snapshot);
        assert_eq!(imported.verses.len(), 1);
        assert_eq!(imported.corrupted.len(), 1);

        // Importing again adds nothing.
        import_snapshot(target_dir.clone(), &file)?;
        let imported = Collection::new(target_dir)?;
        assert_eq!(imported.db.verse_records()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_browser_fields_survive_import() -> Fallible<()> {
        let json = r#"{
            "user": {
                "id": "user-1",
                "name": "Guest User",
                "streak": 0
            },
            "verses": [
                {
                    "id": "v1",
                    "reference": "Psalm 23:1",
                    "text": "The LORD is my shepherd; I shall not want.",
                    "translation": "KJV",
                    "dateAdded": "2025-01-02T10:00:00.000Z",
                    "mastered": false,
                    "bucket": "daily",
                    "notes": "Morning verse."
                }
            ]
        }"#;
        let dir = tempdir()?;
        let file = dir.path().join("blob.json");
        write(&file, json)?;
        let directory = Some(dir.path().display().to_string());
        import_snapshot(directory.clone(), &file)?;
        let coll = Collection::new(directory)?;
        let exported = Snapshot::of_collection(&coll)?;
        assert_eq!(exported, Snapshot::from_json(json)?);
        assert_eq!(exported.user.id.as_deref(), Some("user-1"));
        assert_eq!(exported.verses[0].notes.as_deref(), Some("Morning verse."));
        Ok(())
    }
}
