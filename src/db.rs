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

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::outcome::Outcome;
use crate::types::profile::Profile;
use crate::types::timestamp::Timestamp;
use crate::types::verse::Verse;
use crate::types::verse::VerseRecord;
use crate::types::verse_id::VerseId;

pub struct Database {
    conn: Connection,
}

/// One outcome from a practice session, as logged in the database.
#[derive(Clone, Debug)]
pub struct ReviewRecord {
    pub verse_id: VerseId,
    pub reviewed_at: Timestamp,
    pub outcome: Outcome,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    pub fn profile(&self) -> Fallible<Profile> {
        let sql = "select user_id, name, streak, last_practice_date from profile where profile_id = 1;";
        let profile = self.conn.query_row(sql, [], |row| {
            Ok(Profile {
                id: row.get(0)?,
                name: row.get(1)?,
                streak: row.get(2)?,
                last_practice_date: row.get(3)?,
            })
        })?;
        Ok(profile)
    }

    pub fn update_profile(&mut self, profile: &Profile) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        update_profile(&tx, profile)?;
        tx.commit()?;
        Ok(())
    }

    /// Insert a new verse.
    ///
    /// If a verse with the same identifier exists, returns an error.
    pub fn insert_verse(&mut self, record: &VerseRecord) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        if verse_exists(&tx, &record.id)? {
            return fail(format!("verse {} already exists.", record.id));
        }
        insert_verse(&tx, record)?;
        tx.commit()?;
        Ok(())
    }

    /// All verses, in the order they were added. Rows are returned raw;
    /// decoding them is up to the caller.
    pub fn verse_records(&self) -> Fallible<Vec<VerseRecord>> {
        let sql = "select verse_id, reference, verse_text, translation, added_at, last_reviewed_at, mastered, bucket, bucket_position, notes from verses order by rowid;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(read_verse(row)?);
        }
        Ok(records)
    }

    /// Save a practice session in a single transaction: the session log, the
    /// verses changed by it, and the profile.
    pub fn save_session(
        &mut self,
        started_at: Timestamp,
        ended_at: Timestamp,
        reviews: &[ReviewRecord],
        verses: &[Verse],
        profile: &Profile,
    ) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        let session_id = insert_session(&tx, started_at, ended_at)?;
        for review in reviews {
            insert_review(&tx, session_id, review)?;
        }
        for verse in verses {
            update_schedule(&tx, &verse.to_record())?;
        }
        update_profile(&tx, profile)?;
        tx.commit()?;
        log::debug!(
            "Saved session {session_id}: {} reviews, {} verses updated.",
            reviews.len(),
            verses.len()
        );
        Ok(())
    }

    /// Add imported verses and replace the profile. Verses whose identifier
    /// already exists are skipped. Returns the number of verses added.
    pub fn import(&mut self, profile: &Profile, records: &[VerseRecord]) -> Fallible<usize> {
        let tx = self.conn.transaction()?;
        let mut added = 0;
        for record in records {
            if verse_exists(&tx, &record.id)? {
                log::warn!("Skipping verse {} ({}): already present.", record.id, record.reference);
                continue;
            }
            insert_verse(&tx, record)?;
            added += 1;
        }
        update_profile(&tx, profile)?;
        tx.commit()?;
        Ok(added)
    }

    pub fn review_count(&self) -> Fallible<usize> {
        let sql = "select count(*) from reviews;";
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn session_count(&self) -> Fallible<usize> {
        let sql = "select count(*) from sessions;";
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// The most recent session's reviews, in the order they were made.
    pub fn last_session_reviews(&self) -> Fallible<Vec<ReviewRecord>> {
        let sql = "select max(session_id) from sessions;";
        let session_id: Option<i64> = self.conn.query_row(sql, [], |row| row.get(0))?;
        let Some(session_id) = session_id else {
            return Ok(Vec::new());
        };
        let sql = "select verse_id, reviewed_at, outcome from reviews where session_id = ? order by review_id;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([session_id])?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(ReviewRecord {
                verse_id: row.get(0)?,
                reviewed_at: row.get(1)?,
                outcome: row.get(2)?,
            });
        }
        Ok(reviews)
    }
}

fn read_verse(row: &Row) -> rusqlite::Result<VerseRecord> {
    Ok(VerseRecord {
        id: row.get(0)?,
        reference: row.get(1)?,
        text: row.get(2)?,
        translation: row.get(3)?,
        date_added: row.get(4)?,
        last_practiced: row.get(5)?,
        mastered: row.get(6)?,
        bucket: row.get(7)?,
        bucket_position: row.get(8)?,
        notes: row.get(9)?,
    })
}

fn verse_exists(tx: &Transaction, verse_id: &VerseId) -> Fallible<bool> {
    let sql = "select count(*) from verses where verse_id = ?;";
    let count: i64 = tx.query_row(sql, [verse_id], |row| row.get(0))?;
    Ok(count > 0)
}

fn insert_verse(tx: &Transaction, record: &VerseRecord) -> Fallible<()> {
    let sql = "insert into verses (verse_id, reference, verse_text, translation, added_at, last_reviewed_at, mastered, bucket, bucket_position, notes) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?);";
    tx.execute(
        sql,
        (
            &record.id,
            &record.reference,
            &record.text,
            &record.translation,
            record.date_added,
            record.last_practiced,
            record.mastered,
            &record.bucket,
            record.bucket_position,
            &record.notes,
        ),
    )?;
    Ok(())
}

fn update_schedule(tx: &Transaction, record: &VerseRecord) -> Fallible<()> {
    let sql = "update verses set last_reviewed_at = ?, mastered = ?, bucket = ?, bucket_position = ? where verse_id = ?;";
    let changed = tx.execute(
        sql,
        (
            record.last_practiced,
            record.mastered,
            &record.bucket,
            record.bucket_position,
            &record.id,
        ),
    )?;
    if changed == 0 {
        return fail(format!("verse {} not found.", record.id));
    }
    Ok(())
}

fn update_profile(tx: &Transaction, profile: &Profile) -> Fallible<()> {
    let sql = "update profile set user_id = ?, name = ?, streak = ?, last_practice_date = ? where profile_id = 1;";
    tx.execute(
        sql,
        (
            &profile.id,
            &profile.name,
            profile.streak,
            profile.last_practice_date,
        ),
    )?;
    Ok(())
}

type SessionId = i64;

fn insert_session(
    tx: &Transaction,
    started_at: Timestamp,
    ended_at: Timestamp,
) -> Fallible<SessionId> {
    let sql = "insert into sessions (started_at, ended_at) values (?, ?) returning session_id;";
    let session_id: SessionId = tx.query_row(sql, (started_at, ended_at), |row| row.get(0))?;
    Ok(session_id)
}

fn insert_review(tx: &Transaction, session_id: SessionId, review: &ReviewRecord) -> Fallible<()> {
    let sql = "insert into reviews (session_id, verse_id, reviewed_at, outcome) values (?, ?, ?, ?);";
    tx.execute(
        sql,
        (session_id, &review.verse_id, review.reviewed_at, review.outcome),
    )?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["verses"], |row| row.get(0))?;
    Ok(count > 0)
}
