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

use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::db::Database;
use crate::db::ReviewRecord;
use crate::promote::SessionResult;
use crate::types::date::Date;
use crate::types::outcome::Outcome;
use crate::types::timestamp::Timestamp;
use crate::types::verse::Verse;

#[derive(Clone)]
pub struct ServerState {
    /// The calendar day the session belongs to.
    pub today: Date,
    pub total_verses: usize,
    pub session_started_at: Timestamp,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

pub struct MutableState {
    pub reveal: bool,
    pub db: Database,
    /// Every verse in the collection, as loaded when the session started.
    pub collection: Vec<Verse>,
    /// Due verses not yet answered, current one first.
    pub queue: Vec<Verse>,
    pub reviews: Vec<Review>,
    /// Message about the last verse mastered, shown once.
    pub feedback: Option<String>,
    pub finished_at: Option<Timestamp>,
}

#[derive(Clone)]
pub struct Review {
    pub verse: Verse,
    pub reviewed_at: Timestamp,
    pub outcome: Outcome,
}

impl Review {
    pub fn to_result(&self) -> SessionResult {
        SessionResult {
            verse_id: self.verse.id().clone(),
            outcome: self.outcome,
        }
    }

    pub fn to_record(&self) -> ReviewRecord {
        ReviewRecord {
            verse_id: self.verse.id().clone(),
            reviewed_at: self.reviewed_at,
            outcome: self.outcome,
        }
    }
}
