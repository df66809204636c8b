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

//! Promotion of verses through the buckets.
//!
//! A mastered verse moves one stage forward: daily, then odd/even days, then
//! a day of the week, then a day of the month, where it stays. A verse that
//! is still being learned keeps its stage and comes back on its next due
//! date. There is no demotion.

use std::collections::HashMap;

use crate::types::date::Date;
use crate::types::outcome::Outcome;
use crate::types::stage::DayOfMonth;
use crate::types::stage::Slot;
use crate::types::stage::Stage;
use crate::types::timestamp::Timestamp;
use crate::types::verse::Verse;
use crate::types::verse_id::VerseId;

/// The outcome of presenting one verse in a practice session.
#[derive(Clone, PartialEq, Debug)]
pub struct SessionResult {
    pub verse_id: VerseId,
    pub outcome: Outcome,
}

/// The stage a verse mastered on `today` moves to.
///
/// Each new position is chosen so the verse is not due again on `today`.
pub fn next_stage(stage: Stage, today: Date) -> Stage {
    match stage {
        Stage::Initial => Stage::Binary(Slot::of(today).opposite()),
        // `succ` is `(weekday + 1) mod 7` on the Sunday-first index.
        Stage::Binary(_) => Stage::Weekly(today.weekday().succ()),
        Stage::Weekly(_) => Stage::Monthly(DayOfMonth::of(today).next()),
        Stage::Monthly(day) => Stage::Monthly(day),
    }
}

/// Apply one practice outcome. `today` is the local calendar date of
/// `reviewed_at`.
pub fn apply_result(verse: &Verse, outcome: Outcome, reviewed_at: Timestamp, today: Date) -> Verse {
    match outcome {
        Outcome::StillLearning => verse.reviewed(reviewed_at, verse.stage(), false),
        Outcome::Mastered => {
            let stage = next_stage(verse.stage(), today);
            let mastered = verse.stage() == Stage::Initial;
            verse.reviewed(reviewed_at, stage, mastered)
        }
    }
}

/// Apply a session's results to a collection.
///
/// Verses without a result come back unchanged. Results for unknown verses
/// are ignored. If a verse has several results, the first one counts.
pub fn apply_results(
    verses: &[Verse],
    results: &[SessionResult],
    reviewed_at: Timestamp,
    today: Date,
) -> Vec<Verse> {
    let mut outcomes: HashMap<&VerseId, Outcome> = HashMap::new();
    for result in results {
        outcomes.entry(&result.verse_id).or_insert(result.outcome);
    }
    for result in results {
        if !verses.iter().any(|verse| verse.id() == &result.verse_id) {
            log::debug!("Ignoring result for unknown verse {}", result.verse_id.short());
        }
    }
    verses
        .iter()
        .map(|verse| match outcomes.get(verse.id()) {
            Some(outcome) => {
                let updated = apply_result(verse, *outcome, reviewed_at, today);
                log::debug!(
                    "{} {} {:?} -> {:?}",
                    verse.id().short(),
                    outcome.as_str(),
                    verse.stage(),
                    updated.stage()
                );
                updated
            }
            None => verse.clone(),
        })
        .collect()
}
