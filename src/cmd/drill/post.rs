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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::Review;
use crate::cmd::drill::state::ServerState;
use crate::db::ReviewRecord;
use crate::error::Fallible;
use crate::promote::SessionResult;
use crate::promote::apply_results;
use crate::promote::next_stage;
use crate::types::date::Date;
use crate::types::outcome::Outcome;
use crate::types::stage::Stage;
use crate::types::timestamp::Timestamp;
use crate::types::verse::Verse;

#[derive(Clone, Copy, Debug, Deserialize)]
enum Action {
    #[serde(rename = "Show Verse")]
    Reveal,
    #[serde(rename = "Still Learning")]
    StillLearning,
    Mastered,
    Undo,
    End,
    Shutdown,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form.action) {
        Ok(_) => {}
        Err(e) => {
            log::error!("error: {e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: &ServerState, action: Action) -> Fallible<()> {
    if let Action::Shutdown = action {
        log::debug!("Shutting down.");
        if let Some(tx) = state.shutdown_tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
        return Ok(());
    }
    let mut mutable = state.mutable.lock().unwrap();
    if mutable.finished_at.is_some() {
        log::error!("Session already finished; ignoring {action:?}.");
        return Ok(());
    }
    match action {
        Action::Reveal => {
            mutable.reveal = true;
        }
        Action::StillLearning | Action::Mastered => {
            if !mutable.reveal || mutable.queue.is_empty() {
                log::error!("Answering a verse that is not revealed.");
                return Ok(());
            }
            let outcome = match action {
                Action::Mastered => Outcome::Mastered,
                _ => Outcome::StillLearning,
            };
            let verse = mutable.queue.remove(0);
            log::debug!("{} {}", verse.id().short(), outcome.as_str());
            mutable.feedback = match outcome {
                Outcome::Mastered => Some(feedback_message(&verse, state.today)),
                Outcome::StillLearning => None,
            };
            mutable.reviews.push(Review {
                verse,
                reviewed_at: Timestamp::now(),
                outcome,
            });
            mutable.reveal = false;
            // Was this the last verse?
            if mutable.queue.is_empty() {
                finish_session(state, &mut mutable)?;
            }
        }
        Action::Undo => {
            if let Some(review) = mutable.reviews.pop() {
                mutable.queue.insert(0, review.verse);
                mutable.reveal = false;
                mutable.feedback = None;
            }
        }
        Action::End => {
            finish_session(state, &mut mutable)?;
        }
        Action::Shutdown => {}
    }
    Ok(())
}

/// Apply the session's outcomes and persist them in one transaction.
fn finish_session(state: &ServerState, mutable: &mut MutableState) -> Fallible<()> {
    let ended_at = Timestamp::now();
    if mutable.reviews.is_empty() {
        log::debug!("Session ended without answers; nothing to save.");
        mutable.finished_at = Some(ended_at);
        return Ok(());
    }
    let results: Vec<SessionResult> = mutable.reviews.iter().map(Review::to_result).collect();
    let records: Vec<ReviewRecord> = mutable.reviews.iter().map(Review::to_record).collect();
    let updated: Vec<Verse> = apply_results(&mutable.collection, &results, ended_at, state.today);
    let changed: Vec<Verse> = updated
        .iter()
        .zip(mutable.collection.iter())
        .filter(|(new, old)| new != old)
        .map(|(new, _)| new.clone())
        .collect();
    let profile = mutable.db.profile()?;
    let streak = profile.streak().record_practice(state.today);
    let profile = profile.with_streak(streak);
    mutable.db.save_session(
        state.session_started_at,
        ended_at,
        &records,
        &changed,
        &profile,
    )?;
    log::debug!("Session completed");
    mutable.collection = updated;
    mutable.finished_at = Some(ended_at);
    Ok(())
}

fn feedback_message(verse: &Verse, today: Date) -> String {
    let reference = verse.reference();
    let target = next_stage(verse.stage(), today).bucket();
    match verse.stage() {
        Stage::Initial => {
            format!("Congratulations! \"{reference}\" will move to the {target} bucket.")
        }
        Stage::Binary(_) => format!("Well done! \"{reference}\" will move to the {target} bucket."),
        Stage::Weekly(_) => {
            format!("Amazing progress! \"{reference}\" will move to the {target} bucket.")
        }
        Stage::Monthly(_) => {
            format!("Excellent! You've kept \"{reference}\" memorized. Keep it up!")
        }
    }
}
