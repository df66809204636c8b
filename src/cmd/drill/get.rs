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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;
use crate::types::outcome::Outcome;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let body = if mutable.finished_at.is_some() || mutable.queue.is_empty() {
        render_completion(&mutable)
    } else {
        render_session(&state, &mutable)
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn render_session(state: &ServerState, mutable: &MutableState) -> Markup {
    let undo_disabled = mutable.reviews.is_empty();
    let progress = format!(
        "{} of {} verses",
        mutable.reviews.len() + 1,
        state.total_verses
    );
    let verse = &mutable.queue[0];
    let content = verse.content();
    let card_controls = if mutable.reveal {
        html! {
            form action="/" method="post" {
                @if undo_disabled {
                    input id="undo" type="submit" name="action" value="Undo" disabled;
                } @else {
                    input id="undo" type="submit" name="action" value="Undo" title="Undo last answer. Shortcut: u.";
                }
                div.spacer {}
                input id="still-learning" type="submit" name="action" value="Still Learning" title="Shortcut: 1.";
                input id="mastered" type="submit" name="action" value="Mastered" title="Shortcut: 2.";
                div.spacer {}
                input id="end" type="submit" name="action" value="End";
            }
        }
    } else {
        html! {
            form action="/" method="post" {
                @if undo_disabled {
                    input id="undo" type="submit" name="action" value="Undo" disabled;
                } @else {
                    input id="undo" type="submit" name="action" value="Undo" title="Undo last answer. Shortcut: u.";
                }
                div.spacer {}
                input id="reveal" type="submit" name="action" value="Show Verse" title="Shortcut: space.";
                div.spacer {}
                input id="end" type="submit" name="action" value="End";
            }
        }
    };
    html! {
        div.root {
            div.header {
                h1 { "Daily Practice" }
                div.progress { (progress) }
            }
            @if let Some(feedback) = &mutable.feedback {
                div.feedback { (feedback) }
            }
            div.card {
                div.reference {
                    h2 { (content.reference) }
                    span.translation { (content.translation.as_str()) }
                    span.bucket { (verse.stage().bucket().label()) }
                }
                @if mutable.reveal {
                    div.text { p { (content.text) } }
                } @else {
                    div.text .hidden {}
                }
            }
            div.controls {
                (card_controls)
            }
        }
    }
}

fn render_completion(mutable: &MutableState) -> Markup {
    let mastered = mutable
        .reviews
        .iter()
        .filter(|review| review.outcome == Outcome::Mastered)
        .count();
    let still_learning = mutable.reviews.len() - mastered;
    html! {
        div.finished {
            h1 { "Session Completed" }
            @if let Some(feedback) = &mutable.feedback {
                div.feedback { (feedback) }
            }
            p.summary {
                (format!("Mastered: {mastered}. Still learning: {still_learning}."))
            }
            form action="/" method="post" {
                input id="shutdown" type="submit" name="action" value="Shutdown";
            }
        }
    }
}
