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
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal::ctrl_c;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::cmd::drill::get::get_handler;
use crate::cmd::drill::post::post_handler;
use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::schedule::due_verses;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;
use crate::types::verse::Verse;

/// Command-line overrides for the drill server.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrillOptions {
    pub port: Option<u16>,
    pub no_open: bool,
}

pub async fn start_server(
    directory: Option<String>,
    options: DrillOptions,
    today: Date,
    session_started_at: Timestamp,
) -> Fallible<()> {
    let Collection {
        directory,
        mut db,
        config,
        verses,
        corrupted,
    } = Collection::new(directory)?;
    if !corrupted.is_empty() {
        log::warn!("{} corrupted verses will not be drilled.", corrupted.len());
    }

    // Bring the streak up to date before anything else.
    let profile = db.profile()?;
    let streak = profile.streak().advance(today);
    if streak != profile.streak() {
        log::debug!("Streak {} -> {}.", profile.streak, streak.count);
        db.update_profile(&profile.with_streak(streak))?;
    }

    let queue: Vec<Verse> = due_verses(&verses, today).into_iter().cloned().collect();
    if queue.is_empty() {
        println!("No verses due today.");
        return Ok(());
    }
    log::debug!(
        "{} of {} verses due in {}.",
        queue.len(),
        verses.len(),
        directory.display()
    );

    let port = options.port.unwrap_or(config.port);
    let open_browser = config.open_browser && !options.no_open;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let state = ServerState {
        today,
        total_verses: queue.len(),
        session_started_at,
        mutable: Arc::new(Mutex::new(MutableState {
            reveal: false,
            db,
            collection: verses,
            queue,
            reviews: Vec::new(),
            feedback: None,
            finished_at: None,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("127.0.0.1:{port}");

    if open_browser {
        // Start a separate task to open the browser.
        let url = format!("http://{bind}/");
        let target = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&target).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = shutdown_rx => {}
                _ = ctrl_c() => {}
            }
            log::debug!("Server stopped.");
        })
        .await?;
    Ok(())
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static [u8]) {
    let bytes = include_bytes!("script.js");
    (StatusCode::OK, [(CONTENT_TYPE, "text/javascript")], bytes)
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
