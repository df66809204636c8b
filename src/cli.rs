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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::add::add_verse;
use crate::cmd::buckets::browse_buckets;
use crate::cmd::drill::server::DrillOptions;
use crate::cmd::drill::server::start_server;
use crate::cmd::due::list_due;
use crate::cmd::export::export_collection;
use crate::cmd::import::import_snapshot;
use crate::cmd::profile::show_or_rename;
use crate::cmd::reset::reset_collection;
use crate::cmd::search::search_catalog;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;
use crate::types::timestamp::Timestamp;
use crate::types::translation::Translation;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Practice the verses due today in the browser.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Port for the drill server. Overrides `config.toml`.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser automatically.
        #[arg(long)]
        no_open: bool,
    },
    /// Add a verse to the daily bucket.
    Add {
        /// The verse reference, e.g. "John 3:16".
        reference: String,
        /// The verse text. May be omitted for KJV verses in the built-in catalog.
        #[arg(long)]
        text: Option<String>,
        /// Translation the text is taken from.
        #[arg(long, default_value = "kjv")]
        translation: Translation,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        dir: Option<String>,
    },
    /// Search the built-in KJV catalog by reference or text.
    Search {
        term: String,
    },
    /// List the verses due today.
    Due {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Show every bucket and what it schedules.
    Buckets {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Weekday to browse, 0 (Sunday) to 6 (Saturday). Defaults to today.
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        weekday: Option<u8>,
        /// Day of month to browse, 1 to 31. Defaults to today.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=31))]
        day: Option<u8>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Show the profile, or rename it.
    Profile {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// New display name.
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the collection as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Load verses and the profile from a JSON snapshot.
    Import {
        /// The snapshot file.
        file: PathBuf,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        dir: Option<String>,
    },
    /// Delete the collection database.
    Reset {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let now = Timestamp::now();
    let today = now.local_date();
    match cli {
        Command::Drill {
            directory,
            port,
            no_open,
        } => {
            let options = DrillOptions { port, no_open };
            start_server(directory, options, today, now).await
        }
        Command::Add {
            reference,
            text,
            translation,
            dir,
        } => add_verse(dir, reference, text, translation),
        Command::Search { term } => {
            search_catalog(&term);
            Ok(())
        }
        Command::Due { directory } => list_due(directory, today),
        Command::Buckets {
            directory,
            weekday,
            day,
        } => browse_buckets(directory, today, weekday, day),
        Command::Stats { directory, format } => print_stats(directory, today, format),
        Command::Profile { directory, name } => show_or_rename(directory, name),
        Command::Export { directory } => export_collection(directory),
        Command::Import { file, dir } => import_snapshot(dir, &file),
        Command::Reset { directory, yes } => reset_collection(directory, yes),
    }
}
