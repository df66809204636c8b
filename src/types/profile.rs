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

use crate::streak::Streak;
use crate::types::date::Date;

pub const DEFAULT_NAME: &str = "Guest User";

/// The single user of a collection.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Identifier assigned by the browser version, kept as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub streak: u32,
    #[serde(default)]
    pub last_practice_date: Option<Date>,
}

impl Profile {
    pub fn streak(&self) -> Streak {
        Streak {
            count: self.streak,
            last_practice: self.last_practice_date,
        }
    }

    pub fn with_streak(self, streak: Streak) -> Profile {
        Profile {
            streak: streak.count,
            last_practice_date: streak.last_practice,
            ..self
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: None,
            name: DEFAULT_NAME.to_string(),
            streak: 0,
            last_practice_date: None,
        }
    }
}
