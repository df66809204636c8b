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

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;

use crate::error::ErrorReport;
use crate::error::fail;

/// What the user reported after practicing a verse.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    StillLearning,
    Mastered,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::StillLearning => "still_learning",
            Outcome::Mastered => "mastered",
        }
    }
}

impl TryFrom<String> for Outcome {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "still_learning" => Ok(Outcome::StillLearning),
            "mastered" => Ok(Outcome::Mastered),
            _ => fail(format!("Invalid outcome: {}", value)),
        }
    }
}

impl ToSql for Outcome {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Outcome {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        Outcome::try_from(string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
