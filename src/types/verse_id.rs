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

use std::fmt::Display;
use std::fmt::Formatter;

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::timestamp::Timestamp;
use crate::types::verse::VerseContent;

/// Opaque verse identifier.
///
/// Verses added here get the blake3 digest of their content and creation
/// time. Imported verses keep whatever identifier they came with.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VerseId(String);

impl VerseId {
    pub fn generate(content: &VerseContent, added_at: Timestamp) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(content.reference.as_bytes());
        hasher.update(b"\0");
        hasher.update(content.text.as_bytes());
        hasher.update(b"\0");
        hasher.update(content.translation.as_str().as_bytes());
        hasher.update(b"\0");
        hasher.update(added_at.to_rfc3339().as_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn parse(s: &str) -> Fallible<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ErrorReport::new("empty verse id"));
        }
        Ok(Self(s.to_string()))
    }

    /// A prefix for log lines.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl Display for VerseId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for VerseId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for VerseId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        VerseId::parse(&string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl Serialize for VerseId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VerseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        VerseId::parse(&string).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::types::translation::Translation;

    fn content() -> VerseContent {
        VerseContent {
            reference: "Psalm 23:1".to_string(),
            text: "The LORD is my shepherd; I shall not want.".to_string(),
            translation: Translation::Kjv,
        }
    }

    #[test]
    fn test_generate_depends_on_time() {
        let a = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let b = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 1).unwrap());
        assert_eq!(VerseId::generate(&content(), a), VerseId::generate(&content(), a));
        assert_ne!(VerseId::generate(&content(), a), VerseId::generate(&content(), b));
        assert_eq!(VerseId::generate(&content(), a).to_string().len(), 64);
    }

    #[test]
    fn test_parse_accepts_foreign_ids() -> Fallible<()> {
        let id = VerseId::parse("0b6f3c2e-5e1a-4a55-9d1e-3c2b1a0f9e8d")?;
        assert_eq!(id.short(), "0b6f3c2e");
        assert!(VerseId::parse("   ").is_err());
        Ok(())
    }
}
