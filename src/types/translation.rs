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

use clap::ValueEnum;

use crate::error::ErrorReport;
use crate::error::fail;

/// The Bible translation a verse's text was taken from.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Translation {
    #[default]
    Kjv,
    Niv,
    Esv,
    Nasb,
    Nlt,
}

impl Translation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Translation::Kjv => "KJV",
            Translation::Niv => "NIV",
            Translation::Esv => "ESV",
            Translation::Nasb => "NASB",
            Translation::Nlt => "NLT",
        }
    }
}

impl Display for Translation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Translation {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "KJV" => Ok(Translation::Kjv),
            "NIV" => Ok(Translation::Niv),
            "ESV" => Ok(Translation::Esv),
            "NASB" => Ok(Translation::Nasb),
            "NLT" => Ok(Translation::Nlt),
            _ => fail(format!("Invalid translation: {}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from() {
        assert_eq!(Translation::try_from("NASB"), Ok(Translation::Nasb));
        assert!(Translation::try_from("kjv").is_err());
    }
}
