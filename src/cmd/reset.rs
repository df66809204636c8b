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

use std::fs::remove_file;

use crate::collection::database_path;
use crate::collection::resolve_directory;
use crate::error::Fallible;
use crate::error::fail;

/// Delete the collection database: every verse, the profile and the session
/// history.
pub fn reset_collection(directory: Option<String>, confirmed: bool) -> Fallible<()> {
    if !confirmed {
        return fail("this deletes all progress; pass --yes to confirm.");
    }
    let directory = resolve_directory(directory)?;
    let db_path = database_path(&directory);
    if db_path.exists() {
        remove_file(&db_path)?;
        println!("Deleted {}.", db_path.display());
    } else {
        println!("Nothing to reset.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::collection::Collection;

    #[test]
    fn test_reset_requires_confirmation() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = Some(dir.path().display().to_string());
        let _ = Collection::new(directory.clone())?;
        assert!(reset_collection(directory.clone(), false).is_err());
        assert!(database_path(dir.path()).exists());
        reset_collection(directory, true)?;
        assert!(!database_path(dir.path()).exists());
        Ok(())
    }
}
