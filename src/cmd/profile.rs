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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;

pub fn show_or_rename(directory: Option<String>, name: Option<String>) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let mut profile = coll.db.profile()?;
    if let Some(name) = name {
        let name = name.trim();
        if name.is_empty() {
            return fail("name is empty.");
        }
        profile.name = name.to_string();
        coll.db.update_profile(&profile)?;
    }
    println!("Name:   {}", profile.name);
    println!("Streak: {}", profile.streak);
    match profile.last_practice_date {
        Some(date) => println!("Last practiced: {date}"),
        None => println!("Last practiced: never"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_rename() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = Some(dir.path().display().to_string());
        show_or_rename(directory.clone(), Some(" Priscilla ".to_string()))?;
        let coll = Collection::new(directory.clone())?;
        assert_eq!(coll.db.profile()?.name, "Priscilla");
        assert!(show_or_rename(directory, Some(String::new())).is_err());
        Ok(())
    }
}
