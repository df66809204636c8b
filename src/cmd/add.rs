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

use crate::catalog::lookup_kjv;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::timestamp::Timestamp;
use crate::types::translation::Translation;
use crate::types::verse::Verse;
use crate::types::verse::VerseContent;

pub fn add_verse(
    directory: Option<String>,
    reference: String,
    text: Option<String>,
    translation: Translation,
) -> Fallible<()> {
    let content = verse_content(&reference, text.as_deref(), translation)?;
    let mut coll = Collection::new(directory)?;
    let verse = Verse::new(content, Timestamp::now());
    coll.db.insert_verse(&verse.to_record())?;
    log::debug!("Added verse {}.", verse.id().short());
    println!(
        "Added {} ({}) to the {} bucket.",
        verse.reference(),
        verse.content().translation,
        verse.stage().bucket()
    );
    Ok(())
}

/// Build the verse content. Without explicit text, KJV verses are looked up
/// in the built-in catalog.
fn verse_content(
    reference: &str,
    text: Option<&str>,
    translation: Translation,
) -> Fallible<VerseContent> {
    let reference = reference.trim();
    if reference.is_empty() {
        return fail("reference is empty.");
    }
    let text = match (text, translation) {
        (Some(text), _) => text.trim().to_string(),
        (None, Translation::Kjv) => match lookup_kjv(reference) {
            Some(text) => text.to_string(),
            None => {
                return fail(format!(
                    "'{reference}' is not in the built-in KJV catalog; pass --text."
                ));
            }
        },
        (None, translation) => return fail(format!("--text is required for {translation} verses.")),
    };
    if text.is_empty() {
        return fail("verse text is empty.");
    }
    Ok(VerseContent {
        reference: reference.to_string(),
        text,
        translation,
    })
}
