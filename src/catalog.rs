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

//! A small built-in catalog of King James Version verses, so common verses
//! can be added by reference alone.

/// Search results are capped at this many verses.
const SEARCH_LIMIT: usize = 5;

const KJV: &[(&str, &str)] = &[
    (
        "Genesis 1:1",
        "In the beginning God created the heaven and the earth.",
    ),
    (
        "John 3:16",
        "For God so loved the world, that he gave his only begotten Son, that whosoever believeth in him should not perish, but have everlasting life.",
    ),
    ("Psalm 23:1", "The LORD is my shepherd; I shall not want."),
    (
        "Philippians 4:13",
        "I can do all things through Christ which strengtheneth me.",
    ),
    (
        "Romans 8:28",
        "And we know that all things work together for good to them that love God, to them who are the called according to his purpose.",
    ),
    (
        "Proverbs 3:5-6",
        "Trust in the LORD with all thine heart; and lean not unto thine own understanding. In all thy ways acknowledge him, and he shall direct thy paths.",
    ),
    (
        "Isaiah 40:31",
        "But they that wait upon the LORD shall renew their strength; they shall mount up with wings as eagles; they shall run, and not be weary; and they shall walk, and not faint.",
    ),
    (
        "Matthew 6:33",
        "But seek ye first the kingdom of God, and his righteousness; and all these things shall be added unto you.",
    ),
    (
        "2 Timothy 3:16",
        "All scripture is given by inspiration of God, and is profitable for doctrine, for reproof, for correction, for instruction in righteousness:",
    ),
    (
        "1 John 1:9",
        "If we confess our sins, he is faithful and just to forgive us our sins, and to cleanse us from all unrighteousness.",
    ),
];

/// Look up the KJV text of a reference. Case-insensitive.
pub fn lookup_kjv(reference: &str) -> Option<&'static str> {
    let reference = reference.trim();
    KJV.iter()
        .find(|(r, _)| r.eq_ignore_ascii_case(reference))
        .map(|(_, text)| *text)
}

/// Catalog entries whose reference or text contains `term`, ignoring case.
pub fn search_kjv(term: &str) -> Vec<(&'static str, &'static str)> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    KJV.iter()
        .filter(|(reference, text)| {
            reference.to_lowercase().contains(&term) || text.to_lowercase().contains(&term)
        })
        .take(SEARCH_LIMIT)
        .copied()
        .collect()
}
