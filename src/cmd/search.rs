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

use crate::catalog::search_kjv;

pub fn search_catalog(term: &str) {
    let hits = search_kjv(term);
    if hits.is_empty() {
        println!("No matching verses.");
        return;
    }
    for (reference, text) in hits {
        println!("{reference}: {text}");
    }
}
