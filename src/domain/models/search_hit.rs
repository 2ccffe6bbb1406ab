// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

impl SearchHit {
    pub fn new(url: String, title: String, snippet: String) -> Self {
        Self {
            url,
            title,
            snippet,
        }
    }
}
