// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct IngestRequestDto {
    /// 页面URL
    pub url: String,
    /// 页面HTML内容
    pub html: String,
}
