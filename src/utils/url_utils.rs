// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将URL规范化为稳定的标识形式
///
/// 保留scheme、host、非默认端口和path，去除查询字符串和片段。
/// 该操作是幂等的，规范化结果作为去重和域内判断的唯一标识。
pub fn canonicalize(url: &Url) -> Url {
    let mut canonical = url.clone();
    canonical.set_query(None);
    canonical.set_fragment(None);
    canonical
}

/// 返回URL的规范化字符串键
pub fn canonical_key(url: &Url) -> String {
    canonicalize(url).to_string()
}

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 判断两个URL是否属于同一域
pub fn same_domain(a: &Url, b: &Url) -> bool {
    a.host_str().is_some() && a.host_str() == b.host_str()
}
