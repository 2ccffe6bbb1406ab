// Copyright 2025 Kirky.X
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

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::document::Document;
use crate::domain::models::search_hit::SearchHit;

/// 索引错误类型
#[derive(Error, Debug)]
pub enum IndexError {
    /// 存储错误
    #[error("Index storage error: {0}")]
    Storage(String),

    /// 查询解析错误
    #[error("Query parse error: {0}")]
    QueryParsing(String),
}

/// 索引接收器特质
///
/// 在启动时构建一次，注入控制器（写路径）和查询处理器（读路径），
/// 关闭时通过flush落盘。
#[async_trait]
pub trait IndexSink: Send + Sync {
    /// 写入或替换文档
    ///
    /// 幂等操作：同一URL的第二次写入替换之前的条目，不产生重复
    async fn upsert(&self, document: &Document) -> Result<(), IndexError>;

    /// 查询索引
    ///
    /// # 参数
    ///
    /// * `text` - 自由文本查询
    /// * `limit` - 返回结果数量上限
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<SearchHit>)` - 按相关度排序的结果列表
    /// * `Err(IndexError)` - 查询失败
    async fn query(&self, text: &str, limit: usize) -> Result<Vec<SearchHit>, IndexError>;

    /// 将未落盘的修改提交到存储
    async fn flush(&self) -> Result<(), IndexError>;
}
