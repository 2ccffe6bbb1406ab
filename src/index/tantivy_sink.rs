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
use parking_lot::Mutex;
use std::path::Path;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, Schema, Value, STORED, STRING, TEXT};
use tantivy::snippet::SnippetGenerator;
use tantivy::{Index, IndexReader, IndexWriter, TantivyDocument, Term};

use crate::domain::models::document::Document;
use crate::domain::models::search_hit::SearchHit;
use crate::index::sink::{IndexError, IndexSink};

/// 写入缓冲区大小
const WRITER_MEMORY_BUDGET: usize = 50_000_000;

/// 摘要片段最大字符数
const SNIPPET_MAX_CHARS: usize = 250;

/// 索引字段集合
#[derive(Clone, Copy)]
struct DocumentFields {
    url: Field,
    title: Field,
    teaser: Field,
    content: Field,
}

/// 基于tantivy的索引接收器
///
/// 持有打开一次的索引句柄。写入使用URL作为唯一键，
/// 先删除同键旧条目再插入，保证upsert幂等。
pub struct TantivySink {
    fields: DocumentFields,
    writer: Mutex<IndexWriter>,
    reader: IndexReader,
    query_parser: QueryParser,
}

impl TantivySink {
    /// 打开或创建索引
    ///
    /// # 参数
    ///
    /// * `dir` - 索引存储目录
    ///
    /// # 返回值
    ///
    /// * `Ok(TantivySink)` - 可用的索引接收器
    /// * `Err(IndexError)` - 打开或创建失败
    pub fn open(dir: &Path) -> Result<Self, IndexError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| IndexError::Storage(format!("Failed to create index directory: {}", e)))?;

        let index = if dir.join("meta.json").exists() {
            Index::open_in_dir(dir)
                .map_err(|e| IndexError::Storage(format!("Failed to open index: {}", e)))?
        } else {
            Index::create_in_dir(dir, Self::schema())
                .map_err(|e| IndexError::Storage(format!("Failed to create index: {}", e)))?
        };

        let schema = index.schema();
        let fields = DocumentFields {
            url: Self::field(&schema, "url")?,
            title: Self::field(&schema, "title")?,
            teaser: Self::field(&schema, "teaser")?,
            content: Self::field(&schema, "content")?,
        };

        let writer = index
            .writer(WRITER_MEMORY_BUDGET)
            .map_err(|e| IndexError::Storage(format!("Failed to create index writer: {}", e)))?;

        let reader = index
            .reader()
            .map_err(|e| IndexError::Storage(format!("Failed to create index reader: {}", e)))?;

        // Boost title matches higher than content for better relevance
        let mut query_parser = QueryParser::for_index(&index, vec![fields.title, fields.content]);
        query_parser.set_field_boost(fields.title, 2.0);

        Ok(Self {
            fields,
            writer: Mutex::new(writer),
            reader,
            query_parser,
        })
    }

    fn schema() -> Schema {
        let mut builder = Schema::builder();
        builder.add_text_field("url", STRING | STORED);
        builder.add_text_field("title", TEXT | STORED);
        builder.add_text_field("teaser", STORED);
        builder.add_text_field("content", TEXT | STORED);
        builder.build()
    }

    fn field(schema: &Schema, name: &str) -> Result<Field, IndexError> {
        schema
            .get_field(name)
            .map_err(|e| IndexError::Storage(format!("Missing index field {}: {}", name, e)))
    }
}

#[async_trait]
impl IndexSink for TantivySink {
    /// 写入或替换文档
    ///
    /// 删除同URL的旧条目后插入新条目并提交，
    /// 之后重载读取器使修改立即可见
    async fn upsert(&self, document: &Document) -> Result<(), IndexError> {
        {
            let mut writer = self.writer.lock();
            writer.delete_term(Term::from_field_text(self.fields.url, &document.url));

            let mut doc = TantivyDocument::default();
            doc.add_text(self.fields.url, &document.url);
            doc.add_text(self.fields.title, &document.title);
            doc.add_text(self.fields.teaser, &document.teaser);
            doc.add_text(self.fields.content, &document.content);

            writer
                .add_document(doc)
                .map_err(|e| IndexError::Storage(format!("Failed to add document: {}", e)))?;
            writer
                .commit()
                .map_err(|e| IndexError::Storage(format!("Index commit failed: {}", e)))?;
        }

        self.reader
            .reload()
            .map_err(|e| IndexError::Storage(format!("Failed to reload reader: {}", e)))
    }

    /// 查询索引
    async fn query(&self, text: &str, limit: usize) -> Result<Vec<SearchHit>, IndexError> {
        let searcher = self.reader.searcher();
        let query = self
            .query_parser
            .parse_query(text)
            .map_err(|e| IndexError::QueryParsing(e.to_string()))?;

        let snippet_generator = SnippetGenerator::create(&searcher, &*query, self.fields.content)
            .map(|mut generator| {
                generator.set_max_num_chars(SNIPPET_MAX_CHARS);
                generator
            })
            .ok();

        let top_docs = searcher
            .search(&*query, &TopDocs::with_limit(limit))
            .map_err(|e| IndexError::Storage(format!("Search failed: {}", e)))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| IndexError::Storage(format!("Failed to retrieve document: {}", e)))?;

            let snippet = snippet_generator
                .as_ref()
                .map(|generator| generator.snippet_from_doc(&doc).to_html())
                .filter(|html| !html.trim().is_empty())
                .unwrap_or_else(|| field_text(&doc, self.fields.teaser));

            hits.push(SearchHit::new(
                field_text(&doc, self.fields.url),
                field_text(&doc, self.fields.title),
                snippet,
            ));
        }

        Ok(hits)
    }

    /// 提交未落盘的修改
    async fn flush(&self) -> Result<(), IndexError> {
        self.writer
            .lock()
            .commit()
            .map_err(|e| IndexError::Storage(format!("Index flush failed: {}", e)))?;
        Ok(())
    }
}

/// 读取文档的文本字段值
fn field_text(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
#[path = "tantivy_sink_test.rs"]
mod tests;
