// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement, Value};
use std::sync::Arc;
use tracing::debug;

use crate::domain::models::document::{NewDocument, ScoredDocument};
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::utils::errors::{SolverError, SolverResult};

/// 向量表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorTable {
    /// 带日期的报告 `documents`
    Documents,
    /// 人物资料 `people`
    People,
}

impl VectorTable {
    fn name(self) -> &'static str {
        match self {
            VectorTable::Documents => "documents",
            VectorTable::People => "people",
        }
    }

    fn date_column(self) -> &'static str {
        match self {
            VectorTable::Documents => {
                "TO_CHAR((date AT TIME ZONE 'UTC' AT TIME ZONE 'Europe/Warsaw')::DATE, 'YYYY-MM-DD')"
            }
            VectorTable::People => "NULL::text",
        }
    }
}

/// pgvector 字面量，例如 `[0.1,0.2]`
pub fn vector_literal(embedding: &[f32]) -> String {
    let values: Vec<String> = embedding.iter().map(|v| v.to_string()).collect();
    format!("[{}]", values.join(","))
}

/// 基于 sea-orm 原生 SQL 的 pgvector 仓库实现
pub struct PgVectorRepository {
    db: Arc<DatabaseConnection>,
    table: VectorTable,
}

impl PgVectorRepository {
    pub fn new(db: Arc<DatabaseConnection>, table: VectorTable) -> Self {
        Self { db, table }
    }

    fn statement(&self, sql: String, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }
}

#[async_trait]
impl DocumentRepository for PgVectorRepository {
    async fn insert(&self, document: NewDocument) -> SolverResult<()> {
        let embedding = vector_literal(&document.embedding);

        let statement = match self.table {
            VectorTable::Documents => {
                let date = document
                    .date
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .ok_or_else(|| SolverError::validation("report document needs a date"))?;
                self.statement(
                    "INSERT INTO documents (title, description, date, embedding) VALUES ($1, $2, $3, $4::vector)"
                        .to_string(),
                    vec![
                        document.title.into(),
                        document.description.into(),
                        date.into(),
                        embedding.into(),
                    ],
                )
            }
            VectorTable::People => self.statement(
                "INSERT INTO people (title, description, embedding) VALUES ($1, $2, $3::vector)"
                    .to_string(),
                vec![
                    document.title.into(),
                    document.description.into(),
                    embedding.into(),
                ],
            ),
        };

        self.db.execute(statement).await?;
        Ok(())
    }

    async fn search(
        &self,
        embedding: &[f32],
        threshold: f64,
        limit: u64,
    ) -> SolverResult<Vec<ScoredDocument>> {
        let sql = format!(
            "SELECT title, description, {date} AS date, \
             (1 - (embedding <=> $1::vector))::float8 AS similarity \
             FROM {table} \
             WHERE 1 - (embedding <=> $1::vector) > $2 \
             ORDER BY similarity DESC \
             LIMIT $3",
            date = self.table.date_column(),
            table = self.table.name(),
        );
        let statement = self.statement(
            sql,
            vec![
                vector_literal(embedding).into(),
                threshold.into(),
                (limit as i64).into(),
            ],
        );

        let rows = self.db.query_all(statement).await?;
        debug!(table = self.table.name(), hits = rows.len(), "vector search finished");

        rows.iter()
            .map(|row| -> SolverResult<ScoredDocument> {
                Ok(ScoredDocument {
                    title: row.try_get("", "title")?,
                    description: row.try_get("", "description")?,
                    date: row.try_get("", "date")?,
                    similarity: row.try_get("", "similarity")?,
                })
            })
            .collect()
    }

    async fn titles(&self) -> SolverResult<Vec<String>> {
        let statement = self.statement(
            format!("SELECT title FROM {} ORDER BY id", self.table.name()),
            vec![],
        );
        let rows = self.db.query_all(statement).await?;

        rows.iter()
            .map(|row| row.try_get("", "title").map_err(SolverError::from))
            .collect()
    }

    async fn find_description(&self, title_fragment: &str) -> SolverResult<Option<String>> {
        let statement = self.statement(
            format!(
                "SELECT description FROM {} WHERE title ILIKE $1 LIMIT 1",
                self.table.name()
            ),
            vec![format!("%{}%", title_fragment).into()],
        );

        match self.db.query_one(statement).await? {
            Some(row) => Ok(Some(row.try_get("", "description")?)),
            None => Ok(None),
        }
    }
}
