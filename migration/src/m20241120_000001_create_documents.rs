// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

/// 报告文档表 - 带有向量嵌入列（pgvector）
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS vector")
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Title).text().not_null())
                    .col(ColumnDef::new(Documents::Description).text().not_null())
                    .col(ColumnDef::new(Documents::Date).timestamp().not_null())
                    .col(ColumnDef::new(Documents::Embedding).custom(Alias::new("vector(1536)")))
                    .to_owned(),
            )
            .await?;

        // HNSW index over cosine distance
        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS \"documentsEmbeddingIndex\" ON documents USING hnsw (embedding vector_cosine_ops)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    Id,
    Title,
    Description,
    Date,
    Embedding,
}
