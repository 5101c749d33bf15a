use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // gen_random_uuid() is built in from PostgreSQL 13 on
        db.execute_unprepared(
            r#"CREATE TABLE IF NOT EXISTS album
(
    id uuid default gen_random_uuid() not null primary key,
    title varchar not null,
    year float8 not null,
    artist varchar not null,
    photo_url varchar not null,
    score float8[] not null default '{0}',
    created_at timestamptz not null default now(),
    updated_at timestamptz not null default now(),
    CONSTRAINT album_score_not_empty CHECK (cardinality(score) > 0)
);

CREATE UNIQUE INDEX IF NOT EXISTS album_title_artist_key ON album (title, artist);"#,
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r#"DROP INDEX IF EXISTS album_title_artist_key;
DROP TABLE IF EXISTS album;"#,
        )
        .await?;
        Ok(())
    }
}
