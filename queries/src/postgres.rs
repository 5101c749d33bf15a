use async_trait::async_trait;
use entities::album::{Album, AlbumChanges, AlbumFields, NewAlbum};
use log::error;
use sqlx::{Pool, Postgres, types::Uuid};

use crate::{AlbumStore, StoreError, StoreResult};

/// Album store backed by the `album` table.
#[derive(Clone)]
pub struct PgAlbumStore {
    pool: Pool<Postgres>,
}

impl PgAlbumStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Turns the driver's unique-violation into [`StoreError::Duplicate`].
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate;
        }
    }
    error!("There was an error querying the database: {}", err);
    StoreError::Database(err)
}

pub async fn get_all_albums(pool: &Pool<Postgres>) -> Result<Vec<Album>, sqlx::Error> {
    sqlx::query_as::<_, Album>("select * from album order by created_at, id")
        .fetch_all(pool)
        .await
}

pub async fn get_album_by_id(
    pool: &Pool<Postgres>,
    album_id: Uuid,
) -> Result<Option<Album>, sqlx::Error> {
    sqlx::query_as::<_, Album>("select * from album where id = $1")
        .bind(album_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_album_fields_by_id(
    pool: &Pool<Postgres>,
    album_id: Uuid,
) -> Result<Option<AlbumFields>, sqlx::Error> {
    sqlx::query_as::<_, AlbumFields>(
        "select title, year, artist, photo_url, score from album where id = $1",
    )
    .bind(album_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_album_score_by_id(
    pool: &Pool<Postgres>,
    album_id: Uuid,
) -> Result<Option<Vec<f64>>, sqlx::Error> {
    sqlx::query_scalar::<_, Vec<f64>>("select score from album where id = $1")
        .bind(album_id)
        .fetch_optional(pool)
        .await
}

pub async fn add_album(pool: &Pool<Postgres>, album: &NewAlbum) -> Result<Album, sqlx::Error> {
    sqlx::query_as::<_, Album>(
        r#"
        insert into album (title, year, artist, photo_url, score)
        values ($1, $2, $3, $4, $5)
        returning *
        "#,
    )
    .bind(&album.title)
    .bind(album.year)
    .bind(&album.artist)
    .bind(&album.photo_url)
    .bind(&album.score)
    .fetch_one(pool)
    .await
}

pub async fn update_album_by_id(
    pool: &Pool<Postgres>,
    album_id: Uuid,
    changes: &AlbumChanges,
) -> Result<Option<Album>, sqlx::Error> {
    sqlx::query_as::<_, Album>(
        r#"
        update album
        set title = $2,
            year = $3,
            artist = $4,
            photo_url = $5,
            score = coalesce($6::float8[], score),
            updated_at = now()
        where id = $1
        returning *
        "#,
    )
    .bind(album_id)
    .bind(&changes.title)
    .bind(changes.year)
    .bind(&changes.artist)
    .bind(&changes.photo_url)
    .bind(&changes.score)
    .fetch_optional(pool)
    .await
}

pub async fn update_album_score_by_id(
    pool: &Pool<Postgres>,
    album_id: Uuid,
    score: &[f64],
) -> Result<Option<Album>, sqlx::Error> {
    sqlx::query_as::<_, Album>(
        "update album set score = $2, updated_at = now() where id = $1 returning *",
    )
    .bind(album_id)
    .bind(score)
    .fetch_optional(pool)
    .await
}

pub async fn delete_album_by_id(
    pool: &Pool<Postgres>,
    album_id: Uuid,
) -> Result<Option<Album>, sqlx::Error> {
    sqlx::query_as::<_, Album>("delete from album where id = $1 returning *")
        .bind(album_id)
        .fetch_optional(pool)
        .await
}

#[async_trait]
impl AlbumStore for PgAlbumStore {
    async fn find_all(&self) -> StoreResult<Vec<Album>> {
        get_all_albums(&self.pool).await.map_err(classify)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Album>> {
        get_album_by_id(&self.pool, id).await.map_err(classify)
    }

    async fn find_fields(&self, id: Uuid) -> StoreResult<Option<AlbumFields>> {
        get_album_fields_by_id(&self.pool, id)
            .await
            .map_err(classify)
    }

    async fn find_score(&self, id: Uuid) -> StoreResult<Option<Vec<f64>>> {
        get_album_score_by_id(&self.pool, id)
            .await
            .map_err(classify)
    }

    async fn insert(&self, album: NewAlbum) -> StoreResult<Album> {
        add_album(&self.pool, &album).await.map_err(classify)
    }

    async fn update_by_id(&self, id: Uuid, changes: AlbumChanges) -> StoreResult<Option<Album>> {
        update_album_by_id(&self.pool, id, &changes)
            .await
            .map_err(classify)
    }

    async fn update_score(&self, id: Uuid, score: Vec<f64>) -> StoreResult<Option<Album>> {
        update_album_score_by_id(&self.pool, id, &score)
            .await
            .map_err(classify)
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<Album>> {
        delete_album_by_id(&self.pool, id).await.map_err(classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_stay_database_errors() {
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut),
            StoreError::Database(sqlx::Error::PoolTimedOut)
        ));
        assert!(matches!(
            classify(sqlx::Error::RowNotFound),
            StoreError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
