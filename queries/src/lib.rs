use async_trait::async_trait;
use entities::album::{Album, AlbumChanges, AlbumFields, NewAlbum};
use sqlx::types::Uuid;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryAlbumStore;
pub use postgres::PgAlbumStore;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Another album already uses the same title and artist.
    #[error("an album with the same title and artist already exists")]
    Duplicate,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything the album endpoints need from a backing store.
///
/// Lookups return `Ok(None)` when the id does not resolve. Writes that would
/// break the (title, artist) uniqueness fail with [`StoreError::Duplicate`].
#[async_trait]
pub trait AlbumStore: Send + Sync {
    /// All albums, oldest first.
    async fn find_all(&self) -> StoreResult<Vec<Album>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Album>>;

    /// The fields an update is compared against.
    async fn find_fields(&self, id: Uuid) -> StoreResult<Option<AlbumFields>>;

    async fn find_score(&self, id: Uuid) -> StoreResult<Option<Vec<f64>>>;

    async fn insert(&self, album: NewAlbum) -> StoreResult<Album>;

    /// Replaces the editable fields and returns the record as stored afterwards.
    async fn update_by_id(&self, id: Uuid, changes: AlbumChanges) -> StoreResult<Option<Album>>;

    async fn update_score(&self, id: Uuid, score: Vec<f64>) -> StoreResult<Option<Album>>;

    /// Removes the album and hands back what was removed.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<Album>>;
}
