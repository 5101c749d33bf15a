use async_trait::async_trait;
use chrono::Utc;
use entities::album::{Album, AlbumChanges, AlbumFields, NewAlbum};
use sqlx::types::Uuid;
use tokio::sync::RwLock;

use crate::{AlbumStore, StoreError, StoreResult};

/// Album store that lives in process memory.
///
/// Records are kept in insertion order. The uniqueness check and the write
/// happen under the same guard, so concurrent writers see the same
/// constraint a unique index would give them.
#[derive(Default)]
pub struct MemoryAlbumStore {
    albums: RwLock<Vec<Album>>,
}

impl MemoryAlbumStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn collides(albums: &[Album], title: &str, artist: &str, except: Option<Uuid>) -> bool {
    albums
        .iter()
        .filter(|album| Some(album.id) != except)
        .any(|album| album.title == title && album.artist == artist)
}

#[async_trait]
impl AlbumStore for MemoryAlbumStore {
    async fn find_all(&self) -> StoreResult<Vec<Album>> {
        Ok(self.albums.read().await.to_vec())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Album>> {
        let albums = self.albums.read().await;
        Ok(albums.iter().find(|album| album.id == id).cloned())
    }

    async fn find_fields(&self, id: Uuid) -> StoreResult<Option<AlbumFields>> {
        let albums = self.albums.read().await;
        Ok(albums.iter().find(|album| album.id == id).map(Album::fields))
    }

    async fn find_score(&self, id: Uuid) -> StoreResult<Option<Vec<f64>>> {
        let albums = self.albums.read().await;
        Ok(albums
            .iter()
            .find(|album| album.id == id)
            .map(|album| album.score.to_owned()))
    }

    async fn insert(&self, album: NewAlbum) -> StoreResult<Album> {
        let mut albums = self.albums.write().await;
        if collides(&albums, &album.title, &album.artist, None) {
            return Err(StoreError::Duplicate);
        }
        let now = Utc::now();
        let stored = Album {
            id: Uuid::new_v4(),
            title: album.title,
            year: album.year,
            artist: album.artist,
            photo_url: album.photo_url,
            score: album.score,
            created_at: now,
            updated_at: now,
        };
        albums.push(stored.clone());
        Ok(stored)
    }

    async fn update_by_id(&self, id: Uuid, changes: AlbumChanges) -> StoreResult<Option<Album>> {
        let mut albums = self.albums.write().await;
        if !albums.iter().any(|album| album.id == id) {
            return Ok(None);
        }
        if collides(&albums, &changes.title, &changes.artist, Some(id)) {
            return Err(StoreError::Duplicate);
        }
        let Some(album) = albums.iter_mut().find(|album| album.id == id) else {
            return Ok(None);
        };
        album.title = changes.title;
        album.year = changes.year;
        album.artist = changes.artist;
        album.photo_url = changes.photo_url;
        if let Some(score) = changes.score {
            album.score = score;
        }
        album.updated_at = Utc::now();
        Ok(Some(album.clone()))
    }

    async fn update_score(&self, id: Uuid, score: Vec<f64>) -> StoreResult<Option<Album>> {
        let mut albums = self.albums.write().await;
        Ok(albums.iter_mut().find(|album| album.id == id).map(|album| {
            album.score = score;
            album.updated_at = Utc::now();
            album.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<Album>> {
        let mut albums = self.albums.write().await;
        let position = albums.iter().position(|album| album.id == id);
        Ok(position.map(|index| albums.remove(index)))
    }
}
