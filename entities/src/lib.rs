pub mod album;

pub mod prelude {
    pub use crate::album::{Album, AlbumChanges, AlbumFields, NewAlbum};
}
