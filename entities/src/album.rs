use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Score every album starts with.
pub const DEFAULT_SCORE: [f64; 1] = [0.0];

/// A stored album as it is handed out to clients.
#[derive(Clone, Debug, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: Uuid,
    pub title: String,
    pub year: f64,
    pub artist: String,
    pub photo_url: String,
    pub score: Vec<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Album {
    pub fn fields(&self) -> AlbumFields {
        AlbumFields {
            title: self.title.to_owned(),
            year: self.year,
            artist: self.artist.to_owned(),
            photo_url: self.photo_url.to_owned(),
            score: self.score.to_owned(),
        }
    }
}

/// Projection of an album onto the fields an update is compared against.
/// Never carries the id.
#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct AlbumFields {
    pub title: String,
    pub year: f64,
    pub artist: String,
    pub photo_url: String,
    pub score: Vec<f64>,
}

impl AlbumFields {
    /// True when applying `changes` would leave the record as it is.
    /// The score only takes part when the changes carry one.
    pub fn matches(&self, changes: &AlbumChanges) -> bool {
        self.title == changes.title
            && self.year == changes.year
            && self.artist == changes.artist
            && self.photo_url == changes.photo_url
            && changes
                .score
                .as_ref()
                .map_or(true, |score| score == &self.score)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAlbum {
    pub title: String,
    pub year: f64,
    pub artist: String,
    pub photo_url: String,
    pub score: Vec<f64>,
}

/// Full replacement of an album's editable fields. `score: None` keeps the
/// stored sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct AlbumChanges {
    pub title: String,
    pub year: f64,
    pub artist: String,
    pub photo_url: String,
    pub score: Option<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> AlbumFields {
        AlbumFields {
            title: "Album title".to_string(),
            year: 1900.0,
            artist: "Artist of the album".to_string(),
            photo_url: "www.google.com".to_string(),
            score: vec![0.0, 1.0],
        }
    }

    fn changes() -> AlbumChanges {
        AlbumChanges {
            title: "Album title".to_string(),
            year: 1900.0,
            artist: "Artist of the album".to_string(),
            photo_url: "www.google.com".to_string(),
            score: None,
        }
    }

    #[test]
    fn identical_fields_without_score_match() {
        assert!(stored().matches(&changes()));
    }

    #[test]
    fn different_title_does_not_match() {
        let mut changes = changes();
        changes.title = "Album title UPDATED".to_string();
        assert!(!stored().matches(&changes));
    }

    #[test]
    fn different_year_does_not_match() {
        let mut changes = changes();
        changes.year = 1901.0;
        assert!(!stored().matches(&changes));
    }

    #[test]
    fn score_is_compared_when_supplied() {
        let mut changes = changes();
        changes.score = Some(vec![0.0, 1.0]);
        assert!(stored().matches(&changes));

        changes.score = Some(vec![0.0]);
        assert!(!stored().matches(&changes));
    }
}
