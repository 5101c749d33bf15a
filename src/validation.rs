use entities::album::{AlbumChanges, NewAlbum, DEFAULT_SCORE};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("required album fields are missing or empty")]
    MissingFields,

    #[error("score is missing")]
    MissingScore,

    #[error("{0} is not a valid album id")]
    InvalidId(String),
}

/// Album body as sent by clients, before anything is checked.
#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPayload {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub year: Option<f64>,
    pub artist: Option<String>,
    pub photo_url: Option<String>,
    pub score: Option<Vec<f64>>,
}

/// An album body that passed validation. Strings are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAlbum {
    pub title: String,
    pub year: f64,
    pub artist: String,
    pub photo_url: String,
    pub score: Option<Vec<f64>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number or a string holding one, e.g. `1999`, `1999.5` or
/// `"1999"`. A blank string counts as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(number)) => Ok(Some(number)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{text:?} is not a number"))),
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AlbumPayload {
    /// Title, year, artist and photoUrl must all be present. Which of them
    /// is missing is not reported. A score, when sent, must not be empty.
    pub fn validate(self) -> Result<ValidAlbum, ValidationError> {
        let (Some(title), Some(year), Some(artist), Some(photo_url)) = (
            required(self.title),
            self.year,
            required(self.artist),
            required(self.photo_url),
        ) else {
            return Err(ValidationError::MissingFields);
        };
        if self.score.as_ref().is_some_and(|score| score.is_empty()) {
            return Err(ValidationError::MissingFields);
        }
        Ok(ValidAlbum {
            title,
            year,
            artist,
            photo_url,
            score: self.score,
        })
    }
}

impl ValidAlbum {
    pub fn into_new_album(self) -> NewAlbum {
        NewAlbum {
            title: self.title,
            year: self.year,
            artist: self.artist,
            photo_url: self.photo_url,
            score: self.score.unwrap_or_else(|| DEFAULT_SCORE.to_vec()),
        }
    }

    pub fn into_changes(self) -> AlbumChanges {
        AlbumChanges {
            title: self.title,
            year: self.year,
            artist: self.artist,
            photo_url: self.photo_url,
            score: self.score,
        }
    }
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct ScorePayload {
    pub score: Option<f64>,
}

impl ScorePayload {
    /// Only an absent score is rejected; `0` is a score like any other.
    pub fn require(self) -> Result<f64, ValidationError> {
        self.score.ok_or(ValidationError::MissingScore)
    }
}

pub fn parse_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: serde_json::Value) -> AlbumPayload {
        serde_json::from_value(value).unwrap()
    }

    fn complete() -> serde_json::Value {
        json!({
            "title": "Album title",
            "year": 1900,
            "artist": "Artist of the album",
            "photoUrl": "www.google.com",
        })
    }

    #[test]
    fn complete_payload_passes() {
        let valid = payload(complete()).validate().unwrap();
        assert_eq!(valid.title, "Album title");
        assert_eq!(valid.photo_url, "www.google.com");
        assert_eq!(valid.score, None);
    }

    #[test]
    fn empty_body_fails() {
        assert_eq!(
            payload(json!({})).validate(),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn each_required_field_is_checked() {
        for field in ["title", "year", "artist", "photoUrl"] {
            let mut body = complete();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(
                payload(body).validate(),
                Err(ValidationError::MissingFields),
                "{field} was not required"
            );
        }
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let mut body = complete();
        body["artist"] = json!("   ");
        assert_eq!(
            payload(body).validate(),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn strings_are_trimmed() {
        let mut body = complete();
        body["title"] = json!("  Album title ");
        assert_eq!(payload(body).validate().unwrap().title, "Album title");
    }

    #[test]
    fn fractional_and_textual_years_are_numbers() {
        let mut body = complete();
        body["year"] = json!(1999.5);
        assert_eq!(payload(body.clone()).validate().unwrap().year, 1999.5);

        body["year"] = json!(" 1999 ");
        assert_eq!(payload(body.clone()).validate().unwrap().year, 1999.0);

        body["year"] = json!("");
        assert_eq!(
            payload(body).validate(),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn non_numeric_year_does_not_parse() {
        let mut body = complete();
        body["year"] = json!("nineteen");
        assert!(serde_json::from_value::<AlbumPayload>(body.clone()).is_err());

        body["year"] = json!("inf");
        assert!(serde_json::from_value::<AlbumPayload>(body).is_err());
    }

    #[test]
    fn empty_score_is_rejected() {
        let mut body = complete();
        body["score"] = json!([]);
        assert_eq!(
            payload(body).validate(),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn new_album_defaults_score() {
        let album = payload(complete()).validate().unwrap().into_new_album();
        assert_eq!(album.score, vec![0.0]);
    }

    #[test]
    fn zero_score_is_present() {
        let score: ScorePayload = serde_json::from_value(json!({ "score": 0 })).unwrap();
        assert_eq!(score.require(), Ok(0.0));

        let missing: ScorePayload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.require(), Err(ValidationError::MissingScore));
    }

    #[test]
    fn ids_must_be_uuids() {
        assert!(parse_id("14fc517ca659338c884ec670").is_err());
        assert!(parse_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    }
}
