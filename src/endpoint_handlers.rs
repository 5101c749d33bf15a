use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use entities::album::Album;
use log::info;

use crate::app::DatabaseState;
use crate::error::ApiError;
use crate::responses::{ApiResponse, Reply};
use crate::validation::{parse_id, AlbumPayload, ScorePayload};

const NO_MODIFICATIONS: &str = "No modifications have been made to the document.";

pub async fn get_albums(State(state): State<DatabaseState>) -> Reply<Vec<Album>> {
    let albums = state.store.find_all().await?;
    if albums.is_empty() {
        return Err(ApiError::NoDocuments);
    }
    ApiResponse::from_data(albums).with_status(StatusCode::OK)
}

pub async fn get_album(
    State(state): State<DatabaseState>,
    Path(raw_id): Path<String>,
) -> Reply<Album> {
    let id = parse_id(&raw_id)?;
    let album = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(raw_id))?;
    ApiResponse::from_data(album).with_status(StatusCode::OK)
}

// A body that is missing or not JSON at all reaches validation as an empty payload.
pub async fn add_album(
    State(state): State<DatabaseState>,
    payload: Option<Json<AlbumPayload>>,
) -> Reply<Album> {
    let Json(payload) = payload.unwrap_or_default();
    let album = payload.validate()?.into_new_album();

    let created = state.store.insert(album).await?;
    info!("Created album {} ({} - {})", created.id, created.artist, created.title);
    ApiResponse::from_data(created).with_status(StatusCode::CREATED)
}

pub async fn update_album(
    State(state): State<DatabaseState>,
    Path(raw_id): Path<String>,
    payload: Option<Json<AlbumPayload>>,
) -> Reply<Album> {
    let Json(payload) = payload.unwrap_or_default();
    let changes = payload.validate()?.into_changes();
    let id = parse_id(&raw_id)?;

    let existing = state
        .store
        .find_fields(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(raw_id.to_owned()))?;
    if existing.matches(&changes) {
        return ApiResponse::from_message(NO_MODIFICATIONS.to_string())
            .with_status(StatusCode::OK);
    }

    // The album can still disappear between the read above and this write.
    let updated = state
        .store
        .update_by_id(id, changes)
        .await?
        .ok_or(ApiError::NotFound(raw_id))?;
    info!("Updated album {}", updated.id);
    ApiResponse::from_data(updated).with_status(StatusCode::OK)
}

pub async fn delete_album(
    State(state): State<DatabaseState>,
    Path(raw_id): Path<String>,
) -> Reply<()> {
    let id = parse_id(&raw_id)?;
    if state.store.delete_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound(raw_id));
    }
    info!("Deleted album {}", id);
    ApiResponse::from_message(format!(
        "The document with ID {} has been successfully deleted.",
        raw_id
    ))
    .with_status(StatusCode::OK)
}

pub async fn update_album_score(
    State(state): State<DatabaseState>,
    Path(raw_id): Path<String>,
    payload: Option<Json<ScorePayload>>,
) -> Reply<Album> {
    let Json(payload) = payload.unwrap_or_default();
    let score = payload.require()?;
    let id = parse_id(&raw_id)?;

    let mut scores = state
        .store
        .find_score(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(raw_id.to_owned()))?;
    scores.push(score);

    let updated = state
        .store
        .update_score(id, scores)
        .await?
        .ok_or(ApiError::NotFound(raw_id))?;
    info!("Album {} scored {}", updated.id, score);
    ApiResponse::from_data(updated).with_status(StatusCode::OK)
}
