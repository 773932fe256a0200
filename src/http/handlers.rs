//! Book route handlers.
//!
//! Each handler decodes the request, calls the storage provider, and encodes
//! the result. Failures become `ApiError`s.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::middleware::content_type::JSON_MEDIA_TYPE;
use crate::http::server::AppState;
use crate::store::Book;

/// `POST /book`
pub async fn create_book(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let book = decode_book(&body)?;
    state.store.create(&book)?;
    Ok("create ok")
}

/// `POST /book/{id}`: the path id wins over any id in the body.
pub async fn update_book(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let id = require_id(id)?;
    let mut book = decode_book(&body)?;
    book.id = id;
    state.store.update(&book)?;
    Ok("update ok")
}

/// `GET /book/{id}`
pub async fn get_book(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let id = require_id(id)?;
    let book = state.store.get(&id)?;
    json_response(&book)
}

/// `GET /book`
pub async fn get_all_books(State(state): State<AppState>) -> Result<Response, ApiError> {
    let books = state.store.get_all()?;
    json_response(&books)
}

/// `DELETE /book/{id}`
pub async fn delete_book(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<&'static str, ApiError> {
    let id = require_id(id)?;
    state.store.delete(&id)?;
    Ok("delete ok")
}

fn require_id(id: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    match id {
        Ok(Path(id)) if !id.is_empty() => Ok(id),
        _ => Err(ApiError::MissingId),
    }
}

fn decode_book(body: &[u8]) -> Result<Book, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::Decode)
}

fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(ApiError::Encode)?;
    Ok(([(CONTENT_TYPE, JSON_MEDIA_TYPE)], body).into_response())
}
