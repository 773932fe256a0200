//! Content-Type validation middleware.
//!
//! # Design Decisions
//! - GET and DELETE carry no body and skip the check
//! - Every other method must declare `application/json`
//! - Media type parameters (e.g. `charset`) are accepted and ignored
//! - Unparseable header → 400, wrong media type → 415

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::http::error::ApiError;

/// The only media type accepted on write requests.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Reasons a `Content-Type` value cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaTypeError {
    #[error("mime: no media type")]
    Empty,

    #[error("mime: expected token after slash")]
    MissingSubtype,

    #[error("mime: invalid media type {0:?}")]
    InvalidToken(String),

    #[error("mime: invalid media parameter {0:?}")]
    InvalidParameter(String),

    #[error("mime: header value is not valid text")]
    NotText,
}

/// Parse the media type portion of a `Content-Type` value.
///
/// Returns the lowercased `type/subtype`. Parameters must be well formed
/// `token=(token|quoted-string)` pairs but are otherwise discarded.
pub fn parse_media_type(value: &str) -> Result<String, MediaTypeError> {
    let (base, params) = value.split_at(value.find(';').unwrap_or(value.len()));
    let base = base.trim();
    if base.is_empty() {
        return Err(MediaTypeError::Empty);
    }

    match base.split_once('/') {
        Some((ty, subtype)) => {
            if subtype.is_empty() {
                return Err(MediaTypeError::MissingSubtype);
            }
            if !is_token(ty) || !is_token(subtype) {
                return Err(MediaTypeError::InvalidToken(base.to_string()));
            }
        }
        None if !is_token(base) => return Err(MediaTypeError::InvalidToken(base.to_string())),
        None => {}
    }

    check_params(params)?;
    Ok(base.to_ascii_lowercase())
}

/// Walk `; key=value` pairs. A single trailing `;` is tolerated.
fn check_params(mut rest: &str) -> Result<(), MediaTypeError> {
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Ok(());
        }
        let param = rest
            .strip_prefix(';')
            .ok_or_else(|| MediaTypeError::InvalidParameter(rest.to_string()))?
            .trim_start();
        if param.is_empty() {
            return Ok(());
        }
        rest = consume_param(param)?;
    }
}

/// Consume one `key=value` pair, returning what follows it.
fn consume_param(param: &str) -> Result<&str, MediaTypeError> {
    let invalid = || MediaTypeError::InvalidParameter(param.to_string());

    let key_len = token_len(param);
    if key_len == 0 {
        return Err(invalid());
    }
    let value = param[key_len..]
        .trim_start()
        .strip_prefix('=')
        .ok_or_else(invalid)?
        .trim_start();

    match value.strip_prefix('"') {
        Some(quoted) => {
            let mut escaped = false;
            for (i, c) in quoted.char_indices() {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => return Ok(&quoted[i + 1..]),
                    _ => {}
                }
            }
            Err(invalid())
        }
        None => {
            let value_len = token_len(value);
            if value_len == 0 {
                return Err(invalid());
            }
            Ok(&value[value_len..])
        }
    }
}

/// RFC 7230 token characters.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_byte)
}

/// Length of the leading run of token bytes (all ASCII, so a valid char boundary).
fn token_len(s: &str) -> usize {
    s.bytes().take_while(|b| is_token_byte(*b)).count()
}

fn requires_json_body(method: &Method) -> bool {
    method != Method::GET && method != Method::DELETE
}

/// Reject write requests whose body is not declared as JSON.
pub async fn validate_content_type(req: Request<Body>, next: Next) -> Response {
    if !requires_json_body(req.method()) {
        return next.run(req).await;
    }

    let media_type = match req.headers().get(CONTENT_TYPE) {
        None => Err(MediaTypeError::Empty),
        Some(value) => value
            .to_str()
            .map_err(|_| MediaTypeError::NotText)
            .and_then(parse_media_type),
    };

    match media_type {
        Ok(media_type) if media_type == JSON_MEDIA_TYPE => next.run(req).await,
        Ok(media_type) => {
            tracing::debug!(media_type = %media_type, "Rejected non-JSON request body");
            ApiError::InvalidContentType(media_type).into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable Content-Type");
            ApiError::UnparseableContentType(e).into_response()
        }
    }
}
