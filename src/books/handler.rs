use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::store::{BookPatch, BookStore, NewBook};
use crate::api::{created, success, success_message};
use crate::error::AppError;
use crate::handler::AppState;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS";

/// Incoming body for create and full replace. Fields are optional at the
/// wire level so a missing field is a validation error, not a decode error.
#[derive(Debug, Deserialize)]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
}

impl BookPayload {
    fn validate(self) -> Result<NewBook, AppError> {
        let title = match self.title {
            Some(title) if !title.is_empty() => title,
            _ => {
                return Err(AppError::Validation(
                    "title and author are required".to_string(),
                ))
            }
        };
        let author = match self.author {
            Some(author) if !author.is_empty() => author,
            _ => {
                return Err(AppError::Validation(
                    "title and author are required".to_string(),
                ))
            }
        };

        Ok(NewBook {
            title,
            author,
            published_date: self.published_date,
            description: self.description,
        })
    }
}

fn validate_patch(patch: BookPatch) -> Result<BookPatch, AppError> {
    if patch.is_empty() {
        return Err(AppError::Validation(
            "no updatable field supplied".to_string(),
        ));
    }
    if matches!(&patch.title, Some(title) if title.is_empty()) {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    if matches!(&patch.author, Some(author) if author.is_empty()) {
        return Err(AppError::Validation("author must not be empty".to_string()));
    }
    Ok(patch)
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("invalid book id: {raw}")))
}

pub async fn list_books(State(state): State<AppState>) -> Result<Response, AppError> {
    let books = BookStore::new(state.db.connection()).list().await?;
    Ok(success("book list retrieved", books))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let book = BookStore::new(state.db.connection())
        .get(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(success("book retrieved", book))
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<BookPayload>,
) -> Result<Response, AppError> {
    let input = payload.validate()?;
    let book = BookStore::new(state.db.connection()).create(input).await?;
    tracing::info!(id = book.id, "book created");
    Ok(created("book created", book))
}

pub async fn replace_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BookPayload>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let input = payload.validate()?;
    let book = BookStore::new(state.db.connection())
        .replace(id, input)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(id, "book replaced");
    Ok(success("book updated", book))
}

pub async fn patch_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BookPatch>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let patch = validate_patch(payload)?;
    let book = BookStore::new(state.db.connection())
        .patch(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(id, "book patched");
    Ok(success("book updated", book))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let deleted = BookStore::new(state.db.connection()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    tracing::info!(id, "book deleted");
    Ok(success_message("book deleted"))
}

pub async fn head_books() -> StatusCode {
    StatusCode::OK
}

pub async fn books_options() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, [(header::ALLOW, ALLOWED_METHODS)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: Option<&str>, author: Option<&str>) -> BookPayload {
        BookPayload {
            title: title.map(String::from),
            author: author.map(String::from),
            published_date: None,
            description: None,
        }
    }

    #[test]
    fn payload_with_both_fields_is_valid() {
        let input = payload(Some("Dune"), Some("Herbert")).validate().unwrap();
        assert_eq!(input.title, "Dune");
        assert_eq!(input.author, "Herbert");
    }

    #[test]
    fn payload_missing_author_is_rejected() {
        assert!(payload(Some("Dune"), None).validate().is_err());
    }

    #[test]
    fn payload_with_empty_title_is_rejected() {
        assert!(payload(Some(""), Some("Herbert")).validate().is_err());
    }

    #[test]
    fn literal_zero_string_is_a_valid_value() {
        let input = payload(Some("0"), Some("0")).validate().unwrap();
        assert_eq!(input.title, "0");
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(validate_patch(BookPatch::default()).is_err());
    }

    #[test]
    fn patch_with_empty_title_is_rejected() {
        let patch = BookPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_patch(patch).is_err());
    }

    #[test]
    fn patch_with_one_field_is_valid() {
        let patch = BookPatch {
            description: Some("desert planet".to_string()),
            ..Default::default()
        };
        assert!(validate_patch(patch).is_ok());
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(parse_id("abc").is_err());
        assert_eq!(parse_id("12").unwrap(), 12);
    }
}
