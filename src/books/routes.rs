use axum::{
    routing::get,
    Router,
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/books",
            get(handler::list_books)
                .post(handler::create_book)
                .head(handler::head_books)
                .options(handler::books_options),
        )
        .route(
            "/books/:id",
            get(handler::get_book)
                .put(handler::replace_book)
                .patch(handler::patch_book)
                .delete(handler::delete_book),
        )
}
