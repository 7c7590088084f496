//! Books Module
//!
//! CRUD over the book catalog: a single `books` table exposed as a REST
//! resource with full (`PUT`) and partial (`PATCH`) updates.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookcase::books;
//!
//! // Get the migrations to run
//! for (name, sql) in books::migrations() {
//!     // Run migration...
//! }
//!
//! // Mount the routes
//! let app = Router::new()
//!     .nest("/api", books::routes())
//!     .with_state(app_state);
//! ```

mod handler;
mod routes;
mod store;

pub use routes::routes;
pub use store::{Book, BookPatch, BookStore, NewBook};

/// Returns the migrations for the books module, applied during startup.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "books/001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
