use std::sync::Arc;

use axum::{response::IntoResponse, Json};
use tracing::info;

use crate::api::ApiResponse;
use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(ApiResponse::message_only("ok"))
}
