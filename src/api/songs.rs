//! Catalog read routes
//!
//! Stored JSON is served as-is; these handlers do no business logic.

use actix_web::{get, http::header::ContentType, web, HttpResponse, Responder};
use serde_json::json;

use super::AppState;
use crate::stores::{CATALOG_KEY, REPORT_KEY};

/// the last published catalog, or `[]`
#[get("/api/songs")]
pub async fn get_songs(state: web::Data<AppState>) -> impl Responder {
    read_key(&state, CATALOG_KEY, "[]").await
}

/// the last run report, or `{}`
#[get("/api/report")]
pub async fn get_report(state: web::Data<AppState>) -> impl Responder {
    read_key(&state, REPORT_KEY, "{}").await
}

async fn read_key(state: &AppState, key: &str, empty: &'static str) -> HttpResponse {
    match state.store.get(key).await {
        Ok(Some(raw)) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(raw),
        Ok(None) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(empty),
        Err(e) => {
            tracing::error!("Failed to read '{}': {}", key, e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// configure read routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_songs).service(get_report);
}
