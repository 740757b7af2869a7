//! HTTP routes for Lyriverse
//!
//! Read access to the published catalog and report, plus the manual
//! discovery trigger. Every response carries permissive CORS headers.

pub mod index;
pub mod songs;

use actix_web::{http::Method, middleware::DefaultHeaders, web, HttpRequest, HttpResponse};
use serde_json::json;
use std::sync::Arc;

use crate::core::Pipeline;
use crate::stores::KvStore;

/// Shared handler state; one per process
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub pipeline: Pipeline,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, admin_token: Option<String>) -> Self {
        Self {
            store: pipeline.store(),
            pipeline,
            admin_token,
        }
    }
}

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Catalog and report
        .configure(songs::configure)
        // Manual trigger
        .configure(index::configure);
}

/// CORS headers attached to every response, errors included
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
}

/// Preflight for any path, JSON 404 for everything else
pub async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::NoContent().finish();
    }
    HttpResponse::NotFound().json(json!({ "error": "Not Found" }))
}
