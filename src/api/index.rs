//! Manual discovery trigger

use actix_web::{http::header, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use super::AppState;

/// start a run in the background and acknowledge immediately
#[post("/api/index")]
pub async fn trigger_index(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    if !authorized(&req, state.admin_token.as_deref()) {
        tracing::warn!("Rejected unauthorized index trigger");
        return HttpResponse::Unauthorized().json(json!({ "error": "Unauthorized" }));
    }

    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        pipeline.run().await;
    });

    tracing::info!("Manual discovery run scheduled");
    HttpResponse::Ok().json(json!({ "message": "Discovery process initiated in background." }))
}

/// Bearer-token gate; open when no token is configured
fn authorized(req: &HttpRequest, token: Option<&str>) -> bool {
    let Some(expected) = token else {
        return true;
    };

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|given| given.trim() == expected)
        .unwrap_or(false)
}

/// configure trigger route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(trigger_index);
}
