use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::AppState;

/// Liveness plus a storage round-trip
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.repo.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "service": "catalog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unhealthy",
                "error": format!("Storage check failed: {}", e),
                "service": "catalog-service"
            }))
        }
    }
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "alive": true }))
}
