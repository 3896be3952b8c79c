//! handlers/mod.rs
//! Módulo que agrupa los distintos handlers (dashboard, workflows, webhooks, CSV, analytics).

pub mod analytics_handler;
pub mod csv_handler;
pub mod dashboard_handler;
pub mod webhook_handler;
pub mod workflow_handler;

use actix_web::{error::InternalError, http::StatusCode, web, HttpResponse, ResponseError};
use serde_json::json;

/// Límite de los bodies JSON
const JSON_LIMIT_BYTES: usize = 10 * 1024 * 1024; // 10 MB

/// Respuesta de error uniforme: `{"success": false, "error": "..."}`
pub fn error_response(status: StatusCode, error: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "success": false,
        "error": error.to_string()
    }))
}

/// GET /api/health
pub async fn health_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Extractor JSON con límite y errores en el mismo formato que el resto de la API.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            log::warn!("(json) Body rechazado: {}", err);
            let resp = error_response(err.status_code(), format!("Invalid JSON body: {}", err));
            InternalError::from_response(err, resp).into()
        })
}
