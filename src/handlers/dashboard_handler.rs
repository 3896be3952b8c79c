//! handlers/dashboard_handler.rs
//! Páginas del dashboard (datos de muestra) y settings.

use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::json;

use crate::handlers::error_response;
use crate::models::dashboard_model::DashboardSettings;
use crate::services::dashboard_service::DashboardService;

/// GET /api/dashboard/sidebar
pub async fn sidebar_endpoint(dashboard: web::Data<DashboardService>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "quick_stats": dashboard.sidebar_stats() }))
}

/// GET /api/dashboard/overview
pub async fn overview_endpoint(dashboard: web::Data<DashboardService>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.overview())
}

/// GET /api/dashboard/business-analytics
pub async fn business_analytics_endpoint(dashboard: web::Data<DashboardService>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.business_analytics())
}

/// GET /api/dashboard/automations
pub async fn automations_endpoint(dashboard: web::Data<DashboardService>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.automations())
}

/// POST /api/dashboard/automations/actions/{action}
pub async fn quick_action_endpoint(
    dashboard: web::Data<DashboardService>,
    path: web::Path<String>,
) -> HttpResponse {
    match dashboard.quick_action(&path.into_inner()) {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => error_response(StatusCode::NOT_FOUND, e),
    }
}

/// GET /api/dashboard/clients
pub async fn clients_endpoint(dashboard: web::Data<DashboardService>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.clients())
}

/// GET /api/dashboard/growth
pub async fn growth_endpoint(dashboard: web::Data<DashboardService>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.growth())
}

/// GET /api/dashboard/workflow-status
pub async fn workflow_status_endpoint(dashboard: web::Data<DashboardService>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.workflow_status())
}

/// GET /api/settings
pub async fn get_settings_endpoint(dashboard: web::Data<DashboardService>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.get_settings().await)
}

/// PUT /api/settings
pub async fn update_settings_endpoint(
    dashboard: web::Data<DashboardService>,
    body: web::Json<DashboardSettings>,
) -> HttpResponse {
    match dashboard.update_settings(body.into_inner()).await {
        Ok(settings) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Settings saved successfully!",
            "settings": settings
        })),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}
