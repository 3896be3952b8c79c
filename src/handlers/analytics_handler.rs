//! handlers/analytics_handler.rs

use actix_web::{http::StatusCode, web, HttpResponse};

use crate::handlers::error_response;
use crate::services::analytics_service::AnalyticsService;

/// GET /api/analytics/automations
pub async fn automation_analytics_endpoint(analytics: web::Data<AnalyticsService>) -> HttpResponse {
    match analytics.automation_analytics() {
        Ok(Some(report)) => HttpResponse::Ok().json(report),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "No automation logs available. Run some workflows to see analytics!",
        ),
        Err(e) => {
            log::error!("(automation_analytics) {:?}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e))
        }
    }
}
