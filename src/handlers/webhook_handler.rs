//! handlers/webhook_handler.rs

use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::Value;

use crate::handlers::error_response;
use crate::models::webhook_model::{
    CreateWebhookRequest, CreateWebhookResponse, SendWebhookResponse, WebhookStatsResponse,
};
use crate::services::webhook_service::{
    curl_example, WebhookError, WebhookManager, WEBHOOK_NOT_FOUND,
};

/// GET /api/webhooks
pub async fn list_webhooks_endpoint(manager: web::Data<WebhookManager>) -> HttpResponse {
    HttpResponse::Ok().json(WebhookStatsResponse {
        webhooks: manager.get_webhook_stats().await,
        usage: manager.usage().await,
    })
}

/// POST /api/webhooks
pub async fn create_webhook_endpoint(
    manager: web::Data<WebhookManager>,
    body: web::Json<CreateWebhookRequest>,
) -> HttpResponse {
    let req = body.into_inner();

    match manager.create_webhook(&req.name, &req.workflow_id).await {
        Ok(url) => HttpResponse::Ok().json(CreateWebhookResponse {
            success: true,
            curl_example: curl_example(&url),
            url,
        }),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}

/// GET /api/webhooks/{name}
pub async fn get_webhook_endpoint(
    manager: web::Data<WebhookManager>,
    path: web::Path<String>,
) -> HttpResponse {
    match manager.get_webhook(&path.into_inner()).await {
        Some(webhook) => HttpResponse::Ok().json(webhook),
        None => error_response(StatusCode::NOT_FOUND, WEBHOOK_NOT_FOUND),
    }
}

/// POST /api/webhooks/{name}/send
/// El body (cualquier JSON) se reenvía tal cual a la URL del webhook.
pub async fn send_webhook_endpoint(
    manager: web::Data<WebhookManager>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let name = path.into_inner();

    match manager.send_webhook_data(&name, &body.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(SendWebhookResponse {
            success: true,
            response: Some(response),
            error: None,
        }),
        Err(e) => {
            let status_code = match e.downcast_ref::<WebhookError>() {
                Some(WebhookError::NotFound(_)) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            };
            log::error!("(send_webhook) '{}': {:#}", name, e);
            HttpResponse::build(status_code).json(SendWebhookResponse {
                success: false,
                response: None,
                error: Some(format!("{:#}", e)),
            })
        }
    }
}
