//! models/webhook_model.rs
//! Registro de webhooks (solo en memoria).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRegistration {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub workflow_id: String,
    pub calls: u64,
    pub created_at: DateTime<Utc>,
}

/// Body de POST /api/webhooks
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebhookRequest {
    pub name: String,
    pub workflow_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateWebhookResponse {
    pub success: bool,
    pub url: String,
    /// Comando listo para copiar y probar el webhook
    pub curl_example: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookUsage {
    pub name: String,
    pub calls: u64,
}

/// Respuesta de GET /api/webhooks
#[derive(Debug, Clone, Serialize)]
pub struct WebhookStatsResponse {
    pub webhooks: Vec<WebhookRegistration>,
    pub usage: Vec<WebhookUsage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendWebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
