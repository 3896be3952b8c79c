//! services/webhook_service.rs
//! Registro en memoria de webhooks + envío directo por POST.
//! Se pierde al reiniciar el proceso. No hay firma ni protección contra replays.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::app_config::AppConfig;
use crate::models::webhook_model::{WebhookRegistration, WebhookUsage};

pub const WEBHOOK_NOT_FOUND: &str = "Webhook not found";

/// Errores propios del envío, para distinguir "no registrado" de "falló la entrega".
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Webhook not found: {0}")]
    NotFound(String),
    #[error("Webhook target responded {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Los nombres se guardan y se buscan sin espacios alrededor.
fn registry_key(name: &str) -> &str {
    name.trim()
}

#[derive(Clone, Debug)]
pub struct WebhookManager {
    webhook_base_url: String,
    active_webhooks: Arc<RwLock<BTreeMap<String, WebhookRegistration>>>,
    http_client: Client,
}

impl WebhookManager {
    pub fn new(webhook_base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Could not build the webhook HTTP client")?;

        Ok(Self {
            webhook_base_url: webhook_base_url.trim_end_matches('/').to_string(),
            active_webhooks: Arc::new(RwLock::new(BTreeMap::new())),
            http_client,
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Self::new(
            &cfg.webhook_base_url,
            Duration::from_secs(cfg.http_timeout_secs),
        )
    }

    /// Registra el webhook y devuelve su URL. Un nombre repetido pisa al anterior.
    pub async fn create_webhook(&self, name: &str, workflow_id: &str) -> Result<String> {
        let name = registry_key(name);
        if name.is_empty() {
            return Err(anyhow!("Webhook name must not be empty"));
        }

        let url = format!("{}/{}", self.webhook_base_url, urlencoding::encode(name));
        let registration = WebhookRegistration {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: url.clone(),
            workflow_id: workflow_id.to_string(),
            calls: 0,
            created_at: Utc::now(),
        };

        let mut webhooks = self.active_webhooks.write().await;
        if webhooks.insert(name.to_string(), registration).is_some() {
            log::warn!("(create_webhook) '{}' ya existía, se reemplaza", name);
        }
        log::info!("(create_webhook) '{}' -> {} (workflow={})", name, url, workflow_id);

        Ok(url)
    }

    pub async fn get_webhook(&self, name: &str) -> Option<WebhookRegistration> {
        self.active_webhooks
            .read()
            .await
            .get(registry_key(name))
            .cloned()
    }

    /// POST del JSON a la URL registrada. Cada request completado suma una llamada.
    /// Un nombre no registrado devuelve `WebhookError::NotFound`.
    pub async fn send_webhook_data(&self, name: &str, data: &Value) -> Result<Value> {
        let name = registry_key(name);
        let url = {
            let webhooks = self.active_webhooks.read().await;
            webhooks
                .get(name)
                .map(|w| w.url.clone())
                .ok_or_else(|| WebhookError::NotFound(name.to_string()))?
        };

        log::info!("(send_webhook_data) POST {}", url);
        let resp = self
            .http_client
            .post(&url)
            .json(data)
            .send()
            .await
            .with_context(|| format!("Failed to deliver data to webhook '{}'", name))?;

        if let Some(webhook) = self.active_webhooks.write().await.get_mut(name) {
            webhook.calls += 1;
        }

        let status = resp.status();
        let body_txt = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            log::error!("(send_webhook_data) '{}' respondió {}: {}", name, status, body_txt);
            return Err(WebhookError::Rejected {
                status: status.as_u16(),
                body: body_txt,
            }
            .into());
        }

        Ok(serde_json::from_str(&body_txt).unwrap_or(Value::String(body_txt)))
    }

    /// Todas las registraciones, ordenadas por nombre.
    pub async fn get_webhook_stats(&self) -> Vec<WebhookRegistration> {
        self.active_webhooks.read().await.values().cloned().collect()
    }

    pub async fn usage(&self) -> Vec<WebhookUsage> {
        self.active_webhooks
            .read()
            .await
            .values()
            .map(|w| WebhookUsage {
                name: w.name.clone(),
                calls: w.calls,
            })
            .collect()
    }
}

/// Comando curl para probar un webhook recién creado
pub fn curl_example(url: &str) -> String {
    format!(
        "curl -X POST {} -H 'Content-Type: application/json' -d '{{\"data\": \"your_data\"}}'",
        url
    )
}
