//! services/n8n_service.rs
//! Cliente delgado de la API REST de n8n. Cada operación es un único request,
//! sin reintentos ni validación del esquema de la respuesta.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde_json::{json, Value};

use crate::config::app_config::AppConfig;

pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";
const DEMO_API_KEY: &str = "demo-api-key";

#[derive(Clone, Debug)]
pub struct N8nAgent {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl N8nAgent {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Could not build the n8n HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.unwrap_or_else(|| DEMO_API_KEY.to_string()),
            http_client,
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Self::new(
            &cfg.n8n_base_url,
            cfg.n8n_api_key.clone(),
            Duration::from_secs(cfg.http_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /api/v1/workflows
    pub async fn create_workflow(&self, definition: &Value) -> Result<Value> {
        let url = format!("{}/api/v1/workflows", self.base_url);
        log::info!("(create_workflow) POST {}", url);
        self.send(self.http_client.post(&url).json(definition))
            .await
            .context("Failed to create workflow in n8n")
    }

    /// POST /api/v1/workflows/{id}/execute
    /// Body `{"input": ...}` si hay input, `{}` si no.
    pub async fn execute_workflow(&self, workflow_id: &str, input: Option<Value>) -> Result<Value> {
        let url = format!("{}/api/v1/workflows/{}/execute", self.base_url, workflow_id);
        let payload = match input {
            Some(input) => json!({ "input": input }),
            None => json!({}),
        };
        log::info!("(execute_workflow) POST {}", url);
        self.send(self.http_client.post(&url).json(&payload))
            .await
            .with_context(|| format!("Failed to execute workflow {}", workflow_id))
    }

    /// GET /api/v1/executions/{id}
    pub async fn get_execution_status(&self, execution_id: &str) -> Result<Value> {
        let url = format!("{}/api/v1/executions/{}", self.base_url, execution_id);
        log::info!("(get_execution_status) GET {}", url);
        self.send(self.http_client.get(&url))
            .await
            .with_context(|| format!("Failed to fetch execution {}", execution_id))
    }

    /// GET /api/v1/workflows
    pub async fn list_workflows(&self) -> Result<Value> {
        let url = format!("{}/api/v1/workflows", self.base_url);
        log::info!("(list_workflows) GET {}", url);
        self.send(self.http_client.get(&url))
            .await
            .context("Failed to list workflows")
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value> {
        let resp = builder
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .context("Could not reach the n8n server")?;

        let status = resp.status();
        let body_txt = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            log::error!("(n8n) Respuesta no exitosa status={} body='{}'", status, body_txt);
            return Err(anyhow!("n8n responded {}: {}", status, body_txt));
        }

        if body_txt.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body_txt).context("n8n response is not valid JSON")
    }
}
