//! models/automation_model.rs
//! Requests/responses de los workflows de n8n.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resultado genérico de una llamada al servidor de automatización:
/// `{success: true, data}` o `{success: false, error}`.
#[derive(Debug, Clone, Serialize)]
pub struct AutomationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AutomationResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl From<anyhow::Result<Value>> for AutomationResult {
    fn from(res: anyhow::Result<Value>) -> Self {
        match res {
            Ok(data) => AutomationResult::ok(data),
            Err(e) => AutomationResult::failed(format!("{:#}", e)),
        }
    }
}

/// Body opcional de POST /api/workflows/{id}/execute
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecuteWorkflowRequest {
    pub input: Option<Value>,
    /// Nombre para el log de ejecuciones; si no viene se usa el id
    pub workflow_name: Option<String>,
}

/// Resumen de una plantilla de workflow pre-armada
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowTemplateSummary {
    pub key: String,
    pub name: String,
    pub node_count: usize,
}

/// Respuesta de la prueba simulada de una plantilla
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowTestResponse {
    pub success: bool,
    pub test_id: String,
    pub workflow: String,
    pub nodes_checked: usize,
    pub message: String,
}
