//! handlers/workflow_handler.rs
//! Endpoints de workflows: plantillas pre-armadas y proxy hacia n8n.

use std::time::Instant;

use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::Value;
use uuid::Uuid;

use crate::handlers::error_response;
use crate::models::automation_model::{
    AutomationResult, ExecuteWorkflowRequest, WorkflowTestResponse,
};
use crate::services::analytics_service::AnalyticsService;
use crate::services::n8n_service::N8nAgent;
use crate::services::workflow_templates;

fn automation_response(result: AutomationResult) -> HttpResponse {
    if result.success {
        HttpResponse::Ok().json(result)
    } else {
        HttpResponse::BadGateway().json(result)
    }
}

/// GET /api/workflows/templates
pub async fn list_templates_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(workflow_templates::list_templates())
}

/// GET /api/workflows/templates/{key}
pub async fn get_template_endpoint(path: web::Path<String>) -> HttpResponse {
    let key = path.into_inner();
    match workflow_templates::get_template(&key) {
        Some(def) => HttpResponse::Ok().json(def),
        None => error_response(StatusCode::NOT_FOUND, format!("Template not found: {}", key)),
    }
}

/// POST /api/workflows/templates/{key}/deploy
pub async fn deploy_template_endpoint(
    agent: web::Data<N8nAgent>,
    path: web::Path<String>,
) -> HttpResponse {
    let key = path.into_inner();
    let def = match workflow_templates::get_template(&key) {
        Some(def) => def,
        None => {
            return error_response(StatusCode::NOT_FOUND, format!("Template not found: {}", key))
        }
    };

    let name = workflow_templates::template_name(&def).to_string();
    let result: AutomationResult = agent.create_workflow(&def).await.into();
    if result.success {
        log::info!("(deploy_template) '{}' desplegado", name);
    } else {
        log::error!("(deploy_template) Falló despliegue de '{}': {:?}", name, result.error);
    }
    automation_response(result)
}

/// POST /api/workflows/templates/{key}/test
/// Prueba en seco: valida la estructura sin llamar a n8n.
pub async fn test_template_endpoint(path: web::Path<String>) -> HttpResponse {
    let key = path.into_inner();
    let def = match workflow_templates::get_template(&key) {
        Some(def) => def,
        None => {
            return error_response(StatusCode::NOT_FOUND, format!("Template not found: {}", key))
        }
    };
    let name = workflow_templates::template_name(&def).to_string();

    match workflow_templates::validate_definition(&def) {
        Ok(nodes_checked) => HttpResponse::Ok().json(WorkflowTestResponse {
            success: true,
            test_id: Uuid::new_v4().to_string(),
            message: format!("{} test completed!", name),
            workflow: name,
            nodes_checked,
        }),
        Err(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, e),
    }
}

/// GET /api/workflows
pub async fn list_workflows_endpoint(agent: web::Data<N8nAgent>) -> HttpResponse {
    automation_response(agent.list_workflows().await.into())
}

/// POST /api/workflows (definición libre)
pub async fn create_workflow_endpoint(
    agent: web::Data<N8nAgent>,
    body: web::Json<Value>,
) -> HttpResponse {
    let def = body.into_inner();
    if !def.is_object() {
        return error_response(StatusCode::BAD_REQUEST, "Workflow definition must be a JSON object");
    }
    automation_response(agent.create_workflow(&def).await.into())
}

/// POST /api/workflows/{id}/execute
/// El body es opcional. Cada ejecución queda registrada en automation_logs.csv.
pub async fn execute_workflow_endpoint(
    agent: web::Data<N8nAgent>,
    analytics: web::Data<AnalyticsService>,
    path: web::Path<String>,
    body: Option<web::Json<ExecuteWorkflowRequest>>,
) -> HttpResponse {
    let workflow_id = path.into_inner();
    let req = body.map(|b| b.into_inner()).unwrap_or_default();
    let log_name = req.workflow_name.clone().unwrap_or_else(|| workflow_id.clone());

    let start = Instant::now();
    let result: AutomationResult = agent.execute_workflow(&workflow_id, req.input).await.into();
    let elapsed = start.elapsed().as_secs_f64();

    if let Err(e) = analytics.record_execution(&log_name, result.success, elapsed) {
        log::error!("(execute_workflow) No se pudo registrar la ejecución: {:?}", e);
    }
    automation_response(result)
}

/// GET /api/executions/{id}
pub async fn execution_status_endpoint(
    agent: web::Data<N8nAgent>,
    path: web::Path<String>,
) -> HttpResponse {
    let execution_id = path.into_inner();
    automation_response(agent.get_execution_status(&execution_id).await.into())
}

