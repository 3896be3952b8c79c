//! services/workflow_templates.rs
//! Workflows de n8n pre-armados para negocios de limpieza.

use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use crate::models::automation_model::WorkflowTemplateSummary;

pub const TEMPLATE_KEYS: [&str; 4] = [
    "lead-generation",
    "appointment-scheduler",
    "customer-follow-up",
    "invoice-generator",
];

pub fn get_template(key: &str) -> Option<Value> {
    match key {
        "lead-generation" => Some(lead_generation_workflow()),
        "appointment-scheduler" => Some(appointment_scheduling_workflow()),
        "customer-follow-up" => Some(customer_follow_up_workflow()),
        "invoice-generator" => Some(invoice_generation_workflow()),
        _ => None,
    }
}

pub fn list_templates() -> Vec<WorkflowTemplateSummary> {
    TEMPLATE_KEYS
        .iter()
        .filter_map(|key| {
            let def = get_template(key)?;
            Some(WorkflowTemplateSummary {
                key: key.to_string(),
                name: template_name(&def).to_string(),
                node_count: def["nodes"].as_array().map(Vec::len).unwrap_or(0),
            })
        })
        .collect()
}

pub fn template_name(definition: &Value) -> &str {
    definition["name"].as_str().unwrap_or("")
}

/// Chequeo estructural de una definición (usado por la prueba simulada).
/// Devuelve la cantidad de nodos revisados.
pub fn validate_definition(definition: &Value) -> Result<usize> {
    if template_name(definition).is_empty() {
        return Err(anyhow!("Workflow has no name"));
    }
    let nodes = definition["nodes"]
        .as_array()
        .ok_or_else(|| anyhow!("Workflow has no nodes"))?;
    if nodes.is_empty() {
        return Err(anyhow!("Workflow has no nodes"));
    }

    for (i, node) in nodes.iter().enumerate() {
        let name = node["name"].as_str().unwrap_or_default();
        let node_type = node["type"].as_str().unwrap_or_default();
        if name.is_empty() || !node_type.starts_with("n8n-nodes-base.") {
            return Err(anyhow!("Invalid node {}: name='{}' type='{}'", i, name, node_type));
        }
    }
    Ok(nodes.len())
}

pub fn lead_generation_workflow() -> Value {
    json!({
        "name": "Lead Generation Bot",
        "nodes": [
            {
                "name": "Webhook Trigger",
                "type": "n8n-nodes-base.webhook",
                "parameters": { "path": "lead-generation", "httpMethod": "POST" }
            },
            {
                "name": "Process Lead Data",
                "type": "n8n-nodes-base.function",
                "parameters": {
                    "functionCode": r#"
const leadData = items[0].json;
return [{
    json: {
        name: leadData.name,
        email: leadData.email,
        phone: leadData.phone,
        service_type: leadData.service_type,
        lead_source: leadData.lead_source,
        created_at: new Date().toISOString(),
        status: 'new'
    }
}];
"#
                }
            },
            {
                "name": "Save to CSV",
                "type": "n8n-nodes-base.csv",
                "parameters": { "operation": "write", "fileName": "leads.csv" }
            },
            {
                "name": "Send Welcome Email",
                "type": "n8n-nodes-base.emailSend",
                "parameters": {
                    "subject": "Welcome to Meticulous Quality Cleaning",
                    "text": "Thank you for your interest in our cleaning services!"
                }
            }
        ]
    })
}

pub fn appointment_scheduling_workflow() -> Value {
    json!({
        "name": "Appointment Scheduler",
        "nodes": [
            {
                "name": "Schedule Trigger",
                "type": "n8n-nodes-base.cron",
                "parameters": { "triggerTimes": { "hour": 9, "minute": 0 } }
            },
            {
                "name": "Load Pending Appointments",
                "type": "n8n-nodes-base.csv",
                "parameters": { "operation": "read", "fileName": "appointments.csv" }
            },
            {
                "name": "Send Reminders",
                "type": "n8n-nodes-base.function",
                "parameters": {
                    "functionCode": r#"
const appointments = items[0].json;
const tomorrow = new Date();
tomorrow.setDate(tomorrow.getDate() + 1);

return appointments.filter(apt =>
    new Date(apt.date).toDateString() === tomorrow.toDateString()
).map(apt => ({
    json: {
        client_email: apt.client_email,
        appointment_time: apt.time,
        service_type: apt.service_type
    }
}));
"#
                }
            }
        ]
    })
}

pub fn customer_follow_up_workflow() -> Value {
    json!({
        "name": "Customer Follow-up Assistant",
        "nodes": [
            {
                "name": "Daily Trigger",
                "type": "n8n-nodes-base.cron",
                "parameters": { "triggerTimes": { "hour": 10, "minute": 0 } }
            },
            {
                "name": "Load Completed Services",
                "type": "n8n-nodes-base.csv",
                "parameters": { "operation": "read", "fileName": "completed_services.csv" }
            },
            {
                "name": "Filter Recent Completions",
                "type": "n8n-nodes-base.function",
                "parameters": {
                    "functionCode": r#"
const services = items[0].json;
const threeDaysAgo = new Date();
threeDaysAgo.setDate(threeDaysAgo.getDate() - 3);

return services.filter(service =>
    new Date(service.completed_date) >= threeDaysAgo &&
    !service.follow_up_sent
).map(service => ({ json: service }));
"#
                }
            },
            {
                "name": "Send Follow-up Survey",
                "type": "n8n-nodes-base.emailSend",
                "parameters": {
                    "subject": "How was your cleaning service?",
                    "text": "We'd love to hear about your experience!"
                }
            }
        ]
    })
}

pub fn invoice_generation_workflow() -> Value {
    json!({
        "name": "Invoice Generator",
        "nodes": [
            {
                "name": "Monthly Trigger",
                "type": "n8n-nodes-base.cron",
                "parameters": { "triggerTimes": { "day": 1, "hour": 8, "minute": 0 } }
            },
            {
                "name": "Load Client Contracts",
                "type": "n8n-nodes-base.csv",
                "parameters": { "operation": "read", "fileName": "client_contracts.csv" }
            },
            {
                "name": "Generate Invoices",
                "type": "n8n-nodes-base.function",
                "parameters": {
                    "functionCode": r#"
const contracts = items[0].json;

return contracts.filter(contract =>
    contract.billing_cycle === 'monthly' &&
    contract.status === 'active'
).map(contract => ({
    json: {
        client_id: contract.client_id,
        amount: contract.monthly_amount,
        due_date: new Date(new Date().setDate(30)).toISOString(),
        invoice_number: `INV-${Date.now()}-${contract.client_id}`,
        created_at: new Date().toISOString()
    }
}));
"#
                }
            },
            {
                "name": "Save Invoices",
                "type": "n8n-nodes-base.csv",
                "parameters": { "operation": "write", "fileName": "invoices.csv" }
            }
        ]
    })
}
