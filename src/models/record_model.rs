//! models/record_model.rs
//! Registros planos que viven en los CSV (clientes, leads, logs de automatizaciones).
//! No hay unicidad ni relaciones entre ellos.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    pub monthly_amount: u32,
    pub status: String, // "active", "renewal", ...
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub lead_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    pub lead_source: String,
    pub status: String, // "new", "contacted", "quoted", "converted", "lost"
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationLogEntry {
    pub log_id: u64,
    pub workflow_name: String,
    /// "YYYY-MM-DD HH:MM:SS"
    pub execution_time: String,
    pub status: String, // "success" o "failed"
    pub records_processed: u64,
    /// Segundos
    pub execution_duration: f64,
}

impl AutomationLogEntry {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Fecha (YYYY-MM-DD) de la ejecución
    pub fn execution_date(&self) -> &str {
        self.execution_time
            .get(..10)
            .unwrap_or(self.execution_time.as_str())
    }
}
