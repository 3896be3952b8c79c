//! models/analytics_model.rs
//! Agregados sobre automation_logs.csv

use serde::Serialize;

use crate::models::record_model::AutomationLogEntry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyExecutions {
    pub date: String,
    pub workflow_name: String,
    pub executions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSuccessRate {
    pub workflow: String,
    pub success_rate: f64, // porcentaje 0..100
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowAvgDuration {
    pub workflow: String,
    pub avg_duration_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowRecords {
    pub workflow: String,
    pub total_records: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutomationAnalytics {
    pub total_executions: usize,
    pub daily_executions: Vec<DailyExecutions>,
    pub success_rates: Vec<WorkflowSuccessRate>,
    pub avg_durations: Vec<WorkflowAvgDuration>,
    pub records_processed: Vec<WorkflowRecords>,
    pub recent_activity: Vec<AutomationLogEntry>,
}
