//! services/analytics_service.rs
//! Agregaciones simples (group-by, promedio, suma) sobre automation_logs.csv,
//! y registro de nuevas ejecuciones en ese mismo archivo.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::Local;

use crate::models::analytics_model::{
    AutomationAnalytics, DailyExecutions, WorkflowAvgDuration, WorkflowRecords,
    WorkflowSuccessRate,
};
use crate::models::csv_model::Category;
use crate::models::record_model::AutomationLogEntry;
use crate::services::csv_service::CsvManager;
use crate::services::sample_data::AUTOMATION_LOGS_FILE;

const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Clone, Debug)]
pub struct AnalyticsService {
    csv_manager: CsvManager,
}

impl AnalyticsService {
    pub fn new(csv_manager: CsvManager) -> Self {
        AnalyticsService { csv_manager }
    }

    pub fn load_logs(&self) -> Result<Option<Vec<AutomationLogEntry>>> {
        self.csv_manager
            .load_records(AUTOMATION_LOGS_FILE, Category::Automations)
            .context("Could not read automation logs")
    }

    /// `None` si todavía no hay archivo de logs.
    pub fn automation_analytics(&self) -> Result<Option<AutomationAnalytics>> {
        Ok(self.load_logs()?.map(|logs| summarize(&logs)))
    }

    /// Agrega una ejecución al log (records_processed = 0, no lo sabemos).
    pub fn record_execution(
        &self,
        workflow_name: &str,
        success: bool,
        duration_secs: f64,
    ) -> Result<AutomationLogEntry> {
        let next_id = self
            .load_logs()?
            .unwrap_or_default()
            .iter()
            .map(|l| l.log_id)
            .max()
            .unwrap_or(0)
            + 1;

        let entry = AutomationLogEntry {
            log_id: next_id,
            workflow_name: workflow_name.to_string(),
            execution_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            status: if success { "success" } else { "failed" }.to_string(),
            records_processed: 0,
            execution_duration: (duration_secs * 10.0).round() / 10.0,
        };

        self.csv_manager
            .append_record(&entry, AUTOMATION_LOGS_FILE, Category::Automations)?;
        log::info!(
            "(record_execution) log_id={} workflow='{}' status={}",
            entry.log_id,
            entry.workflow_name,
            entry.status
        );
        Ok(entry)
    }
}

pub fn summarize(logs: &[AutomationLogEntry]) -> AutomationAnalytics {
    AutomationAnalytics {
        total_executions: logs.len(),
        daily_executions: daily_executions(logs),
        success_rates: success_rates(logs),
        avg_durations: avg_durations(logs),
        records_processed: records_processed(logs),
        recent_activity: recent_activity(logs, RECENT_ACTIVITY_LIMIT),
    }
}

/// Ejecuciones por (fecha, workflow), ordenadas por fecha y luego nombre.
pub fn daily_executions(logs: &[AutomationLogEntry]) -> Vec<DailyExecutions> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for log in logs {
        *counts
            .entry((log.execution_date().to_string(), log.workflow_name.clone()))
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((date, workflow_name), executions)| DailyExecutions {
            date,
            workflow_name,
            executions,
        })
        .collect()
}

pub fn success_rates(logs: &[AutomationLogEntry]) -> Vec<WorkflowSuccessRate> {
    group_by_workflow(logs)
        .into_iter()
        .map(|(workflow, entries)| {
            let ok = entries.iter().filter(|e| e.is_success()).count();
            WorkflowSuccessRate {
                workflow,
                success_rate: ok as f64 / entries.len() as f64 * 100.0,
            }
        })
        .collect()
}

pub fn avg_durations(logs: &[AutomationLogEntry]) -> Vec<WorkflowAvgDuration> {
    group_by_workflow(logs)
        .into_iter()
        .map(|(workflow, entries)| {
            let total: f64 = entries.iter().map(|e| e.execution_duration).sum();
            WorkflowAvgDuration {
                workflow,
                avg_duration_secs: total / entries.len() as f64,
            }
        })
        .collect()
}

pub fn records_processed(logs: &[AutomationLogEntry]) -> Vec<WorkflowRecords> {
    group_by_workflow(logs)
        .into_iter()
        .map(|(workflow, entries)| WorkflowRecords {
            workflow,
            total_records: entries.iter().map(|e| e.records_processed).sum(),
        })
        .collect()
}

/// Las `limit` ejecuciones más recientes (execution_time descendente).
pub fn recent_activity(logs: &[AutomationLogEntry], limit: usize) -> Vec<AutomationLogEntry> {
    let mut sorted = logs.to_vec();
    sorted.sort_by(|a, b| b.execution_time.cmp(&a.execution_time));
    sorted.truncate(limit);
    sorted
}

// los grupos nunca quedan vacíos
fn group_by_workflow(logs: &[AutomationLogEntry]) -> BTreeMap<String, Vec<&AutomationLogEntry>> {
    let mut groups: BTreeMap<String, Vec<&AutomationLogEntry>> = BTreeMap::new();
    for log in logs {
        groups.entry(log.workflow_name.clone()).or_default().push(log);
    }
    groups
}
