//! services/sample_data.rs
//! CSV de ejemplo (clientes, leads y logs de automatizaciones) que se escriben
//! la primera vez que se levanta el servicio.

use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate};

use crate::models::csv_model::Category;
use crate::models::record_model::{AutomationLogEntry, ClientRecord, LeadRecord};
use crate::services::csv_service::CsvManager;

pub const CLIENTS_FILE: &str = "clients.csv";
pub const LEADS_FILE: &str = "leads.csv";
pub const AUTOMATION_LOGS_FILE: &str = "automation_logs.csv";

/// Escribe solo los archivos que todavía no existen. Devuelve cuántos escribió.
pub fn initialize_sample_data(csv_manager: &CsvManager) -> Result<usize> {
    let mut written = 0;

    if !csv_manager.exists(CLIENTS_FILE, Category::Clients) {
        csv_manager.save_records(&sample_clients()?, CLIENTS_FILE, Category::Clients)?;
        written += 1;
    }
    if !csv_manager.exists(LEADS_FILE, Category::Clients) {
        csv_manager.save_records(&sample_leads()?, LEADS_FILE, Category::Clients)?;
        written += 1;
    }
    if !csv_manager.exists(AUTOMATION_LOGS_FILE, Category::Automations) {
        csv_manager.save_records(
            &sample_automation_logs()?,
            AUTOMATION_LOGS_FILE,
            Category::Automations,
        )?;
        written += 1;
    }

    log::info!("(initialize_sample_data) {} archivos de ejemplo escritos", written);
    Ok(written)
}

pub fn sample_clients() -> Result<Vec<ClientRecord>> {
    let names = [
        "ABC Office Complex",
        "Downtown Restaurant",
        "Medical Center",
        "Retail Store",
        "Manufacturing Plant",
    ];
    let emails = [
        "contact@abcoffice.com",
        "manager@downtown.com",
        "admin@medcenter.com",
        "info@retailstore.com",
        "ops@manufacturing.com",
    ];
    let service_types = ["Commercial", "Restaurant", "Healthcare", "Retail", "Industrial"];
    let amounts = [3500, 2200, 4800, 6200, 8500];
    let statuses = ["active", "active", "active", "renewal", "active"];

    (0..5)
        .map(|i| {
            // último día de cada mes a partir de enero 2024
            let created_at = month_end(2024, i as u32 + 1)?;
            Ok(ClientRecord {
                client_id: format!("C{:03}", i + 1),
                name: names[i].to_string(),
                email: emails[i].to_string(),
                phone: format!("555-01{:02}", i + 1),
                service_type: service_types[i].to_string(),
                monthly_amount: amounts[i],
                status: statuses[i].to_string(),
                created_at: created_at.format("%Y-%m-%d").to_string(),
            })
        })
        .collect()
}

pub fn sample_leads() -> Result<Vec<LeadRecord>> {
    let names = ["John Smith", "Sarah Johnson", "Mike Wilson", "Lisa Brown", "David Lee"];
    let service_types = [
        "Residential",
        "Commercial",
        "Deep Cleaning",
        "Carpet Cleaning",
        "Window Cleaning",
    ];
    let sources = ["Website", "Referral", "Google Ads", "Social Media", "Cold Call"];
    let statuses = ["new", "contacted", "quoted", "converted", "lost"];
    let start = date(2024, 12, 1)?;

    Ok((0..5)
        .map(|i| {
            let first = names[i]
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase();
            LeadRecord {
                lead_id: format!("L{:03}", i + 1),
                name: names[i].to_string(),
                email: format!("{}@email.com", first),
                phone: format!("555-10{:02}", i + 1),
                service_type: service_types[i].to_string(),
                lead_source: sources[i].to_string(),
                status: statuses[i].to_string(),
                created_at: (start + Duration::days(i as i64))
                    .format("%Y-%m-%d")
                    .to_string(),
            }
        })
        .collect())
}

pub fn sample_automation_logs() -> Result<Vec<AutomationLogEntry>> {
    let workflows = [
        "Lead Generation Bot",
        "Lead Generation Bot",
        "Lead Generation Bot",
        "Appointment Scheduler",
        "Appointment Scheduler",
        "Appointment Scheduler",
        "Follow-up Assistant",
        "Follow-up Assistant",
        "Invoice Generator",
        "Invoice Generator",
    ];
    let records = [5, 3, 7, 12, 8, 15, 6, 4, 0, 25];
    let durations = [2.5, 1.8, 3.2, 4.1, 2.9, 5.5, 1.2, 0.8, 0.0, 8.7];
    let start = date(2024, 12, 1)?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid time"))?;

    Ok((0..10)
        .map(|i| AutomationLogEntry {
            log_id: i as u64 + 1,
            workflow_name: workflows[i].to_string(),
            execution_time: (start + Duration::hours(i as i64))
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            // solo la novena ejecución falló
            status: if i == 8 { "failed" } else { "success" }.to_string(),
            records_processed: records[i],
            execution_duration: durations[i],
        })
        .collect())
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| anyhow!("Invalid date {}-{}-{}", y, m, d))
}

fn month_end(y: i32, m: u32) -> Result<NaiveDate> {
    let next = if m == 12 { date(y + 1, 1, 1)? } else { date(y, m + 1, 1)? };
    next.pred_opt()
        .ok_or_else(|| anyhow!("Invalid date before {}", next))
}
