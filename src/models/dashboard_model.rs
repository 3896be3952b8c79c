//! models/dashboard_model.rs
//! Datos de las páginas del dashboard: tarjetas de métricas y series para gráficos.
//! El front decide cómo dibujarlos.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

impl Metric {
    pub fn new(label: &str, value: &str, delta: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            delta: delta.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub labels: Vec<String>,
    /// `None` deja un hueco en la serie (p.e. meses sin dato real)
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub series: Vec<Series>,
}

impl Chart {
    /// Gráfico de una sola serie completa
    pub fn simple(kind: ChartKind, title: &str, labels: &[&str], values: &[f64]) -> Self {
        Self {
            kind,
            title: title.to_string(),
            series: vec![Series {
                name: title.to_string(),
                labels: labels.iter().map(|l| l.to_string()).collect(),
                values: values.iter().copied().map(Some).collect(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub title: String,
    pub subtitle: String,
    pub metrics: Vec<Metric>,
    pub charts: Vec<Chart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutomationStatus {
    pub name: String,
    pub status: String,
    pub activity_label: String,
    pub activity_today: u32,
    pub efficiency: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutomationsPage {
    pub title: String,
    pub automations: Vec<AutomationStatus>,
    pub quick_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientPortfolioRow {
    pub client_name: String,
    pub client_type: String,
    pub monthly_value: u32,
    pub contract_status: String,
    pub ai_automation: String,
    pub satisfaction: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientsPage {
    pub title: String,
    pub metrics: Vec<Metric>,
    pub portfolio: Vec<ClientPortfolioRow>,
    pub charts: Vec<Chart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowStatusRow {
    pub workflow: String,
    pub status: String,
    pub last_run: String,
    pub success_rate: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickActionResponse {
    pub success: bool,
    pub action: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshRate {
    #[serde(rename = "Real-time")]
    RealTime,
    #[serde(rename = "Every 5 minutes")]
    Every5Minutes,
    #[serde(rename = "Every 15 minutes")]
    Every15Minutes,
    Hourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartTheme {
    #[serde(rename = "Dark Gold")]
    DarkGold,
    Light,
    #[serde(rename = "High Contrast")]
    HighContrast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

/// Configuración editable desde la página de Settings.
/// Valores fuera de las opciones fijas fallan al deserializar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub ai_aggressiveness: u8, // 1..=10
    pub auto_follow_up: bool,
    pub ai_scheduling: bool,
    pub smart_pricing: bool,
    pub refresh_rate: RefreshRate,
    pub chart_theme: ChartTheme,
    pub notifications: bool,
    pub two_factor: bool,
    pub api_access: bool,
    pub data_backup: BackupFrequency,
    pub phone_integration: bool,
    pub email_automation: bool,
    pub sms_notifications: bool,
    pub auto_refresh: bool,
    pub refresh_interval_minutes: u8, // 1..=30
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            ai_aggressiveness: 7,
            auto_follow_up: true,
            ai_scheduling: true,
            smart_pricing: false,
            refresh_rate: RefreshRate::RealTime,
            chart_theme: ChartTheme::DarkGold,
            notifications: true,
            two_factor: true,
            api_access: false,
            data_backup: BackupFrequency::Daily,
            phone_integration: true,
            email_automation: true,
            sms_notifications: true,
            auto_refresh: true,
            refresh_interval_minutes: 5,
        }
    }
}
