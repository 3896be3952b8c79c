//! services/dashboard_service.rs
//! Contenido de las páginas del dashboard. Son datos de muestra fijos;
//! además guarda en memoria la configuración de la página de Settings.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::RwLock;

use crate::models::dashboard_model::{
    AutomationStatus, AutomationsPage, Chart, ChartKind, ClientPortfolioRow, ClientsPage,
    DashboardSettings, Metric, PageData, QuickActionResponse, Series, WorkflowStatusRow,
};

pub const QUICK_ACTIONS: [&str; 4] = ["deploy-bot", "generate-report", "maintenance", "phone-assistant"];

#[derive(Clone, Debug, Default)]
pub struct DashboardService {
    settings: Arc<RwLock<DashboardSettings>>,
}

impl DashboardService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_settings(&self) -> DashboardSettings {
        self.settings.read().await.clone()
    }

    pub async fn update_settings(&self, new_settings: DashboardSettings) -> Result<DashboardSettings> {
        if !(1..=10).contains(&new_settings.ai_aggressiveness) {
            return Err(anyhow!("ai_aggressiveness must be between 1 and 10"));
        }
        if !(1..=30).contains(&new_settings.refresh_interval_minutes) {
            return Err(anyhow!("refresh_interval_minutes must be between 1 and 30"));
        }

        let mut settings = self.settings.write().await;
        *settings = new_settings;
        log::info!("(update_settings) Configuración actualizada: {:?}", *settings);
        Ok(settings.clone())
    }

    /// Botones de "Quick Actions": solo devuelven un mensaje.
    pub fn quick_action(&self, action: &str) -> Result<QuickActionResponse> {
        let message = match action {
            "deploy-bot" => "New automation bot deployment initiated!",
            "generate-report" => "Automation performance report generated!",
            "maintenance" => "System maintenance scheduled!",
            "phone-assistant" => "AI phone assistant activated!",
            other => return Err(anyhow!("Unknown action: {}", other)),
        };
        log::info!("(quick_action) {}", action);
        Ok(QuickActionResponse {
            success: true,
            action: action.to_string(),
            message: message.to_string(),
        })
    }

    pub fn sidebar_stats(&self) -> Vec<Metric> {
        vec![
            Metric::new("Active Clients", "47", Some("+5")),
            Metric::new("Revenue Growth", "300%", Some("+25%")),
            Metric::new("AI Automations", "156", Some("+12")),
            Metric::new("Time Saved", "2,400hrs", Some("+180hrs")),
        ]
    }

    pub fn overview(&self) -> PageData {
        PageData {
            title: "AI Automation Dashboard".to_string(),
            subtitle: "Transform your cleaning business with intelligent automation systems"
                .to_string(),
            metrics: vec![
                Metric::new("Lead Generation", "847", Some("+23% vs last month")),
                Metric::new("Revenue Increase", "300%", Some("Triple your sales")),
                Metric::new("Time Savings", "75%", Some("24/7 efficiency")),
                Metric::new("Retention Rate", "90%", Some("AI-powered service")),
            ],
            charts: vec![
                Chart::simple(
                    ChartKind::Line,
                    "Revenue Growth Trajectory",
                    &["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
                    &[50000.0, 75000.0, 120000.0, 180000.0, 250000.0, 350000.0],
                ),
                Chart::simple(
                    ChartKind::Bar,
                    "Automation Efficiency by Category",
                    &["Lead Gen", "Scheduling", "Follow-ups", "Billing", "Reports"],
                    &[95.0, 88.0, 92.0, 85.0, 90.0],
                ),
            ],
        }
    }

    pub fn business_analytics(&self) -> PageData {
        PageData {
            title: "Business Analytics".to_string(),
            subtitle: "Deep insights into your cleaning business performance".to_string(),
            metrics: vec![],
            charts: vec![
                Chart::simple(
                    ChartKind::Pie,
                    "Client Type Distribution",
                    &["Residential", "Commercial", "Industrial"],
                    &[25.0, 15.0, 7.0],
                ),
                Chart::simple(
                    ChartKind::Bar,
                    "Monthly Service Bookings",
                    &["Regular Cleaning", "Deep Cleaning", "Carpet Cleaning", "Window Cleaning"],
                    &[120.0, 45.0, 30.0, 25.0],
                ),
                Chart::simple(
                    ChartKind::Line,
                    "Weekly Efficiency Trends",
                    &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
                    &[85.0, 92.0, 88.0, 95.0, 90.0, 78.0, 65.0],
                ),
            ],
        }
    }

    pub fn automations(&self) -> AutomationsPage {
        let rows = [
            ("Lead Generation Bot", "leads_today", 23, 95),
            ("Appointment Scheduler", "bookings_today", 18, 88),
            ("Follow-up Assistant", "follow_ups", 45, 92),
            ("Invoice Generator", "invoices", 12, 98),
            ("Customer Support Bot", "tickets", 8, 85),
        ];

        AutomationsPage {
            title: "AI Automation Center".to_string(),
            automations: rows
                .iter()
                .map(|(name, label, today, eff)| AutomationStatus {
                    name: name.to_string(),
                    status: "Active".to_string(),
                    activity_label: label.to_string(),
                    activity_today: *today,
                    efficiency: *eff,
                })
                .collect(),
            quick_actions: QUICK_ACTIONS.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn clients(&self) -> ClientsPage {
        let portfolio = [
            ("ABC Office Complex", "Commercial", 3500, "Active", "Full", 98),
            ("Downtown Restaurant", "Commercial", 2200, "Active", "Partial", 95),
            ("Medical Center", "Healthcare", 4800, "Active", "Full", 99),
            ("Retail Store Chain", "Retail", 6200, "Renewal", "Full", 92),
            ("Manufacturing Plant", "Industrial", 8500, "Active", "Custom", 96),
        ];
        let portfolio: Vec<ClientPortfolioRow> = portfolio
            .iter()
            .map(|(name, kind, value, status, ai, sat)| ClientPortfolioRow {
                client_name: name.to_string(),
                client_type: kind.to_string(),
                monthly_value: *value,
                contract_status: status.to_string(),
                ai_automation: ai.to_string(),
                satisfaction: *sat,
            })
            .collect();

        let satisfaction = Chart {
            kind: ChartKind::Bar,
            title: "Client Satisfaction Ratings".to_string(),
            series: vec![Series {
                name: "Satisfaction".to_string(),
                labels: portfolio.iter().map(|r| r.client_name.clone()).collect(),
                values: portfolio.iter().map(|r| Some(r.satisfaction as f64)).collect(),
            }],
        };

        ClientsPage {
            title: "Client Management".to_string(),
            metrics: vec![
                Metric::new("Total Clients", "47", Some("+5 this month")),
                Metric::new("Active Contracts", "42", Some("+3 this month")),
                Metric::new("Avg Contract Value", "$2,850", Some("+$450")),
            ],
            portfolio,
            charts: vec![
                satisfaction,
                Chart::simple(
                    ChartKind::Pie,
                    "Revenue Distribution by Client Type",
                    &["Commercial", "Healthcare", "Industrial", "Retail"],
                    &[45000.0, 28000.0, 35000.0, 22000.0],
                ),
            ],
        }
    }

    pub fn growth(&self) -> PageData {
        let months = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let actual = [50000.0, 75000.0, 120000.0, 180000.0, 250000.0, 350000.0];
        let projected = [350000.0, 425000.0, 510000.0, 615000.0, 740000.0, 890000.0, 1070000.0];

        // Actual: ene-jun. Proyectado: jun-dic (comparten junio).
        let revenue = Chart {
            kind: ChartKind::Line,
            title: "Revenue Growth Trajectory".to_string(),
            series: vec![
                Series {
                    name: "Actual Revenue".to_string(),
                    labels: months[..6].iter().map(|m| m.to_string()).collect(),
                    values: actual.iter().copied().map(Some).collect(),
                },
                Series {
                    name: "Projected Revenue".to_string(),
                    labels: months[5..].iter().map(|m| m.to_string()).collect(),
                    values: projected.iter().copied().map(Some).collect(),
                },
            ],
        };

        PageData {
            title: "Growth Metrics".to_string(),
            subtitle: "Track your business growth and AI automation ROI".to_string(),
            metrics: vec![
                Metric::new("Monthly Recurring Revenue", "$127,500", Some("+$23,400")),
                Metric::new("Customer Acquisition Cost", "$145", Some("-$35")),
                Metric::new("Lifetime Value", "$8,450", Some("+$1,200")),
                Metric::new("Churn Rate", "2.1%", Some("-0.8%")),
            ],
            charts: vec![
                revenue,
                Chart::simple(
                    ChartKind::Bar,
                    "AI Automation ROI by Category (%)",
                    &["Lead Generation", "Scheduling", "Customer Service", "Billing", "Marketing"],
                    &[450.0, 320.0, 280.0, 380.0, 290.0],
                ),
            ],
        }
    }

    pub fn workflow_status(&self) -> Vec<WorkflowStatusRow> {
        [
            ("Lead Generation", "Active", "2 min ago", 98),
            ("Appointment Scheduler", "Active", "1 hour ago", 95),
            ("Follow-up Assistant", "Active", "30 min ago", 92),
            ("Invoice Generator", "Paused", "1 day ago", 100),
        ]
        .iter()
        .map(|(workflow, status, last_run, rate)| WorkflowStatusRow {
            workflow: workflow.to_string(),
            status: status.to_string(),
            last_run: last_run.to_string(),
            success_rate: *rate,
        })
        .collect()
    }
}
