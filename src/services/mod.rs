//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod analytics_service;
pub mod csv_service;
pub mod dashboard_service;
pub mod n8n_service;
pub mod sample_data;
pub mod webhook_service;
pub mod workflow_templates;
