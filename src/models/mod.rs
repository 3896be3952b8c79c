//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod analytics_model;
pub mod automation_model;
pub mod csv_model;
pub mod dashboard_model;
pub mod record_model;
pub mod webhook_model;
