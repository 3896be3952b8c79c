use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::services::analytics_service::AnalyticsService;
use crate::services::csv_service::CsvManager;
use crate::services::dashboard_service::DashboardService;
use crate::services::n8n_service::N8nAgent;
use crate::services::sample_data::initialize_sample_data;
use crate::services::webhook_service::WebhookManager;

mod app;
mod config;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

fn to_io_error(e: anyhow::Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{:#}", e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let cfg = AppConfig::from_env();
    log::info!("Configuración: {:?}", cfg);

    // Carpeta de datos + CSV de ejemplo
    let csv_manager = CsvManager::new(&cfg.data_dir).map_err(to_io_error)?;
    log::info!("Datos CSV en {:?}", csv_manager.data_dir());
    if cfg.seed_sample_data {
        if let Err(e) = initialize_sample_data(&csv_manager) {
            log::error!("No se pudieron escribir los datos de ejemplo: {:?}", e);
        }
    }

    let n8n_agent = N8nAgent::from_config(&cfg).map_err(to_io_error)?;
    log::info!("Servidor n8n en {}", n8n_agent.base_url());
    let webhook_manager = WebhookManager::from_config(&cfg).map_err(to_io_error)?;
    let analytics_service = AnalyticsService::new(csv_manager.clone());
    let dashboard_service = DashboardService::new();

    // Los servicios con estado en memoria se comparten entre workers
    let webhook_data = web::Data::new(webhook_manager);
    let dashboard_data = web::Data::new(dashboard_service);

    log::info!("Levantando servidor en {}:{}", cfg.server_host, cfg.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(handlers::json_config())
            .app_data(web::Data::new(csv_manager.clone()))
            .app_data(web::Data::new(n8n_agent.clone()))
            .app_data(web::Data::new(analytics_service.clone()))
            .app_data(webhook_data.clone())
            .app_data(dashboard_data.clone())
            .configure(app::init_app)
    })
    .bind((cfg.server_host.as_str(), cfg.server_port))?
    .run()
    .await
}
