//! logger.rs
//! Configuración del logger usando env_logger.

/// Filtro por defecto: info para el servicio, warn para el cliente HTTP.
const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

pub fn init_logger() {
    // RUST_LOG manda; si no está definida, usamos DEFAULT_FILTER.
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
