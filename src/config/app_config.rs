//! config/app_config.rs
//! Estructura global de configuración (servidor, n8n, webhooks, directorio de datos).
//! Se arma desde variables de entorno (.env) con valores por defecto.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    /// URL base del servidor n8n, sin barra final
    pub n8n_base_url: String,
    /// Si no viene, se manda "demo-api-key"
    pub n8n_api_key: Option<String>,
    /// Timeout por request hacia n8n y webhooks (segundos)
    pub http_timeout_secs: u64,
    pub webhook_base_url: String,
    /// Carpeta raíz de los CSV (una subcarpeta por categoría)
    pub data_dir: String,
    /// Escribe los CSV de ejemplo si todavía no existen
    pub seed_sample_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server_host: "0.0.0.0".to_string(),
            server_port: 5022,
            n8n_base_url: "http://localhost:5678".to_string(),
            n8n_api_key: None,
            http_timeout_secs: 30,
            webhook_base_url: "http://localhost:5678/webhook".to_string(),
            data_dir: "data".to_string(),
            seed_sample_data: true,
        }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno. Lo que falte (o no parsee) queda con el default.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();

        AppConfig {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            n8n_base_url: env::var("N8N_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.n8n_base_url),
            n8n_api_key: env::var("N8N_API_KEY").ok().filter(|k| !k.is_empty()),
            http_timeout_secs: parse_var("N8N_TIMEOUT_SECS", defaults.http_timeout_secs),
            webhook_base_url: env::var("WEBHOOK_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.webhook_base_url),
            data_dir: env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            seed_sample_data: parse_var("SEED_SAMPLE_DATA", defaults.seed_sample_data),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Valor inválido para {}: '{}', usando default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}
