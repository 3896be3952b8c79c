//! models/csv_model.rs
//! Estructuras para el manejo de archivos CSV por categoría.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Subcarpetas fijas dentro del directorio de datos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Clients,
    Workflows,
    Automations,
    Reports,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Clients,
        Category::Workflows,
        Category::Automations,
        Category::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clients => "clients",
            Category::Workflows => "workflows",
            Category::Automations => "automations",
            Category::Reports => "reports",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clients" => Ok(Category::Clients),
            "workflows" => Ok(Category::Workflows),
            "automations" => Ok(Category::Automations),
            "reports" => Ok(Category::Reports),
            other => Err(anyhow!("Unknown category: {}", other)),
        }
    }
}

/// Contenido de un CSV en memoria: encabezados + filas como texto.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Valor de una celda; filas cortas se leen como vacías.
    pub fn cell<'a>(&'a self, row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Condición de filtro por columna. Se aplican todas las que vengan.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterCondition {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub equals: Option<serde_json::Value>,
    pub contains: Option<String>,
}

/// Body de POST /api/csv/{category}/{filename}/filter
#[derive(Debug, Clone, Deserialize)]
pub struct FilterRequest {
    pub filters: HashMap<String, FilterCondition>,
}

/// Body de POST /api/csv/{category}/merge
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    pub filenames: Vec<String>,
    pub output_filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvFileStats {
    pub rows: usize,
    pub columns: usize,
    pub size_kb: f64,
}

/// Respuesta de GET /api/csv/{category}/{filename}
#[derive(Debug, Clone, Serialize)]
pub struct CsvFileView {
    pub filename: String,
    pub category: Category,
    pub stats: CsvFileStats,
    pub table: CsvTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvListResponse {
    pub category: Category,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvOperationResponse {
    pub success: bool,
    pub message: String,
}
