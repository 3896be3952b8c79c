//! services/csv_service.rs
//! CRUD de archivos CSV sobre disco, una subcarpeta por categoría.
//! Sin índices, sin locks ni atomicidad: dos escritores simultáneos compiten.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::models::csv_model::{Category, CsvFileStats, CsvTable, FilterCondition};

#[derive(Clone, Debug)]
pub struct CsvManager {
    data_dir: PathBuf,
}

impl CsvManager {
    /// Crea el manager y asegura que existan las carpetas de cada categoría.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let manager = CsvManager {
            data_dir: data_dir.into(),
        };
        manager.ensure_data_directory()?;
        Ok(manager)
    }

    pub fn ensure_data_directory(&self) -> Result<()> {
        for category in Category::ALL {
            let dir = self.data_dir.join(category.as_str());
            fs::create_dir_all(&dir)
                .with_context(|| format!("Could not create directory {:?}", dir))?;
        }
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Ruta final `{data_dir}/{category}/{filename}`, validando el nombre.
    pub fn file_path(&self, filename: &str, category: Category) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.data_dir.join(category.as_str()).join(filename))
    }

    pub fn exists(&self, filename: &str, category: Category) -> bool {
        self.file_path(filename, category)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    /// Filas más anchas que el encabezado son un error; las cortas se completan.
    pub fn save_csv(&self, table: &CsvTable, filename: &str, category: Category) -> Result<()> {
        let path = self.file_path(filename, category)?;
        check_row_widths(table)?;
        let width = table.column_count();

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Could not open {:?} for writing", path))?;
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            // filas cortas completadas con celdas vacías
            let cells = (0..width).map(|i| table.cell(row, i));
            writer.write_record(cells)?;
        }
        writer.flush()?;

        log::info!(
            "(save_csv) {}/{} guardado ({} filas, {} columnas)",
            category,
            filename,
            table.row_count(),
            width
        );
        Ok(())
    }

    /// `None` si el archivo no existe.
    pub fn load_csv(&self, filename: &str, category: Category) -> Result<Option<CsvTable>> {
        let path = self.file_path(filename, category)?;
        if !path.is_file() {
            return Ok(None);
        }

        let file =
            fs::File::open(&path).with_context(|| format!("Could not open {:?}", path))?;
        let table = parse_csv(file).with_context(|| format!("Invalid CSV in {}/{}", category, filename))?;
        Ok(Some(table))
    }

    /// Nombres de los `.csv` de la categoría, ordenados.
    pub fn list_csv_files(&self, category: Category) -> Result<Vec<String>> {
        let dir = self.data_dir.join(category.as_str());
        if !dir.is_dir() {
            return Ok(vec![]);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("Could not read {:?}", dir))? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".csv") && entry.path().is_file() {
                files.push(name);
            }
        }
        files.sort();
        Ok(files)
    }

    /// `false` si el archivo no existía.
    pub fn delete_csv(&self, filename: &str, category: Category) -> Result<bool> {
        let path = self.file_path(filename, category)?;
        if !path.is_file() {
            log::warn!("(delete_csv) {}/{} no existe", category, filename);
            return Ok(false);
        }
        fs::remove_file(&path).with_context(|| format!("Could not delete {:?}", path))?;
        log::info!("(delete_csv) {}/{} borrado", category, filename);
        Ok(true)
    }

    /// Concatena los archivos que existan (los faltantes se ignoran) y guarda el resultado.
    /// `false` si no se pudo cargar ninguno. Cualquier nombre inválido es un error
    /// antes de leer nada.
    pub fn merge_csv_files(
        &self,
        filenames: &[String],
        output_filename: &str,
        category: Category,
    ) -> Result<bool> {
        validate_filename(output_filename)?;
        for filename in filenames {
            validate_filename(filename)?;
        }

        let mut tables = Vec::new();
        for filename in filenames {
            match self.load_csv(filename, category)? {
                Some(table) => tables.push(table),
                None => log::warn!("(merge_csv_files) {}/{} no existe, se omite", category, filename),
            }
        }

        if tables.is_empty() {
            return Ok(false);
        }

        let merged = concat_tables(&tables);
        self.save_csv(&merged, output_filename, category)?;
        Ok(true)
    }

    pub fn filter_csv_data(
        &self,
        filename: &str,
        filters: &HashMap<String, FilterCondition>,
        category: Category,
    ) -> Result<Option<CsvTable>> {
        Ok(self
            .load_csv(filename, category)?
            .map(|table| apply_filters(table, filters)))
    }

    pub fn file_stats(&self, filename: &str, category: Category) -> Result<Option<CsvFileStats>> {
        let table = match self.load_csv(filename, category)? {
            Some(t) => t,
            None => return Ok(None),
        };
        let size = fs::metadata(self.file_path(filename, category)?)?.len();
        Ok(Some(stats_for(&table, size)))
    }

    /// Escribe registros tipados (con encabezado derivado de los campos).
    pub fn save_records<T: Serialize>(
        &self,
        records: &[T],
        filename: &str,
        category: Category,
    ) -> Result<()> {
        let path = self.file_path(filename, category)?;
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Could not open {:?} for writing", path))?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        log::info!("(save_records) {}/{} guardado ({} filas)", category, filename, records.len());
        Ok(())
    }

    /// Agrega un registro al final, escribiendo el encabezado solo si el archivo es nuevo.
    pub fn append_record<T: Serialize>(
        &self,
        record: &T,
        filename: &str,
        category: Category,
    ) -> Result<()> {
        let path = self.file_path(filename, category)?;
        let is_new = !path.is_file();
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Could not open {:?} for appending", path))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Lee registros tipados; las filas que no parsean se omiten con un warning.
    pub fn load_records<T: DeserializeOwned>(
        &self,
        filename: &str,
        category: Category,
    ) -> Result<Option<Vec<T>>> {
        let path = self.file_path(filename, category)?;
        if !path.is_file() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("Could not open {:?}", path))?;

        let mut records = Vec::new();
        for (line, row) in reader.deserialize::<T>().enumerate() {
            match row {
                Ok(rec) => records.push(rec),
                Err(e) => log::warn!(
                    "(load_records) {}/{} fila {} inválida: {}",
                    category,
                    filename,
                    line + 1,
                    e
                ),
            }
        }
        Ok(Some(records))
    }
}

/// Nombre plano terminado en `.csv`, sin separadores ni `..`.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() || filename.starts_with('.') {
        return Err(anyhow!("Invalid filename: '{}'", filename));
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(anyhow!("Filename must not contain a path: '{}'", filename));
    }
    if !filename.ends_with(".csv") {
        return Err(anyhow!("Filename must end in .csv: '{}'", filename));
    }
    Ok(())
}

/// Parsea un CSV con encabezado. Filas cortas se completan con celdas vacías,
/// filas con más campos que el encabezado son un error. Encabezados repetidos
/// se renombran `a`, `a.1`, `a.2`...
pub fn parse_csv<R: Read>(input: R) -> Result<CsvTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let raw_headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if raw_headers.is_empty() || raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(anyhow!("CSV has no header row"));
    }
    let headers = dedupe_headers(raw_headers);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(anyhow!(
                "Expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            ));
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(CsvTable::new(headers, rows))
}

/// Renombra repetidos con sufijo `.N` sin chocar con nombres ya presentes.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let mut name = header.clone();
        while seen.contains(&name) {
            let n = counts.entry(header.clone()).or_insert(0);
            *n += 1;
            name = format!("{}.{}", header, n);
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

/// Error si alguna fila tiene más celdas que el encabezado.
pub fn check_row_widths(table: &CsvTable) -> Result<()> {
    let width = table.column_count();
    match table.rows.iter().position(|r| r.len() > width) {
        Some(i) => Err(anyhow!(
            "Row {} has {} fields but the header has {}",
            i + 1,
            table.rows[i].len(),
            width
        )),
        None => Ok(()),
    }
}

/// Une tablas: columnas en orden de primera aparición, celdas ausentes vacías.
pub fn concat_tables(tables: &[CsvTable]) -> CsvTable {
    let mut headers: Vec<String> = Vec::new();
    for table in tables {
        for h in &table.headers {
            if !headers.contains(h) {
                headers.push(h.clone());
            }
        }
    }

    let mut rows = Vec::new();
    for table in tables {
        let mapping: Vec<Option<usize>> = headers.iter().map(|h| table.column_index(h)).collect();
        for row in &table.rows {
            rows.push(
                mapping
                    .iter()
                    .map(|idx| match idx {
                        Some(i) => table.cell(row, *i).to_string(),
                        None => String::new(),
                    })
                    .collect(),
            );
        }
    }

    CsvTable::new(headers, rows)
}

/// Aplica los filtros por columna. Columnas que no existen se ignoran.
pub fn apply_filters(mut table: CsvTable, filters: &HashMap<String, FilterCondition>) -> CsvTable {
    for (column, condition) in filters {
        let idx = match table.column_index(column) {
            Some(i) => i,
            None => continue,
        };
        table
            .rows
            .retain(|row| cell_matches(row.get(idx).map(String::as_str).unwrap_or(""), condition));
    }
    table
}

fn cell_matches(cell: &str, cond: &FilterCondition) -> bool {
    let numeric = parse_number(cell);

    if let Some(min) = cond.min {
        if !numeric.map(|v| v >= min).unwrap_or(false) {
            return false;
        }
    }
    if let Some(max) = cond.max {
        if !numeric.map(|v| v <= max).unwrap_or(false) {
            return false;
        }
    }
    if let Some(expected) = &cond.equals {
        if !equals_value(cell, numeric, expected) {
            return false;
        }
    }
    if let Some(needle) = &cond.contains {
        if !cell.contains(needle.as_str()) {
            return false;
        }
    }
    true
}

fn equals_value(cell: &str, numeric: Option<f64>, expected: &Value) -> bool {
    match expected {
        Value::Number(n) => match (numeric, n.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        Value::String(s) => match (numeric, parse_number(s)) {
            (Some(a), Some(b)) => a == b,
            _ => cell == s,
        },
        Value::Bool(b) => cell.eq_ignore_ascii_case(&b.to_string()),
        Value::Null => cell.is_empty(),
        other => cell == other.to_string(),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn stats_for(table: &CsvTable, size_bytes: u64) -> CsvFileStats {
    CsvFileStats {
        rows: table.row_count(),
        columns: table.column_count(),
        size_kb: (size_bytes as f64 / 1024.0 * 10.0).round() / 10.0,
    }
}
