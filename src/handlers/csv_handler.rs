//! handlers/csv_handler.rs
//! Endpoints de CRUD de CSV por categoría.

use std::str::FromStr;

use actix_files::NamedFile;
use actix_multipart::Multipart;
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use bytes::BytesMut;
use futures_util::StreamExt;

use crate::handlers::error_response;
use crate::models::csv_model::{
    Category, CsvFileView, CsvListResponse, CsvOperationResponse, CsvTable, FilterRequest,
    MergeRequest,
};
use crate::services::csv_service::{check_row_widths, parse_csv, validate_filename, CsvManager};

/// Tamaño máximo aceptado en uploads
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

fn parse_category(raw: &str) -> Result<Category, HttpResponse> {
    Category::from_str(raw).map_err(|e| error_response(StatusCode::BAD_REQUEST, e))
}

/// Valida categoría + nombre de archivo del path.
fn parse_target(raw_category: &str, filename: &str) -> Result<Category, HttpResponse> {
    let category = parse_category(raw_category)?;
    validate_filename(filename).map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;
    Ok(category)
}

fn file_not_found(category: Category, filename: &str) -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        format!("File not found: {}/{}", category, filename),
    )
}

fn internal_error(e: anyhow::Error) -> HttpResponse {
    log::error!("(csv) {:?}", e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e))
}

/// GET /api/csv/{category}
pub async fn list_files_endpoint(
    csv_manager: web::Data<CsvManager>,
    path: web::Path<String>,
) -> HttpResponse {
    let category = match parse_category(&path.into_inner()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match csv_manager.list_csv_files(category) {
        Ok(files) => HttpResponse::Ok().json(CsvListResponse { category, files }),
        Err(e) => internal_error(e),
    }
}

/// GET /api/csv/{category}/{filename}
/// Contenido + estadísticas básicas (filas, columnas, tamaño).
pub async fn view_file_endpoint(
    csv_manager: web::Data<CsvManager>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (raw_category, filename) = path.into_inner();
    let category = match parse_target(&raw_category, &filename) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let table = match csv_manager.load_csv(&filename, category) {
        Ok(Some(t)) => t,
        Ok(None) => return file_not_found(category, &filename),
        Err(e) => return internal_error(e),
    };
    let stats = match csv_manager.file_stats(&filename, category) {
        Ok(Some(s)) => s,
        Ok(None) => return file_not_found(category, &filename),
        Err(e) => return internal_error(e),
    };

    HttpResponse::Ok().json(CsvFileView {
        filename,
        category,
        stats,
        table,
    })
}

/// PUT /api/csv/{category}/{filename}
/// Guarda (o reemplaza) el archivo con la tabla del body.
pub async fn save_file_endpoint(
    csv_manager: web::Data<CsvManager>,
    path: web::Path<(String, String)>,
    body: web::Json<CsvTable>,
) -> HttpResponse {
    let (raw_category, filename) = path.into_inner();
    let category = match parse_target(&raw_category, &filename) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let table = body.into_inner();
    if table.headers.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Table has no headers");
    }
    if let Err(e) = check_row_widths(&table) {
        return error_response(StatusCode::BAD_REQUEST, e);
    }

    match csv_manager.save_csv(&table, &filename, category) {
        Ok(_) => HttpResponse::Ok().json(CsvOperationResponse {
            success: true,
            message: format!("File saved to {}/{}", category, filename),
        }),
        Err(e) => internal_error(e),
    }
}

/// DELETE /api/csv/{category}/{filename}
pub async fn delete_file_endpoint(
    csv_manager: web::Data<CsvManager>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (raw_category, filename) = path.into_inner();
    let category = match parse_target(&raw_category, &filename) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match csv_manager.delete_csv(&filename, category) {
        Ok(true) => HttpResponse::Ok().json(CsvOperationResponse {
            success: true,
            message: format!("Deleted {}", filename),
        }),
        Ok(false) => HttpResponse::NotFound().json(CsvOperationResponse {
            success: false,
            message: format!("File not found: {}/{}", category, filename),
        }),
        Err(e) => internal_error(e),
    }
}

/// GET /api/csv/{category}/{filename}/download
pub async fn download_file_endpoint(
    req: HttpRequest,
    csv_manager: web::Data<CsvManager>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (raw_category, filename) = path.into_inner();
    let category = match parse_target(&raw_category, &filename) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let file_path = match csv_manager.file_path(&filename, category) {
        Ok(p) => p,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    // NamedFile arma Content-Type y Content-Disposition
    match NamedFile::open(file_path) {
        Ok(file) => file.into_response(&req),
        Err(_) => file_not_found(category, &filename),
    }
}

/// POST /api/csv/{category}/{filename}/filter
pub async fn filter_file_endpoint(
    csv_manager: web::Data<CsvManager>,
    path: web::Path<(String, String)>,
    body: web::Json<FilterRequest>,
) -> HttpResponse {
    let (raw_category, filename) = path.into_inner();
    let category = match parse_target(&raw_category, &filename) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match csv_manager.filter_csv_data(&filename, &body.filters, category) {
        Ok(Some(table)) => HttpResponse::Ok().json(table),
        Ok(None) => file_not_found(category, &filename),
        Err(e) => internal_error(e),
    }
}

/// POST /api/csv/{category}/merge
pub async fn merge_files_endpoint(
    csv_manager: web::Data<CsvManager>,
    path: web::Path<String>,
    body: web::Json<MergeRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let category = match parse_target(&path.into_inner(), &req.output_filename) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    for filename in &req.filenames {
        if let Err(e) = validate_filename(filename) {
            return error_response(StatusCode::BAD_REQUEST, e);
        }
    }

    match csv_manager.merge_csv_files(&req.filenames, &req.output_filename, category) {
        Ok(true) => HttpResponse::Ok().json(CsvOperationResponse {
            success: true,
            message: format!("Merged into {}/{}", category, req.output_filename),
        }),
        Ok(false) => HttpResponse::NotFound().json(CsvOperationResponse {
            success: false,
            message: "None of the input files could be loaded".to_string(),
        }),
        Err(e) => internal_error(e),
    }
}

/// POST /api/csv/{category}/upload
/// multipart/form-data con un campo `file` (.csv)
pub async fn upload_file_endpoint(
    csv_manager: web::Data<CsvManager>,
    path: web::Path<String>,
    mut payload: Multipart,
) -> HttpResponse {
    let category = match parse_category(&path.into_inner()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let mut upload: Option<(String, BytesMut)> = None;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(f) => f,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
        };
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if field_name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if let Err(e) = validate_filename(&filename) {
            return error_response(StatusCode::BAD_REQUEST, e);
        }

        let mut buf = BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
            };
            if buf.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return error_response(StatusCode::PAYLOAD_TOO_LARGE, "File is too large");
            }
            buf.extend_from_slice(&chunk);
        }
        upload = Some((filename, buf));
    }

    let (filename, bytes) = match upload {
        Some(u) => u,
        None => return error_response(StatusCode::BAD_REQUEST, "Missing 'file' field"),
    };

    let table = match parse_csv(&bytes[..]) {
        Ok(t) => t,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, format!("Invalid CSV: {:#}", e)),
    };

    match csv_manager.save_csv(&table, &filename, category) {
        Ok(_) => HttpResponse::Ok().json(CsvOperationResponse {
            success: true,
            message: format!("File saved to {}/{}", category, filename),
        }),
        Err(e) => internal_error(e),
    }
}
