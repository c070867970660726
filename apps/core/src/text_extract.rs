//! Text extraction for uploaded email files.
//! Supports: TXT (UTF-8, with a Latin-1 fallback)

use crate::error::AppError;
use std::path::Path;
use tracing::{info, warn};

/// Extract email text from file contents based on the file extension.
///
/// Files larger than `max_bytes` are rejected before decoding.
pub fn extract_text_from_file(
    file_name: &str,
    file_data: &[u8],
    max_bytes: u64,
) -> Result<String, AppError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    info!(
        "Extracting text from file: {} (type: {}, {} bytes)",
        file_name,
        extension,
        file_data.len()
    );

    if file_data.len() as u64 > max_bytes {
        return Err(AppError::Validation(format!(
            "Arquivo muito grande. Máximo: {}MB",
            max_bytes / (1024 * 1024)
        )));
    }

    match extension.as_str() {
        "txt" => Ok(decode_text(file_data)),
        "pdf" => Err(AppError::Validation(
            "Arquivos .pdf não são suportados; envie o texto extraído em .txt".to_string(),
        )),
        _ => Err(AppError::Validation(format!(
            "Formato não suportado: '{}'. Use .txt",
            extension
        ))),
    }
}

/// Reads `path` from disk and extracts its text.
pub fn extract_text_from_path(path: &Path, max_bytes: u64) -> Result<String, AppError> {
    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(AppError::Validation(format!(
            "Arquivo muito grande. Máximo: {}MB",
            max_bytes / (1024 * 1024)
        )));
    }

    let data = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    extract_text_from_file(file_name, &data, max_bytes)
}

/// Decodes as UTF-8, falling back to Latin-1 (which accepts any byte sequence).
fn decode_text(file_data: &[u8]) -> String {
    match std::str::from_utf8(file_data) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Not valid UTF-8 ({}), decoding as Latin-1", e);
            let text: String = file_data.iter().map(|&b| b as char).collect();
            text.trim().to_string()
        }
    }
}
