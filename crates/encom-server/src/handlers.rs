use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use tracing::{debug, info};

use encom_core::{convert_pdf_to, output_file_name, ExportSink, XlsxSink};

use crate::error::ApiError;
use crate::page::INDEX_HTML;
use crate::AppState;

/// Name of the multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

/// Upload form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

/// Convert an uploaded invoice PDF and return the workbook as a download.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    let (file_name, data) = read_file_field(&mut multipart).await?.ok_or(ApiError::NoFile)?;

    if file_name.is_empty() {
        return Err(ApiError::NoSelection);
    }
    if !is_pdf_name(&file_name) {
        return Err(ApiError::InvalidType);
    }
    info!("Converting upload {} ({} bytes)", file_name, data.len());

    let processor = Arc::clone(&state.processor);
    let parser = Arc::clone(&state.parser);
    let sink = XlsxSink::new(&state.export.sheet_name);
    let content_type = sink.content_type();
    let extension = sink.extension();

    let (report, workbook) = tokio::task::spawn_blocking(move || {
        convert_pdf_to(&data, processor.as_ref(), &parser, &sink)
    })
    .await??;

    for warning in &report.warnings {
        debug!("{}", warning);
    }

    let download = output_file_name(&file_name, &state.export.file_suffix, extension);
    info!(
        "Converted {} into {} ({} items, {} skipped) in {:?}",
        file_name,
        download,
        report.items.len(),
        report.skipped.len(),
        start.elapsed()
    );

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&download)),
        ],
        workbook,
    )
        .into_response())
}

/// Pull the first `file` part that carries a filename out of the form,
/// skipping other fields. A `file` part sent as a plain form value is not
/// an upload.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<(String, Bytes)>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await?;
        return Ok(Some((file_name, data)));
    }
    Ok(None)
}

fn is_pdf_name(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"))
}

/// `attachment` disposition with an ASCII fallback name and an RFC 5987
/// `filename*` carrying the original UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    )
}
