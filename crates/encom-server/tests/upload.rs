//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use encom_core::models::config::ExportConfig;
use encom_core::{InvoiceParser, PdfError, PdfPage, PdfProcessor};
use encom_server::{router, AppState};

const BOUNDARY: &str = "----encom-test-boundary";

const INVOICE_PAGE: &str = "\
ITEM Item Code(Pre PR) MASK NAME Q'TY U/M U/P AMOUNT
1 PHOTOMASK EB6X-NIK-0001 PC 5 USD 10.50 USD 52.50
2 PHOTOMASK EB6X-NIK-0002 PC 1 USD 99.00 USD 99.00
";

/// Ignores the uploaded bytes and returns fixed page text.
struct FixedText(&'static str);

impl PdfProcessor for FixedText {
    fn extract_pages(&self, _data: &[u8]) -> Result<Vec<PdfPage>, PdfError> {
        Ok(vec![PdfPage {
            number: 1,
            text: self.0.to_string(),
        }])
    }

    fn backend_name(&self) -> &str {
        "fixed"
    }
}

struct Undecodable;

impl PdfProcessor for Undecodable {
    fn extract_pages(&self, _data: &[u8]) -> Result<Vec<PdfPage>, PdfError> {
        Err(PdfError::Parse("invalid file header".to_string()))
    }

    fn backend_name(&self) -> &str {
        "undecodable"
    }
}

fn app_with(processor: impl PdfProcessor + 'static, max_upload_bytes: usize) -> Router {
    router(AppState {
        processor: Arc::new(processor),
        parser: Arc::new(InvoiceParser::new()),
        export: ExportConfig::default(),
        max_upload_bytes,
    })
}

fn app(processor: impl PdfProcessor + 'static) -> Router {
    app_with(processor, 1024 * 1024)
}

struct Part<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    data: &'a [u8],
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn pdf_part<'a>(file_name: &'a str) -> Part<'a> {
    Part {
        name: "file",
        file_name: Some(file_name),
        data: b"%PDF-1.4 test",
    }
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = app(FixedText(INVOICE_PAGE))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn index_serves_upload_form() {
    let response = app(FixedText(INVOICE_PAGE))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"action="/upload""#));
    assert!(html.contains(r#"name="file""#));
    assert!(html.contains(r#"accept=".pdf""#));
}

#[tokio::test]
async fn missing_file_part() {
    let request = upload_request(&[Part {
        name: "comment",
        file_name: None,
        data: b"hello",
    }]);
    let response = app(FixedText(INVOICE_PAGE)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "No file was uploaded.");
}

#[tokio::test]
async fn file_part_without_filename_is_not_an_upload() {
    let request = upload_request(&[Part {
        name: "file",
        file_name: None,
        data: b"%PDF-1.4 test",
    }]);
    let response = app(FixedText(INVOICE_PAGE)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "No file was uploaded.");
}

#[tokio::test]
async fn empty_file_name() {
    let request = upload_request(&[Part {
        name: "file",
        file_name: Some(""),
        data: b"",
    }]);
    let response = app(FixedText(INVOICE_PAGE)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "No file was selected.");
}

#[tokio::test]
async fn non_pdf_extension() {
    let request = upload_request(&[pdf_part("invoice.xlsx")]);
    let response = app(FixedText(INVOICE_PAGE)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Invalid file type. Please upload a PDF file."
    );
}

#[tokio::test]
async fn document_without_line_items() {
    let request = upload_request(&[pdf_part("packing-list.pdf")]);
    let response = app(FixedText("PACKING LIST\nNo priced lines here"))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "No line items could be extracted from the PDF. \
         The document may not match the expected invoice layout."
    );
}

#[tokio::test]
async fn document_without_text() {
    let request = upload_request(&[pdf_part("scan.pdf")]);
    let response = app(FixedText("")).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.starts_with("No line items could be extracted"));
}

#[tokio::test]
async fn undecodable_pdf_is_server_error() {
    let request = upload_request(&[pdf_part("broken.pdf")]);
    let response = app(Undecodable).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("invalid file header"));
}

#[tokio::test]
async fn converts_upload_to_workbook() {
    let request = upload_request(&[
        Part {
            name: "note",
            file_name: None,
            data: b"ignored",
        },
        pdf_part("INV-7.PDF"),
    ]);
    let response = app(FixedText(INVOICE_PAGE)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"INV-7_ENCOM.xlsx\"; filename*=UTF-8''INV-7_ENCOM.xlsx"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let large = vec![b'x'; 4096];
    let request = upload_request(&[Part {
        name: "file",
        file_name: Some("big.pdf"),
        data: &large,
    }]);
    let response = app_with(FixedText(INVOICE_PAGE), 1024)
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
