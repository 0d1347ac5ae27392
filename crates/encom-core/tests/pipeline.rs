//! Integration tests for the convert_pdf() pipeline.
//!
//! Uses a MockProcessor that returns pre-built pages without decoding a
//! real PDF, so the tests cover extraction and export end to end.

use std::io::Cursor;

use calamine::{Reader, Xlsx};
use lopdf::{dictionary, Document, Object, Stream};
use pretty_assertions::assert_eq;

use encom_core::error::{EncomError, ExtractionError, PdfError};
use encom_core::models::line_item::SkipReason;
use encom_core::pdf::{PdfPage, PdfProcessor};
use encom_core::{convert_pdf, convert_pdf_to, CsvSink, InvoiceParser, PdfExtractor, XlsxSink};

struct MockProcessor {
    pages: Vec<&'static str>,
}

impl PdfProcessor for MockProcessor {
    fn extract_pages(&self, _data: &[u8]) -> Result<Vec<PdfPage>, PdfError> {
        Ok(self
            .pages
            .iter()
            .enumerate()
            .map(|(i, text)| PdfPage {
                number: i as u32 + 1,
                text: text.to_string(),
            })
            .collect())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct BrokenProcessor;

impl PdfProcessor for BrokenProcessor {
    fn extract_pages(&self, _data: &[u8]) -> Result<Vec<PdfPage>, PdfError> {
        Err(PdfError::Parse("xref table missing".to_string()))
    }

    fn backend_name(&self) -> &str {
        "broken"
    }
}

const PAGE_ONE: &str = "\
ENCOM INC. COMMERCIAL INVOICE
ITEM Item Code(Pre PR) MASK NAME Q'TY U/M U/P AMOUNT
1 PHOTOMASK EB6X-NIK EB6X-NIK EB6X-NIK-0101 RRCA20240001 PC 2 USD 1,250.00
USD 2,500.00
2 PHOTOMASK
EB6X-NIK-0102 PC 1 USD 980.00 USD 980.00
";

const PAGE_TWO: &str = "\
3 PHOTOMASK EB6X-NIK-0201 4 PC USD 100.00 USD 400.00
TOTAL USD 3,880.00
";

// ---------------------------------------------------------------------------
// Multi-page invoice, records concatenated in page order
// ---------------------------------------------------------------------------
#[test]
fn multi_page_invoice() {
    let processor = MockProcessor {
        pages: vec![PAGE_ONE, "", PAGE_TWO],
    };

    let report = convert_pdf(&[], &processor, &InvoiceParser::new()).unwrap();

    assert_eq!(report.page_count, 3);
    assert_eq!(report.pages_with_text, 2);
    assert!(report.skipped.is_empty());
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);

    let items = report.line_items();
    assert_eq!(items.len(), 3);

    assert_eq!(items[0].item_no, "1");
    assert_eq!(items[0].item_code, "PHOTOMASK EB6X-NIK");
    assert_eq!(items[0].mask_name, "EB6X-NIK-0101");
    assert_eq!(items[0].quantity, "2");
    assert_eq!(items[0].unit_price, "1250.00");
    assert_eq!(items[0].amount, "2500.00");

    assert_eq!(items[1].item_no, "2");
    assert_eq!(items[1].mask_name, "EB6X-NIK-0102");

    assert_eq!(items[2].item_no, "3");
    assert_eq!(items[2].quantity, "4");
    assert_eq!(items[2].unit_price, "100.00");
    assert_eq!(items[2].amount, "400.00");
    assert_eq!(report.items[2].page, 3);
}

// ---------------------------------------------------------------------------
// The worked row from the invoice layout
// ---------------------------------------------------------------------------
#[test]
fn canonical_row() {
    let processor = MockProcessor {
        pages: vec!["2 PHOTOMASK EB6X-NIK-0001 PC 5 USD 10.50 USD 52.50"],
    };

    let report = convert_pdf(&[], &processor, &InvoiceParser::new()).unwrap();
    let item = &report.line_items()[0];

    assert_eq!(
        item.cells(),
        ["2", "PHOTOMASK", "EB6X-NIK-0001", "5", "PC", "10.50", "52.50", "USD"]
    );
    assert!((report.items[0].confidence - 1.0).abs() < f32::EPSILON);
}

// ---------------------------------------------------------------------------
// Pages without text produce no records and no error until the end
// ---------------------------------------------------------------------------
#[test]
fn document_without_text_is_no_items() {
    let processor = MockProcessor {
        pages: vec!["", "   ", "\n"],
    };

    let err = convert_pdf(&[], &processor, &InvoiceParser::new()).unwrap_err();
    assert!(matches!(err, EncomError::Extraction(ExtractionError::NoItems)));
}

/// A real PDF whose pages have empty content streams.
fn blank_pdf(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

#[test]
fn decoded_blank_document_is_no_items() {
    let err = convert_pdf(&blank_pdf(2), &PdfExtractor::new(), &InvoiceParser::new()).unwrap_err();
    assert!(matches!(err, EncomError::Extraction(ExtractionError::NoItems)));
}

#[test]
fn text_without_anchor_is_no_items() {
    let processor = MockProcessor {
        pages: vec!["PACKING LIST ONLY\nNo priced lines on this page"],
    };

    let err = convert_pdf(&[], &processor, &InvoiceParser::new()).unwrap_err();
    assert!(matches!(err, EncomError::Extraction(ExtractionError::NoItems)));
}

// ---------------------------------------------------------------------------
// Only skipped candidates still counts as no items
// ---------------------------------------------------------------------------
#[test]
fn skipped_candidates_alone_are_no_items() {
    let processor = MockProcessor { pages: vec!["PC"] };

    let err = convert_pdf(&[], &processor, &InvoiceParser::new()).unwrap_err();
    assert!(matches!(err, EncomError::Extraction(ExtractionError::NoItems)));

    let report = InvoiceParser::new().parse_page(1, "PC");
    assert_eq!(report.skipped[0].reason, SkipReason::Isolated);

    let processor = MockProcessor {
        pages: vec!["GRAND TOTAL PC", "PC COUNT"],
    };
    let err = convert_pdf(&[], &processor, &InvoiceParser::new()).unwrap_err();
    assert!(matches!(err, EncomError::Extraction(ExtractionError::NoItems)));
}

#[test]
fn decode_failure_propagates() {
    let err = convert_pdf(b"junk", &BrokenProcessor, &InvoiceParser::new()).unwrap_err();
    assert!(matches!(err, EncomError::Pdf(PdfError::Parse(_))));
}

// ---------------------------------------------------------------------------
// Spreadsheet bytes read back with calamine
// ---------------------------------------------------------------------------
#[test]
fn xlsx_export_round_trip() {
    let processor = MockProcessor {
        pages: vec![PAGE_ONE, PAGE_TWO],
    };

    let (report, bytes) = convert_pdf_to(
        &[],
        &processor,
        &InvoiceParser::new(),
        &XlsxSink::new("Invoice_Items"),
    )
    .unwrap();

    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range("Invoice_Items").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();

    assert_eq!(rows.len(), report.items.len() + 1);
    assert_eq!(
        rows[0],
        vec!["ITEM", "Item Code(Pre PR)", "MASK NAME", "Q'TY", "U/M", "U/P", "AMOUNT", "Term"]
    );
    assert_eq!(
        rows[1],
        vec!["1", "PHOTOMASK EB6X-NIK", "EB6X-NIK-0101", "2", "PC", "1250.00", "2500.00", "USD"]
    );
}

// ---------------------------------------------------------------------------
// Same input, same records
// ---------------------------------------------------------------------------
#[test]
fn pipeline_is_deterministic() {
    let processor = MockProcessor {
        pages: vec![PAGE_ONE, PAGE_TWO],
    };
    let parser = InvoiceParser::new();

    let first = convert_pdf(&[], &processor, &parser).unwrap();
    let second = convert_pdf(&[], &processor, &parser).unwrap();
    assert_eq!(first.line_items(), second.line_items());
}

#[test]
fn csv_output_is_byte_identical_across_runs() {
    let processor = MockProcessor {
        pages: vec![PAGE_ONE, PAGE_TWO],
    };
    let parser = InvoiceParser::new();

    let (_, first) = convert_pdf_to(&[], &processor, &parser, &CsvSink).unwrap();
    let (_, second) = convert_pdf_to(&[], &processor, &parser, &CsvSink).unwrap();
    assert_eq!(first, second);
    assert_eq!(String::from_utf8(first).unwrap().lines().count(), 4);
}
