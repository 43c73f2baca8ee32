// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

use std::io::Read;

use flate2::read::ZlibDecoder;
use float_cmp::approx_eq;
use lopdf::content::Content;
use lopdf::{Document, Object};

use jewelcalc_pdf::style::FontWeight;
use jewelcalc_pdf::theme::FontPaths;
use jewelcalc_pdf::{
    download_link, draw_a4, receipt_height, render_a4, render_thermal, Customer, ErrorKind,
    Invoice, InvoiceDocument, LineItem, RecordingCanvas, Size, Theme,
};

const FIXTURE_FONT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/RobotoMedium.ttf"
);

fn sample() -> InvoiceDocument {
    InvoiceDocument::from_json_file("tests/fixtures/sample_invoice.json").expect("fixture")
}

fn many_items(n: u32) -> Vec<LineItem> {
    let item = sample().items[0].clone();
    (1..=n)
        .map(|item_no| LineItem {
            item_no,
            ..item.clone()
        })
        .collect()
}

fn media_boxes(buf: &[u8]) -> Vec<[f32; 4]> {
    let document = Document::load_mem(buf).expect("PDF should be readable");
    document
        .get_pages()
        .into_values()
        .map(|page_id| {
            let page = document.get_dictionary(page_id).expect("page");
            let media_box = match page.get(b"MediaBox").expect("MediaBox") {
                Object::Reference(id) => document.get_object(*id).expect("MediaBox object"),
                other => other,
            };
            let values: Vec<f32> = media_box
                .as_array()
                .expect("MediaBox array")
                .iter()
                .map(|v| v.as_float().expect("number"))
                .collect();
            [values[0], values[1], values[2], values[3]]
        })
        .collect()
}

fn assert_size(media_box: [f32; 4], width: f32, height: f32) {
    let [x0, y0, x1, y1] = media_box;
    assert!(
        approx_eq!(f32, x1 - x0, width, epsilon = 0.05),
        "width {} != {}",
        x1 - x0,
        width
    );
    assert!(
        approx_eq!(f32, y1 - y0, height, epsilon = 0.05),
        "height {} != {}",
        y1 - y0,
        height
    );
}

#[test]
fn a4_invoice_parses_as_single_a4_page() {
    let doc = sample();
    let buf = render_a4(&doc.invoice, &doc.items, doc.customer(), &Theme::default())
        .expect("render")
        .into_inner();

    let mut warnings = Vec::new();
    let parsed =
        printpdf::PdfDocument::parse(&buf, &printpdf::PdfParseOptions::default(), &mut warnings)
            .expect("parse");
    assert_eq!(parsed.pages.len(), 1);

    let boxes = media_boxes(&buf);
    assert_eq!(boxes.len(), 1);
    assert_size(boxes[0], 595.2756, 841.8898);
}

#[test]
fn a4_invoice_breaks_long_item_lists() {
    let doc = sample();
    let items = many_items(120);
    let buf = render_a4(&doc.invoice, &items, doc.customer(), &Theme::default())
        .expect("render")
        .into_inner();

    let boxes = media_boxes(&buf);
    assert_eq!(boxes.len(), 3);
    for media_box in boxes {
        assert_size(media_box, 595.2756, 841.8898);
    }
}

#[test]
fn thermal_receipt_is_one_page_of_measured_height() {
    let doc = sample();
    let theme = Theme::default();
    for items in [Vec::new(), doc.items.clone(), many_items(40)] {
        let buf = render_thermal(&doc.invoice, &items, doc.customer(), &theme)
            .expect("render")
            .into_inner();
        let boxes = media_boxes(&buf);
        assert_eq!(boxes.len(), 1);
        let height = receipt_height(&doc.invoice, &items, doc.customer(), &theme);
        assert_size(boxes[0], 226.0, height.0);
    }
}

#[test]
fn thermal_receipt_grows_with_items() {
    let doc = sample();
    let theme = Theme::default();
    let short = receipt_height(&doc.invoice, &many_items(1), None, &theme);
    let long = receipt_height(&doc.invoice, &many_items(10), None, &theme);
    // six lines per item: 5 x 10pt + 12pt
    assert!(approx_eq!(f32, long.0 - short.0, 9.0 * 62.0, epsilon = 1e-3));
}

#[test]
fn download_link_of_rendered_invoice() {
    let doc = sample();
    let mut pdf = render_thermal(&doc.invoice, &doc.items, None, &Theme::default()).expect("pdf");
    let anchor = download_link(&mut pdf, "invoice_thermal.pdf").expect("link");
    assert!(anchor.starts_with("<a href=\"data:application/pdf;base64,JVBER"));
    assert!(anchor.ends_with("download=\"invoice_thermal.pdf\">\u{1F4C4} Download PDF</a>"));
}

fn single_item_invoice() -> (Invoice, Vec<LineItem>) {
    let invoice = Invoice {
        invoice_no: "INV-1".into(),
        date: "2024-01-01".into(),
        subtotal: 1000.0,
        cgst_percent: 1.5,
        cgst_amount: 15.0,
        sgst_percent: 1.5,
        sgst_amount: 15.0,
        total: 1030.0,
        ..Invoice::default()
    };
    let item = LineItem {
        item_no: 1,
        metal: "Gold".into(),
        weight: 10.5,
        rate: 5000.0,
        item_value: 52500.0,
        wastage_percent: 2.0,
        wastage_amount: 1050.0,
        making_percent: 5.0,
        making_amount: 2625.0,
        line_total: 56175.0,
    };
    (invoice, vec![item])
}

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .expect("content stream should inflate");
    out
}

/// Returns the string operands of every `Tj`/`TJ` operator, page by page.
fn shown_strings(buf: &[u8]) -> Vec<Vec<Vec<u8>>> {
    let document = Document::load_mem(buf).expect("PDF should be readable");
    document
        .get_pages()
        .into_values()
        .map(|page_id| {
            let mut shown = Vec::new();
            for content_id in document.get_page_contents(page_id) {
                let stream = document
                    .get_object(content_id)
                    .and_then(|obj| obj.as_stream())
                    .expect("content stream");
                let data = match stream.dict.get(b"Filter") {
                    Ok(_) => inflate(&stream.content),
                    Err(_) => stream.content.clone(),
                };
                let content = Content::decode(&data).expect("content operations");
                for op in content.operations {
                    match (op.operator.as_str(), op.operands.first()) {
                        ("Tj", Some(Object::String(bytes, _))) => shown.push(bytes.clone()),
                        ("TJ", Some(Object::Array(items))) => shown.push(
                            items
                                .iter()
                                .filter_map(|item| match item {
                                    Object::String(bytes, _) => Some(bytes.as_slice()),
                                    _ => None,
                                })
                                .flatten()
                                .copied()
                                .collect(),
                        ),
                        _ => {}
                    }
                }
            }
            shown
        })
        .collect()
}

/// Built-in fonts show Windows-1252 bytes, which are ASCII for invoice text.
fn shown_text(page: &[Vec<u8>]) -> Vec<String> {
    page.iter()
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect()
}

fn glyph_bytes(ids: Vec<u16>) -> Vec<u8> {
    ids.into_iter().flat_map(u16::to_be_bytes).collect()
}

#[test]
fn single_item_a4_invoice_text() {
    let (invoice, items) = single_item_invoice();
    let buf = render_a4(&invoice, &items, None, &Theme::default())
        .expect("render")
        .into_inner();

    let pages = shown_strings(&buf);
    assert_eq!(pages.len(), 1);
    let texts = shown_text(&pages[0]);
    assert!(
        texts.iter().any(|t| t == "Total: Rs.1030.00"),
        "no total line in {:?}",
        texts
    );
    assert!(texts.iter().any(|t| t == "Subtotal: Rs.1000.00"));
    assert!(texts.iter().any(|t| t == "CGST (1.50%): Rs.15.00"));
    assert_eq!(texts.iter().filter(|t| *t == "Gold").count(), 1);
    assert_eq!(texts.iter().filter(|t| *t == "56175.00").count(), 1);
    assert!(!texts.iter().any(|t| t.starts_with("Discount")));
    assert!(!texts.iter().any(|t| t.starts_with("Account:")));
    assert!(!texts.iter().any(|t| t.starts_with("Customer:")));
}

#[test]
fn embedded_fonts_draw_the_rupee_sign() {
    let theme = Theme {
        fonts: Some(FontPaths {
            regular: FIXTURE_FONT.into(),
            bold: FIXTURE_FONT.into(),
        }),
        ..Theme::default()
    };
    let fonts = theme.load_fonts().expect("fixture font");
    assert!(fonts.can_encode("\u{20B9}"));
    let adapted = theme.for_fonts(&fonts);
    assert_eq!(adapted.currency_symbol, "\u{20B9}");

    let font = fonts.embedded(FontWeight::Bold).expect("embedded bold font");
    assert_eq!(font.glyph_ids("\u{20B9}"), vec![391]);

    let (invoice, items) = single_item_invoice();
    let mut canvas = RecordingCanvas::with_fonts(Size::A4, fonts.clone());
    draw_a4(&mut canvas, &invoice, &items, None, &adapted).expect("draw");
    assert!(canvas.find_text("Total: \u{20B9}1030.00").is_some());
    assert!(!canvas.has_text_starting_with("Total: Rs."));

    // embedded text is shown as big-endian glyph ids
    let a4 = render_a4(&invoice, &items, None, &theme)
        .expect("a4")
        .into_inner();
    let pages = shown_strings(&a4);
    assert_eq!(pages.len(), 1);
    let total = glyph_bytes(font.glyph_ids("Total: \u{20B9}1030.00"));
    assert!(pages[0].contains(&total));
    let fallback = glyph_bytes(font.glyph_ids("Total: Rs.1030.00"));
    assert!(!pages[0].contains(&fallback));

    let doc = sample();
    let receipt = render_thermal(&doc.invoice, &doc.items, doc.customer(), &theme)
        .expect("thermal")
        .into_inner();
    let height = receipt_height(&doc.invoice, &doc.items, doc.customer(), &adapted);
    assert_size(media_boxes(&receipt)[0], 226.0, height.0);
    let pages = shown_strings(&receipt);
    let grand_total = glyph_bytes(font.glyph_ids("\u{20B9}113406.10"));
    assert!(pages[0].contains(&grand_total));
}

#[test]
fn builtin_fonts_reject_text_outside_windows_1252() {
    let doc = sample();
    let theme = Theme::default();
    let customer = Customer {
        name: Some("\u{0906}\u{0936}\u{093E} \u{0930}\u{093E}\u{0935}".into()),
        ..doc.customer.clone().expect("fixture customer")
    };
    let results = [
        render_a4(&doc.invoice, &doc.items, Some(&customer), &theme),
        render_thermal(&doc.invoice, &doc.items, Some(&customer), &theme),
    ];
    for result in results {
        let err = result.expect_err("Devanagari name with Helvetica");
        assert!(matches!(err.kind(), ErrorKind::UnsupportedEncoding));
    }

    // the currency fallback only replaces the theme symbol, not input text
    let mut items = doc.items.clone();
    items[0].metal = "Gold \u{20B9}".into();
    let results = [
        render_a4(&doc.invoice, &items, None, &theme),
        render_thermal(&doc.invoice, &items, None, &theme),
    ];
    for result in results {
        let err = result.expect_err("rupee sign in a metal label");
        assert!(matches!(err.kind(), ErrorKind::UnsupportedEncoding));
    }
}
