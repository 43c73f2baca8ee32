// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

use clap::Parser;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "analyze_pdf")]
#[command(about = "Print the page geometry, content streams and fonts of a rendered invoice", long_about = None)]
struct Args {
    /// Path to the PDF file to analyze
    #[arg(value_name = "FILE")]
    pdf_file: PathBuf,
}

fn decompress_stream(data: &[u8]) -> Vec<u8> {
    use flate2::read::ZlibDecoder;

    // zlib header: 0x78 followed by the flags byte
    if data.len() > 1 && data[0] == 0x78 {
        let mut decoder = ZlibDecoder::new(data);
        let mut result = Vec::new();
        if decoder.read_to_end(&mut result).is_ok() && !result.is_empty() {
            return result;
        }
    }

    data.to_vec()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !args.pdf_file.exists() {
        eprintln!(
            "Error: The file '{}' does not exist",
            args.pdf_file.display()
        );
        std::process::exit(1);
    }

    println!("\n════════════════════════════════════════════════════════");
    println!("PDF ANALYSIS: {}", args.pdf_file.display());
    println!("════════════════════════════════════════════════════════\n");

    let document = Document::load(&args.pdf_file)?;
    println!("  PDF Version: {}\n", document.version);

    analyze_pages(&document)?;
    analyze_fonts(&document)?;

    println!("════════════════════════════════════════════════════════");
    println!("Analysis completed");
    println!("════════════════════════════════════════════════════════\n");

    Ok(())
}

fn get_string_value(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).to_string()),
        Object::Name(name) => Some(String::from_utf8_lossy(name).to_string()),
        _ => None,
    }
}

fn resolve<'a>(document: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}

fn media_box(document: &Document, page_id: ObjectId) -> Option<Vec<f32>> {
    let page = document.get_dictionary(page_id).ok()?;
    let obj = resolve(document, page.get(b"MediaBox").ok()?)?;
    match obj {
        Object::Array(values) => values.iter().map(|v| v.as_float().ok()).collect(),
        _ => None,
    }
}

fn analyze_pages(document: &Document) -> Result<(), Box<dyn std::error::Error>> {
    println!("📰 PAGES AND CONTENT");
    println!("─────────────────────────────────────────────────────");

    let pages = document.get_pages();
    println!("  Number of pages: {}", pages.len());

    for (page_num, page_id) in pages {
        println!("\n  Page {}:", page_num);

        match media_box(document, page_id).as_deref() {
            Some([x0, y0, x1, y1]) => println!(
                "    MediaBox: {:.2} x {:.2} pt (at {:.2}, {:.2})",
                x1 - x0,
                y1 - y0,
                x0,
                y0
            ),
            _ => println!("    MediaBox: not set on the page"),
        }

        let page = document.get_dictionary(page_id)?;
        let contents = match page.get(b"Contents") {
            Ok(Object::Array(refs)) => refs.clone(),
            Ok(other) => vec![other.clone()],
            Err(_) => Vec::new(),
        };
        for content_ref in contents {
            if let Object::Reference(content_id) = content_ref {
                if let Ok(Object::Stream(stream)) = document.get_object(content_id) {
                    let content = decompress_stream(&stream.content);
                    let text = String::from_utf8_lossy(&content);
                    let text_ops = text.matches("Tj").count() + text.matches("TJ").count();
                    println!(
                        "    Content stream (ID: {:?}): {} bytes, {} decoded, {} text operations",
                        content_id,
                        stream.content.len(),
                        content.len(),
                        text_ops
                    );
                }
            }
        }
    }

    println!();
    Ok(())
}

fn analyze_fonts(document: &Document) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔤 FONTS");
    println!("─────────────────────────────────────────────────────");

    let mut names = BTreeSet::new();
    for (id, object) in document.objects.iter() {
        let Object::Dictionary(dict) = object else {
            continue;
        };
        let is_font = dict
            .get(b"Type")
            .ok()
            .and_then(get_string_value)
            .is_some_and(|t| t == "Font");
        if !is_font {
            continue;
        }

        let subtype = dict
            .get(b"Subtype")
            .ok()
            .and_then(get_string_value)
            .unwrap_or_default();
        let base_font = dict
            .get(b"BaseFont")
            .ok()
            .and_then(get_string_value)
            .unwrap_or_else(|| "?".to_string());
        println!("  Font (ID: {:?}): {} {}", id, subtype, base_font);
        names.insert(base_font);
    }

    if names.is_empty() {
        println!("  No font dictionaries found");
    } else {
        let names: Vec<_> = names.into_iter().collect();
        println!("\n  Font names: {}", names.join(", "));
    }

    println!();
    Ok(())
}
