// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! HTML download anchors for rendered documents.
//!
//! The document is embedded as a base64 `data:` URI, so the anchor works without serving the
//! file separately.

use std::io::Read;

use base64::Engine as _;

use crate::error::{Context as _, Error};

/// The anchor label used by [`download_link`][].
///
/// [`download_link`]: fn.download_link.html
pub const DEFAULT_LABEL: &str = "\u{1F4C4} Download PDF";

/// Returns the `data:` URI of a PDF document.
pub fn data_uri(pdf: &[u8]) -> String {
    format!(
        "data:application/pdf;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(pdf)
    )
}

/// Reads the whole document from `reader` and returns an anchor that downloads it as `filename`.
///
/// The reader is consumed from its current position, so pass a rewound buffer.
pub fn download_link(reader: &mut impl Read, filename: &str) -> Result<String, Error> {
    download_link_with_label(reader, filename, DEFAULT_LABEL)
}

/// Same as [`download_link`][] with a custom anchor label.
///
/// [`download_link`]: fn.download_link.html
pub fn download_link_with_label(
    reader: &mut impl Read,
    filename: &str,
    label: &str,
) -> Result<String, Error> {
    let mut pdf = Vec::new();
    reader
        .read_to_end(&mut pdf)
        .context("Failed to read the PDF document")?;
    if pdf.is_empty() {
        tracing::warn!(filename, "building a download link for an empty document");
    }
    Ok(format!(
        "<a href=\"{}\" download=\"{}\">{}</a>",
        data_uri(&pdf),
        escape_html(filename),
        escape_html(label)
    ))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
