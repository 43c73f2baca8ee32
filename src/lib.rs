// Copyright (c) 2025 Ismael Theiskaa
// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! PDF rendering for JewelCalc jewelry-sales invoices.
//!
//! An invoice that has already been computed upstream (totals, taxes, discounts, line items) is
//! laid out in one of two layouts:
//!
//! - [`render_a4`][]: a standard A4 page with a tabular item list that breaks onto new pages when
//!   the rows reach the bottom of the page.
//! - [`render_thermal`][]: a single 226pt wide strip for receipt printers whose height is
//!   measured up front so that the page fits its content exactly.
//!
//! Both return the finished PDF as an in-memory buffer positioned at its start, which can be
//! written to disk or turned into an inline download anchor with [`download_link`][].
//!
//! Drawing goes through the [`Canvas`][] trait.  [`PdfCanvas`][] writes a PDF using
//! [`printpdf`][], while [`RecordingCanvas`][] keeps every operation in memory so that layouts can
//! be inspected without parsing a PDF.
//!
//! # Example
//!
//! ```no_run
//! use jewelcalc_pdf::{render_a4, download_link, Invoice, LineItem, Theme};
//!
//! let invoice: Invoice = serde_json::from_str(r#"{
//!     "invoice_no": "INV-1", "date": "2024-01-01", "subtotal": 1000.0,
//!     "cgst_percent": 1.5, "cgst_amount": 15.0, "sgst_percent": 1.5, "sgst_amount": 15.0,
//!     "total": 1030.0
//! }"#).unwrap();
//! let items: Vec<LineItem> = Vec::new();
//! let mut pdf = render_a4(&invoice, &items, None, &Theme::default()).unwrap();
//! let anchor = download_link(&mut pdf, "invoice.pdf").unwrap();
//! assert!(anchor.starts_with("<a href=\"data:application/pdf;base64,"));
//! ```
//!
//! [`printpdf`]: https://docs.rs/printpdf/latest/printpdf
//! [`render_a4`]: a4/fn.render_a4.html
//! [`render_thermal`]: thermal/fn.render_thermal.html
//! [`download_link`]: link/fn.download_link.html
//! [`Canvas`]: render/trait.Canvas.html
//! [`PdfCanvas`]: render/struct.PdfCanvas.html
//! [`RecordingCanvas`]: record/struct.RecordingCanvas.html

#![warn(missing_docs, rust_2018_idioms)]

pub mod a4;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod link;
pub mod model;
pub mod record;
pub mod render;
pub mod style;
pub mod theme;
pub mod thermal;

use derive_more::{Add, AddAssign, Div, From, Into, Mul, MulAssign, Sub, SubAssign, Sum};

pub use crate::a4::{draw_a4, render_a4};
pub use crate::error::{Context, Error, ErrorKind};
pub use crate::link::{download_link, download_link_with_label};
pub use crate::model::{Customer, Invoice, InvoiceDocument, LineItem};
pub use crate::record::RecordingCanvas;
pub use crate::render::{Canvas, PdfCanvas};
pub use crate::theme::Theme;
pub use crate::thermal::{draw_thermal, receipt_height, render_thermal};

/// A length measured in PDF points (1/72 inch).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Sum,
    From,
    Into,
)]
pub struct Pt(pub f32);

impl From<i16> for Pt {
    fn from(pt: i16) -> Pt {
        Pt(pt.into())
    }
}

impl From<Pt> for printpdf::Pt {
    fn from(pt: Pt) -> printpdf::Pt {
        printpdf::Pt(pt.0)
    }
}

impl From<Pt> for printpdf::Mm {
    fn from(pt: Pt) -> printpdf::Mm {
        printpdf::Mm::from(printpdf::Pt(pt.0))
    }
}

/// A position in PDF user space, relative to the bottom left corner of a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Add, AddAssign, Sub, SubAssign)]
pub struct Position {
    /// The horizontal coordinate.
    pub x: Pt,
    /// The vertical coordinate, growing towards the top of the page.
    pub y: Pt,
}

impl Position {
    /// Creates a new position from the given coordinates.
    pub fn new(x: impl Into<Pt>, y: impl Into<Pt>) -> Position {
        Position {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl<X: Into<Pt>, Y: Into<Pt>> From<(X, Y)> for Position {
    fn from(values: (X, Y)) -> Position {
        Position::new(values.0, values.1)
    }
}

impl From<Position> for printpdf::Point {
    fn from(pos: Position) -> printpdf::Point {
        printpdf::Point {
            x: pos.x.into(),
            y: pos.y.into(),
        }
    }
}

/// The size of a page or area.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// The width.
    pub width: Pt,
    /// The height.
    pub height: Pt,
}

impl Size {
    /// ISO A4 portrait, 210 × 297 mm.
    pub const A4: Size = Size {
        width: Pt(595.275_6),
        height: Pt(841.889_8),
    };

    /// Creates a new size from the given width and height.
    pub fn new(width: impl Into<Pt>, height: impl Into<Pt>) -> Size {
        Size {
            width: width.into(),
            height: height.into(),
        }
    }
}

impl<W: Into<Pt>, H: Into<Pt>> From<(W, H)> for Size {
    fn from(values: (W, H)) -> Size {
        Size::new(values.0, values.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pt_arithmetic() {
        let mut y = Pt(100.0);
        y -= Pt(14.0);
        assert_eq!(y, Pt(86.0));
        assert_eq!(Pt(10.0) * 0.5, Pt(5.0));
        let total: Pt = vec![Pt(1.0), Pt(2.0), Pt(3.5)].into_iter().sum();
        assert_eq!(total, Pt(6.5));
    }

    #[test]
    fn test_position_and_size_conversions() {
        let pos = Position::from((40.0f32, 791.0f32));
        assert_eq!(pos.x, Pt(40.0));
        let size = Size::from((226.0f32, 300.0f32));
        assert_eq!(size.width, Pt(226.0));
        assert!(Size::A4.height > Size::A4.width);
    }

    #[test]
    fn test_inputs_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Invoice>();
        assert_send_sync::<LineItem>();
        assert_send_sync::<Customer>();
        assert_send_sync::<Theme>();
        assert_send_sync::<Error>();
    }
}
