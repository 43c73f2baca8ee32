// Copyright (c) 2025 Ismael Theiskaa
// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! Low-level drawing surfaces.
//!
//! The invoice layouts never talk to [`printpdf`][] directly.  They draw on a [`Canvas`][]: a
//! sequence of pages of one fixed size, with a current text style, on which strings and lines are
//! placed at explicit coordinates.  Coordinates are PDF user space: points, measured from the
//! bottom left corner of the page.
//!
//! [`PdfCanvas`][] is the canvas that produces a PDF document.  It collects the drawing
//! operations of every page and assembles the [`printpdf::PdfDocument`][] when it is finished.
//!
//! [`printpdf`]: https://docs.rs/printpdf/latest/printpdf
//! [`printpdf::PdfDocument`]: https://docs.rs/printpdf/latest/printpdf/struct.PdfDocument.html
//! [`Canvas`]: trait.Canvas.html
//! [`PdfCanvas`]: struct.PdfCanvas.html

use std::io;

use crate::error::{Error, ErrorKind};
use crate::fonts::{self, FontSet};
use crate::style::{Align, FontWeight, TextStyle};
use crate::{Position, Pt, Size};

/// A drawing surface made of pages of one fixed size.
pub trait Canvas {
    /// Returns the size of the pages of this canvas.
    fn page_size(&self) -> Size;

    /// Returns the number of pages started so far.
    fn page_count(&self) -> usize;

    /// Returns the current text style.
    fn style(&self) -> TextStyle;

    /// Sets the text style used by the following strings.
    fn set_style(&mut self, style: TextStyle);

    /// Returns the width of the given string in the current text style.
    fn text_width(&self, s: &str) -> Pt;

    /// Draws a string with its baseline starting at the given position.
    fn draw_string(&mut self, position: Position, s: &str) -> Result<(), Error>;

    /// Draws a straight line between the two positions.
    fn line(&mut self, from: Position, to: Position);

    /// Closes the current page and starts a new one.
    ///
    /// The text style is kept.
    fn new_page(&mut self);

    /// Draws a string aligned relative to the anchor `x` on the baseline `y`.
    fn draw_aligned(&mut self, x: Pt, y: Pt, s: &str, align: Align) -> Result<(), Error> {
        let x = match align {
            Align::Left => x,
            Align::Right => x - self.text_width(s),
            Align::Centre => x - self.text_width(s) * 0.5,
        };
        self.draw_string(Position::new(x, y), s)
    }

    /// Draws a horizontal line on the height `y`.
    fn hline(&mut self, x1: Pt, x2: Pt, y: Pt) {
        self.line(Position::new(x1, y), Position::new(x2, y));
    }
}

/// The PDF fonts registered for the canvas fonts.
#[derive(Clone, Debug)]
enum PdfFonts {
    Builtin,
    External {
        regular: printpdf::FontId,
        bold: printpdf::FontId,
    },
}

/// A [`Canvas`][] that renders a PDF document.
///
/// [`Canvas`]: trait.Canvas.html
pub struct PdfCanvas {
    doc: printpdf::PdfDocument,
    fonts: FontSet,
    pdf_fonts: PdfFonts,
    size: Size,
    style: TextStyle,
    // invariant: pages.len() >= 1
    pages: Vec<Vec<printpdf::Op>>,
}

impl PdfCanvas {
    /// Creates a new PDF canvas with one empty page of the given size.
    ///
    /// Embedded fonts of the font set are registered with the document.
    pub fn new(size: Size, title: impl AsRef<str>, fonts: FontSet) -> Result<PdfCanvas, Error> {
        let mut doc = printpdf::PdfDocument::new(title.as_ref());
        let pdf_fonts = match &fonts {
            FontSet::Builtin => PdfFonts::Builtin,
            FontSet::Embedded { regular, bold } => PdfFonts::External {
                regular: add_font(&mut doc, regular.data())?,
                bold: add_font(&mut doc, bold.data())?,
            },
        };
        Ok(PdfCanvas {
            doc,
            fonts,
            pdf_fonts,
            size,
            style: TextStyle::default(),
            pages: vec![Vec::new()],
        })
    }

    /// Closes the last page, seals the document and returns it as a buffer positioned at its
    /// start.
    pub fn finish(mut self) -> Result<io::Cursor<Vec<u8>>, Error> {
        let page_count = self.pages.len();
        for ops in self.pages.drain(..) {
            let page = printpdf::PdfPage::new(self.size.width.into(), self.size.height.into(), ops);
            self.doc.pages.push(page);
        }

        let mut warnings = Vec::new();
        let opts = printpdf::PdfSaveOptions::default();
        let mut buf: Vec<u8> = Vec::new();
        self.doc.save_writer(&mut buf, &opts, &mut warnings);
        if buf.is_empty() {
            return Err(Error::new(
                "printpdf produced an empty document",
                ErrorKind::Internal,
            ));
        }
        tracing::debug!(
            pages = page_count,
            bytes = buf.len(),
            warnings = warnings.len(),
            "finished pdf document"
        );
        Ok(io::Cursor::new(buf))
    }

    fn ops(&mut self) -> &mut Vec<printpdf::Op> {
        let idx = self.pages.len() - 1;
        &mut self.pages[idx]
    }

    fn builtin_font(weight: FontWeight) -> printpdf::BuiltinFont {
        match weight {
            FontWeight::Regular => printpdf::BuiltinFont::Helvetica,
            FontWeight::Bold => printpdf::BuiltinFont::HelveticaBold,
        }
    }
}

fn add_font(doc: &mut printpdf::PdfDocument, data: &[u8]) -> Result<printpdf::FontId, Error> {
    let mut warnings = Vec::new();
    let parsed = printpdf::ParsedFont::from_bytes(data, 0, &mut warnings)
        .ok_or_else(|| Error::new("Failed to parse font data", ErrorKind::InvalidFont))?;
    Ok(doc.add_font(&parsed))
}

impl Canvas for PdfCanvas {
    fn page_size(&self) -> Size {
        self.size
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn style(&self) -> TextStyle {
        self.style
    }

    fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    fn text_width(&self, s: &str) -> Pt {
        self.fonts.text_width(self.style, s)
    }

    fn draw_string(&mut self, position: Position, s: &str) -> Result<(), Error> {
        let style = self.style;
        let (font, items) = match &self.pdf_fonts {
            PdfFonts::Builtin => {
                // Validate before emitting anything so that the page stays consistent.
                fonts::encode_win1252(s)?;
                let font = printpdf::PdfFontHandle::Builtin(PdfCanvas::builtin_font(style.weight));
                (font, vec![printpdf::TextItem::Text(s.to_string())])
            }
            PdfFonts::External { regular, bold } => {
                let id = match style.weight {
                    FontWeight::Regular => regular.clone(),
                    FontWeight::Bold => bold.clone(),
                };
                let glyph_ids = self
                    .fonts
                    .embedded(style.weight)
                    .map(|f| f.glyph_ids(s))
                    .ok_or_else(|| Error::new("Missing embedded font", ErrorKind::Internal))?;
                let codepoints = glyph_ids
                    .into_iter()
                    .zip(s.chars())
                    .map(|(gid, ch)| printpdf::Codepoint::with_cid(gid, 0.0, ch.to_string()))
                    .collect();
                (
                    printpdf::PdfFontHandle::External(id),
                    vec![printpdf::TextItem::GlyphIds(codepoints)],
                )
            }
        };

        let ops = self.ops();
        ops.push(printpdf::Op::StartTextSection);
        ops.push(printpdf::Op::SetTextCursor {
            pos: position.into(),
        });
        ops.push(printpdf::Op::SetFont {
            font,
            size: printpdf::Pt(style.size),
        });
        ops.push(printpdf::Op::ShowText { items });
        ops.push(printpdf::Op::EndTextSection);
        Ok(())
    }

    fn line(&mut self, from: Position, to: Position) {
        let line = printpdf::Line {
            points: vec![
                printpdf::LinePoint {
                    p: from.into(),
                    bezier: false,
                },
                printpdf::LinePoint {
                    p: to.into(),
                    bezier: false,
                },
            ],
            is_closed: false,
        };
        let ops = self.ops();
        ops.push(printpdf::Op::SetOutlineThickness {
            pt: printpdf::Pt(1.0),
        });
        ops.push(printpdf::Op::DrawLine { line });
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_pdf_canvas_pages_and_finish() {
        let mut canvas = PdfCanvas::new(Size::A4, "test", FontSet::Builtin).expect("canvas");
        assert_eq!(canvas.page_count(), 1);
        canvas.set_style(TextStyle::bold(18.0));
        canvas
            .draw_aligned(Pt(297.6), Pt(791.9), "JewelCalc Invoice", Align::Centre)
            .expect("draw");
        canvas.hline(Pt(40.0), Pt(555.3), Pt(700.0));
        canvas.new_page();
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.style(), TextStyle::bold(18.0));

        let buf = canvas.finish().expect("finish");
        assert_eq!(buf.position(), 0);
        assert!(buf.get_ref().starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_canvas_rejects_unencodable_text() {
        let mut canvas = PdfCanvas::new(Size::A4, "test", FontSet::Builtin).expect("canvas");
        let before = canvas.pages[0].len();
        let err = canvas
            .draw_string(Position::new(Pt(40.0), Pt(700.0)), "Total: \u{20B9}1030.00")
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedEncoding));
        assert_eq!(canvas.pages[0].len(), before);
    }

    #[test]
    fn test_embedded_text_is_shown_as_glyph_ids() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/RobotoMedium.ttf");
        let fonts = FontSet::from_files(path, path).expect("fixture font");
        let mut canvas = PdfCanvas::new(Size::A4, "test", fonts).expect("canvas");
        canvas
            .draw_string(Position::new(Pt(40.0), Pt(700.0)), "\u{20B9}5")
            .expect("draw");

        let ops = &canvas.pages[0];
        assert!(ops.iter().any(|op| matches!(
            op,
            printpdf::Op::SetFont {
                font: printpdf::PdfFontHandle::External(_),
                ..
            }
        )));
        let items = ops
            .iter()
            .find_map(|op| match op {
                printpdf::Op::ShowText { items } => Some(items),
                _ => None,
            })
            .expect("ShowText");
        match items.as_slice() {
            [printpdf::TextItem::GlyphIds(glyphs)] => {
                assert_eq!(glyphs.len(), 2);
                assert_eq!(glyphs[0].gid, 391);
                assert_eq!(glyphs[0].cid.as_deref(), Some("\u{20B9}"));
            }
            other => panic!("unexpected text items {:?}", other),
        }
    }

    #[test]
    fn test_text_width_follows_style() {
        let mut canvas = PdfCanvas::new(Size::A4, "test", FontSet::Builtin).expect("canvas");
        canvas.set_style(TextStyle::regular(10.0));
        let small = canvas.text_width("56175.00");
        canvas.set_style(TextStyle::regular(20.0));
        let large = canvas.text_width("56175.00");
        assert!((large.0 - small.0 * 2.0).abs() < 1e-3);
    }
}
