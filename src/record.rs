// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! A canvas that records drawing operations instead of producing a document.

use crate::error::Error;
use crate::fonts::FontSet;
use crate::render::Canvas;
use crate::style::TextStyle;
use crate::{Position, Pt, Size};

/// A drawing operation recorded by a [`RecordingCanvas`][].
///
/// [`RecordingCanvas`]: struct.RecordingCanvas.html
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A string drawn with its baseline starting at `position`.
    Text {
        /// The start of the baseline.
        position: Position,
        /// The style the string was drawn with.
        style: TextStyle,
        /// The string.
        text: String,
    },
    /// A straight line.
    Line {
        /// The start point.
        from: Position,
        /// The end point.
        to: Position,
    },
}

impl DrawOp {
    /// Returns the string of a text operation.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            DrawOp::Line { .. } => None,
        }
    }

    /// Returns the lowest y coordinate touched by this operation.
    pub fn bottom(&self) -> Pt {
        match self {
            DrawOp::Text { position, .. } => position.y,
            DrawOp::Line { from, to } => {
                if from.y <= to.y {
                    from.y
                } else {
                    to.y
                }
            }
        }
    }
}

/// A [`Canvas`][] that keeps every operation in memory, page by page.
///
/// Text widths are measured with the given font set, so that aligned strings land on the same
/// coordinates as on a [`PdfCanvas`][] with the same fonts.
///
/// [`Canvas`]: ../render/trait.Canvas.html
/// [`PdfCanvas`]: ../render/struct.PdfCanvas.html
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    fonts: FontSet,
    size: Size,
    style: TextStyle,
    // invariant: pages.len() >= 1
    pages: Vec<Vec<DrawOp>>,
}

impl RecordingCanvas {
    /// Creates a recording canvas measuring text with the built-in fonts.
    pub fn new(size: Size) -> RecordingCanvas {
        RecordingCanvas::with_fonts(size, FontSet::Builtin)
    }

    /// Creates a recording canvas measuring text with the given fonts.
    pub fn with_fonts(size: Size, fonts: FontSet) -> RecordingCanvas {
        RecordingCanvas {
            fonts,
            size,
            style: TextStyle::default(),
            pages: vec![Vec::new()],
        }
    }

    /// Returns the recorded operations of every page.
    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    /// Returns the strings drawn on the given page, in drawing order.
    pub fn page_texts(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|ops| ops.iter().filter_map(DrawOp::text).collect())
            .unwrap_or_default()
    }

    /// Returns all strings drawn on the canvas, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|ops| ops.iter().filter_map(DrawOp::text))
            .collect()
    }

    /// Returns the text operation that drew exactly the given string, with its page index.
    pub fn find_text(&self, s: &str) -> Option<(usize, &DrawOp)> {
        self.pages.iter().enumerate().find_map(|(idx, ops)| {
            ops.iter()
                .find(|op| op.text() == Some(s))
                .map(|op| (idx, op))
        })
    }

    /// Returns `true` if some string drawn on the canvas starts with the given prefix.
    pub fn has_text_starting_with(&self, prefix: &str) -> bool {
        self.texts().iter().any(|t| t.starts_with(prefix))
    }

    /// Returns the number of lines drawn on the canvas.
    pub fn line_count(&self) -> usize {
        self.pages
            .iter()
            .flatten()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
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
        let op = DrawOp::Text {
            position,
            style: self.style,
            text: s.to_string(),
        };
        let idx = self.pages.len() - 1;
        self.pages[idx].push(op);
        Ok(())
    }

    fn line(&mut self, from: Position, to: Position) {
        let idx = self.pages.len() - 1;
        self.pages[idx].push(DrawOp::Line { from, to });
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }
}
