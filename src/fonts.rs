// Copyright (c) 2025 Ismael Theiskaa
// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! Fonts and text metrics.
//!
//! Invoices are drawn either with the built-in PDF fonts Helvetica and Helvetica-Bold, or with a
//! regular/bold pair of TrueType fonts that are embedded into the document.  Right-aligned and
//! centered strings need the width of the text, so a [`FontSet`][] knows how to measure a string
//! in either case: built-in fonts use the standard AFM advance widths, embedded fonts are
//! measured with [`rusttype`][].
//!
//! [`FontSet`]: enum.FontSet.html
//! [`rusttype`]: https://docs.rs/rusttype

use std::fmt;
use std::fs;
use std::path;

use crate::error::{Context as _, Error, ErrorKind};
use crate::style::{FontWeight, TextStyle};
use crate::Pt;

/// Advance widths of Helvetica for the printable ASCII range (0x20 to 0x7E), in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Advance widths of Helvetica-Bold for the printable ASCII range, in 1/1000 em.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Width used for characters outside the printable ASCII range.
const DEFAULT_BUILTIN_WIDTH: u16 = 556;

fn builtin_char_width(weight: FontWeight, c: char) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA_WIDTHS,
        FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match c as u32 {
        cp @ 0x20..=0x7E => table[(cp - 0x20) as usize],
        _ => DEFAULT_BUILTIN_WIDTH,
    }
}

/// A TrueType font that is embedded into the generated document.
#[derive(Clone)]
pub struct EmbeddedFont {
    data: Vec<u8>,
    font: rusttype::Font<'static>,
}

impl EmbeddedFont {
    /// Parses the given font data.
    pub fn new(data: Vec<u8>) -> Result<EmbeddedFont, Error> {
        let font = rusttype::Font::try_from_vec(data.clone())
            .ok_or_else(|| Error::new("Failed to parse font data", ErrorKind::InvalidFont))?;
        Ok(EmbeddedFont { data, font })
    }

    /// Reads and parses the font file at the given path.
    pub fn from_file(path: impl AsRef<path::Path>) -> Result<EmbeddedFont, Error> {
        let path = path.as_ref();
        let data = fs::read(path)
            .with_context(|| format!("Failed to open font file {}", path.display()))?;
        EmbeddedFont::new(data)
    }

    /// Returns the raw font data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the advance width of the given string at the given font size.
    pub fn text_width(&self, size: f32, s: &str) -> Pt {
        let scale = rusttype::Scale::uniform(self.pixel_height(size));
        let width: f32 = s
            .chars()
            .map(|c| self.font.glyph(c).scaled(scale).h_metrics().advance_width)
            .sum();
        Pt(width)
    }

    /// Returns the glyph IDs for the characters of the given string.
    pub fn glyph_ids(&self, s: &str) -> Vec<u16> {
        s.chars().map(|c| self.font.glyph(c).id().0).collect()
    }

    /// Returns `true` if the font has a glyph for every character of the string.
    pub fn covers(&self, s: &str) -> bool {
        s.chars().all(|c| self.font.glyph(c).id().0 != 0)
    }

    // rusttype scales by the ascent-to-descent height, PDF font sizes are in em.
    fn pixel_height(&self, size: f32) -> f32 {
        let units_per_em = f32::from(self.font.units_per_em());
        let v_metrics = self.font.v_metrics_unscaled();
        size * (v_metrics.ascent - v_metrics.descent) / units_per_em
    }
}

impl fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedFont")
            .field("data", &format!("[{} bytes]", self.data.len()))
            .finish()
    }
}

/// The regular and bold fonts used to draw an invoice.
#[derive(Clone, Debug, Default)]
pub enum FontSet {
    /// The built-in Helvetica and Helvetica-Bold fonts (Windows-1252 text only).
    #[default]
    Builtin,
    /// A pair of embedded TrueType fonts.
    Embedded {
        /// The regular font.
        regular: EmbeddedFont,
        /// The bold font.
        bold: EmbeddedFont,
    },
}

impl FontSet {
    /// Loads an embedded font set from the given TrueType files.
    pub fn from_files(
        regular: impl AsRef<path::Path>,
        bold: impl AsRef<path::Path>,
    ) -> Result<FontSet, Error> {
        Ok(FontSet::Embedded {
            regular: EmbeddedFont::from_file(regular)?,
            bold: EmbeddedFont::from_file(bold)?,
        })
    }

    /// Returns `true` if this set uses the built-in PDF fonts.
    pub fn is_builtin(&self) -> bool {
        matches!(self, FontSet::Builtin)
    }

    /// Returns the embedded font for the given weight, if any.
    pub fn embedded(&self, weight: FontWeight) -> Option<&EmbeddedFont> {
        match (self, weight) {
            (FontSet::Builtin, _) => None,
            (FontSet::Embedded { regular, .. }, FontWeight::Regular) => Some(regular),
            (FontSet::Embedded { bold, .. }, FontWeight::Bold) => Some(bold),
        }
    }

    /// Returns the width of the given string drawn with the given style.
    pub fn text_width(&self, style: TextStyle, s: &str) -> Pt {
        match self.embedded(style.weight) {
            Some(font) => font.text_width(style.size, s),
            None => {
                let units: u32 = s
                    .chars()
                    .map(|c| u32::from(builtin_char_width(style.weight, c)))
                    .sum();
                Pt(units as f32 * style.size / 1000.0)
            }
        }
    }

    /// Returns `true` if every character of the string can be drawn with both weights.
    pub fn can_encode(&self, s: &str) -> bool {
        match self {
            FontSet::Builtin => encode_win1252(s).is_ok(),
            FontSet::Embedded { regular, bold } => regular.covers(s) && bold.covers(s),
        }
    }
}

/// Encodes the given string using the Windows-1252 encoding for use with built-in PDF fonts,
/// returning an error if it contains unsupported characters.
pub fn encode_win1252(s: &str) -> Result<Vec<u8>, Error> {
    let mut out: Vec<u8> = Vec::with_capacity(s.len());
    for c in s.chars() {
        let b = match c as u32 {
            0x00..=0x7F => Some(c as u8),
            0xA0..=0xFF => Some(c as u8),
            0x20AC => Some(0x80), // EURO SIGN
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95),
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        };
        match b {
            Some(b) => out.push(b),
            None => {
                return Err(Error::new(
                    format!(
                        "Tried to print a string with characters that are not supported by the Windows-1252 encoding with a built-in font: {}",
                        s
                    ),
                    ErrorKind::UnsupportedEncoding,
                ))
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_encode_win1252_ok() {
        let s = "Subtotal: Rs.1000.00 \u{20AC}";
        let res = encode_win1252(s).expect("should encode");
        assert_eq!(res.len(), s.chars().count());
        assert_eq!(res.last(), Some(&0x80));
    }

    #[test]
    fn test_encode_win1252_rejects_rupee_sign() {
        let err = encode_win1252("Total: \u{20B9}1030.00").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedEncoding));
    }

    #[test]
    fn test_builtin_widths() {
        let fonts = FontSet::Builtin;
        // "0.00" = 3 digits of 556 + period of 278
        let w = fonts.text_width(TextStyle::regular(10.0), "0.00");
        assert!((w.0 - 19.46).abs() < 1e-3);
        // bold digits share the regular widths but letters differ
        let regular = fonts.text_width(TextStyle::regular(10.0), "Total");
        let bold = fonts.text_width(TextStyle::bold(10.0), "Total");
        assert!(bold > regular);
        assert_eq!(fonts.text_width(TextStyle::bold(14.0), ""), Pt(0.0));
    }

    #[test]
    fn test_builtin_can_encode() {
        let fonts = FontSet::Builtin;
        assert!(fonts.is_builtin());
        assert!(fonts.can_encode("Rs."));
        assert!(!fonts.can_encode("\u{20B9}"));
        assert!(fonts.embedded(FontWeight::Bold).is_none());
    }

    #[test]
    fn test_invalid_embedded_font() {
        let err = EmbeddedFont::new(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidFont));

        let err = EmbeddedFont::from_file("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::IoError(_)));
    }
}
