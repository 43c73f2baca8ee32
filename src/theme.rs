// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! Presentation settings shared by both layouts.

use std::borrow::Cow;
use std::fs;
use std::path;

use serde::{Deserialize, Serialize};

use crate::error::{Context as _, Error};
use crate::fonts::FontSet;

/// Paths of a regular/bold pair of TrueType fonts to embed instead of the built-in fonts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontPaths {
    /// The regular font file.
    pub regular: path::PathBuf,
    /// The bold font file.
    pub bold: path::PathBuf,
}

/// The texts and fonts used to decorate an invoice.
///
/// Every field has a default, so a theme file only needs to list what it changes:
///
/// ```
/// use jewelcalc_pdf::Theme;
/// let theme = Theme::from_json_str(r#"{ "currency_symbol": "Rs. " }"#).unwrap();
/// assert_eq!(theme.title, "JewelCalc Invoice");
/// assert_eq!(theme.currency_symbol, "Rs. ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// The title of the A4 invoice.
    pub title: String,
    /// The title of the thermal receipt.
    pub receipt_title: String,
    /// The symbol printed in front of every amount.
    pub currency_symbol: String,
    /// The symbol used instead of `currency_symbol` when the fonts cannot draw it.
    pub currency_fallback: String,
    /// The courtesy line at the end of the receipt.
    pub closing_line: String,
    /// The label of the download anchor.
    pub link_label: String,
    /// Fonts to embed; the built-in Helvetica fonts are used if absent.
    pub fonts: Option<FontPaths>,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            title: "JewelCalc Invoice".to_string(),
            receipt_title: "JewelCalc".to_string(),
            currency_symbol: "\u{20B9}".to_string(),
            currency_fallback: "Rs.".to_string(),
            closing_line: "Thank you for your business!".to_string(),
            link_label: "\u{1F4C4} Download PDF".to_string(),
            fonts: None,
        }
    }
}

impl Theme {
    /// Parses a theme from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Theme, Error> {
        serde_json::from_str(s).context("Failed to decode theme")
    }

    /// Reads a theme from a JSON file.
    pub fn from_json_file(path: impl AsRef<path::Path>) -> Result<Theme, Error> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to decode theme file {}", path.display()))
    }

    /// Loads the fonts named by this theme.
    pub fn load_fonts(&self) -> Result<FontSet, Error> {
        match &self.fonts {
            Some(paths) => FontSet::from_files(&paths.regular, &paths.bold),
            None => Ok(FontSet::Builtin),
        }
    }

    /// Returns this theme with the currency symbol replaced by the fallback if the given fonts
    /// cannot draw it.
    pub fn for_fonts(&self, fonts: &FontSet) -> Cow<'_, Theme> {
        if fonts.can_encode(&self.currency_symbol) {
            Cow::Borrowed(self)
        } else {
            tracing::warn!(
                symbol = %self.currency_symbol,
                fallback = %self.currency_fallback,
                "currency symbol not available in fonts, using fallback"
            );
            let mut theme = self.clone();
            theme.currency_symbol = self.currency_fallback.clone();
            Cow::Owned(theme)
        }
    }

    /// Formats an amount with the currency symbol and two decimals.
    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}
