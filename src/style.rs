// Copyright (c) 2025 Ismael Theiskaa
// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! Text styles and alignment.

/// The weight of a font in the invoice font family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// The regular font.
    #[default]
    Regular,
    /// The bold font.
    Bold,
}

/// The horizontal alignment of a string relative to its anchor x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// The string starts at the anchor.
    #[default]
    Left,
    /// The string ends at the anchor.
    Right,
    /// The string is centered on the anchor.
    Centre,
}

/// A font weight and size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// The font weight.
    pub weight: FontWeight,
    /// The font size in points.
    pub size: f32,
}

impl TextStyle {
    /// A regular style with the given size.
    pub const fn regular(size: f32) -> TextStyle {
        TextStyle {
            weight: FontWeight::Regular,
            size,
        }
    }

    /// A bold style with the given size.
    pub const fn bold(size: f32) -> TextStyle {
        TextStyle {
            weight: FontWeight::Bold,
            size,
        }
    }

    /// Returns `true` if this style uses the bold font.
    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

impl Default for TextStyle {
    fn default() -> TextStyle {
        TextStyle::regular(10.0)
    }
}
