// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! The thermal receipt layout.
//!
//! A receipt is one continuous strip of paper, so it is rendered as a single 226pt wide page
//! (80mm roll) whose height fits the content.  The receipt is first planned as a list of
//! [`ReceiptLine`][]s, each carrying the advance to the next baseline taken from [`RECEIPT`][].
//! The measuring pass sums those advances to size the page, the drawing pass walks the same
//! list top-down, so both passes always agree.
//!
//! [`ReceiptLine`]: struct.ReceiptLine.html
//! [`RECEIPT`]: constant.RECEIPT.html

use std::io;

use crate::error::Error;
use crate::layout::{self, RECEIPT_CUSTOMER_LABELS};
use crate::model::{Customer, Invoice, LineItem};
use crate::render::{Canvas, PdfCanvas};
use crate::style::{Align, TextStyle};
use crate::theme::Theme;
use crate::{Pt, Size};

/// Decimals of percentages on the receipt.
pub const PERCENT_PRECISION: usize = 1;

/// Decimals of item weights on the receipt.
pub const WEIGHT_PRECISION: usize = 3;

/// Page geometry and line advances of the receipt.
///
/// Every advance is the distance from the baseline of a line to the baseline of the next one.
#[derive(Clone, Copy, Debug)]
pub struct ReceiptMetrics {
    /// Paper width.
    pub width: Pt,
    /// Left and right margin.
    pub margin: Pt,
    /// Indent of the item detail lines.
    pub indent: Pt,
    /// Distance of the first baseline from the top edge.
    pub top: Pt,
    /// Space below the last baseline.
    pub padding: Pt,
    /// Advance after the title.
    pub title: Pt,
    /// Advance after the invoice number.
    pub invoice_no: Pt,
    /// Advance after the date.
    pub date: Pt,
    /// Advance after each customer line.
    pub customer: Pt,
    /// Gap above a rule.
    pub rule_gap: Pt,
    /// Advance after a rule.
    pub rule: Pt,
    /// Advance after the item heading.
    pub heading: Pt,
    /// Advance after the item header and each detail line.
    pub item_line: Pt,
    /// Advance after an item's line total, including the space between items.
    pub item_total: Pt,
    /// Advance after each summary pair.
    pub summary: Pt,
    /// Advance after the rule above the total.
    pub total_rule: Pt,
    /// Advance after the total.
    pub total: Pt,
}

/// The receipt metrics, shared by the measuring and the drawing pass.
pub const RECEIPT: ReceiptMetrics = ReceiptMetrics {
    width: Pt(226.0),
    margin: Pt(10.0),
    indent: Pt(5.0),
    top: Pt(20.0),
    padding: Pt(20.0),
    title: Pt(18.0),
    invoice_no: Pt(12.0),
    date: Pt(15.0),
    customer: Pt(11.0),
    rule_gap: Pt(5.0),
    rule: Pt(12.0),
    heading: Pt(12.0),
    item_line: Pt(10.0),
    item_total: Pt(12.0),
    summary: Pt(11.0),
    total_rule: Pt(13.0),
    total: Pt(20.0),
};

const TITLE_STYLE: TextStyle = TextStyle::bold(12.0);
const DETAIL_STYLE: TextStyle = TextStyle::regular(8.0);
const HEADING_STYLE: TextStyle = TextStyle::bold(8.0);
const ITEM_HEADER_STYLE: TextStyle = TextStyle::bold(7.0);
const ITEM_STYLE: TextStyle = TextStyle::regular(7.0);
const SUBTOTAL_STYLE: TextStyle = TextStyle::bold(8.0);
const SUMMARY_STYLE: TextStyle = TextStyle::regular(8.0);
const TOTAL_STYLE: TextStyle = TextStyle::bold(10.0);
const CLOSING_STYLE: TextStyle = TextStyle::regular(7.0);

/// What a receipt line shows.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// A string centered on the page.
    Centred(String),
    /// A string starting at the left margin plus an indent.
    Left {
        /// The indent from the left margin.
        indent: Pt,
        /// The string.
        text: String,
    },
    /// A label at the left margin and a value ending at the right margin.
    Pair {
        /// The label.
        label: String,
        /// The value.
        value: String,
    },
    /// A rule from margin to margin.
    Rule,
    /// Nothing; only advances the cursor.
    Space,
}

/// One line of a planned receipt.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiptLine {
    /// The text style of the line.
    pub style: TextStyle,
    /// The content.
    pub content: Content,
    /// The distance to the next baseline.
    pub advance: Pt,
}

impl ReceiptLine {
    fn new(style: TextStyle, content: Content, advance: Pt) -> ReceiptLine {
        ReceiptLine {
            style,
            content,
            advance,
        }
    }

    fn centred(style: TextStyle, text: String, advance: Pt) -> ReceiptLine {
        ReceiptLine::new(style, Content::Centred(text), advance)
    }

    fn left(style: TextStyle, indent: Pt, text: String, advance: Pt) -> ReceiptLine {
        ReceiptLine::new(style, Content::Left { indent, text }, advance)
    }

    fn pair(style: TextStyle, label: String, value: String, advance: Pt) -> ReceiptLine {
        ReceiptLine::new(style, Content::Pair { label, value }, advance)
    }

    fn rule(advance: Pt) -> ReceiptLine {
        ReceiptLine::new(TextStyle::default(), Content::Rule, advance)
    }

    fn space(advance: Pt) -> ReceiptLine {
        ReceiptLine::new(TextStyle::default(), Content::Space, advance)
    }
}

/// Plans the lines of the receipt in drawing order.
pub fn plan_receipt(
    invoice: &Invoice,
    items: &[LineItem],
    customer: Option<&Customer>,
    theme: &Theme,
) -> Vec<ReceiptLine> {
    let m = &RECEIPT;
    let mut lines = vec![
        ReceiptLine::centred(TITLE_STYLE, theme.receipt_title.clone(), m.title),
        ReceiptLine::centred(
            DETAIL_STYLE,
            format!("Invoice: {}", invoice.invoice_no),
            m.invoice_no,
        ),
        ReceiptLine::centred(DETAIL_STYLE, format!("Date: {}", invoice.date), m.date),
    ];

    lines.extend(
        layout::customer_lines(customer, &RECEIPT_CUSTOMER_LABELS)
            .into_iter()
            .map(|text| ReceiptLine::left(DETAIL_STYLE, Pt(0.0), text, m.customer)),
    );

    lines.push(ReceiptLine::space(m.rule_gap));
    lines.push(ReceiptLine::rule(m.rule));
    lines.push(ReceiptLine::left(
        HEADING_STYLE,
        Pt(0.0),
        "Item Details".to_string(),
        m.heading,
    ));

    for item in items {
        let detail = |text: String| ReceiptLine::left(ITEM_STYLE, m.indent, text, m.item_line);
        lines.push(ReceiptLine::left(
            ITEM_HEADER_STYLE,
            Pt(0.0),
            format!("{}. {}", item.item_no, item.metal),
            m.item_line,
        ));
        lines.push(detail(format!(
            "Weight: {:.*}g @ {}/g",
            WEIGHT_PRECISION,
            item.weight,
            theme.money(item.rate)
        )));
        lines.push(detail(format!("Item Value: {}", theme.money(item.item_value))));
        lines.push(detail(format!(
            "Wastage ({:.*}%): {}",
            PERCENT_PRECISION,
            item.wastage_percent,
            theme.money(item.wastage_amount)
        )));
        lines.push(detail(format!(
            "Making ({:.*}%): {}",
            PERCENT_PRECISION,
            item.making_percent,
            theme.money(item.making_amount)
        )));
        lines.push(ReceiptLine::left(
            ITEM_HEADER_STYLE,
            m.indent,
            format!("Line Total: {}", theme.money(item.line_total)),
            m.item_total,
        ));
    }

    lines.push(ReceiptLine::space(m.rule_gap));
    lines.push(ReceiptLine::rule(m.rule));

    for line in layout::summary_lines(invoice, PERCENT_PRECISION) {
        let style = match line.kind {
            layout::SummaryKind::Subtotal => SUBTOTAL_STYLE,
            _ => SUMMARY_STYLE,
        };
        let value = if line.is_deduction() {
            format!("-{}", theme.money(line.amount))
        } else {
            theme.money(line.amount)
        };
        lines.push(ReceiptLine::pair(
            style,
            format!("{}:", line.label),
            value,
            m.summary,
        ));
    }

    lines.push(ReceiptLine::rule(m.total_rule));
    lines.push(ReceiptLine::pair(
        TOTAL_STYLE,
        "TOTAL:".to_string(),
        theme.money(invoice.total),
        m.total,
    ));
    // last line, nothing follows
    lines.push(ReceiptLine::centred(
        CLOSING_STYLE,
        theme.closing_line.clone(),
        Pt(0.0),
    ));
    lines
}

/// Returns the page height needed for the planned lines.
pub fn measure(lines: &[ReceiptLine]) -> Pt {
    let content: Pt = lines.iter().map(|line| line.advance).sum();
    RECEIPT.top + content + RECEIPT.padding
}

/// Returns the page height of the receipt for the given invoice.
pub fn receipt_height(
    invoice: &Invoice,
    items: &[LineItem],
    customer: Option<&Customer>,
    theme: &Theme,
) -> Pt {
    measure(&plan_receipt(invoice, items, customer, theme))
}

/// Draws the planned lines top-down and returns the cursor below the last line.
pub fn draw_receipt<C: Canvas>(canvas: &mut C, lines: &[ReceiptLine]) -> Result<Pt, Error> {
    let m = &RECEIPT;
    let size = canvas.page_size();
    let left = m.margin;
    let right = size.width - m.margin;
    let centre = size.width * 0.5;
    let mut y = size.height - m.top;

    for line in lines {
        canvas.set_style(line.style);
        match &line.content {
            Content::Centred(text) => canvas.draw_aligned(centre, y, text, Align::Centre)?,
            Content::Left { indent, text } => {
                if canvas.text_width(text) > right - left - *indent {
                    tracing::warn!(text = %text, "receipt line overflows the paper width");
                }
                canvas.draw_aligned(left + *indent, y, text, Align::Left)?
            }
            Content::Pair { label, value } => {
                canvas.draw_aligned(left, y, label, Align::Left)?;
                canvas.draw_aligned(right, y, value, Align::Right)?;
            }
            Content::Rule => canvas.hline(left, right, y),
            Content::Space => {}
        }
        y -= line.advance;
    }
    Ok(y)
}

/// Draws the receipt on the given canvas and returns the vertical extent it consumed, from the
/// first baseline to the last.
///
/// The canvas should be [`receipt_height`][] high.
///
/// [`receipt_height`]: fn.receipt_height.html
pub fn draw_thermal<C: Canvas>(
    canvas: &mut C,
    invoice: &Invoice,
    items: &[LineItem],
    customer: Option<&Customer>,
    theme: &Theme,
) -> Result<Pt, Error> {
    let lines = plan_receipt(invoice, items, customer, theme);
    let start = canvas.page_size().height - RECEIPT.top;
    let end = draw_receipt(canvas, &lines)?;
    Ok(start - end)
}

/// Renders the invoice as a thermal receipt PDF and returns the document rewound to its start.
pub fn render_thermal(
    invoice: &Invoice,
    items: &[LineItem],
    customer: Option<&Customer>,
    theme: &Theme,
) -> Result<io::Cursor<Vec<u8>>, Error> {
    let fonts = theme.load_fonts()?;
    let theme = theme.for_fonts(&fonts);
    let lines = plan_receipt(invoice, items, customer, &theme);
    let height = measure(&lines);
    tracing::debug!(
        invoice = %invoice.invoice_no,
        items = items.len(),
        height = height.0,
        "measured thermal receipt"
    );

    let size = Size::new(RECEIPT.width, height);
    let title = format!("Receipt {}", invoice.invoice_no);
    let mut canvas = PdfCanvas::new(size, title, fonts)?;
    draw_receipt(&mut canvas, &lines)?;
    canvas.finish()
}
