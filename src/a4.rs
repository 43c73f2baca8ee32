// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! The standard A4 invoice layout.
//!
//! The page starts with a centered title, the invoice number and date, and the customer block.
//! Items follow as rows of a fixed-column table.  Rows have a fixed height: a row is never
//! wrapped, and when the cursor has passed the page floor the next row starts a new page (the
//! table header is not repeated).  The summary block is kept together and moves to a new page
//! if it would not fit above the bottom margin.

use std::io;

use crate::error::Error;
use crate::layout::{self, A4_COLUMNS, A4_CUSTOMER_LABELS};
use crate::model::{Customer, Invoice, LineItem};
use crate::render::{Canvas, PdfCanvas};
use crate::style::{Align, TextStyle};
use crate::theme::Theme;
use crate::{Pt, Size};

/// Decimals of amounts and weights in the item table.
pub const AMOUNT_PRECISION: usize = 2;

/// Decimals of percentages in the summary block.
pub const PERCENT_PRECISION: usize = 2;

/// Margins, line advances and text styles of the A4 layout.
#[derive(Clone, Copy, Debug)]
pub struct A4Metrics {
    /// Left and right margin.
    pub margin: Pt,
    /// Distance of the first baseline from the top edge.
    pub top: Pt,
    /// Rows are only started above this height.
    pub page_floor: Pt,
    /// The summary block never goes below this height.
    pub bottom_margin: Pt,
    /// Offset of the date from the right edge.
    pub date_offset: Pt,
    /// Offset of the start of the grand total rule from the right edge.
    pub total_rule_offset: Pt,
    /// Title style.
    pub title_style: TextStyle,
    /// Advance after the title.
    pub title_advance: Pt,
    /// Style of the invoice details and customer block.
    pub detail_style: TextStyle,
    /// Advance after the invoice number and date.
    pub detail_advance: Pt,
    /// Advance after each customer line.
    pub customer_advance: Pt,
    /// Gap between blocks.
    pub block_gap: Pt,
    /// Style of the table header.
    pub header_style: TextStyle,
    /// Advance after the table header and after its rule.
    pub header_advance: Pt,
    /// Style of the item rows.
    pub row_style: TextStyle,
    /// Advance after each row.
    pub row_height: Pt,
    /// Advance after the rule below the table.
    pub summary_gap: Pt,
    /// Style of the summary lines.
    pub summary_style: TextStyle,
    /// Advance after each summary line.
    pub summary_advance: Pt,
    /// Advance after the grand total rule.
    pub total_gap: Pt,
    /// Style of the grand total.
    pub total_style: TextStyle,
}

/// The A4 layout metrics.
pub const A4: A4Metrics = A4Metrics {
    margin: Pt(40.0),
    top: Pt(50.0),
    page_floor: Pt(80.0),
    bottom_margin: Pt(40.0),
    date_offset: Pt(200.0),
    total_rule_offset: Pt(200.0),
    title_style: TextStyle::bold(18.0),
    title_advance: Pt(40.0),
    detail_style: TextStyle::regular(11.0),
    detail_advance: Pt(20.0),
    customer_advance: Pt(16.0),
    block_gap: Pt(10.0),
    header_style: TextStyle::bold(10.0),
    header_advance: Pt(16.0),
    row_style: TextStyle::regular(10.0),
    row_height: Pt(14.0),
    summary_gap: Pt(20.0),
    summary_style: TextStyle::bold(11.0),
    summary_advance: Pt(18.0),
    total_gap: Pt(20.0),
    total_style: TextStyle::bold(14.0),
};

/// Renders the invoice as an A4 PDF and returns the document rewound to its start.
pub fn render_a4(
    invoice: &Invoice,
    items: &[LineItem],
    customer: Option<&Customer>,
    theme: &Theme,
) -> Result<io::Cursor<Vec<u8>>, Error> {
    let fonts = theme.load_fonts()?;
    let theme = theme.for_fonts(&fonts);
    let title = format!("Invoice {}", invoice.invoice_no);
    let mut canvas = PdfCanvas::new(Size::A4, title, fonts)?;
    draw_a4(&mut canvas, invoice, items, customer, &theme)?;
    tracing::debug!(
        invoice = %invoice.invoice_no,
        items = items.len(),
        pages = canvas.page_count(),
        "rendered a4 invoice"
    );
    canvas.finish()
}

/// Draws the A4 layout on the given canvas, starting on its current page.
pub fn draw_a4<C: Canvas>(
    canvas: &mut C,
    invoice: &Invoice,
    items: &[LineItem],
    customer: Option<&Customer>,
    theme: &Theme,
) -> Result<(), Error> {
    let m = &A4;
    let size = canvas.page_size();
    let left = m.margin;
    let right = size.width - m.margin;
    let top = size.height - m.top;
    let mut y = top;

    canvas.set_style(m.title_style);
    canvas.draw_aligned(size.width * 0.5, y, &theme.title, Align::Centre)?;
    y -= m.title_advance;

    canvas.set_style(m.detail_style);
    let invoice_no = format!("Invoice No: {}", invoice.invoice_no);
    canvas.draw_aligned(left, y, &invoice_no, Align::Left)?;
    let date = format!("Date: {}", invoice.date);
    canvas.draw_aligned(size.width - m.date_offset, y, &date, Align::Left)?;
    y -= m.detail_advance;

    for line in layout::customer_lines(customer, &A4_CUSTOMER_LABELS) {
        canvas.draw_aligned(left, y, &line, Align::Left)?;
        y -= m.customer_advance;
    }
    y -= m.block_gap;

    canvas.set_style(m.header_style);
    for column in &A4_COLUMNS {
        canvas.draw_aligned(left + column.header_x, y, column.label, Align::Left)?;
    }
    y -= m.header_advance;
    canvas.hline(left, right, y);
    y -= m.header_advance;

    canvas.set_style(m.row_style);
    for item in items {
        if y < m.page_floor {
            canvas.new_page();
            y = top;
            tracing::debug!(
                page = canvas.page_count(),
                item = item.item_no,
                "item table continues on a new page"
            );
        }
        draw_row(canvas, left, y, item)?;
        y -= m.row_height;
    }

    let summary = layout::summary_lines(invoice, PERCENT_PRECISION);
    let extent = m.block_gap
        + m.summary_gap
        + m.summary_advance * summary.len() as f32
        + m.total_gap;
    if y - extent < m.bottom_margin {
        canvas.new_page();
        y = top;
        tracing::debug!(page = canvas.page_count(), "summary moved to a new page");
    }

    y -= m.block_gap;
    canvas.hline(left, right, y);
    y -= m.summary_gap;

    canvas.set_style(m.summary_style);
    for line in &summary {
        let text = format!("{}: {}", line.label, theme.money(line.amount));
        canvas.draw_aligned(right, y, &text, Align::Right)?;
        y -= m.summary_advance;
    }
    canvas.hline(size.width - m.total_rule_offset, right, y);
    y -= m.total_gap;

    canvas.set_style(m.total_style);
    let total = format!("Total: {}", theme.money(invoice.total));
    canvas.draw_aligned(right, y, &total, Align::Right)
}

fn draw_row<C: Canvas>(canvas: &mut C, left: Pt, y: Pt, item: &LineItem) -> Result<(), Error> {
    for (idx, column) in A4_COLUMNS.iter().enumerate() {
        let text = (column.value)(item).format(AMOUNT_PRECISION);
        if column.align == Align::Left {
            if let Some(next) = A4_COLUMNS.get(idx + 1) {
                let width = canvas.text_width(&text);
                if width > column.width_to(next) {
                    tracing::warn!(
                        item = item.item_no,
                        column = column.label,
                        text = %text,
                        "value overflows its column; rows are not wrapped"
                    );
                }
            }
        }
        canvas.draw_aligned(left + column.value_x, y, &text, column.align)?;
    }
    Ok(())
}
