// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! Layout descriptors shared by the A4 and thermal renderers.
//!
//! Conditional content (the discount line, the customer address) is expressed as ordered lists of
//! optional lines that are filtered before anything is placed, so that both layouts always agree
//! on which lines exist.

use crate::model::{Customer, Invoice, LineItem};
use crate::style::Align;
use crate::Pt;

/// A formatted cell value of an item row.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell<'a> {
    /// An integer, printed as is.
    Integer(u32),
    /// A label, printed as is.
    Text(&'a str),
    /// A decimal number, printed with a fixed number of decimals.
    Decimal(f64),
}

impl Cell<'_> {
    /// Formats the cell; decimals get `precision` fractional digits.
    pub fn format(&self, precision: usize) -> String {
        match self {
            Cell::Integer(n) => n.to_string(),
            Cell::Text(s) => s.to_string(),
            Cell::Decimal(v) => format!("{:.*}", precision, v),
        }
    }
}

/// A column of the A4 item table.
#[derive(Clone, Copy)]
pub struct Column {
    /// The header label.
    pub label: &'static str,
    /// The x offset of the header label from the left margin.
    pub header_x: Pt,
    /// The x offset of the value anchor from the left margin.
    pub value_x: Pt,
    /// How the value is aligned on its anchor.
    pub align: Align,
    /// Extracts the cell value from an item.
    pub value: fn(&LineItem) -> Cell<'_>,
}

impl Column {
    /// The space available to a left-aligned value before the next column starts.
    pub fn width_to(&self, next: &Column) -> Pt {
        next.header_x - self.value_x
    }
}

fn item_no(item: &LineItem) -> Cell<'_> {
    Cell::Integer(item.item_no)
}

fn metal(item: &LineItem) -> Cell<'_> {
    Cell::Text(&item.metal)
}

fn weight(item: &LineItem) -> Cell<'_> {
    Cell::Decimal(item.weight)
}

fn rate(item: &LineItem) -> Cell<'_> {
    Cell::Decimal(item.rate)
}

fn item_value(item: &LineItem) -> Cell<'_> {
    Cell::Decimal(item.item_value)
}

fn wastage_amount(item: &LineItem) -> Cell<'_> {
    Cell::Decimal(item.wastage_amount)
}

fn making_amount(item: &LineItem) -> Cell<'_> {
    Cell::Decimal(item.making_amount)
}

fn line_total(item: &LineItem) -> Cell<'_> {
    Cell::Decimal(item.line_total)
}

/// The columns of the A4 item table, left to right.
pub const A4_COLUMNS: [Column; 8] = [
    Column {
        label: "No",
        header_x: Pt(0.0),
        value_x: Pt(0.0),
        align: Align::Left,
        value: item_no,
    },
    Column {
        label: "Metal",
        header_x: Pt(35.0),
        value_x: Pt(35.0),
        align: Align::Left,
        value: metal,
    },
    Column {
        label: "Weight(g)",
        header_x: Pt(100.0),
        value_x: Pt(140.0),
        align: Align::Right,
        value: weight,
    },
    Column {
        label: "Rate",
        header_x: Pt(170.0),
        value_x: Pt(210.0),
        align: Align::Right,
        value: rate,
    },
    Column {
        label: "Item Val",
        header_x: Pt(230.0),
        value_x: Pt(280.0),
        align: Align::Right,
        value: item_value,
    },
    Column {
        label: "Wastage",
        header_x: Pt(300.0),
        value_x: Pt(350.0),
        align: Align::Right,
        value: wastage_amount,
    },
    Column {
        label: "Making",
        header_x: Pt(370.0),
        value_x: Pt(420.0),
        align: Align::Right,
        value: making_amount,
    },
    Column {
        label: "Total",
        header_x: Pt(440.0),
        value_x: Pt(500.0),
        align: Align::Right,
        value: line_total,
    },
];

/// The labels of the customer block lines.
#[derive(Clone, Copy, Debug)]
pub struct CustomerLabels {
    /// The account number label.
    pub account: &'static str,
    /// The name label.
    pub name: &'static str,
    /// The phone label.
    pub phone: &'static str,
    /// The address label.
    pub address: &'static str,
}

/// Customer labels of the A4 invoice.
pub const A4_CUSTOMER_LABELS: CustomerLabels = CustomerLabels {
    account: "Account",
    name: "Customer",
    phone: "Phone",
    address: "Address",
};

/// Customer labels of the thermal receipt.
pub const RECEIPT_CUSTOMER_LABELS: CustomerLabels = CustomerLabels {
    account: "A/c",
    name: "Name",
    phone: "Ph",
    address: "Addr",
};

/// Returns the lines of the customer block; empty if there is no customer.
///
/// Account, name and phone are always listed (empty when unknown), the address only when present.
pub fn customer_lines(customer: Option<&Customer>, labels: &CustomerLabels) -> Vec<String> {
    let Some(customer) = customer else {
        return Vec::new();
    };
    let or_empty = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        Some(format!("{}: {}", labels.account, or_empty(&customer.account_no))),
        Some(format!("{}: {}", labels.name, or_empty(&customer.name))),
        Some(format!("{}: {}", labels.phone, or_empty(&customer.phone))),
        customer
            .address()
            .map(|address| format!("{}: {}", labels.address, address)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// The kind of a summary line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryKind {
    /// The subtotal.
    Subtotal,
    /// The discount, deducted from the subtotal.
    Discount,
    /// Central GST.
    Cgst,
    /// State GST.
    Sgst,
}

/// A line of the summary block above the grand total.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryLine {
    /// What the line shows.
    pub kind: SummaryKind,
    /// The label without trailing colon, e.g. `CGST (1.50%)`.
    pub label: String,
    /// The amount.
    pub amount: f64,
}

impl SummaryLine {
    /// Returns `true` if the amount is deducted from the total.
    pub fn is_deduction(&self) -> bool {
        self.kind == SummaryKind::Discount
    }
}

/// Returns the summary lines of an invoice in display order; percentages get
/// `percent_precision` decimals.
///
/// The discount line is only included if the discount rate is positive.
pub fn summary_lines(invoice: &Invoice, percent_precision: usize) -> Vec<SummaryLine> {
    let rated = |kind, name: &str, percent: f64, amount: f64| SummaryLine {
        kind,
        label: format!("{} ({:.*}%)", name, percent_precision, percent),
        amount,
    };
    [
        Some(SummaryLine {
            kind: SummaryKind::Subtotal,
            label: "Subtotal".to_string(),
            amount: invoice.subtotal,
        }),
        invoice.has_discount().then(|| {
            rated(
                SummaryKind::Discount,
                "Discount",
                invoice.discount_percent,
                invoice.discount_amount,
            )
        }),
        Some(rated(
            SummaryKind::Cgst,
            "CGST",
            invoice.cgst_percent,
            invoice.cgst_amount,
        )),
        Some(rated(
            SummaryKind::Sgst,
            "SGST",
            invoice.sgst_percent,
            invoice.sgst_amount,
        )),
    ]
    .into_iter()
    .flatten()
    .collect()
}
