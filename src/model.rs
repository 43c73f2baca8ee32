// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

//! Invoice input records.
//!
//! These are produced by the invoice computation upstream and are only read here.  Totals are
//! taken as given: nothing is recomputed or cross-checked.

use std::fs;
use std::path;

use serde::{Deserialize, Serialize};

use crate::error::{Context as _, Error};

/// An invoice header with its precomputed totals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// The invoice number as displayed.
    pub invoice_no: String,
    /// The invoice date as displayed.
    pub date: String,
    /// The sum of all line totals.
    pub subtotal: f64,
    /// The discount rate in percent; `0` means no discount.
    #[serde(default)]
    pub discount_percent: f64,
    /// The discount amount.
    #[serde(default)]
    pub discount_amount: f64,
    /// The central GST rate in percent.
    pub cgst_percent: f64,
    /// The central GST amount.
    pub cgst_amount: f64,
    /// The state GST rate in percent.
    pub sgst_percent: f64,
    /// The state GST amount.
    pub sgst_amount: f64,
    /// The grand total.
    pub total: f64,
}

impl Invoice {
    /// Returns `true` if the invoice carries a discount line.
    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0.0
    }
}

/// One item of an invoice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The position of the item on the invoice.
    pub item_no: u32,
    /// The metal label, e.g. `Gold 22K`.
    pub metal: String,
    /// The weight in grams.
    pub weight: f64,
    /// The rate per gram.
    pub rate: f64,
    /// `weight * rate`.
    pub item_value: f64,
    /// The wastage rate in percent.
    pub wastage_percent: f64,
    /// The wastage amount.
    pub wastage_amount: f64,
    /// The making charge rate in percent.
    pub making_percent: f64,
    /// The making charge amount.
    pub making_amount: f64,
    /// `item_value + wastage_amount + making_amount`.
    pub line_total: f64,
}

/// The customer an invoice is addressed to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// The customer account number.
    #[serde(default)]
    pub account_no: Option<String>,
    /// The customer name.
    #[serde(default)]
    pub name: Option<String>,
    /// The phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// The postal address.
    #[serde(default)]
    pub address: Option<String>,
}

impl Customer {
    /// Returns the address if it is present and not empty.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref().filter(|a| !a.is_empty())
    }
}

/// An invoice together with its items and optional customer, as read from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    /// The invoice header.
    pub invoice: Invoice,
    /// The items in display order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// The customer, if any.
    #[serde(default)]
    pub customer: Option<Customer>,
}

impl InvoiceDocument {
    /// Parses an invoice document from a JSON string.
    pub fn from_json_str(s: &str) -> Result<InvoiceDocument, Error> {
        serde_json::from_str(s).context("Failed to decode invoice document")
    }

    /// Reads an invoice document from a JSON file.
    pub fn from_json_file(path: impl AsRef<path::Path>) -> Result<InvoiceDocument, Error> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read invoice file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to decode invoice file {}", path.display()))
    }

    /// Returns the customer, if any.
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_discount_defaults_to_zero() {
        let doc = InvoiceDocument::from_json_str(
            r#"{
                "invoice": {
                    "invoice_no": "INV-1", "date": "2024-01-01", "subtotal": 1000.0,
                    "cgst_percent": 1.5, "cgst_amount": 15.0,
                    "sgst_percent": 1.5, "sgst_amount": 15.0, "total": 1030.0
                }
            }"#,
        )
        .expect("decode");
        assert_eq!(doc.invoice.discount_percent, 0.0);
        assert!(!doc.invoice.has_discount());
        assert!(doc.items.is_empty());
        assert!(doc.customer().is_none());
    }

    #[test]
    fn test_customer_address_presence() {
        let mut customer = Customer {
            account_no: Some("AC-7".into()),
            name: Some("Asha".into()),
            phone: None,
            address: Some(String::new()),
        };
        assert_eq!(customer.address(), None);
        customer.address = Some("12 MG Road".into());
        assert_eq!(customer.address(), Some("12 MG Road"));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = InvoiceDocument::from_json_str("{\"invoice\": 3}").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::JsonError(_)));

        let err = InvoiceDocument::from_json_file("/nonexistent/invoice.json").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::IoError(_)));
    }
}
