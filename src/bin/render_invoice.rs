// Copyright (c) 2026 Ronan Le Meillat - SCTG Development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Licensed under the MIT License or the Apache License, Version 2.0

use clap::{Parser, ValueEnum};
use jewelcalc_pdf::{download_link_with_label, InvoiceDocument, Theme};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Layout {
    /// A4 page with an item table
    A4,
    /// 80mm receipt strip
    Thermal,
}

impl Layout {
    fn default_output(self) -> PathBuf {
        match self {
            Layout::A4 => PathBuf::from("invoice.pdf"),
            Layout::Thermal => PathBuf::from("invoice_thermal.pdf"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "render_invoice")]
#[command(about = "Render a computed invoice as an A4 or thermal receipt PDF", long_about = None)]
struct Args {
    /// Path to the invoice JSON document
    #[arg(value_name = "FILE")]
    invoice: PathBuf,

    /// Page layout
    #[arg(short, long, value_enum, default_value_t = Layout::A4)]
    layout: Layout,

    /// Output PDF path (defaults to invoice.pdf or invoice_thermal.pdf)
    #[arg(short, long, value_name = "PDF")]
    output: Option<PathBuf>,

    /// Theme JSON file
    #[arg(long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Print an HTML download anchor to stdout instead of writing the PDF
    #[arg(long)]
    link: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let doc = InvoiceDocument::from_json_file(&args.invoice)?;
    let theme = match &args.theme {
        Some(path) => Theme::from_json_file(path)?,
        None => Theme::default(),
    };

    let mut pdf = match args.layout {
        Layout::A4 => jewelcalc_pdf::render_a4(&doc.invoice, &doc.items, doc.customer(), &theme)?,
        Layout::Thermal => {
            jewelcalc_pdf::render_thermal(&doc.invoice, &doc.items, doc.customer(), &theme)?
        }
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.layout.default_output());

    if args.link {
        let filename = output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "invoice.pdf".to_string());
        let anchor = download_link_with_label(&mut pdf, &filename, &theme.link_label)?;
        println!("{}", anchor);
    } else {
        fs::write(&output, pdf.get_ref())?;
        tracing::info!(path = %output.display(), "wrote invoice");
        println!("Wrote {}", output.display());
    }

    Ok(())
}
