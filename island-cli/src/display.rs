// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display Helpers
//!
//! Terminal output formatting and styling.

use console::{style, Style};
use island_core::{ContentSource, ImageDownloadReport};

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Styled label for where content came from.
pub fn source_label(source: ContentSource) -> String {
    let label = source.to_string();
    match source {
        ContentSource::Network => style(label).green().to_string(),
        ContentSource::Cache => style(label).cyan().to_string(),
        ContentSource::Bundle => style(label).yellow().to_string(),
    }
}

/// Prints a `key: value` line with a dimmed key.
pub fn field(key: &str, value: &str) {
    let key_style = Style::new().dim();
    println!("  {:14} {}", key_style.apply_to(key), value);
}

/// Displays the outcome of an image batch.
pub fn display_image_report(report: &ImageDownloadReport) {
    for path in &report.downloaded {
        success(&format!("downloaded {}", path));
    }
    for path in &report.skipped {
        println!("  {} {}", style("-").dim(), style(path).dim());
    }
    for path in &report.bundled {
        warning(&format!("{} served from bundle, not cached", path));
    }
    for (path, err) in &report.failed {
        error(&format!("{}: {}", path, err));
    }

    println!();
    println!(
        "  {} downloaded, {} already cached, {} bundled, {} failed",
        report.downloaded.len(),
        report.skipped.len(),
        report.bundled.len(),
        report.failed.len()
    );
}
