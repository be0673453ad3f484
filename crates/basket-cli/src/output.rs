//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use basket_domain::{ShoppingItemRecord, COLUMN_ORDER};
use basket_extractor::BatchSummary;
use colored::{Color, Colorize};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format one record.
    pub fn format_record(&self, record: &ShoppingItemRecord) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            CliFormat::Table => Ok(self.format_record_table(record)),
        }
    }

    /// One row per field, in column order.
    fn format_record_table(&self, record: &ShoppingItemRecord) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);

        for (field, value) in COLUMN_ORDER.iter().zip(record.to_row()) {
            builder.push_record([*field, value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a batch run summary.
    pub fn format_summary(&self, summary: &BatchSummary) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "rowsRead": summary.rows_read,
                "extracted": summary.extracted,
                "fallbacks": summary.fallbacks,
                "output": summary.output.display().to_string(),
            }))?),
            CliFormat::Table => {
                let mut message = self.success(&format!(
                    "Processed {} row(s), results saved to {}",
                    summary.rows_read,
                    summary.output.display()
                ));
                if summary.fallbacks > 0 {
                    message.push('\n');
                    message.push_str(&self.warning(&format!(
                        "{} row(s) could not be extracted and use the fallback record",
                        summary.fallbacks
                    )));
                }
                Ok(message)
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), Color::Red)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}
