//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use basket_domain::CompletionProvider;
use basket_extractor::ShoppingItemAnalyzer;

/// Execute the analyze command.
///
/// Returns the rendered record; a failed extraction adds a warning line on
/// stderr but still prints the fallback record.
pub async fn execute_analyze<L>(
    args: AnalyzeArgs,
    analyzer: &ShoppingItemAnalyzer<L>,
    formatter: &Formatter,
) -> Result<String>
where
    L: CompletionProvider,
{
    if args.text.trim().is_empty() {
        return Err(CliError::InvalidInput("Text must not be empty".to_string()));
    }

    let analysis = analyzer.analyze(&args.text).await;
    if let Some(reason) = analysis.fallback_reason() {
        eprintln!(
            "{}",
            formatter.warning(&format!("Extraction failed ({}), showing fallback", reason))
        );
    }

    formatter.format_record(analysis.record())
}
