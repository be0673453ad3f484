//! Batch command implementation.

use crate::cli::BatchArgs;
use crate::error::Result;
use crate::output::Formatter;
use basket_domain::CompletionProvider;
use basket_extractor::{process_file, ShoppingItemAnalyzer};

/// Execute the batch command.
pub async fn execute_batch<L>(
    args: BatchArgs,
    analyzer: &ShoppingItemAnalyzer<L>,
    formatter: &Formatter,
) -> Result<String>
where
    L: CompletionProvider,
{
    let summary = process_file(analyzer, &args.input, &args.output).await?;
    formatter.format_summary(&summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliFormat;
    use crate::error::CliError;
    use basket_extractor::{BatchError, ExtractorConfig};
    use basket_llm::MockProvider;

    #[tokio::test]
    async fn test_batch_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("items.csv");
        let output = dir.path().join("results.csv");
        std::fs::write(&input, "Items\n2 loaves of bread\n1l milk\n").unwrap();

        let analyzer = ShoppingItemAnalyzer::new(
            MockProvider::new(r#"{"itemName":"bread","quantity":"2","unit":"loaves"}"#),
            ExtractorConfig::default(),
        );
        let formatter = Formatter::new(CliFormat::Table, false);

        let message = execute_batch(
            BatchArgs {
                input,
                output: output.clone(),
            },
            &analyzer,
            &formatter,
        )
        .await
        .unwrap();

        assert!(message.contains("Processed 2 row(s)"));
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_batch_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("items.csv");
        std::fs::write(&input, "Items\n").unwrap();

        let analyzer = ShoppingItemAnalyzer::new(MockProvider::default(), ExtractorConfig::default());
        let formatter = Formatter::new(CliFormat::Table, false);

        let result = execute_batch(
            BatchArgs {
                input,
                output: dir.path().join("results.csv"),
            },
            &analyzer,
            &formatter,
        )
        .await;
        assert!(matches!(result, Err(CliError::Batch(BatchError::NoRows))));
    }
}
