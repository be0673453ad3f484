//! Basket Extractor
//!
//! Converts free-text shopping input into structured records using an LLM.
//!
//! # Overview
//!
//! Each line of input ("1l milk of amul brand") is sent to a completion
//! provider together with a fixed instruction asking for six JSON fields.
//! The reply is parsed, checked for shape, and normalized: units are mapped
//! onto canonical keys, the priority is checked against HIGH / MEDIUM / LOW,
//! and the original text is attached as the description. If any step fails
//! the caller still gets a record, the deterministic fallback.
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → CompletionProvider → parser → normalize → Analysis
//!                                   ↘ (error / timeout / bad JSON) → Fallback
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use basket_extractor::{ExtractorConfig, ShoppingItemAnalyzer};
//! use basket_llm::MockProvider;
//!
//! # async fn example() {
//! let llm = MockProvider::new(r#"{"itemName":"milk","quantity":"1","unit":"litre"}"#);
//! let analyzer = ShoppingItemAnalyzer::new(llm, ExtractorConfig::default());
//!
//! let record = analyzer.analyze_record("1l milk of amul brand").await;
//! assert_eq!(record.unit, "l");
//! assert_eq!(record.description, "1l milk of amul brand");
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod batch;
mod config;
mod error;
mod parser;
mod prompt;
mod types;
mod units;


pub use analyzer::ShoppingItemAnalyzer;
pub use batch::{process_file, read_input_rows, write_records, BatchSummary};
pub use config::{ExtractorConfig, PriorityPolicy};
pub use error::{BatchError, ExtractorError};
pub use prompt::PromptBuilder;
pub use types::Analysis;
pub use units::{standardize_unit, UNIT_GROUPS};
