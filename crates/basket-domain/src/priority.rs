//! Priority module - how urgently an item is needed

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of a shopping item
///
/// The three known levels serialize as `"HIGH"`, `"MEDIUM"` and `"LOW"`.
/// Anything else the completion service returns is kept verbatim in
/// [`Priority::Unrecognized`] so callers can decide whether to keep it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    /// Needed urgently
    High,

    /// The default level
    #[default]
    Medium,

    /// Nice to have
    Low,

    /// A value outside the three known levels
    Unrecognized(String),
}

impl Priority {
    /// Get the canonical string form
    ///
    /// # Examples
    ///
    /// ```
    /// use basket_domain::Priority;
    ///
    /// assert_eq!(Priority::High.as_str(), "HIGH");
    /// assert_eq!(Priority::Unrecognized("urgent".into()).as_str(), "urgent");
    /// ```
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
            Priority::Unrecognized(raw) => raw,
        }
    }

    /// Parse one of the three known levels, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Some(Priority::High),
            "MEDIUM" => Some(Priority::Medium),
            "LOW" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Whether this is one of HIGH, MEDIUM or LOW
    pub fn is_known(&self) -> bool {
        !matches!(self, Priority::Unrecognized(_))
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::parse(&s).unwrap_or(Priority::Unrecognized(s))
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
