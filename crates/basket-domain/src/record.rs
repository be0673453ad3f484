//! Record module - the structured form of one shopping item

use crate::priority::Priority;
use serde::{Deserialize, Serialize};

/// Column order used wherever records are written as rows
pub const COLUMN_ORDER: [&str; 7] = [
    "quantity",
    "unit",
    "itemName",
    "brand",
    "priority",
    "details",
    "description",
];

/// A structured shopping item extracted from free text
///
/// Records are built once per analysis and never mutated afterwards.
/// `description` always carries the caller's original text verbatim.
/// Field declaration order matches [`COLUMN_ORDER`], so the JSON key order
/// and the tabular column order agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemRecord {
    /// Numeric quantity as text, or empty
    pub quantity: String,

    /// Unit of measurement (standardized where possible), or empty
    pub unit: String,

    /// Product name
    pub item_name: String,

    /// Brand name, or empty
    pub brand: String,

    /// How urgently the item is needed
    pub priority: Priority,

    /// Extra details, or empty
    pub details: String,

    /// The original input text
    pub description: String,
}

impl ShoppingItemRecord {
    /// Build the degraded record used when extraction fails
    ///
    /// The whole input becomes the item name and the description; every other
    /// field is empty and the priority is MEDIUM.
    ///
    /// # Examples
    ///
    /// ```
    /// use basket_domain::{Priority, ShoppingItemRecord};
    ///
    /// let record = ShoppingItemRecord::fallback("2 loaves of bread");
    /// assert_eq!(record.item_name, "2 loaves of bread");
    /// assert_eq!(record.description, "2 loaves of bread");
    /// assert_eq!(record.quantity, "");
    /// assert_eq!(record.priority, Priority::Medium);
    /// ```
    pub fn fallback(text: &str) -> Self {
        Self {
            quantity: String::new(),
            unit: String::new(),
            item_name: text.to_string(),
            brand: String::new(),
            priority: Priority::Medium,
            details: String::new(),
            description: text.to_string(),
        }
    }

    /// Whether this record has the exact shape of a fallback for `text`
    pub fn is_fallback_for(&self, text: &str) -> bool {
        *self == Self::fallback(text)
    }

    /// Field values in [`COLUMN_ORDER`]
    pub fn to_row(&self) -> [&str; 7] {
        [
            self.quantity.as_str(),
            self.unit.as_str(),
            self.item_name.as_str(),
            self.brand.as_str(),
            self.priority.as_str(),
            self.details.as_str(),
            self.description.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn milk() -> ShoppingItemRecord {
        ShoppingItemRecord {
            quantity: "1".to_string(),
            unit: "l".to_string(),
            item_name: "milk".to_string(),
            brand: "amul".to_string(),
            priority: Priority::Low,
            details: String::new(),
            description: "1l milk of amul brand".to_string(),
        }
    }

    #[test]
    fn test_fallback_shape() {
        let text = "Cereal brand: Morning Star, sugar check needed for 4 boxes, medium priority.";
        let record = ShoppingItemRecord::fallback(text);

        assert_eq!(record.item_name, text);
        assert_eq!(record.description, text);
        assert!(record.quantity.is_empty());
        assert!(record.unit.is_empty());
        assert!(record.brand.is_empty());
        assert!(record.details.is_empty());
        assert_eq!(record.priority, Priority::Medium);
        assert!(record.is_fallback_for(text));
    }

    #[test]
    fn test_extracted_record_is_not_fallback() {
        assert!(!milk().is_fallback_for("1l milk of amul brand"));
    }

    #[test]
    fn test_json_uses_camel_case_in_column_order() {
        let json = serde_json::to_string(&milk()).unwrap();
        assert_eq!(
            json,
            r#"{"quantity":"1","unit":"l","itemName":"milk","brand":"amul","priority":"LOW","details":"","description":"1l milk of amul brand"}"#
        );
    }

    #[test]
    fn test_row_matches_column_order() {
        let record = milk();
        let row = record.to_row();
        assert_eq!(row, ["1", "l", "milk", "amul", "LOW", "", "1l milk of amul brand"]);
        assert_eq!(COLUMN_ORDER[2], "itemName");
    }

    proptest! {
        #[test]
        fn prop_fallback_preserves_input(text in ".*") {
            let record = ShoppingItemRecord::fallback(&text);
            prop_assert_eq!(&record.description, &text);
            prop_assert_eq!(&record.item_name, &text);
            prop_assert_eq!(record.priority, Priority::Medium);
        }
    }
}
