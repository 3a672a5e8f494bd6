//! Free-text food lists

use serde::{Deserialize, Serialize};

/// A comma-separated food list as typed by the user.
///
/// The raw text is kept untouched for prompts; `items` holds the trimmed,
/// lowercased, non-empty entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodList {
    pub raw: String,
    pub items: Vec<String>,
}

impl FoodList {
    pub fn parse(raw: &str) -> Self {
        let items = raw
            .split(',')
            .map(|item| item.trim().to_lowercase())
            .filter(|item| !item.is_empty())
            .collect();
        Self {
            raw: raw.to_string(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
