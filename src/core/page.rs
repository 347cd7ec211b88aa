//! Paginated listing responses with per-record decoding.
//!
//! A record that fails to decode must not blank the whole page, so `content`
//! is read as raw JSON values and converted one by one.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::property::Property;

/// One slot in a listing page: a decoded property, or a placeholder for a bad record.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingEntry {
    Property(Box<Property>),
    Malformed { id: Option<i64>, reason: String },
}

impl ListingEntry {
    pub fn from_value(value: Value) -> Self {
        let id = value.get("id").and_then(Value::as_i64);
        match serde_json::from_value::<Property>(value) {
            Ok(p) => ListingEntry::Property(Box::new(p)),
            Err(e) => {
                log::warn!("Skipping malformed property record (id={:?}): {}", id, e);
                ListingEntry::Malformed {
                    id,
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn property(&self) -> Option<&Property> {
        match self {
            ListingEntry::Property(p) => Some(p.as_ref()),
            ListingEntry::Malformed { .. } => None,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            ListingEntry::Property(p) => Some(p.id),
            ListingEntry::Malformed { id, .. } => *id,
        }
    }
}

fn deserialize_entries<'de, D>(deserializer: D) -> Result<Vec<ListingEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(ListingEntry::from_value)
        .collect())
}

/// Spring Data page: `{content, totalPages, totalElements, size, number, first, last}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPage {
    #[serde(default, deserialize_with = "deserialize_entries")]
    pub content: Vec<ListingEntry>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub size: u32,
    /// Zero-based index of this page.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
}

impl PropertyPage {
    /// Decoded properties, skipping malformed entries.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.content.iter().filter_map(ListingEntry::property)
    }

    /// Ids of the decoded properties on this page (chat context).
    pub fn property_ids(&self) -> Vec<i64> {
        self.properties().map(|p| p.id).collect()
    }

    pub fn malformed_count(&self) -> usize {
        self.content
            .iter()
            .filter(|e| matches!(e, ListingEntry::Malformed { .. }))
            .count()
    }

    pub fn info(&self) -> PageInfo {
        PageInfo {
            current_page: self.number,
            total_pages: self.total_pages,
            total_elements: self.total_elements,
        }
    }
}

/// Pagination summary shown under the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl PageInfo {
    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    /// "Page 2 of 7" (1-based for display).
    pub fn label(&self) -> String {
        format!(
            "Page {} of {}",
            self.current_page + 1,
            self.total_pages.max(1)
        )
    }
}
