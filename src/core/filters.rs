//! Listing filter state: query encoding, sort options, and pagination transitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default page size when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sort direction in the `field,asc|desc` wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Server-side sort order, e.g. `price,desc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortOrder {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SortParseError {
    #[error("sort must look like `field,asc` or `field,desc`, got `{0}`")]
    Format(String),
    #[error("unknown sort direction `{0}` (expected asc or desc)")]
    Direction(String),
}

impl FromStr for SortOrder {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = s
            .split_once(',')
            .ok_or_else(|| SortParseError::Format(s.to_string()))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(SortParseError::Format(s.to_string()));
        }
        let direction = match dir.trim().to_ascii_lowercase().as_str() {
            "asc" => Direction::Asc,
            "desc" => Direction::Desc,
            other => return Err(SortParseError::Direction(other.to_string())),
        };
        Ok(SortOrder {
            field: field.to_string(),
            direction,
        })
    }
}

impl TryFrom<String> for SortOrder {
    type Error = SortParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SortOrder> for String {
    fn from(s: SortOrder) -> Self {
        s.to_string()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{},{}", self.field, dir)
    }
}

/// Sort choices offered in the UI: (label, wire value). `None` = server default.
pub const SORT_OPTIONS: &[(&str, Option<&str>)] = &[
    ("Default", None),
    ("Price: Low to High", Some("price,asc")),
    ("Price: High to Low", Some("price,desc")),
    ("City: A to Z", Some("city,asc")),
    ("City: Z to A", Some("city,desc")),
    ("Most Bedrooms", Some("bedrooms,desc")),
    ("Most Bathrooms", Some("bathrooms,desc")),
    ("Largest Sq Ft", Some("squareFeet,desc")),
];

/// Label for a sort order, or the raw wire value when it is not one of the presets.
pub fn sort_label(sort: Option<&SortOrder>) -> String {
    let wire = sort.map(|s| s.to_string());
    SORT_OPTIONS
        .iter()
        .find(|(_, v)| v.map(str::to_string) == wire)
        .map(|(label, _)| label.to_string())
        .unwrap_or_else(|| wire.unwrap_or_default())
}

/// Editable filter fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    City,
    State,
    Zip,
    MinPrice,
    MaxPrice,
    Beds,
    MinBeds,
    Baths,
    MinBaths,
    Sort,
}

impl FilterField {
    pub const ALL: [FilterField; 10] = [
        FilterField::City,
        FilterField::State,
        FilterField::Zip,
        FilterField::MinPrice,
        FilterField::MaxPrice,
        FilterField::Beds,
        FilterField::MinBeds,
        FilterField::Baths,
        FilterField::MinBaths,
        FilterField::Sort,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::City => "City",
            FilterField::State => "State",
            FilterField::Zip => "ZIP",
            FilterField::MinPrice => "Min price",
            FilterField::MaxPrice => "Max price",
            FilterField::Beds => "Exact beds",
            FilterField::MinBeds => "Min beds",
            FilterField::Baths => "Exact baths",
            FilterField::MinBaths => "Min baths",
            FilterField::Sort => "Sort by",
        }
    }

    /// Query parameter name for this field.
    pub fn param(self) -> &'static str {
        match self {
            FilterField::City => "city",
            FilterField::State => "state",
            FilterField::Zip => "zip",
            FilterField::MinPrice => "minPrice",
            FilterField::MaxPrice => "maxPrice",
            FilterField::Beds => "beds",
            FilterField::MinBeds => "minBeds",
            FilterField::Baths => "baths",
            FilterField::MinBaths => "minBaths",
            FilterField::Sort => "sort",
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("{field}: `{value}` is not a valid number")]
    Number { field: &'static str, value: String },
    #[error(transparent)]
    Sort(#[from] SortParseError),
}

/// Listing query filters. Unset fields are omitted from the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilters {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub beds: Option<u32>,
    #[serde(default)]
    pub min_beds: Option<u32>,
    #[serde(default)]
    pub baths: Option<u32>,
    #[serde(default)]
    pub min_baths: Option<u32>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PropertyFilters {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

fn clean_text(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}

fn parse_number<T: FromStr>(field: FilterField, value: &str) -> Result<Option<T>, FilterError> {
    let v = value.trim();
    if v.is_empty() {
        return Ok(None);
    }
    v.parse::<T>().map(Some).map_err(|_| FilterError::Number {
        field: field.label(),
        value: v.to_string(),
    })
}

/// Prices must be finite and non-negative.
fn parse_price(field: FilterField, value: &str) -> Result<Option<f64>, FilterError> {
    match parse_number::<f64>(field, value)? {
        Some(v) if !v.is_finite() || v < 0.0 => Err(FilterError::Number {
            field: field.label(),
            value: value.trim().to_string(),
        }),
        v => Ok(v),
    }
}

fn format_amount(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

impl PropertyFilters {
    /// Empty filters on the first page.
    pub fn with_page_size(size: u32) -> Self {
        Self {
            city: None,
            state: None,
            zip: None,
            min_price: None,
            max_price: None,
            beds: None,
            min_beds: None,
            baths: None,
            min_baths: None,
            page: 0,
            size,
            sort: None,
        }
    }

    /// Query pairs for `GET /properties`, omitting unset values.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for field in FilterField::ALL {
            if let Some(value) = self.value_of(field) {
                pairs.push((field.param(), value));
            }
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }

    /// Current value of a field as text, `None` when unset.
    pub fn value_of(&self, field: FilterField) -> Option<String> {
        match field {
            FilterField::City => self.city.clone(),
            FilterField::State => self.state.clone(),
            FilterField::Zip => self.zip.clone(),
            FilterField::MinPrice => self.min_price.map(format_amount),
            FilterField::MaxPrice => self.max_price.map(format_amount),
            FilterField::Beds => self.beds.map(|v| v.to_string()),
            FilterField::MinBeds => self.min_beds.map(|v| v.to_string()),
            FilterField::Baths => self.baths.map(|v| v.to_string()),
            FilterField::MinBaths => self.min_baths.map(|v| v.to_string()),
            FilterField::Sort => self.sort.as_ref().map(|s| s.to_string()),
        }
    }

    /// Set a field from user text. Empty text clears it. Any edit returns to page 0.
    pub fn set(&mut self, field: FilterField, value: &str) -> Result<(), FilterError> {
        match field {
            FilterField::City => self.city = clean_text(value),
            FilterField::State => self.state = clean_text(value),
            FilterField::Zip => self.zip = clean_text(value),
            FilterField::MinPrice => self.min_price = parse_price(field, value)?,
            FilterField::MaxPrice => self.max_price = parse_price(field, value)?,
            FilterField::Beds => self.beds = parse_number(field, value)?,
            FilterField::MinBeds => self.min_beds = parse_number(field, value)?,
            FilterField::Baths => self.baths = parse_number(field, value)?,
            FilterField::MinBaths => self.min_baths = parse_number(field, value)?,
            FilterField::Sort => {
                self.sort = match clean_text(value) {
                    Some(v) => Some(v.parse()?),
                    None => None,
                }
            }
        }
        self.page = 0;
        Ok(())
    }

    /// Reset every filter, keeping the page size.
    pub fn clear(&mut self) {
        *self = Self::with_page_size(self.size);
    }

    /// True when no narrowing filter or sort is set.
    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.value_of(*f).is_none())
    }

    /// Move to `page`, clamped to `[0, total_pages - 1]`. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: u32, total_pages: u32) -> bool {
        let last = total_pages.saturating_sub(1);
        let target = page.min(last);
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    pub fn next_page(&mut self, total_pages: u32) -> bool {
        if self.page + 1 >= total_pages {
            return false;
        }
        self.go_to_page(self.page + 1, total_pages)
    }

    pub fn prev_page(&mut self, total_pages: u32) -> bool {
        if self.page == 0 {
            return false;
        }
        self.go_to_page(self.page - 1, total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_has_only_paging() {
        let f = PropertyFilters::default();
        assert_eq!(
            f.to_query_pairs(),
            vec![("page", "0".to_string()), ("size", "20".to_string())]
        );
        assert!(f.is_empty());
    }

    #[test]
    fn query_pairs_omit_unset_and_keep_order() {
        let mut f = PropertyFilters::default();
        f.set(FilterField::City, "  Irvine ").unwrap();
        f.set(FilterField::MaxPrice, "750000").unwrap();
        f.set(FilterField::MinBeds, "3").unwrap();
        f.set(FilterField::Sort, "price,desc").unwrap();
        assert_eq!(
            f.to_query_pairs(),
            vec![
                ("city", "Irvine".to_string()),
                ("maxPrice", "750000".to_string()),
                ("minBeds", "3".to_string()),
                ("sort", "price,desc".to_string()),
                ("page", "0".to_string()),
                ("size", "20".to_string()),
            ]
        );
    }

    #[test]
    fn empty_text_clears_field() {
        let mut f = PropertyFilters::default();
        f.set(FilterField::Zip, "92618").unwrap();
        f.set(FilterField::Zip, "   ").unwrap();
        assert_eq!(f.zip, None);
        f.set(FilterField::MinPrice, "100000").unwrap();
        f.set(FilterField::MinPrice, "").unwrap();
        assert_eq!(f.min_price, None);
    }

    #[test]
    fn editing_a_filter_resets_page() {
        let mut f = PropertyFilters::default();
        assert!(f.go_to_page(3, 10));
        assert_eq!(f.page, 3);
        f.set(FilterField::State, "CA").unwrap();
        assert_eq!(f.page, 0);
    }

    #[test]
    fn invalid_number_is_rejected_and_keeps_previous_value() {
        let mut f = PropertyFilters::default();
        f.set(FilterField::Beds, "2").unwrap();
        let err = f.set(FilterField::Beds, "two").unwrap_err();
        assert_eq!(
            err,
            FilterError::Number {
                field: "Exact beds",
                value: "two".to_string()
            }
        );
        assert_eq!(f.beds, Some(2));
    }

    #[test]
    fn non_finite_or_negative_prices_are_rejected() {
        let mut f = PropertyFilters::default();
        f.set(FilterField::MinPrice, "250000").unwrap();
        for bad in ["NaN", "inf", "-inf", "infinity", "-5"] {
            let err = f.set(FilterField::MinPrice, bad).unwrap_err();
            assert!(matches!(err, FilterError::Number { .. }), "{}", bad);
            assert!(f.set(FilterField::MaxPrice, bad).is_err(), "{}", bad);
        }
        assert_eq!(f.min_price, Some(250000.0));
        assert_eq!(f.max_price, None);
        assert_eq!(f, f.clone());
        assert_eq!(
            f.to_query_pairs(),
            vec![
                ("minPrice", "250000".to_string()),
                ("page", "0".to_string()),
                ("size", "20".to_string()),
            ]
        );
    }

    #[test]
    fn page_navigation_clamps_at_ends() {
        let mut f = PropertyFilters::default();
        assert!(!f.prev_page(5));
        assert!(f.next_page(5));
        assert_eq!(f.page, 1);
        assert!(f.go_to_page(4, 5));
        assert!(!f.next_page(5));
        assert_eq!(f.page, 4);
        assert!(f.prev_page(5));
        assert_eq!(f.page, 3);
    }

    #[test]
    fn next_page_with_no_results_is_noop() {
        let mut f = PropertyFilters::default();
        assert!(!f.next_page(0));
        assert_eq!(f.page, 0);
    }

    #[test]
    fn clear_keeps_page_size() {
        let mut f = PropertyFilters::with_page_size(50);
        f.set(FilterField::City, "Irvine").unwrap();
        f.go_to_page(2, 5);
        f.clear();
        assert_eq!(f, PropertyFilters::with_page_size(50));
    }

    #[test]
    fn sort_order_parse_and_display() {
        let s: SortOrder = "price,desc".parse().unwrap();
        assert_eq!(s.field, "price");
        assert_eq!(s.direction, Direction::Desc);
        assert_eq!(s.to_string(), "price,desc");
        let s: SortOrder = " city , ASC ".parse().unwrap();
        assert_eq!(s.to_string(), "city,asc");
    }

    #[test]
    fn sort_order_rejects_bad_input() {
        assert_eq!(
            "price,sideways".parse::<SortOrder>(),
            Err(SortParseError::Direction("sideways".to_string()))
        );
        assert!(matches!(
            "price".parse::<SortOrder>(),
            Err(SortParseError::Format(_))
        ));
        assert!(matches!(
            ",asc".parse::<SortOrder>(),
            Err(SortParseError::Format(_))
        ));
    }

    #[test]
    fn sort_labels() {
        let s: SortOrder = "squareFeet,desc".parse().unwrap();
        assert_eq!(sort_label(Some(&s)), "Largest Sq Ft");
        assert_eq!(sort_label(None), "Default");
        let s: SortOrder = "yearBuilt,asc".parse().unwrap();
        assert_eq!(sort_label(Some(&s)), "yearBuilt,asc");
    }

    #[test]
    fn filters_persist_as_camel_case_json() {
        let mut f = PropertyFilters::default();
        f.set(FilterField::MinBaths, "2").unwrap();
        f.set(FilterField::Sort, "city,asc").unwrap();
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["minBaths"], 2);
        assert_eq!(json["sort"], "city,asc");
        let back: PropertyFilters = serde_json::from_value(json).unwrap();
        assert_eq!(back, f);
    }
}
