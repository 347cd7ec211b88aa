//! Property record as served by the listing API.
//!
//! The API serializes most fields in camelCase, but a handful of legacy
//! columns arrive in snake_case (and some deployments send both). Both
//! spellings are kept as separate fields; accessors prefer camelCase.

mod format;

pub use format::{format_count, format_price, price_label};

use serde::{Deserialize, Serialize};

use crate::core::photos;

/// Listing contract date: ISO date string, or epoch milliseconds from older backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingDate {
    Text(String),
    EpochMillis(i64),
}

impl ListingDate {
    /// Render as `YYYY-MM-DD` when possible; unparseable text is returned unchanged.
    pub fn display(&self) -> String {
        match self {
            ListingDate::Text(s) => s.clone(),
            ListingDate::EpochMillis(ms) => chrono::DateTime::from_timestamp_millis(*ms)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| ms.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub price: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub beds: Option<i64>,
    pub baths: Option<f64>,
    pub land_size: Option<i64>,
    pub garage_capacity: Option<i64>,
    pub address: Option<String>,
    pub property_class: Option<String>,
    pub household_type: Option<String>,
    pub year_built: Option<i64>,
    pub photos: Option<String>,
    pub remarks: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub appliances: Option<String>,

    pub mls_number: Option<String>,
    pub status: Option<String>,
    pub standard_status: Option<String>,
    pub listing_contract_date: Option<ListingDate>,
    pub days_on_market: Option<i64>,
    pub address_street: Option<String>,
    pub subdivision_name: Option<String>,
    pub county: Option<String>,
    pub square_feet: Option<i64>,
    pub lot_size_square_feet: Option<f64>,
    pub bathrooms_half: Option<i64>,
    pub stories_total: Option<i64>,
    pub structure_type: Option<String>,
    pub property_condition: Option<String>,
    pub pool_private: Option<bool>,
    pub fireplace: Option<bool>,
    pub view: Option<bool>,
    pub garage: Option<bool>,
    pub cooling: Option<bool>,
    pub heating: Option<bool>,
    pub cooling_type: Option<String>,
    pub heating_type: Option<String>,
    pub view_description: Option<String>,
    pub interior_features: Option<String>,
    pub association_fee: Option<i64>,
    pub association_fee_frequency: Option<String>,
    pub agent_first_name: Option<String>,
    pub agent_last_name: Option<String>,
    pub agent_full_name: Option<String>,
    pub office_name: Option<String>,
    pub agent_email: Option<String>,
    pub agent_phone: Option<String>,

    // Legacy snake_case columns.
    #[serde(rename = "land_size")]
    pub land_size_legacy: Option<i64>,
    #[serde(rename = "garage_capacity")]
    pub garage_capacity_legacy: Option<i64>,
    #[serde(rename = "year_built")]
    pub year_built_legacy: Option<i64>,
    #[serde(rename = "property_class")]
    pub property_class_legacy: Option<String>,
    #[serde(rename = "household_type")]
    pub household_type_legacy: Option<String>,
    /// Alias for household type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Label for each boolean amenity flag, in display order.
const FEATURE_LABELS: [&str; 6] = ["Pool", "Fireplace", "View", "Garage", "Cooling", "Heating"];

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

impl Property {
    /// Record with only an id set.
    #[cfg(test)]
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn land_size(&self) -> Option<i64> {
        self.land_size.or(self.land_size_legacy)
    }

    pub fn garage_capacity(&self) -> Option<i64> {
        self.garage_capacity.or(self.garage_capacity_legacy)
    }

    pub fn year_built(&self) -> Option<i64> {
        self.year_built.or(self.year_built_legacy)
    }

    /// First non-empty of household type, `type`, then property class.
    /// Within each pair the camelCase value wins even when it is empty.
    pub fn property_type(&self) -> Option<&str> {
        let household = self
            .household_type
            .as_deref()
            .or(self.household_type_legacy.as_deref());
        let class = self
            .property_class
            .as_deref()
            .or(self.property_class_legacy.as_deref());
        non_empty(household)
            .or_else(|| non_empty(self.kind.as_deref()))
            .or_else(|| non_empty(class))
    }

    /// Listing status, falling back to the RESO standard status.
    pub fn status(&self) -> Option<&str> {
        non_empty(self.status.as_deref()).or_else(|| non_empty(self.standard_status.as_deref()))
    }

    /// Primary photo URL resolved from the raw `photos` field.
    pub fn primary_photo(&self) -> Option<String> {
        photos::resolve(self.photos.as_deref())
    }

    /// Labels of amenity flags that are set to true.
    pub fn features(&self) -> Vec<&'static str> {
        let flags = [
            self.pool_private,
            self.fireplace,
            self.view,
            self.garage,
            self.cooling,
            self.heating,
        ];
        FEATURE_LABELS
            .iter()
            .zip(flags)
            .filter(|(_, flag)| *flag == Some(true))
            .map(|(label, _)| *label)
            .collect()
    }

    /// Agent display name: full name, else "first last" from the parts present.
    pub fn agent_name(&self) -> Option<String> {
        if let Some(full) = non_empty(self.agent_full_name.as_deref()) {
            return Some(full.to_string());
        }
        let parts: Vec<&str> = [
            non_empty(self.agent_first_name.as_deref()),
            non_empty(self.agent_last_name.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// "City, ST 90210" with missing parts skipped.
    pub fn location_line(&self) -> String {
        let city = non_empty(self.city.as_deref());
        let state_zip: Vec<&str> = [
            non_empty(self.state.as_deref()),
            non_empty(self.zip.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();
        match (city, state_zip.is_empty()) {
            (Some(c), false) => format!("{}, {}", c, state_zip.join(" ")),
            (Some(c), true) => c.to_string(),
            (None, false) => state_zip.join(" "),
            (None, true) => String::new(),
        }
    }

    /// Street address, falling back to the street-only column.
    pub fn display_address(&self) -> Option<&str> {
        non_empty(self.address.as_deref()).or_else(|| non_empty(self.address_street.as_deref()))
    }

    /// "3 bd · 2 ba · 1,850 sqft" from the values present.
    pub fn summary_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(beds) = self.beds {
            parts.push(format!("{} bd", beds));
        }
        if let Some(baths) = self.baths {
            parts.push(format!("{} ba", format::format_decimal(baths)));
        }
        if let Some(sqft) = self.square_feet {
            parts.push(format!("{} sqft", format_count(sqft)));
        }
        parts.join(" · ")
    }

    /// Labeled facts for the detail view, skipping absent values.
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        let text = |v: &Option<String>| non_empty(v.as_deref()).map(str::to_string);
        let count = |v: Option<i64>| v.map(format_count);
        let flag_list = self.features();
        let fee = self.association_fee.map(|f| {
            let amount = format_price(Some(f as f64));
            match non_empty(self.association_fee_frequency.as_deref()) {
                Some(freq) => format!("{} ({})", amount, freq),
                None => amount,
            }
        });
        [
            ("MLS #", text(&self.mls_number)),
            ("Status", self.status().map(str::to_string)),
            ("Type", self.property_type().map(str::to_string)),
            ("Listed", self.listing_contract_date.as_ref().map(ListingDate::display)),
            ("Days on market", self.days_on_market.map(|d| d.to_string())),
            ("Bedrooms", self.beds.map(|b| b.to_string())),
            ("Bathrooms", self.baths.map(format::format_decimal)),
            ("Half baths", self.bathrooms_half.map(|b| b.to_string())),
            ("Living area", count(self.square_feet).map(|s| format!("{} sqft", s))),
            (
                "Lot",
                self.lot_size_square_feet
                    .map(|s| format!("{} sqft", format_count(s.round() as i64)))
                    .or_else(|| count(self.land_size()).map(|s| format!("{} sqft", s))),
            ),
            ("Year built", self.year_built().map(|y| y.to_string())),
            ("Stories", self.stories_total.map(|s| s.to_string())),
            ("Garage spaces", self.garage_capacity().map(|g| g.to_string())),
            ("Structure", text(&self.structure_type)),
            ("Condition", text(&self.property_condition)),
            ("Subdivision", text(&self.subdivision_name)),
            ("County", text(&self.county)),
            (
                "Features",
                (!flag_list.is_empty()).then(|| flag_list.join(", ")),
            ),
            ("Cooling", text(&self.cooling_type)),
            ("Heating", text(&self.heating_type)),
            ("View", text(&self.view_description)),
            ("Interior", text(&self.interior_features)),
            ("Appliances", text(&self.appliances)),
            ("HOA", fee),
            ("Agent", self.agent_name()),
            ("Office", text(&self.office_name)),
            ("Email", text(&self.agent_email)),
            ("Phone", text(&self.agent_phone)),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}
