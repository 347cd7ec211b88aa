//! Search criteria returned by the natural-language parse endpoint.

use serde::{Deserialize, Serialize};

use crate::core::filters::PropertyFilters;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub beds: Option<u32>,
    pub min_beds: Option<u32>,
    pub baths: Option<u32>,
    pub min_baths: Option<u32>,
    pub min_square_feet: Option<u32>,
    pub max_square_feet: Option<u32>,
    pub pool_private: Option<bool>,
    pub fireplace: Option<bool>,
    pub view: Option<bool>,
    pub garage: Option<bool>,
    pub property_type: Option<String>,
    pub min_year_built: Option<u32>,
    pub max_year_built: Option<u32>,
    pub original_query: Option<String>,
    /// 0-100.
    pub confidence_score: Option<u32>,
}

impl ParsedQuery {
    /// Listing filters for the criteria the listing endpoint understands.
    /// Square footage, amenities, type, and year are only honored by NLP search.
    pub fn to_filters(&self, size: u32) -> PropertyFilters {
        PropertyFilters {
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            beds: self.beds,
            min_beds: self.min_beds,
            baths: self.baths,
            min_baths: self.min_baths,
            ..PropertyFilters::with_page_size(size)
        }
    }

    /// Human-readable criteria, one "Label: value" per set field.
    pub fn criteria(&self) -> Vec<(&'static str, String)> {
        fn yes(flag: Option<bool>) -> Option<String> {
            flag.map(|b| if b { "yes" } else { "no" }.to_string())
        }
        let price = |v: Option<f64>| v.map(|p| crate::core::property::format_price(Some(p)));
        let num = |v: Option<u32>| v.map(|n| n.to_string());
        [
            ("City", self.city.clone()),
            ("State", self.state.clone()),
            ("ZIP", self.zip.clone()),
            ("Min price", price(self.min_price)),
            ("Max price", price(self.max_price)),
            ("Beds", num(self.beds)),
            ("Min beds", num(self.min_beds)),
            ("Baths", num(self.baths)),
            ("Min baths", num(self.min_baths)),
            ("Min sqft", num(self.min_square_feet)),
            ("Max sqft", num(self.max_square_feet)),
            ("Pool", yes(self.pool_private)),
            ("Fireplace", yes(self.fireplace)),
            ("View", yes(self.view)),
            ("Garage", yes(self.garage)),
            ("Type", self.property_type.clone()),
            ("Built after", num(self.min_year_built)),
            ("Built before", num(self.max_year_built)),
            ("Confidence", self.confidence_score.map(|c| format!("{}%", c))),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}
