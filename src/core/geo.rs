//! Coordinates, viewport fitting, and marker clustering for the map view.

use std::collections::BTreeMap;

use super::property::Property;

/// Geographic center of the contiguous US; used when nothing on the page is mappable.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: 39.8283,
    lng: -98.5795,
};

/// Smallest viewport span in degrees, so a single marker is not drawn on a zero-size map.
const MIN_SPAN_DEG: f64 = 0.02;

/// Fraction of the span added on each side when fitting markers.
const FIT_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

fn parse_coord(raw: Option<&str>, limit: f64) -> Option<f64> {
    let v: f64 = raw?.trim().parse().ok()?;
    (v.is_finite() && v.abs() <= limit).then_some(v)
}

impl GeoPoint {
    /// Location of a property when both latitude and longitude parse and are in range.
    pub fn of(p: &Property) -> Option<Self> {
        let lat = parse_coord(p.latitude.as_deref(), 90.0)?;
        let lng = parse_coord(p.longitude.as_deref(), 180.0)?;
        Some(GeoPoint { lat, lng })
    }
}

/// A property placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: i64,
    pub point: GeoPoint,
    pub price: Option<f64>,
}

/// Markers for every mappable property, in input order.
pub fn markers<'a>(properties: impl IntoIterator<Item = &'a Property>) -> Vec<Marker> {
    properties
        .into_iter()
        .filter_map(|p| {
            GeoPoint::of(p).map(|point| Marker {
                id: p.id,
                point,
                price: p.price,
            })
        })
        .collect()
}

/// "1 property on map" / "N properties on map".
pub fn stats_label(count: usize) -> String {
    let noun = if count == 1 { "property" } else { "properties" };
    format!("{} {} on map", count, noun)
}

/// Visible lat/lng rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Viewport {
    /// Contiguous US around [`DEFAULT_CENTER`].
    pub fn default_us() -> Self {
        Self::around(DEFAULT_CENTER, 26.0, 60.0)
    }

    pub fn around(center: GeoPoint, lat_span: f64, lng_span: f64) -> Self {
        Viewport {
            min_lat: center.lat - lat_span / 2.0,
            max_lat: center.lat + lat_span / 2.0,
            min_lng: center.lng - lng_span / 2.0,
            max_lng: center.lng + lng_span / 2.0,
        }
    }

    /// Fit all markers with padding; falls back to the default US view when empty.
    pub fn fit(markers: &[Marker]) -> Self {
        let Some(first) = markers.first() else {
            return Self::default_us();
        };
        let mut v = Viewport {
            min_lat: first.point.lat,
            max_lat: first.point.lat,
            min_lng: first.point.lng,
            max_lng: first.point.lng,
        };
        for m in &markers[1..] {
            v.min_lat = v.min_lat.min(m.point.lat);
            v.max_lat = v.max_lat.max(m.point.lat);
            v.min_lng = v.min_lng.min(m.point.lng);
            v.max_lng = v.max_lng.max(m.point.lng);
        }
        let lat_span = (v.max_lat - v.min_lat).max(MIN_SPAN_DEG) * (1.0 + 2.0 * FIT_PADDING);
        let lng_span = (v.max_lng - v.min_lng).max(MIN_SPAN_DEG) * (1.0 + 2.0 * FIT_PADDING);
        Self::around(v.center(), lat_span, lng_span)
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lng: (self.min_lng + self.max_lng) / 2.0,
        }
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&p.lat)
            && (self.min_lng..=self.max_lng).contains(&p.lng)
    }

    /// Zoom by `factor` around the center (< 1 zooms in).
    pub fn zoom(&self, factor: f64) -> Self {
        let lat_span = ((self.max_lat - self.min_lat) * factor).max(MIN_SPAN_DEG);
        let lng_span = ((self.max_lng - self.min_lng) * factor).max(MIN_SPAN_DEG);
        Self::around(self.center(), lat_span, lng_span)
    }

    /// Pan by a fraction of the current span.
    pub fn pan(&self, lat_frac: f64, lng_frac: f64) -> Self {
        let dlat = (self.max_lat - self.min_lat) * lat_frac;
        let dlng = (self.max_lng - self.min_lng) * lng_frac;
        Viewport {
            min_lat: self.min_lat + dlat,
            max_lat: self.max_lat + dlat,
            min_lng: self.min_lng + dlng,
            max_lng: self.max_lng + dlng,
        }
    }
}

/// Markers merged into one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub center: GeoPoint,
    pub ids: Vec<i64>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Group visible markers into a `cols` x `rows` grid over the viewport.
/// Each non-empty cell becomes one cluster centered on its members' centroid.
/// Markers outside the viewport are dropped. Clusters are ordered by cell (row-major, north first).
pub fn cluster(markers: &[Marker], viewport: &Viewport, cols: usize, rows: usize) -> Vec<Cluster> {
    if cols == 0 || rows == 0 {
        return vec![];
    }
    let lat_span = viewport.max_lat - viewport.min_lat;
    let lng_span = viewport.max_lng - viewport.min_lng;
    if lat_span <= 0.0 || lng_span <= 0.0 {
        return vec![];
    }

    let mut cells: BTreeMap<(usize, usize), Vec<&Marker>> = BTreeMap::new();
    for m in markers.iter().filter(|m| viewport.contains(m.point)) {
        let col = (((m.point.lng - viewport.min_lng) / lng_span) * cols as f64) as usize;
        let row = (((viewport.max_lat - m.point.lat) / lat_span) * rows as f64) as usize;
        cells
            .entry((row.min(rows - 1), col.min(cols - 1)))
            .or_default()
            .push(m);
    }

    cells
        .into_values()
        .map(|members| {
            let n = members.len() as f64;
            let lat = members.iter().map(|m| m.point.lat).sum::<f64>() / n;
            let lng = members.iter().map(|m| m.point.lng).sum::<f64>() / n;
            Cluster {
                center: GeoPoint { lat, lng },
                ids: members.iter().map(|m| m.id).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(id: i64, lat: &str, lng: &str) -> Property {
        Property {
            latitude: Some(lat.to_string()),
            longitude: Some(lng.to_string()),
            ..Property::with_id(id)
        }
    }

    fn marker(id: i64, lat: f64, lng: f64) -> Marker {
        Marker {
            id,
            point: GeoPoint { lat, lng },
            price: None,
        }
    }

    #[test]
    fn unparsable_or_out_of_range_coordinates_are_skipped() {
        let props = vec![
            prop(1, "33.68", "-117.82"),
            prop(2, "", "-117.82"),
            prop(3, "abc", "-117.82"),
            prop(4, "95.0", "-117.82"),
            prop(5, " 33.70 ", " -117.80 "),
            Property::with_id(6),
            prop(7, "NaN", "-117.8"),
        ];
        let ms = markers(&props);
        assert_eq!(ms.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn empty_set_uses_default_center() {
        let v = Viewport::fit(&[]);
        let c = v.center();
        assert!((c.lat - DEFAULT_CENTER.lat).abs() < 1e-9);
        assert!((c.lng - DEFAULT_CENTER.lng).abs() < 1e-9);
    }

    #[test]
    fn fit_contains_every_marker() {
        let ms = vec![
            marker(1, 33.6, -117.9),
            marker(2, 34.1, -118.3),
            marker(3, 32.7, -117.1),
        ];
        let v = Viewport::fit(&ms);
        for m in &ms {
            assert!(v.contains(m.point), "marker {} outside viewport", m.id);
        }
    }

    #[test]
    fn single_marker_gets_minimum_span() {
        let v = Viewport::fit(&[marker(1, 33.6, -117.9)]);
        assert!(v.max_lat - v.min_lat >= MIN_SPAN_DEG);
        assert!(v.max_lng - v.min_lng >= MIN_SPAN_DEG);
        assert!(v.contains(GeoPoint {
            lat: 33.6,
            lng: -117.9
        }));
    }

    #[test]
    fn nearby_markers_share_a_cluster() {
        let ms = vec![
            marker(1, 33.600, -117.900),
            marker(2, 33.601, -117.901),
            marker(3, 34.500, -118.800),
        ];
        let v = Viewport {
            min_lat: 33.0,
            max_lat: 35.0,
            min_lng: -119.0,
            max_lng: -117.0,
        };
        let clusters = cluster(&ms, &v, 4, 4);
        assert_eq!(clusters.len(), 2);
        // North-most cell first.
        assert_eq!(clusters[0].ids, vec![3]);
        assert_eq!(clusters[1].ids, vec![1, 2]);
        assert!((clusters[1].center.lat - 33.6005).abs() < 1e-9);
    }

    #[test]
    fn markers_outside_viewport_are_dropped() {
        let ms = vec![marker(1, 10.0, 10.0)];
        assert!(cluster(&ms, &Viewport::default_us(), 10, 10).is_empty());
    }

    #[test]
    fn zoom_and_pan_keep_span_positive() {
        let v = Viewport::default_us().zoom(0.0);
        assert!(v.max_lat > v.min_lat);
        let p = v.pan(0.5, -0.5);
        assert!((p.center().lat - (v.center().lat + (v.max_lat - v.min_lat) * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn stats_label_pluralizes() {
        assert_eq!(stats_label(0), "0 properties on map");
        assert_eq!(stats_label(1), "1 property on map");
        assert_eq!(stats_label(12), "12 properties on map");
    }
}
