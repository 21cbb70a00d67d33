//! Derived presentation of an observer's records.

use lg_core::{BroadcastRecord, Coordinates, Identity};

/// One row of the broadcaster list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: Identity,
    pub label: String,
    pub initial: char,
    /// "lat, lon" to six decimals
    pub coordinates: String,
    pub is_simulated: bool,
}

/// Midpoint of the bounding box around all records, or `default` when there
/// are none.
pub fn bounding_center<'a>(
    records: impl IntoIterator<Item = &'a BroadcastRecord>,
    default: Coordinates,
) -> Coordinates {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;

    for record in records {
        let (lat, lon) = (record.latitude, record.longitude);
        bounds = Some(match bounds {
            None => (lat, lat, lon, lon),
            Some((min_lat, max_lat, min_lon, max_lon)) => (
                min_lat.min(lat),
                max_lat.max(lat),
                min_lon.min(lon),
                max_lon.max(lon),
            ),
        });
    }

    match bounds {
        Some((min_lat, max_lat, min_lon, max_lon)) => Coordinates {
            latitude: (min_lat + max_lat) / 2.0,
            longitude: (min_lon + max_lon) / 2.0,
        },
        None => default,
    }
}

/// One entry per record, ordered by label then id.
pub fn list_view<'a>(records: impl IntoIterator<Item = &'a BroadcastRecord>) -> Vec<ListEntry> {
    let mut entries: Vec<ListEntry> = records
        .into_iter()
        .map(|record| ListEntry {
            id: record.id.clone(),
            label: record.label().to_string(),
            initial: record.initial(),
            coordinates: record.coordinates().to_string(),
            is_simulated: record.is_simulated,
        })
        .collect();

    entries.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
    entries
}
