//! District boundaries as GeoJSON.
//!
//! Two operations: build a point FeatureCollection from hotspot records
//! (the dataset carries centroids, not polygons — real boundary geometry
//! is out of scope), and merge hotspot metrics into an externally
//! supplied FeatureCollection by matching a district code/name property.

use serde_json::{Value, json};

use crate::hotspot::HotspotRecord;

/// Feature properties tried, in order, when matching a feature to a
/// district record.
const MATCH_KEYS: [&str; 4] = ["city_code", "code", "city", "district"];

/// Build a FeatureCollection of point features, one per district, with
/// the full hotspot record as properties.
pub fn feature_collection(records: &[HotspotRecord]) -> Value {
    let features: Vec<Value> = records
        .iter()
        .map(|record| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [record.reading.longitude, record.reading.latitude],
                },
                "properties": serde_json::to_value(record).unwrap_or(Value::Null),
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Merge hotspot metrics into an existing FeatureCollection in place.
///
/// A feature matches a record when any of its `city_code` / `code` /
/// `city` / `district` properties equals the record's district name.
/// Matched features get the record's fields added to their properties;
/// unmatched features are left untouched.
pub fn merge_metrics(geojson: &mut Value, records: &[HotspotRecord]) {
    let Some(features) = geojson
        .get_mut("features")
        .and_then(|f| f.as_array_mut())
    else {
        return;
    };

    for feature in features {
        let Some(props) = feature
            .get_mut("properties")
            .and_then(|p| p.as_object_mut())
        else {
            continue;
        };

        let matched = records.iter().find(|record| {
            MATCH_KEYS.iter().any(|key| {
                props
                    .get(*key)
                    .and_then(|v| v.as_str())
                    .is_some_and(|name| name == record.reading.district)
            })
        });

        if let Some(record) = matched {
            if let Ok(Value::Object(fields)) = serde_json::to_value(record) {
                for (key, value) in fields {
                    props.insert(key, value);
                }
            }
        }
    }
}
