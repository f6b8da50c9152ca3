//! Canonical request payloads.

use serde_json::{json, Value};

/// A fully populated, well-typed payload.
#[must_use]
pub fn complete() -> Value {
    json!({
        "carbonProject": { "carbonAmount": 250.0, "validityYears": 5 },
        "land": {
            "landArea": 12.5,
            "latitude": 30.9,
            "longitude": 75.85,
            "soilType": "LOAMY",
        },
        "farmer": {
            "farmDetails": { "landAreaInAcres": 10.0, "irrigationAvailable": true },
            "address": { "state": "Punjab" },
            "cropTypes": ["WHEAT", "RICE", "MAIZE"],
        },
    })
}

/// The same payload with wrong types in every section.
#[must_use]
pub fn garbled() -> Value {
    json!({
        "carbonProject": { "carbonAmount": "lots", "validityYears": [5] },
        "land": { "landArea": "abc", "latitude": null, "longitude": {}, "soilType": null },
        "farmer": {
            "farmDetails": "ten acres",
            "address": ["Punjab"],
            "cropTypes": "WHEAT",
        },
    })
}
