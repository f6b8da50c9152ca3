//! Typed scoring payload.
//!
//! The payload arrives as loosely-typed nested JSON with three optional
//! sections: `carbonProject`, `land` and `farmer`. Each section is parsed
//! into a record whose fields carry their defaults, so parsing itself is the
//! coercion step and cannot fail:
//!
//! - a section (or `farmDetails` / `address`) that is missing or not an
//!   object becomes its default record;
//! - numeric fields use safe coercion (see [`super::coerce`]);
//! - `cropTypes` that is missing or not a list becomes empty.
//!
//! # Examples
//!
//! ```
//! use econe_risk::domain::RiskPayload;
//! use serde_json::json;
//!
//! let payload = RiskPayload::from_value(&json!({
//!     "land": { "landArea": "12.5", "soilType": "CLAY" },
//!     "farmer": "not a section",
//! }));
//!
//! assert_eq!(payload.land.land_area, 12.5);
//! assert_eq!(payload.land.soil_type.as_deref(), Some("CLAY"));
//! assert!(payload.farmer.crop_types.is_empty());
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use super::coerce;

/// Scoring request payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskPayload {
    #[serde(deserialize_with = "coerce::lenient_section")]
    pub carbon_project: CarbonProject,
    #[serde(deserialize_with = "coerce::lenient_section")]
    pub land: Land,
    #[serde(deserialize_with = "coerce::lenient_section")]
    pub farmer: Farmer,
}

/// Carbon-offset project under review.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarbonProject {
    /// Claimed carbon amount.
    #[serde(deserialize_with = "coerce::lenient_f64")]
    pub carbon_amount: f64,
    /// Validity period in whole years.
    #[serde(deserialize_with = "coerce::lenient_i64")]
    pub validity_years: i64,
}

/// Land parcel as recorded in the land registry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Land {
    /// Registered area.
    #[serde(deserialize_with = "coerce::lenient_f64")]
    pub land_area: f64,
    #[serde(deserialize_with = "coerce::lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "coerce::lenient_f64")]
    pub longitude: f64,
    #[serde(deserialize_with = "coerce::lenient_label")]
    pub soil_type: Option<String>,
}

/// Farmer profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Farmer {
    #[serde(deserialize_with = "coerce::lenient_section")]
    pub farm_details: FarmDetails,
    #[serde(deserialize_with = "coerce::lenient_section")]
    pub address: FarmerAddress,
    /// Declared crops. Only the count is used for scoring, so elements are
    /// kept as raw JSON.
    #[serde(deserialize_with = "coerce::lenient_list")]
    pub crop_types: Vec<Value>,
}

/// Self-reported farm details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FarmDetails {
    /// Area the farmer reports, in acres.
    #[serde(deserialize_with = "coerce::lenient_f64")]
    pub land_area_in_acres: f64,
    #[serde(deserialize_with = "coerce::lenient_truthy")]
    pub irrigation_available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FarmerAddress {
    #[serde(deserialize_with = "coerce::lenient_label")]
    pub state: Option<String>,
}

impl RiskPayload {
    /// Parse an untrusted JSON value.
    ///
    /// A non-object payload is logged and treated as an empty one.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            error!(
                payload_type = coerce::type_name(value),
                "Invalid payload type"
            );
            return Self::default();
        }

        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            error!(error = %e, "Failed to parse payload");
            Self::default()
        })
    }
}
