//! Fixed-schema feature row fed to the risk classifier.
//!
//! The row always carries the ten columns of [`FEATURE_COLUMNS`], in that
//! order, whatever the payload contained. The classifier was trained on this
//! exact layout.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::payload::RiskPayload;

/// Category used when a categorical input is absent.
pub const UNKNOWN_CATEGORY: &str = "UNKNOWN";

/// Column names in classifier order.
pub const FEATURE_COLUMNS: [&str; 10] = [
    "carbonAmount",
    "validityYears",
    "landArea",
    "latitude",
    "longitude",
    "areaDiff",
    "cropTypesCount",
    "hasIrrigation",
    "soilType",
    "farmerState",
];

/// A single-row feature table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRow {
    pub carbon_amount: f64,
    pub validity_years: i64,
    pub land_area: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// `|land.landArea - farmDetails.landAreaInAcres|`: registry area versus
    /// self-reported area.
    pub area_diff: f64,
    pub crop_types_count: i64,
    /// 1 when irrigation is available, else 0.
    pub has_irrigation: i64,
    pub soil_type: String,
    pub farmer_state: String,
}

/// One cell of a [`FeatureRow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Float(f64),
    Int(i64),
    Category(&'a str),
}

impl FeatureValue<'_> {
    /// Numeric view of the cell; categories have none.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            FeatureValue::Float(f) => Some(f),
            FeatureValue::Int(i) => Some(i as f64),
            FeatureValue::Category(_) => None,
        }
    }

    #[must_use]
    pub const fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Category(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Category(v) => write!(f, "{v}"),
        }
    }
}

impl FeatureRow {
    /// Build a row straight from untrusted JSON.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        build_feature_row(&RiskPayload::from_value(value))
    }

    /// Cells in [`FEATURE_COLUMNS`] order.
    #[must_use]
    pub fn values(&self) -> [FeatureValue<'_>; 10] {
        [
            FeatureValue::Float(self.carbon_amount),
            FeatureValue::Int(self.validity_years),
            FeatureValue::Float(self.land_area),
            FeatureValue::Float(self.latitude),
            FeatureValue::Float(self.longitude),
            FeatureValue::Float(self.area_diff),
            FeatureValue::Int(self.crop_types_count),
            FeatureValue::Int(self.has_irrigation),
            FeatureValue::Category(&self.soil_type),
            FeatureValue::Category(&self.farmer_state),
        ]
    }

    /// `(column, value)` pairs in classifier order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, FeatureValue<'_>)> {
        FEATURE_COLUMNS.into_iter().zip(self.values())
    }

    /// Look up a cell by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<FeatureValue<'_>> {
        let index = FEATURE_COLUMNS.iter().position(|c| *c == column)?;
        Some(self.values()[index])
    }
}

/// Derive the feature row for a payload. Never fails.
#[must_use]
pub fn build_feature_row(payload: &RiskPayload) -> FeatureRow {
    let carbon = &payload.carbon_project;
    let land = &payload.land;
    let farmer = &payload.farmer;
    let details = &farmer.farm_details;

    FeatureRow {
        carbon_amount: carbon.carbon_amount,
        validity_years: carbon.validity_years,
        land_area: land.land_area,
        latitude: land.latitude,
        longitude: land.longitude,
        area_diff: (land.land_area - details.land_area_in_acres).abs(),
        crop_types_count: i64::try_from(farmer.crop_types.len()).unwrap_or(i64::MAX),
        has_irrigation: i64::from(details.irrigation_available),
        soil_type: category(land.soil_type.as_deref()),
        farmer_state: category(farmer.address.state.as_deref()),
    }
}

fn category(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN_CATEGORY).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_payload_is_fully_defaulted() {
        let row = FeatureRow::from_value(&json!({}));

        assert_eq!(
            row,
            FeatureRow {
                carbon_amount: 0.0,
                validity_years: 0,
                land_area: 0.0,
                latitude: 0.0,
                longitude: 0.0,
                area_diff: 0.0,
                crop_types_count: 0,
                has_irrigation: 0,
                soil_type: "UNKNOWN".into(),
                farmer_state: "UNKNOWN".into(),
            }
        );
    }

    #[test]
    fn area_diff_is_absolute() {
        let row = FeatureRow::from_value(&json!({
            "land": { "landArea": 3.0 },
            "farmer": { "farmDetails": { "landAreaInAcres": 10.5 } },
        }));

        assert_eq!(row.area_diff, 7.5);
    }

    #[test]
    fn get_resolves_columns_by_name() {
        let row = FeatureRow::from_value(&json!({
            "land": { "soilType": "LOAMY" },
            "farmer": { "cropTypes": ["WHEAT"] },
        }));

        assert_eq!(row.get("cropTypesCount"), Some(FeatureValue::Int(1)));
        assert_eq!(row.get("soilType"), Some(FeatureValue::Category("LOAMY")));
        assert_eq!(row.get("ndvi"), None);
    }

    #[test]
    fn columns_follow_schema_order() {
        let row = FeatureRow::from_value(&json!(null));
        let names: Vec<_> = row.columns().map(|(name, _)| name).collect();

        assert_eq!(names, FEATURE_COLUMNS);
    }

    #[test]
    fn serialized_row_uses_schema_names() {
        let row = FeatureRow::from_value(&json!({}));
        let value = serde_json::to_value(&row).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();

        let mut expected: Vec<_> = FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect();
        expected.sort();
        assert_eq!(keys, expected);
    }
}
