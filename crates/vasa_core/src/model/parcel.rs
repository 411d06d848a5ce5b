//! Geolocated land parcel owned by exactly one producer.

use super::crop::Crop;
use super::{deserialize_some, EntityId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: EntityId,
    pub producer_id: EntityId,
    pub name: Option<String>,
    pub crop: Option<Crop>,
    pub area_ha: Option<f64>,
    /// Location is mandatory for parcels.
    pub lat: f64,
    pub lng: f64,
    pub planted_year: Option<i32>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewParcel {
    pub producer_id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub crop: Option<Crop>,
    #[serde(default)]
    pub area_ha: Option<f64>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub planted_year: Option<i32>,
}

impl NewParcel {
    pub fn at(producer_id: EntityId, lat: f64, lng: f64) -> Self {
        Self {
            producer_id,
            name: None,
            crop: None,
            area_ha: None,
            lat,
            lng,
            planted_year: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParcelPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub producer_id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub crop: Option<Option<Crop>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub area_ha: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub lat: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub lng: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub planted_year: Option<Option<i32>>,
}

/// Filter for listing parcels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParcelFilter {
    #[serde(default)]
    pub producer_id: Option<EntityId>,
}
