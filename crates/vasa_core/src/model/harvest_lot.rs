//! Harvest lot: a recorded quantity of harvested crop.
//!
//! # Invariants
//! - Producer, parcel and campaign links are optional and degrade to `None`
//!   when the referenced row is deleted; the lot itself is historical record
//!   and is never removed by those deletions.
//! - `harvest_date` defaults to the store's current date.

use super::crop::Crop;
use super::{deserialize_some, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestLot {
    pub id: EntityId,
    pub producer_id: Option<EntityId>,
    pub parcel_id: Option<EntityId>,
    pub campaign_id: Option<EntityId>,
    pub crop: Crop,
    pub wet_kg: Option<f64>,
    pub dry_kg: Option<f64>,
    pub quality_grade: Option<String>,
    pub moisture_pct: Option<f64>,
    pub harvest_date: NaiveDate,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHarvestLot {
    pub crop: Crop,
    #[serde(default)]
    pub producer_id: Option<EntityId>,
    #[serde(default)]
    pub parcel_id: Option<EntityId>,
    #[serde(default)]
    pub campaign_id: Option<EntityId>,
    #[serde(default)]
    pub wet_kg: Option<f64>,
    #[serde(default)]
    pub dry_kg: Option<f64>,
    #[serde(default)]
    pub quality_grade: Option<String>,
    #[serde(default)]
    pub moisture_pct: Option<f64>,
    #[serde(default)]
    pub harvest_date: Option<NaiveDate>,
}

impl NewHarvestLot {
    pub fn of(crop: Crop) -> Self {
        Self {
            crop,
            producer_id: None,
            parcel_id: None,
            campaign_id: None,
            wet_kg: None,
            dry_kg: None,
            quality_grade: None,
            moisture_pct: None,
            harvest_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HarvestLotPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub producer_id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub parcel_id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub campaign_id: Option<Option<EntityId>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub crop: Option<Option<Crop>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub wet_kg: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub dry_kg: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub quality_grade: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub moisture_pct: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub harvest_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HarvestLotFilter {
    #[serde(default)]
    pub producer_id: Option<EntityId>,
    #[serde(default)]
    pub parcel_id: Option<EntityId>,
    #[serde(default)]
    pub campaign_id: Option<EntityId>,
}
