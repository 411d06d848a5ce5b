//! Harvest campaign: one named marketing period per crop and season.
//!
//! # Invariants
//! - `(crop, season_year)` is unique.
//! - Deleting a campaign detaches its harvest lots instead of deleting them.

use super::crop::Crop;
use super::{deserialize_some, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Planned,
    Active,
    Closed,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Planned => "planned",
            CampaignStatus::Active => "active",
            CampaignStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "planned" => Some(CampaignStatus::Planned),
            "active" => Some(CampaignStatus::Active),
            "closed" => Some(CampaignStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: EntityId,
    pub name: String,
    pub crop: Crop,
    pub season_year: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: CampaignStatus,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub crop: Crop,
    pub season_year: i32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// `None` lets the store apply its default (`planned`).
    #[serde(default)]
    pub status: Option<CampaignStatus>,
}

impl NewCampaign {
    pub fn new(name: impl Into<String>, crop: Crop, season_year: i32) -> Self {
        Self {
            name: name.into(),
            crop,
            season_year,
            start_date: None,
            end_date: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CampaignPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub crop: Option<Option<Crop>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub season_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<CampaignStatus>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CampaignFilter {
    #[serde(default)]
    pub crop: Option<Crop>,
    #[serde(default)]
    pub season_year: Option<i32>,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
}
