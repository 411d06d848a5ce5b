//! Producer aggregate root.
//!
//! # Invariants
//! - `code` is unique across producers when present.
//! - Deleting a producer removes its parcels and certifications; its harvest
//!   lots survive with `producer_id = NULL`.

use super::{deserialize_some, EntityId};
use serde::{Deserialize, Serialize};

/// Declared gender of an individual producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Stored producer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub id: EntityId,
    /// Cooperative the producer delivers to. Not a foreign key.
    pub coop_id: Option<i64>,
    pub code: Option<String>,
    pub name: String,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub village: Option<String>,
    pub commune: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Unix epoch milliseconds, assigned by the store.
    pub created_at: i64,
}

/// Insert shape for a producer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProducer {
    pub name: String,
    #[serde(default)]
    pub coop_id: Option<i64>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub commune: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl NewProducer {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial producer update. `Some(None)` binds NULL; the store rejects it
/// for NOT NULL columns.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProducerPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub coop_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub code: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub gender: Option<Option<Gender>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub contact: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub village: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub commune: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub district: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub region: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub lat: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub lng: Option<Option<f64>>,
}

/// Live per-producer aggregate read from `view_producer_summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerSummary {
    pub producer_id: EntityId,
    pub name: String,
    pub region: Option<String>,
    pub parcels_count: i64,
    /// Sum of lot dry weights; `0.0` when the producer has no weighed lots.
    pub total_dry_kg: f64,
}

/// Filter for listing producers. The default lists every producer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProducerFilter {
    #[serde(default)]
    pub region: Option<String>,
}
