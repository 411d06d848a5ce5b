//! Marketplace offer: a quantity of one product for sale.

use super::{deserialize_some, Document, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Draft,
    Published,
    Sold,
    Withdrawn,
}

impl OfferStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OfferStatus::Draft => "draft",
            OfferStatus::Published => "published",
            OfferStatus::Sold => "sold",
            OfferStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(OfferStatus::Draft),
            "published" => Some(OfferStatus::Published),
            "sold" => Some(OfferStatus::Sold),
            "withdrawn" => Some(OfferStatus::Withdrawn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: EntityId,
    pub product_id: EntityId,
    /// Selling cooperative. Not a foreign key.
    pub seller_coop_id: Option<i64>,
    /// Metric tons.
    pub quantity_mt: f64,
    /// USD per metric ton.
    pub price_usd_mt: Option<f64>,
    /// Delivery terms (FOB, CIF, ...).
    pub incoterm: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
    pub status: OfferStatus,
    pub specs: Option<Document>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOffer {
    pub product_id: EntityId,
    pub quantity_mt: f64,
    #[serde(default)]
    pub seller_coop_id: Option<i64>,
    #[serde(default)]
    pub price_usd_mt: Option<f64>,
    #[serde(default)]
    pub incoterm: Option<String>,
    #[serde(default)]
    pub available_from: Option<NaiveDate>,
    #[serde(default)]
    pub available_to: Option<NaiveDate>,
    /// `None` lets the store apply its default (`draft`).
    #[serde(default)]
    pub status: Option<OfferStatus>,
    #[serde(default)]
    pub specs: Option<Document>,
}

impl NewOffer {
    pub fn new(product_id: EntityId, quantity_mt: f64) -> Self {
        Self {
            product_id,
            quantity_mt,
            seller_coop_id: None,
            price_usd_mt: None,
            incoterm: None,
            available_from: None,
            available_to: None,
            status: None,
            specs: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OfferPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub quantity_mt: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub seller_coop_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub price_usd_mt: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub incoterm: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub available_from: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub available_to: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<OfferStatus>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub specs: Option<Option<Document>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OfferFilter {
    #[serde(default)]
    pub product_id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<OfferStatus>,
}
