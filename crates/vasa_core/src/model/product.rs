//! Marketplace product. Offers cascade with it.

use super::crop::Crop;
use super::{deserialize_some, Document, EntityId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub crop: Crop,
    pub description: Option<String>,
    pub specs: Option<Document>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub crop: Crop,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specs: Option<Document>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, crop: Crop) -> Self {
        Self {
            name: name.into(),
            crop,
            description: None,
            specs: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub crop: Option<Option<Crop>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub specs: Option<Option<Document>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    #[serde(default)]
    pub crop: Option<Crop>,
}
