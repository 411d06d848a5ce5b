//! Export crop set shared by parcels, campaigns, harvest lots and products.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Crops tracked by the platform.
///
/// Serialized with the spellings stored in the database; English names are
/// accepted as input aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    #[serde(rename = "cacao", alias = "cocoa")]
    Cacao,
    #[serde(rename = "vanille", alias = "vanilla")]
    Vanilla,
    #[serde(rename = "poivre", alias = "pepper")]
    Pepper,
    #[serde(rename = "café", alias = "coffee", alias = "cafe")]
    Coffee,
    #[serde(rename = "litchi", alias = "lychee")]
    Litchi,
    #[serde(rename = "clou_de_girofle", alias = "clove")]
    Clove,
}

impl Crop {
    pub const ALL: [Crop; 6] = [
        Crop::Cacao,
        Crop::Vanilla,
        Crop::Pepper,
        Crop::Coffee,
        Crop::Litchi,
        Crop::Clove,
    ];

    /// Database spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Crop::Cacao => "cacao",
            Crop::Vanilla => "vanille",
            Crop::Pepper => "poivre",
            Crop::Coffee => "café",
            Crop::Litchi => "litchi",
            Crop::Clove => "clou_de_girofle",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|crop| crop.as_str() == value)
    }
}

impl Display for Crop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
