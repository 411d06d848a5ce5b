//! Domain model for producer traceability and the crop marketplace.
//!
//! # Responsibility
//! - Define canonical records, insert shapes (`New*`) and partial updates
//!   (`*Patch`) for every stored entity.
//! - Represent the store's closed text sets as Rust enums.
//!
//! # Invariants
//! - Every stored entity is identified by a store-assigned `EntityId`.
//! - Enum spellings here mirror the store's CHECK constraints exactly; the
//!   store stays the authority and rejects anything else on its own.
//! - `Document` fields are opaque and round-tripped verbatim.

pub mod campaign;
pub mod certification;
pub mod crop;
pub mod harvest_lot;
pub mod offer;
pub mod parcel;
pub mod producer;
pub mod product;

use serde::{Deserialize, Deserializer};

/// Store-assigned, auto-incrementing row identifier.
pub type EntityId = i64;

/// Free-form JSON metadata (`specs`, `attachments`).
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Access to the store-assigned id of a stored row.
pub trait Identified {
    fn id(&self) -> EntityId;
}

macro_rules! impl_identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> EntityId {
                    self.id
                }
            }
        )+
    };
}

impl_identified!(
    producer::Producer,
    parcel::Parcel,
    campaign::Campaign,
    harvest_lot::HarvestLot,
    certification::Certification,
    product::Product,
    offer::Offer,
);

/// Distinguishes an absent patch field from an explicit `null`.
///
/// Used as `#[serde(default, deserialize_with = "...")]` on
/// `Option<Option<T>>` fields: absent -> `None`, `null` -> `Some(None)`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::producer::ProducerPatch;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: ProducerPatch =
            serde_json::from_str(r#"{"region": null, "name": "Hery"}"#).unwrap();
        assert_eq!(patch.name, Some(Some("Hery".to_string())));
        assert_eq!(patch.region, Some(None));
        assert_eq!(patch.village, None);
    }
}
