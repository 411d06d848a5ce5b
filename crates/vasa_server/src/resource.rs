//! Binding between REST collections and core repositories.
//!
//! Each collection is a marker type naming its core model types and how to
//! build its repository over a borrowed connection. The CRUD handlers in
//! [`crate::handlers::entity`] are generic over this trait.

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use vasa_core::model::campaign::{Campaign, CampaignFilter, CampaignPatch, NewCampaign};
use vasa_core::model::certification::{
    Certification, CertificationFilter, CertificationPatch, NewCertification,
};
use vasa_core::model::harvest_lot::{HarvestLot, HarvestLotFilter, HarvestLotPatch, NewHarvestLot};
use vasa_core::model::offer::{NewOffer, Offer, OfferFilter, OfferPatch};
use vasa_core::model::parcel::{NewParcel, Parcel, ParcelFilter, ParcelPatch};
use vasa_core::model::producer::{NewProducer, Producer, ProducerFilter, ProducerPatch};
use vasa_core::model::product::{NewProduct, Product, ProductFilter, ProductPatch};
use vasa_core::repo::campaign_repo::SqliteCampaignRepository;
use vasa_core::repo::certification_repo::SqliteCertificationRepository;
use vasa_core::repo::harvest_lot_repo::SqliteHarvestLotRepository;
use vasa_core::repo::offer_repo::SqliteOfferRepository;
use vasa_core::repo::parcel_repo::SqliteParcelRepository;
use vasa_core::repo::producer_repo::SqliteProducerRepository;
use vasa_core::repo::product_repo::SqliteProductRepository;
use vasa_core::{EntityService, Identified, Repository};

pub trait Resource: Send + Sync + 'static {
    type Entity: Identified + Serialize + Send + 'static;
    type New: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;
    type Filter: DeserializeOwned + Default + Send + 'static;
    type Repo<'conn>: Repository<
        Entity = Self::Entity,
        New = Self::New,
        Patch = Self::Patch,
        Filter = Self::Filter,
    >;

    fn repo(conn: &Connection) -> Self::Repo<'_>;

    fn service(conn: &Connection) -> EntityService<Self::Repo<'_>> {
        EntityService::new(Self::repo(conn))
    }
}

macro_rules! resource {
    ($marker:ident, $repo:ident, $entity:ty, $new:ty, $patch:ty, $filter:ty) => {
        pub enum $marker {}

        impl Resource for $marker {
            type Entity = $entity;
            type New = $new;
            type Patch = $patch;
            type Filter = $filter;
            type Repo<'conn> = $repo<'conn>;

            fn repo(conn: &Connection) -> Self::Repo<'_> {
                $repo::new(conn)
            }
        }
    };
}

resource!(Producers, SqliteProducerRepository, Producer, NewProducer, ProducerPatch, ProducerFilter);
resource!(Parcels, SqliteParcelRepository, Parcel, NewParcel, ParcelPatch, ParcelFilter);
resource!(Campaigns, SqliteCampaignRepository, Campaign, NewCampaign, CampaignPatch, CampaignFilter);
resource!(
    HarvestLots,
    SqliteHarvestLotRepository,
    HarvestLot,
    NewHarvestLot,
    HarvestLotPatch,
    HarvestLotFilter
);
resource!(
    Certifications,
    SqliteCertificationRepository,
    Certification,
    NewCertification,
    CertificationPatch,
    CertificationFilter
);
resource!(Products, SqliteProductRepository, Product, NewProduct, ProductPatch, ProductFilter);
resource!(Offers, SqliteOfferRepository, Offer, NewOffer, OfferPatch, OfferFilter);
