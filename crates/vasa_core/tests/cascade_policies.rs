use rusqlite::Connection;
use vasa_core::db::open_db_in_memory;
use vasa_core::model::campaign::NewCampaign;
use vasa_core::model::certification::{CertificationScheme, NewCertification};
use vasa_core::model::harvest_lot::NewHarvestLot;
use vasa_core::model::offer::NewOffer;
use vasa_core::model::parcel::NewParcel;
use vasa_core::model::producer::NewProducer;
use vasa_core::model::product::NewProduct;
use vasa_core::repo::campaign_repo::SqliteCampaignRepository;
use vasa_core::repo::certification_repo::SqliteCertificationRepository;
use vasa_core::repo::harvest_lot_repo::SqliteHarvestLotRepository;
use vasa_core::repo::offer_repo::SqliteOfferRepository;
use vasa_core::repo::parcel_repo::SqliteParcelRepository;
use vasa_core::repo::producer_repo::SqliteProducerRepository;
use vasa_core::repo::product_repo::SqliteProductRepository;
use vasa_core::{Crop, EntityService};

#[test]
fn deleting_producer_cascades_parcels_and_certifications_and_detaches_lots() {
    let conn = open_db_in_memory().unwrap();
    let producers = EntityService::new(SqliteProducerRepository::new(&conn));
    let parcels = EntityService::new(SqliteParcelRepository::new(&conn));
    let certs = EntityService::new(SqliteCertificationRepository::new(&conn));
    let lots = EntityService::new(SqliteHarvestLotRepository::new(&conn));

    let producer = producers.create(&NewProducer::named("Rakoto")).unwrap();
    let parcel = parcels
        .create(&NewParcel::at(producer.id, -13.6, 48.4))
        .unwrap();
    certs
        .create(&NewCertification::new(producer.id, CertificationScheme::Bio))
        .unwrap();
    let mut new_lot = NewHarvestLot::of(Crop::Cacao);
    new_lot.producer_id = Some(producer.id);
    new_lot.parcel_id = Some(parcel.id);
    new_lot.dry_kg = Some(42.0);
    let lot = lots.create(&new_lot).unwrap();

    producers.delete(producer.id).unwrap();

    assert_eq!(count(&conn, "parcels"), 0);
    assert_eq!(count(&conn, "certifications"), 0);
    let survivor = lots.require(lot.id).unwrap();
    assert_eq!(survivor.producer_id, None);
    assert_eq!(survivor.parcel_id, None);
    assert_eq!(survivor.dry_kg, Some(42.0));
}

#[test]
fn deleting_parcel_detaches_lots_only() {
    let conn = open_db_in_memory().unwrap();
    let producers = EntityService::new(SqliteProducerRepository::new(&conn));
    let parcels = EntityService::new(SqliteParcelRepository::new(&conn));
    let lots = EntityService::new(SqliteHarvestLotRepository::new(&conn));

    let producer = producers.create(&NewProducer::named("Rabe")).unwrap();
    let parcel = parcels.create(&NewParcel::at(producer.id, 0.0, 0.0)).unwrap();
    let mut new_lot = NewHarvestLot::of(Crop::Vanilla);
    new_lot.producer_id = Some(producer.id);
    new_lot.parcel_id = Some(parcel.id);
    let lot = lots.create(&new_lot).unwrap();

    parcels.delete(parcel.id).unwrap();

    let survivor = lots.require(lot.id).unwrap();
    assert_eq!(survivor.parcel_id, None);
    assert_eq!(survivor.producer_id, Some(producer.id));
    assert!(producers.get(producer.id).unwrap().is_some());
}

#[test]
fn deleting_campaign_detaches_lots() {
    let conn = open_db_in_memory().unwrap();
    let campaigns = EntityService::new(SqliteCampaignRepository::new(&conn));
    let lots = EntityService::new(SqliteHarvestLotRepository::new(&conn));

    let campaign = campaigns
        .create(&NewCampaign::new("Cacao 2024", Crop::Cacao, 2024))
        .unwrap();
    let mut new_lot = NewHarvestLot::of(Crop::Cacao);
    new_lot.campaign_id = Some(campaign.id);
    let lot = lots.create(&new_lot).unwrap();

    campaigns.delete(campaign.id).unwrap();

    assert_eq!(lots.require(lot.id).unwrap().campaign_id, None);
}

#[test]
fn deleting_product_cascades_offers() {
    let conn = open_db_in_memory().unwrap();
    let products = EntityService::new(SqliteProductRepository::new(&conn));
    let offers = EntityService::new(SqliteOfferRepository::new(&conn));

    let product = products
        .create(&NewProduct::new("Vanilla pods", Crop::Vanilla))
        .unwrap();
    let offer = offers.create(&NewOffer::new(product.id, 2.5)).unwrap();

    products.delete(product.id).unwrap();

    assert!(offers.get(offer.id).unwrap().is_none());
    assert_eq!(count(&conn, "offers"), 0);
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
