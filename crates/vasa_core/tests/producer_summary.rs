use vasa_core::db::open_db_in_memory;
use vasa_core::model::harvest_lot::{HarvestLotPatch, NewHarvestLot};
use vasa_core::model::parcel::NewParcel;
use vasa_core::model::producer::NewProducer;
use vasa_core::repo::harvest_lot_repo::SqliteHarvestLotRepository;
use vasa_core::repo::parcel_repo::SqliteParcelRepository;
use vasa_core::repo::producer_repo::SqliteProducerRepository;
use vasa_core::repo::summary_repo::SqliteSummaryRepository;
use vasa_core::{Crop, EntityService, Page, RepoError, SummaryService};

#[test]
fn summary_counts_parcels_and_sums_lots_without_join_multiplication() {
    let conn = open_db_in_memory().unwrap();
    let producers = EntityService::new(SqliteProducerRepository::new(&conn));
    let parcels = EntityService::new(SqliteParcelRepository::new(&conn));
    let lots = EntityService::new(SqliteHarvestLotRepository::new(&conn));
    let summaries = SummaryService::new(SqliteSummaryRepository::new(&conn));

    let mut new = NewProducer::named("Rakoto");
    new.region = Some("SAVA".to_string());
    let producer = producers.create(&new).unwrap();
    parcels.create(&NewParcel::at(producer.id, 1.0, 1.0)).unwrap();
    parcels.create(&NewParcel::at(producer.id, 2.0, 2.0)).unwrap();
    for dry_kg in [10.0, 15.0] {
        let mut lot = NewHarvestLot::of(Crop::Cacao);
        lot.producer_id = Some(producer.id);
        lot.dry_kg = Some(dry_kg);
        lots.create(&lot).unwrap();
    }

    let summary = summaries.producer_summary(producer.id).unwrap();
    assert_eq!(summary.name, "Rakoto");
    assert_eq!(summary.region.as_deref(), Some("SAVA"));
    assert_eq!(summary.parcels_count, 2);
    assert_eq!(summary.total_dry_kg, 25.0);
}

#[test]
fn summary_reports_zero_weight_for_producer_without_lots() {
    let conn = open_db_in_memory().unwrap();
    let producers = EntityService::new(SqliteProducerRepository::new(&conn));
    let summaries = SummaryService::new(SqliteSummaryRepository::new(&conn));

    let producer = producers.create(&NewProducer::named("Rabe")).unwrap();

    let summary = summaries.producer_summary(producer.id).unwrap();
    assert_eq!(summary.parcels_count, 0);
    assert_eq!(summary.total_dry_kg, 0.0);
}

#[test]
fn summary_reflects_writes_immediately() {
    let conn = open_db_in_memory().unwrap();
    let producers = EntityService::new(SqliteProducerRepository::new(&conn));
    let lots = EntityService::new(SqliteHarvestLotRepository::new(&conn));
    let summaries = SummaryService::new(SqliteSummaryRepository::new(&conn));

    let producer = producers.create(&NewProducer::named("Hery")).unwrap();
    let mut new_lot = NewHarvestLot::of(Crop::Clove);
    new_lot.producer_id = Some(producer.id);
    new_lot.dry_kg = Some(3.5);
    let lot = lots.create(&new_lot).unwrap();
    assert_eq!(
        summaries.producer_summary(producer.id).unwrap().total_dry_kg,
        3.5
    );

    lots.update(
        lot.id,
        &HarvestLotPatch {
            dry_kg: Some(None),
            ..HarvestLotPatch::default()
        },
    )
    .unwrap();
    assert_eq!(
        summaries.producer_summary(producer.id).unwrap().total_dry_kg,
        0.0
    );
}

#[test]
fn summary_lists_every_producer_and_misses_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let producers = EntityService::new(SqliteProducerRepository::new(&conn));
    let summaries = SummaryService::new(SqliteSummaryRepository::new(&conn));

    let first = producers.create(&NewProducer::named("A")).unwrap();
    let second = producers.create(&NewProducer::named("B")).unwrap();

    let listed = summaries.list_summaries(&Page::default()).unwrap();
    let ids: Vec<_> = listed.iter().map(|s| s.producer_id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    assert!(matches!(
        summaries.producer_summary(999),
        Err(RepoError::NotFound { .. })
    ));
}
