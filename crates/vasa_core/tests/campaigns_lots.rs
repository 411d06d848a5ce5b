use chrono::NaiveDate;
use vasa_core::db::open_db_in_memory;
use vasa_core::model::campaign::{CampaignFilter, CampaignPatch, CampaignStatus, NewCampaign};
use vasa_core::model::certification::{
    CertificationFilter, CertificationPatch, CertificationScheme, CertificationStatus,
    NewCertification,
};
use vasa_core::model::harvest_lot::{HarvestLotFilter, NewHarvestLot};
use vasa_core::model::producer::NewProducer;
use vasa_core::repo::campaign_repo::SqliteCampaignRepository;
use vasa_core::repo::certification_repo::SqliteCertificationRepository;
use vasa_core::repo::harvest_lot_repo::SqliteHarvestLotRepository;
use vasa_core::repo::producer_repo::SqliteProducerRepository;
use vasa_core::{ConstraintKind, Crop, Document, EntityService, Page, RepoError};

#[test]
fn campaign_defaults_to_planned_and_is_unique_per_crop_and_season() {
    let conn = open_db_in_memory().unwrap();
    let campaigns = EntityService::new(SqliteCampaignRepository::new(&conn));

    let created = campaigns
        .create(&NewCampaign::new("Cacao 2024", Crop::Cacao, 2024))
        .unwrap();
    assert_eq!(created.status, CampaignStatus::Planned);

    let err = campaigns
        .create(&NewCampaign::new("Cacao 2024 bis", Crop::Cacao, 2024))
        .unwrap_err();
    match err {
        RepoError::Constraint(violation) => assert_eq!(violation.kind, ConstraintKind::Unique),
        other => panic!("unexpected error: {other}"),
    }

    campaigns
        .create(&NewCampaign::new("Vanille 2024", Crop::Vanilla, 2024))
        .unwrap();
    campaigns
        .create(&NewCampaign::new("Cacao 2025", Crop::Cacao, 2025))
        .unwrap();

    let cacao = campaigns
        .list(
            &CampaignFilter {
                crop: Some(Crop::Cacao),
                ..CampaignFilter::default()
            },
            &Page::default(),
        )
        .unwrap();
    let years: Vec<_> = cacao.iter().map(|c| c.season_year).collect();
    assert_eq!(years, vec![2025, 2024]);
}

#[test]
fn campaign_dates_and_status_update() {
    let conn = open_db_in_memory().unwrap();
    let campaigns = EntityService::new(SqliteCampaignRepository::new(&conn));

    let mut new = NewCampaign::new("Poivre 2023", Crop::Pepper, 2023);
    new.start_date = NaiveDate::from_ymd_opt(2023, 5, 1);
    let created = campaigns.create(&new).unwrap();
    assert_eq!(created.start_date, NaiveDate::from_ymd_opt(2023, 5, 1));
    assert_eq!(created.end_date, None);

    let updated = campaigns
        .update(
            created.id,
            &CampaignPatch {
                end_date: Some(NaiveDate::from_ymd_opt(2023, 9, 30)),
                status: Some(Some(CampaignStatus::Closed)),
                ..CampaignPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.status, CampaignStatus::Closed);
    assert_eq!(updated.end_date, NaiveDate::from_ymd_opt(2023, 9, 30));
    assert_eq!(updated.start_date, created.start_date);
}

#[test]
fn invalid_campaign_status_is_rejected_by_store() {
    let conn = open_db_in_memory().unwrap();
    let err: RepoError = conn
        .execute(
            "INSERT INTO campaigns (name, crop, season_year, status)
             VALUES ('x', 'cacao', 2024, 'archived')",
            [],
        )
        .unwrap_err()
        .into();
    assert!(matches!(
        err,
        RepoError::Constraint(ref violation) if violation.kind == ConstraintKind::Check
    ));
}

#[test]
fn harvest_lot_defaults_to_current_date_and_filters_by_campaign() {
    let conn = open_db_in_memory().unwrap();
    let campaigns = EntityService::new(SqliteCampaignRepository::new(&conn));
    let lots = EntityService::new(SqliteHarvestLotRepository::new(&conn));

    let campaign = campaigns
        .create(&NewCampaign::new("Girofle 2024", Crop::Clove, 2024))
        .unwrap();

    let mut tracked = NewHarvestLot::of(Crop::Clove);
    tracked.campaign_id = Some(campaign.id);
    tracked.wet_kg = Some(120.0);
    tracked.moisture_pct = Some(12.5);
    tracked.quality_grade = Some("A".to_string());
    let tracked = lots.create(&tracked).unwrap();

    let mut dated = NewHarvestLot::of(Crop::Clove);
    dated.harvest_date = NaiveDate::from_ymd_opt(2024, 1, 15);
    let dated = lots.create(&dated).unwrap();
    assert_eq!(dated.harvest_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

    let today: NaiveDate = conn
        .query_row("SELECT date('now')", [], |row| row.get(0))
        .unwrap();
    assert_eq!(tracked.harvest_date, today);

    let in_campaign = lots
        .list(
            &HarvestLotFilter {
                campaign_id: Some(campaign.id),
                ..HarvestLotFilter::default()
            },
            &Page::default(),
        )
        .unwrap();
    assert_eq!(in_campaign.len(), 1);
    assert_eq!(in_campaign[0].id, tracked.id);
    assert_eq!(in_campaign[0].quality_grade.as_deref(), Some("A"));
}

#[test]
fn harvest_lot_links_must_resolve() {
    let conn = open_db_in_memory().unwrap();
    let lots = EntityService::new(SqliteHarvestLotRepository::new(&conn));

    let mut orphan = NewHarvestLot::of(Crop::Litchi);
    orphan.campaign_id = Some(77);
    let err = lots.create(&orphan).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Constraint(ref violation) if violation.kind == ConstraintKind::ForeignKey
    ));
}

#[test]
fn certification_lifecycle_and_attachments() {
    let conn = open_db_in_memory().unwrap();
    let producers = EntityService::new(SqliteProducerRepository::new(&conn));
    let certs = EntityService::new(SqliteCertificationRepository::new(&conn));

    let producer = producers.create(&NewProducer::named("Rasoa")).unwrap();

    let mut attachments = Document::new();
    attachments.insert(
        "files".to_string(),
        serde_json::json!([{ "name": "audit.pdf", "sha256": "ab12" }]),
    );
    let mut new = NewCertification::new(producer.id, CertificationScheme::Fairtrade);
    new.cert_number = Some("FT-001".to_string());
    new.attachments = Some(attachments.clone());
    let created = certs.create(&new).unwrap();
    assert_eq!(created.status, CertificationStatus::Pending);
    assert_eq!(created.attachments, Some(attachments));

    let valid = certs
        .update(
            created.id,
            &CertificationPatch {
                status: Some(Some(CertificationStatus::Valid)),
                valid_to: Some(NaiveDate::from_ymd_opt(2026, 12, 31)),
                ..CertificationPatch::default()
            },
        )
        .unwrap();
    assert_eq!(valid.status, CertificationStatus::Valid);

    let pending = certs
        .list(
            &CertificationFilter {
                status: Some(CertificationStatus::Pending),
                ..CertificationFilter::default()
            },
            &Page::default(),
        )
        .unwrap();
    assert!(pending.is_empty());

    let err = certs
        .create(&NewCertification::new(999, CertificationScheme::Bio))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Constraint(ref violation) if violation.kind == ConstraintKind::ForeignKey
    ));
}

#[test]
fn malformed_attachments_are_rejected_by_store() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO producers (name) VALUES ('X')", [])
        .unwrap();
    let err: RepoError = conn
        .execute(
            "INSERT INTO certifications (producer_id, scheme, attachments)
             VALUES (1, 'BIO', '{not json')",
            [],
        )
        .unwrap_err()
        .into();
    assert!(matches!(
        err,
        RepoError::Constraint(ref violation) if violation.kind == ConstraintKind::Check
    ));
}
