//! Harvest lot repository contract and SQLite implementation.
//!
//! # Invariants
//! - Links to producer/parcel/campaign are nullable and set to NULL by the
//!   store when the referenced row goes away; lots are never cascaded.
//! - Omitted `harvest_date` falls back to the store's current date.

use super::{
    date, delete_by_id, enum_column, fetch_by_id, integer, real, text, Assignments, Page,
    RepoResult, Repository, Select,
};
use crate::model::crop::Crop;
use crate::model::harvest_lot::{HarvestLot, HarvestLotFilter, HarvestLotPatch, NewHarvestLot};
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const HARVEST_LOT_COLUMNS: &str = "id,
    producer_id,
    parcel_id,
    campaign_id,
    crop,
    wet_kg,
    dry_kg,
    quality_grade,
    moisture_pct,
    harvest_date,
    created_at";

pub struct SqliteHarvestLotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHarvestLotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteHarvestLotRepository<'_> {
    type Entity = HarvestLot;
    type New = NewHarvestLot;
    type Patch = HarvestLotPatch;
    type Filter = HarvestLotFilter;

    const ENTITY: &'static str = "harvest_lot";

    fn create(&self, new: &NewHarvestLot) -> RepoResult<HarvestLot> {
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO harvest_lots (
                producer_id,
                parcel_id,
                campaign_id,
                crop,
                wet_kg,
                dry_kg,
                quality_grade,
                moisture_pct,
                harvest_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, COALESCE(?9, date('now')))
            RETURNING {HARVEST_LOT_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![
            new.producer_id,
            new.parcel_id,
            new.campaign_id,
            new.crop.as_str(),
            new.wet_kg,
            new.dry_kg,
            new.quality_grade.as_deref(),
            new.moisture_pct,
            date(new.harvest_date),
        ])?;
        match rows.next()? {
            Some(row) => parse_harvest_lot_row(row),
            None => Err(rusqlite::Error::QueryReturnedNoRows.into()),
        }
    }

    fn get(&self, id: EntityId) -> RepoResult<Option<HarvestLot>> {
        fetch_by_id(
            self.conn,
            &format!("SELECT {HARVEST_LOT_COLUMNS} FROM harvest_lots"),
            id,
            parse_harvest_lot_row,
        )
    }

    fn list(&self, filter: &HarvestLotFilter, page: &Page) -> RepoResult<Vec<HarvestLot>> {
        Select::new(&format!("SELECT {HARVEST_LOT_COLUMNS} FROM harvest_lots"))
            .eq("producer_id", filter.producer_id.map(Value::Integer))
            .eq("parcel_id", filter.parcel_id.map(Value::Integer))
            .eq("campaign_id", filter.campaign_id.map(Value::Integer))
            .fetch(self.conn, page, parse_harvest_lot_row)
    }

    fn update(&self, id: EntityId, patch: &HarvestLotPatch) -> RepoResult<HarvestLot> {
        let mut set = Assignments::default();
        set.set("producer_id", patch.producer_id.map(integer));
        set.set("parcel_id", patch.parcel_id.map(integer));
        set.set("campaign_id", patch.campaign_id.map(integer));
        set.set("crop", patch.crop.map(|v| text(v.map(Crop::as_str))));
        set.set("wet_kg", patch.wet_kg.map(real));
        set.set("dry_kg", patch.dry_kg.map(real));
        set.set(
            "quality_grade",
            patch.quality_grade.as_ref().map(|v| text(v.as_deref())),
        );
        set.set("moisture_pct", patch.moisture_pct.map(real));
        set.set("harvest_date", patch.harvest_date.map(date));
        set.apply(
            self.conn,
            "harvest_lots",
            HARVEST_LOT_COLUMNS,
            Self::ENTITY,
            id,
            parse_harvest_lot_row,
        )
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        delete_by_id(self.conn, "harvest_lots", Self::ENTITY, id)
    }
}

fn parse_harvest_lot_row(row: &Row<'_>) -> RepoResult<HarvestLot> {
    Ok(HarvestLot {
        id: row.get("id")?,
        producer_id: row.get("producer_id")?,
        parcel_id: row.get("parcel_id")?,
        campaign_id: row.get("campaign_id")?,
        crop: enum_column(row, "crop", "harvest_lots", Crop::parse)?,
        wet_kg: row.get("wet_kg")?,
        dry_kg: row.get("dry_kg")?,
        quality_grade: row.get("quality_grade")?,
        moisture_pct: row.get("moisture_pct")?,
        harvest_date: row.get("harvest_date")?,
        created_at: row.get("created_at")?,
    })
}
