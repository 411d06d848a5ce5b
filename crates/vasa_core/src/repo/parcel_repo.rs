//! Parcel repository contract and SQLite implementation.
//!
//! # Invariants
//! - `producer_id`, `lat` and `lng` are mandatory; the store rejects rows
//!   without them (NOT NULL) or pointing to a missing producer (foreign key).
//! - `crop` is either NULL or one of the store's crop spellings.

use super::{
    delete_by_id, fetch_by_id, integer, optional_enum_column, real, text, Assignments, Page,
    RepoResult, Repository, Select,
};
use crate::model::crop::Crop;
use crate::model::parcel::{NewParcel, Parcel, ParcelFilter, ParcelPatch};
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const PARCEL_COLUMNS: &str = "id,
    producer_id,
    name,
    crop,
    area_ha,
    lat,
    lng,
    planted_year,
    created_at";

pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteParcelRepository<'_> {
    type Entity = Parcel;
    type New = NewParcel;
    type Patch = ParcelPatch;
    type Filter = ParcelFilter;

    const ENTITY: &'static str = "parcel";

    fn create(&self, new: &NewParcel) -> RepoResult<Parcel> {
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO parcels (
                producer_id,
                name,
                crop,
                area_ha,
                lat,
                lng,
                planted_year
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {PARCEL_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![
            new.producer_id,
            new.name.as_deref(),
            new.crop.map(Crop::as_str),
            new.area_ha,
            new.lat,
            new.lng,
            new.planted_year,
        ])?;
        match rows.next()? {
            Some(row) => parse_parcel_row(row),
            None => Err(rusqlite::Error::QueryReturnedNoRows.into()),
        }
    }

    fn get(&self, id: EntityId) -> RepoResult<Option<Parcel>> {
        fetch_by_id(
            self.conn,
            &format!("SELECT {PARCEL_COLUMNS} FROM parcels"),
            id,
            parse_parcel_row,
        )
    }

    fn list(&self, filter: &ParcelFilter, page: &Page) -> RepoResult<Vec<Parcel>> {
        Select::new(&format!("SELECT {PARCEL_COLUMNS} FROM parcels"))
            .eq("producer_id", filter.producer_id.map(Value::Integer))
            .fetch(self.conn, page, parse_parcel_row)
    }

    fn update(&self, id: EntityId, patch: &ParcelPatch) -> RepoResult<Parcel> {
        let mut set = Assignments::default();
        set.set("producer_id", patch.producer_id.map(integer));
        set.set("name", patch.name.as_ref().map(|v| text(v.as_deref())));
        set.set("crop", patch.crop.map(|v| text(v.map(Crop::as_str))));
        set.set("area_ha", patch.area_ha.map(real));
        set.set("lat", patch.lat.map(real));
        set.set("lng", patch.lng.map(real));
        set.set(
            "planted_year",
            patch.planted_year.map(|v| integer(v.map(i64::from))),
        );
        set.apply(
            self.conn,
            "parcels",
            PARCEL_COLUMNS,
            Self::ENTITY,
            id,
            parse_parcel_row,
        )
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        delete_by_id(self.conn, "parcels", Self::ENTITY, id)
    }
}

fn parse_parcel_row(row: &Row<'_>) -> RepoResult<Parcel> {
    Ok(Parcel {
        id: row.get("id")?,
        producer_id: row.get("producer_id")?,
        name: row.get("name")?,
        crop: optional_enum_column(row, "crop", "parcels", Crop::parse)?,
        area_ha: row.get("area_ha")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        planted_year: row.get("planted_year")?,
        created_at: row.get("created_at")?,
    })
}
