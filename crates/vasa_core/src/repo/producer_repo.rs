//! Producer repository contract and SQLite implementation.
//!
//! # Invariants
//! - `code` uniqueness and the gender set are enforced by the store; a
//!   duplicate surfaces as `RepoError::Constraint` with kind `Unique`.
//! - Deleting a producer cascades to parcels and certifications and nulls
//!   `harvest_lots.producer_id`, all inside the delete transaction.

use super::{
    delete_by_id, fetch_by_id, integer, optional_enum_column, real, text, Assignments, Page,
    RepoResult, Repository, Select,
};
use crate::model::producer::{Gender, NewProducer, Producer, ProducerFilter, ProducerPatch};
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const PRODUCER_COLUMNS: &str = "id,
    coop_id,
    code,
    name,
    gender,
    phone,
    email,
    contact,
    village,
    commune,
    district,
    region,
    lat,
    lng,
    created_at";

/// SQLite-backed producer repository.
pub struct SqliteProducerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProducerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteProducerRepository<'_> {
    type Entity = Producer;
    type New = NewProducer;
    type Patch = ProducerPatch;
    type Filter = ProducerFilter;

    const ENTITY: &'static str = "producer";

    fn create(&self, new: &NewProducer) -> RepoResult<Producer> {
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO producers (
                coop_id,
                code,
                name,
                gender,
                phone,
                email,
                contact,
                village,
                commune,
                district,
                region,
                lat,
                lng
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            RETURNING {PRODUCER_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![
            new.coop_id,
            new.code.as_deref(),
            new.name.as_str(),
            new.gender.map(Gender::as_str),
            new.phone.as_deref(),
            new.email.as_deref(),
            new.contact.as_deref(),
            new.village.as_deref(),
            new.commune.as_deref(),
            new.district.as_deref(),
            new.region.as_deref(),
            new.lat,
            new.lng,
        ])?;
        match rows.next()? {
            Some(row) => parse_producer_row(row),
            None => Err(rusqlite::Error::QueryReturnedNoRows.into()),
        }
    }

    fn get(&self, id: EntityId) -> RepoResult<Option<Producer>> {
        fetch_by_id(
            self.conn,
            &format!("SELECT {PRODUCER_COLUMNS} FROM producers"),
            id,
            parse_producer_row,
        )
    }

    fn list(&self, filter: &ProducerFilter, page: &Page) -> RepoResult<Vec<Producer>> {
        Select::new(&format!("SELECT {PRODUCER_COLUMNS} FROM producers"))
            .eq("region", filter.region.clone().map(Value::Text))
            .fetch(self.conn, page, parse_producer_row)
    }

    fn update(&self, id: EntityId, patch: &ProducerPatch) -> RepoResult<Producer> {
        let mut set = Assignments::default();
        set.set("name", patch.name.as_ref().map(|v| text(v.as_deref())));
        set.set("coop_id", patch.coop_id.map(integer));
        set.set("code", patch.code.as_ref().map(|v| text(v.as_deref())));
        set.set(
            "gender",
            patch.gender.map(|v| text(v.map(Gender::as_str))),
        );
        set.set("phone", patch.phone.as_ref().map(|v| text(v.as_deref())));
        set.set("email", patch.email.as_ref().map(|v| text(v.as_deref())));
        set.set("contact", patch.contact.as_ref().map(|v| text(v.as_deref())));
        set.set("village", patch.village.as_ref().map(|v| text(v.as_deref())));
        set.set("commune", patch.commune.as_ref().map(|v| text(v.as_deref())));
        set.set("district", patch.district.as_ref().map(|v| text(v.as_deref())));
        set.set("region", patch.region.as_ref().map(|v| text(v.as_deref())));
        set.set("lat", patch.lat.map(real));
        set.set("lng", patch.lng.map(real));
        set.apply(
            self.conn,
            "producers",
            PRODUCER_COLUMNS,
            Self::ENTITY,
            id,
            parse_producer_row,
        )
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        delete_by_id(self.conn, "producers", Self::ENTITY, id)
    }
}

/// Looks up a producer id by its business code.
pub fn find_producer_id_by_code(conn: &Connection, code: &str) -> RepoResult<Option<EntityId>> {
    let mut stmt = conn.prepare("SELECT id FROM producers WHERE code = ?1;")?;
    let mut rows = stmt.query([code])?;
    match rows.next()? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}

fn parse_producer_row(row: &Row<'_>) -> RepoResult<Producer> {
    Ok(Producer {
        id: row.get("id")?,
        coop_id: row.get("coop_id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        gender: optional_enum_column(row, "gender", "producers", Gender::parse)?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        contact: row.get("contact")?,
        village: row.get("village")?,
        commune: row.get("commune")?,
        district: row.get("district")?,
        region: row.get("region")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        created_at: row.get("created_at")?,
    })
}
