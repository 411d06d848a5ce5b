//! Offer repository contract and SQLite implementation.

use super::{
    date, delete_by_id, document, document_column, enum_column, fetch_by_id, integer, real, text,
    Assignments, Page, RepoResult, Repository, Select,
};
use crate::model::offer::{NewOffer, Offer, OfferFilter, OfferPatch, OfferStatus};
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const OFFER_COLUMNS: &str = "id,
    product_id,
    seller_coop_id,
    quantity_mt,
    price_usd_mt,
    incoterm,
    available_from,
    available_to,
    status,
    specs,
    created_at";

pub struct SqliteOfferRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOfferRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteOfferRepository<'_> {
    type Entity = Offer;
    type New = NewOffer;
    type Patch = OfferPatch;
    type Filter = OfferFilter;

    const ENTITY: &'static str = "offer";

    fn create(&self, new: &NewOffer) -> RepoResult<Offer> {
        let specs = document(new.specs.as_ref())?;
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO offers (
                product_id,
                seller_coop_id,
                quantity_mt,
                price_usd_mt,
                incoterm,
                available_from,
                available_to,
                status,
                specs
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, COALESCE(?8, 'draft'), ?9)
            RETURNING {OFFER_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![
            new.product_id,
            new.seller_coop_id,
            new.quantity_mt,
            new.price_usd_mt,
            new.incoterm.as_deref(),
            date(new.available_from),
            date(new.available_to),
            new.status.map(OfferStatus::as_str),
            specs,
        ])?;
        match rows.next()? {
            Some(row) => parse_offer_row(row),
            None => Err(rusqlite::Error::QueryReturnedNoRows.into()),
        }
    }

    fn get(&self, id: EntityId) -> RepoResult<Option<Offer>> {
        fetch_by_id(
            self.conn,
            &format!("SELECT {OFFER_COLUMNS} FROM offers"),
            id,
            parse_offer_row,
        )
    }

    fn list(&self, filter: &OfferFilter, page: &Page) -> RepoResult<Vec<Offer>> {
        Select::new(&format!("SELECT {OFFER_COLUMNS} FROM offers"))
            .eq("product_id", filter.product_id.map(Value::Integer))
            .eq(
                "status",
                filter.status.map(|v| Value::Text(v.as_str().to_string())),
            )
            .fetch(self.conn, page, parse_offer_row)
    }

    fn update(&self, id: EntityId, patch: &OfferPatch) -> RepoResult<Offer> {
        let mut set = Assignments::default();
        set.set("quantity_mt", patch.quantity_mt.map(real));
        set.set("seller_coop_id", patch.seller_coop_id.map(integer));
        set.set("price_usd_mt", patch.price_usd_mt.map(real));
        set.set(
            "incoterm",
            patch.incoterm.as_ref().map(|v| text(v.as_deref())),
        );
        set.set("available_from", patch.available_from.map(date));
        set.set("available_to", patch.available_to.map(date));
        set.set(
            "status",
            patch.status.map(|v| text(v.map(OfferStatus::as_str))),
        );
        let specs = match &patch.specs {
            Some(value) => Some(document(value.as_ref())?),
            None => None,
        };
        set.set("specs", specs);
        set.apply(
            self.conn,
            "offers",
            OFFER_COLUMNS,
            Self::ENTITY,
            id,
            parse_offer_row,
        )
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        delete_by_id(self.conn, "offers", Self::ENTITY, id)
    }
}

fn parse_offer_row(row: &Row<'_>) -> RepoResult<Offer> {
    Ok(Offer {
        id: row.get("id")?,
        product_id: row.get("product_id")?,
        seller_coop_id: row.get("seller_coop_id")?,
        quantity_mt: row.get("quantity_mt")?,
        price_usd_mt: row.get("price_usd_mt")?,
        incoterm: row.get("incoterm")?,
        available_from: row.get("available_from")?,
        available_to: row.get("available_to")?,
        status: enum_column(row, "status", "offers", OfferStatus::parse)?,
        specs: document_column(row, "specs", "offers")?,
        created_at: row.get("created_at")?,
    })
}
