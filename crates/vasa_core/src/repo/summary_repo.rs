//! Read-only access to `view_producer_summary`.
//!
//! # Invariants
//! - Computed on every read from base tables; nothing is cached or stored.
//! - `total_dry_kg` is `0.0`, never NULL, for producers without weighed lots.

use super::{Page, RepoResult, Select};
use crate::model::producer::ProducerSummary;
use crate::model::EntityId;
use rusqlite::{Connection, Row};

const SUMMARY_SELECT_SQL: &str = "SELECT
    producer_id,
    name,
    region,
    parcels_count,
    total_dry_kg
FROM view_producer_summary";

/// Read contract for the producer summary view.
pub trait SummaryRepository {
    fn get_summary(&self, producer_id: EntityId) -> RepoResult<Option<ProducerSummary>>;
    fn list_summaries(&self, page: &Page) -> RepoResult<Vec<ProducerSummary>>;
}

pub struct SqliteSummaryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSummaryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SummaryRepository for SqliteSummaryRepository<'_> {
    fn get_summary(&self, producer_id: EntityId) -> RepoResult<Option<ProducerSummary>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUMMARY_SELECT_SQL} WHERE producer_id = ?1;"))?;
        let mut rows = stmt.query([producer_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_summary_row(row)?));
        }
        Ok(None)
    }

    fn list_summaries(&self, page: &Page) -> RepoResult<Vec<ProducerSummary>> {
        Select::new(SUMMARY_SELECT_SQL).fetch_ordered_by(
            self.conn,
            "producer_id",
            page,
            parse_summary_row,
        )
    }
}

fn parse_summary_row(row: &Row<'_>) -> RepoResult<ProducerSummary> {
    Ok(ProducerSummary {
        producer_id: row.get("producer_id")?,
        name: row.get("name")?,
        region: row.get("region")?,
        parcels_count: row.get("parcels_count")?,
        total_dry_kg: row.get("total_dry_kg")?,
    })
}
