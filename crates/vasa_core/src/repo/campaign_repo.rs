//! Campaign repository contract and SQLite implementation.
//!
//! # Invariants
//! - At most one campaign per `(crop, season_year)`; the unique index
//!   `uq_campaign` rejects the second insert or a colliding update.
//! - Omitted status falls back to the store default (`planned`).

use super::{
    date, delete_by_id, enum_column, fetch_by_id, integer, text, Assignments, Page, RepoResult,
    Repository, Select,
};
use crate::model::campaign::{Campaign, CampaignFilter, CampaignPatch, CampaignStatus, NewCampaign};
use crate::model::crop::Crop;
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const CAMPAIGN_COLUMNS: &str = "id,
    name,
    crop,
    season_year,
    start_date,
    end_date,
    status,
    created_at";

pub struct SqliteCampaignRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCampaignRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteCampaignRepository<'_> {
    type Entity = Campaign;
    type New = NewCampaign;
    type Patch = CampaignPatch;
    type Filter = CampaignFilter;

    const ENTITY: &'static str = "campaign";

    fn create(&self, new: &NewCampaign) -> RepoResult<Campaign> {
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO campaigns (
                name,
                crop,
                season_year,
                start_date,
                end_date,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, COALESCE(?6, 'planned'))
            RETURNING {CAMPAIGN_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![
            new.name.as_str(),
            new.crop.as_str(),
            new.season_year,
            date(new.start_date),
            date(new.end_date),
            new.status.map(CampaignStatus::as_str),
        ])?;
        match rows.next()? {
            Some(row) => parse_campaign_row(row),
            None => Err(rusqlite::Error::QueryReturnedNoRows.into()),
        }
    }

    fn get(&self, id: EntityId) -> RepoResult<Option<Campaign>> {
        fetch_by_id(
            self.conn,
            &format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns"),
            id,
            parse_campaign_row,
        )
    }

    fn list(&self, filter: &CampaignFilter, page: &Page) -> RepoResult<Vec<Campaign>> {
        Select::new(&format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns"))
            .eq("crop", filter.crop.map(|v| Value::Text(v.as_str().to_string())))
            .eq(
                "season_year",
                filter.season_year.map(|v| Value::Integer(i64::from(v))),
            )
            .eq(
                "status",
                filter.status.map(|v| Value::Text(v.as_str().to_string())),
            )
            .fetch(self.conn, page, parse_campaign_row)
    }

    fn update(&self, id: EntityId, patch: &CampaignPatch) -> RepoResult<Campaign> {
        let mut set = Assignments::default();
        set.set("name", patch.name.as_ref().map(|v| text(v.as_deref())));
        set.set("crop", patch.crop.map(|v| text(v.map(Crop::as_str))));
        set.set(
            "season_year",
            patch.season_year.map(|v| integer(v.map(i64::from))),
        );
        set.set("start_date", patch.start_date.map(date));
        set.set("end_date", patch.end_date.map(date));
        set.set(
            "status",
            patch.status.map(|v| text(v.map(CampaignStatus::as_str))),
        );
        set.apply(
            self.conn,
            "campaigns",
            CAMPAIGN_COLUMNS,
            Self::ENTITY,
            id,
            parse_campaign_row,
        )
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        delete_by_id(self.conn, "campaigns", Self::ENTITY, id)
    }
}

fn parse_campaign_row(row: &Row<'_>) -> RepoResult<Campaign> {
    Ok(Campaign {
        id: row.get("id")?,
        name: row.get("name")?,
        crop: enum_column(row, "crop", "campaigns", Crop::parse)?,
        season_year: row.get("season_year")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        status: enum_column(row, "status", "campaigns", CampaignStatus::parse)?,
        created_at: row.get("created_at")?,
    })
}
