//! Certification repository contract and SQLite implementation.

use super::{
    date, delete_by_id, document, document_column, enum_column, fetch_by_id, text, Assignments,
    Page, RepoResult, Repository, Select,
};
use crate::model::certification::{
    Certification, CertificationFilter, CertificationPatch, CertificationScheme,
    CertificationStatus, NewCertification,
};
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const CERTIFICATION_COLUMNS: &str = "id,
    producer_id,
    scheme,
    status,
    cert_number,
    org_name,
    valid_from,
    valid_to,
    attachments,
    created_at";

pub struct SqliteCertificationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCertificationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteCertificationRepository<'_> {
    type Entity = Certification;
    type New = NewCertification;
    type Patch = CertificationPatch;
    type Filter = CertificationFilter;

    const ENTITY: &'static str = "certification";

    fn create(&self, new: &NewCertification) -> RepoResult<Certification> {
        let attachments = document(new.attachments.as_ref())?;
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO certifications (
                producer_id,
                scheme,
                status,
                cert_number,
                org_name,
                valid_from,
                valid_to,
                attachments
            ) VALUES (?1, ?2, COALESCE(?3, 'pending'), ?4, ?5, ?6, ?7, ?8)
            RETURNING {CERTIFICATION_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![
            new.producer_id,
            new.scheme.as_str(),
            new.status.map(CertificationStatus::as_str),
            new.cert_number.as_deref(),
            new.org_name.as_deref(),
            date(new.valid_from),
            date(new.valid_to),
            attachments,
        ])?;
        match rows.next()? {
            Some(row) => parse_certification_row(row),
            None => Err(rusqlite::Error::QueryReturnedNoRows.into()),
        }
    }

    fn get(&self, id: EntityId) -> RepoResult<Option<Certification>> {
        fetch_by_id(
            self.conn,
            &format!("SELECT {CERTIFICATION_COLUMNS} FROM certifications"),
            id,
            parse_certification_row,
        )
    }

    fn list(&self, filter: &CertificationFilter, page: &Page) -> RepoResult<Vec<Certification>> {
        Select::new(&format!("SELECT {CERTIFICATION_COLUMNS} FROM certifications"))
            .eq("producer_id", filter.producer_id.map(Value::Integer))
            .eq(
                "status",
                filter.status.map(|v| Value::Text(v.as_str().to_string())),
            )
            .fetch(self.conn, page, parse_certification_row)
    }

    fn update(&self, id: EntityId, patch: &CertificationPatch) -> RepoResult<Certification> {
        let mut set = Assignments::default();
        set.set(
            "scheme",
            patch.scheme.map(|v| text(v.map(CertificationScheme::as_str))),
        );
        set.set(
            "status",
            patch.status.map(|v| text(v.map(CertificationStatus::as_str))),
        );
        set.set(
            "cert_number",
            patch.cert_number.as_ref().map(|v| text(v.as_deref())),
        );
        set.set(
            "org_name",
            patch.org_name.as_ref().map(|v| text(v.as_deref())),
        );
        set.set("valid_from", patch.valid_from.map(date));
        set.set("valid_to", patch.valid_to.map(date));
        let attachments = match &patch.attachments {
            Some(value) => Some(document(value.as_ref())?),
            None => None,
        };
        set.set("attachments", attachments);
        set.apply(
            self.conn,
            "certifications",
            CERTIFICATION_COLUMNS,
            Self::ENTITY,
            id,
            parse_certification_row,
        )
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        delete_by_id(self.conn, "certifications", Self::ENTITY, id)
    }
}

fn parse_certification_row(row: &Row<'_>) -> RepoResult<Certification> {
    Ok(Certification {
        id: row.get("id")?,
        producer_id: row.get("producer_id")?,
        scheme: enum_column(row, "scheme", "certifications", CertificationScheme::parse)?,
        status: enum_column(row, "status", "certifications", CertificationStatus::parse)?,
        cert_number: row.get("cert_number")?,
        org_name: row.get("org_name")?,
        valid_from: row.get("valid_from")?,
        valid_to: row.get("valid_to")?,
        attachments: document_column(row, "attachments", "certifications")?,
        created_at: row.get("created_at")?,
    })
}
