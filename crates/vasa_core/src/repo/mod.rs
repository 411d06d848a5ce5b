//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the per-entity data access contract (`Repository`).
//! - Isolate SQLite query details from service/business orchestration.
//! - Surface store-raised constraint failures as `RepoError::Constraint`
//!   without translating or swallowing them.
//!
//! # Invariants
//! - Lists are ordered most-recently-created first (`id DESC`).
//! - Deletes run inside one immediate transaction; cascade and set-null
//!   effects are applied by the store within it.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod campaign_repo;
pub mod certification_repo;
pub mod harvest_lot_repo;
pub mod offer_repo;
pub mod parcel_repo;
pub mod producer_repo;
pub mod product_repo;
pub mod summary_repo;

use crate::db::{ConstraintViolation, DbError};
use crate::model::{Document, EntityId};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every entity.
#[derive(Debug)]
pub enum RepoError {
    /// The store rejected the write (NOT NULL, foreign key, CHECK, UNIQUE).
    Constraint(ConstraintViolation),
    /// No row with this id.
    NotFound { entity: &'static str, id: EntityId },
    /// Transport, pool or bootstrap failure.
    Db(DbError),
    /// Persisted row cannot be converted to the domain model.
    InvalidData(String),
}

impl RepoError {
    /// Whether the failure means the store was unreachable.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_connectivity())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constraint(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Constraint(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value.constraint_violation() {
            Some(violation) => Self::Constraint(violation),
            None => Self::Db(value),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        DbError::Sqlite(value).into()
    }
}

impl From<r2d2::Error> for RepoError {
    fn from(value: r2d2::Error) -> Self {
        Self::Db(DbError::Pool(value))
    }
}

/// Pagination window applied after ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: u32,
}

/// CRUD contract implemented once per entity.
pub trait Repository {
    type Entity;
    type New;
    type Patch;
    type Filter: Default;

    /// Entity name used in `NotFound` errors and log events.
    const ENTITY: &'static str;

    /// Inserts a row and returns it as stored (id, defaults, timestamp).
    fn create(&self, new: &Self::New) -> RepoResult<Self::Entity>;
    fn get(&self, id: EntityId) -> RepoResult<Option<Self::Entity>>;
    fn list(&self, filter: &Self::Filter, page: &Page) -> RepoResult<Vec<Self::Entity>>;
    /// Applies only the fields present in `patch`.
    fn update(&self, id: EntityId, patch: &Self::Patch) -> RepoResult<Self::Entity>;
    fn delete(&self, id: EntityId) -> RepoResult<()>;
}

/// Incremental `SELECT ... WHERE` builder with positional binds.
pub(crate) struct Select {
    sql: String,
    values: Vec<Value>,
}

impl Select {
    pub(crate) fn new(base_sql: &str) -> Self {
        Self {
            sql: format!("{base_sql} WHERE 1 = 1"),
            values: Vec::new(),
        }
    }

    pub(crate) fn eq(mut self, column: &str, value: Option<Value>) -> Self {
        if let Some(value) = value {
            self.sql.push_str(&format!(" AND {column} = ?"));
            self.values.push(value);
        }
        self
    }

    /// Runs the query newest-first with the page window applied.
    pub(crate) fn fetch<T>(
        self,
        conn: &Connection,
        page: &Page,
        parse: impl Fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>> {
        self.fetch_ordered_by(conn, "id", page, parse)
    }

    /// Like [`Select::fetch`], ordering by `key_column DESC`.
    pub(crate) fn fetch_ordered_by<T>(
        mut self,
        conn: &Connection,
        key_column: &str,
        page: &Page,
        parse: impl Fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>> {
        self.sql.push_str(&format!(" ORDER BY {key_column} DESC"));

        if let Some(limit) = page.limit {
            self.sql.push_str(" LIMIT ?");
            self.values.push(Value::Integer(i64::from(limit)));
            if page.offset > 0 {
                self.sql.push_str(" OFFSET ?");
                self.values.push(Value::Integer(i64::from(page.offset)));
            }
        } else if page.offset > 0 {
            self.sql.push_str(" LIMIT -1 OFFSET ?");
            self.values.push(Value::Integer(i64::from(page.offset)));
        }

        let mut stmt = conn.prepare(&self.sql)?;
        let mut rows = stmt.query(params_from_iter(self.values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse(row)?);
        }
        Ok(items)
    }
}

/// `SET` clause accumulated from the fields present in a patch.
#[derive(Default)]
pub(crate) struct Assignments {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl Assignments {
    pub(crate) fn set(&mut self, column: &'static str, value: Option<Value>) {
        if let Some(value) = value {
            self.columns.push(column);
            self.values.push(value);
        }
    }

    /// Runs `UPDATE table SET ... WHERE id = ? RETURNING columns` and parses
    /// the updated row. An empty patch only reloads the row.
    pub(crate) fn apply<T>(
        mut self,
        conn: &Connection,
        table: &str,
        returning: &str,
        entity: &'static str,
        id: EntityId,
        parse: impl Fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let sql = if self.columns.is_empty() {
            format!("SELECT {returning} FROM {table} WHERE id = ?")
        } else {
            let set_clause = self
                .columns
                .iter()
                .map(|column| format!("{column} = ?"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("UPDATE {table} SET {set_clause} WHERE id = ? RETURNING {returning}")
        };
        self.values.push(Value::Integer(id));

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(self.values))?;
        match rows.next()? {
            Some(row) => parse(row),
            None => Err(RepoError::NotFound { entity, id }),
        }
    }
}

/// Loads one row by id.
pub(crate) fn fetch_by_id<T>(
    conn: &Connection,
    select_sql: &str,
    id: EntityId,
    parse: impl Fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Option<T>> {
    let mut stmt = conn.prepare(&format!("{select_sql} WHERE id = ?1"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse(row)?));
    }
    Ok(None)
}

/// Deletes one row inside an immediate transaction.
///
/// Dependent rows are removed or detached by the store's foreign-key actions
/// inside the same transaction; a failure rolls all of them back.
pub(crate) fn delete_by_id(
    conn: &Connection,
    table: &str,
    entity: &'static str,
    id: EntityId,
) -> RepoResult<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let changed = tx.execute(&format!("DELETE FROM {table} WHERE id = ?1"), [id])?;
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    tx.commit()?;
    Ok(())
}

pub(crate) fn text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |value| Value::Text(value.to_string()))
}

pub(crate) fn integer(value: Option<i64>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}

pub(crate) fn real(value: Option<f64>) -> Value {
    value.map_or(Value::Null, Value::Real)
}

pub(crate) fn date(value: Option<NaiveDate>) -> Value {
    value.map_or(Value::Null, |value| {
        Value::Text(value.format("%Y-%m-%d").to_string())
    })
}

pub(crate) fn document(value: Option<&Document>) -> RepoResult<Value> {
    match value {
        Some(doc) => serde_json::to_string(doc)
            .map(Value::Text)
            .map_err(|err| RepoError::InvalidData(format!("unserializable document: {err}"))),
        None => Ok(Value::Null),
    }
}

/// Reads a closed-set text column through `parse`.
pub(crate) fn enum_column<T>(
    row: &Row<'_>,
    column: &str,
    table: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> RepoResult<T> {
    let value: String = row.get(column)?;
    parse(&value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid value `{value}` in {table}.{column}"))
    })
}

/// Nullable variant of [`enum_column`].
pub(crate) fn optional_enum_column<T>(
    row: &Row<'_>,
    column: &str,
    table: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> RepoResult<Option<T>> {
    match row.get::<_, Option<String>>(column)? {
        Some(value) => parse(&value).map(Some).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid value `{value}` in {table}.{column}"))
        }),
        None => Ok(None),
    }
}

pub(crate) fn document_column(
    row: &Row<'_>,
    column: &str,
    table: &str,
) -> RepoResult<Option<Document>> {
    match row.get::<_, Option<String>>(column)? {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|err| {
            RepoError::InvalidData(format!("invalid JSON object in {table}.{column}: {err}"))
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{date, document, RepoError};
    use crate::db::ConstraintKind;
    use chrono::NaiveDate;
    use rusqlite::types::Value;
    use rusqlite::Connection;

    #[test]
    fn unique_failure_is_classified_as_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (code TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        let err: RepoError = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .unwrap_err()
            .into();
        match err {
            RepoError::Constraint(violation) => assert_eq!(violation.kind, ConstraintKind::Unique),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_constraint_failure_stays_db_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err: RepoError = conn.execute("SELECT * FROM missing", []).unwrap_err().into();
        assert!(matches!(err, RepoError::Db(_)));
        assert!(!err.is_connectivity());
    }

    #[test]
    fn dates_bind_as_iso_text() {
        let value = date(NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(value, Value::Text("2024-06-01".to_string()));
        assert_eq!(date(None), Value::Null);
    }

    #[test]
    fn documents_bind_as_json_text() {
        let mut doc = crate::model::Document::new();
        doc.insert("grade".to_string(), serde_json::json!("A"));
        assert_eq!(
            document(Some(&doc)).unwrap(),
            Value::Text(r#"{"grade":"A"}"#.to_string())
        );
    }
}
