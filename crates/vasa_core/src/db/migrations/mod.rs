//! Schema versioning for the Vasa store.
//!
//! Each step is an embedded SQL script tagged with the `PRAGMA user_version`
//! it leaves behind. Steps are guarded with `IF NOT EXISTS`, so replaying one
//! over a populated schema changes nothing.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

macro_rules! schema_step {
    ($version:literal, $name:literal) => {
        SchemaStep {
            version: $version,
            name: $name,
            sql: include_str!(concat!($name, ".sql")),
        }
    };
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    schema_step!(1, "0001_producers_parcels"),
    schema_step!(2, "0002_campaigns_harvest_lots"),
    schema_step!(3, "0003_certifications"),
    schema_step!(4, "0004_marketplace"),
    schema_step!(5, "0005_producer_summary_view"),
];

/// Schema version this binary migrates to.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings the schema up to [`latest_version`] in one transaction.
///
/// Refuses databases written by a newer binary.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = schema_version(conn)?;
    let to_version = latest_version();

    if from_version > to_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: to_version,
        });
    }
    if from_version == to_version {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS.iter().filter(|step| step.version > from_version) {
        debug!(
            "event=db_migrate_step module=db status=start version={} name={}",
            step.version, step.name
        );
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from_version, to_version
    );
    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
