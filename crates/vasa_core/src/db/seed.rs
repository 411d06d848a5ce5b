//! Idempotent demo dataset for smoke-testing a fresh store.
//!
//! # Responsibility
//! - Insert one demo producer, one parcel under it, and one product.
//!
//! # Invariants
//! - Each insert is guarded by an existence predicate; re-running inserts
//!   nothing and never fails.
//! - All steps run in one `BEGIN IMMEDIATE` transaction, which serializes
//!   concurrent runners. The `producers.code` unique index backs this up.

use log::{error, info};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

use super::DbResult;

pub const DEMO_PRODUCER_CODE: &str = "PRD-0001";
pub const DEMO_PARCEL_NAME: &str = "Parcelle A";
pub const DEMO_PRODUCT_NAME: &str = "Cacao beans";

const SEED_PRODUCER_SQL: &str = "INSERT INTO producers (code, name, region, village, phone)
SELECT 'PRD-0001', 'Jean Ranaivo', 'SAVA', 'Ambanja', '+261340000000'
WHERE NOT EXISTS (SELECT 1 FROM producers WHERE code = 'PRD-0001');";

const SEED_PARCEL_SQL: &str =
    "INSERT INTO parcels (producer_id, name, crop, area_ha, lat, lng, planted_year)
SELECT p.id, 'Parcelle A', 'cacao', 1.25, -13.666000, 48.450000, 2018
FROM producers p
WHERE p.code = 'PRD-0001'
  AND NOT EXISTS (
    SELECT 1 FROM parcels WHERE producer_id = p.id AND name = 'Parcelle A'
  );";

const SEED_PRODUCT_SQL: &str = "INSERT INTO products (name, crop, description)
SELECT 'Cacao beans', 'cacao', 'Fermented, sun-dried'
WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = 'Cacao beans');";

/// Rows inserted by one seed run. All zero on a repeat run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub producers: usize,
    pub parcels: usize,
    pub products: usize,
}

impl SeedReport {
    pub fn inserted_any(&self) -> bool {
        self.producers + self.parcels + self.products > 0
    }
}

/// Populates the demo dataset on a migrated connection.
pub fn seed_demo_data(conn: &Connection) -> DbResult<SeedReport> {
    let started_at = Instant::now();
    info!("event=db_seed module=db status=start");

    match run_seed(conn) {
        Ok(report) => {
            info!(
                "event=db_seed module=db status=ok duration_ms={} producers={} parcels={} products={}",
                started_at.elapsed().as_millis(),
                report.producers,
                report.parcels,
                report.products
            );
            Ok(report)
        }
        Err(err) => {
            error!(
                "event=db_seed module=db status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn run_seed(conn: &Connection) -> DbResult<SeedReport> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let report = SeedReport {
        producers: tx.execute(SEED_PRODUCER_SQL, [])?,
        parcels: tx.execute(SEED_PARCEL_SQL, [])?,
        products: tx.execute(SEED_PRODUCT_SQL, [])?,
    };
    tx.commit()?;
    Ok(report)
}
