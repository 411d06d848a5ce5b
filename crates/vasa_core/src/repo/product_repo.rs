//! Product repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a product deletes its offers (hard cascade), unlike harvest
//!   lots which are only detached from their references.

use super::{
    delete_by_id, document, document_column, enum_column, fetch_by_id, text, Assignments, Page,
    RepoResult, Repository, Select,
};
use crate::model::crop::Crop;
use crate::model::product::{NewProduct, Product, ProductFilter, ProductPatch};
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const PRODUCT_COLUMNS: &str = "id,
    name,
    crop,
    description,
    specs,
    created_at";

pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteProductRepository<'_> {
    type Entity = Product;
    type New = NewProduct;
    type Patch = ProductPatch;
    type Filter = ProductFilter;

    const ENTITY: &'static str = "product";

    fn create(&self, new: &NewProduct) -> RepoResult<Product> {
        let specs = document(new.specs.as_ref())?;
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO products (name, crop, description, specs)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {PRODUCT_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![
            new.name.as_str(),
            new.crop.as_str(),
            new.description.as_deref(),
            specs,
        ])?;
        match rows.next()? {
            Some(row) => parse_product_row(row),
            None => Err(rusqlite::Error::QueryReturnedNoRows.into()),
        }
    }

    fn get(&self, id: EntityId) -> RepoResult<Option<Product>> {
        fetch_by_id(
            self.conn,
            &format!("SELECT {PRODUCT_COLUMNS} FROM products"),
            id,
            parse_product_row,
        )
    }

    fn list(&self, filter: &ProductFilter, page: &Page) -> RepoResult<Vec<Product>> {
        Select::new(&format!("SELECT {PRODUCT_COLUMNS} FROM products"))
            .eq("crop", filter.crop.map(|v| Value::Text(v.as_str().to_string())))
            .fetch(self.conn, page, parse_product_row)
    }

    fn update(&self, id: EntityId, patch: &ProductPatch) -> RepoResult<Product> {
        let mut set = Assignments::default();
        set.set("name", patch.name.as_ref().map(|v| text(v.as_deref())));
        set.set("crop", patch.crop.map(|v| text(v.map(Crop::as_str))));
        set.set(
            "description",
            patch.description.as_ref().map(|v| text(v.as_deref())),
        );
        let specs = match &patch.specs {
            Some(value) => Some(document(value.as_ref())?),
            None => None,
        };
        set.set("specs", specs);
        set.apply(
            self.conn,
            "products",
            PRODUCT_COLUMNS,
            Self::ENTITY,
            id,
            parse_product_row,
        )
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        delete_by_id(self.conn, "products", Self::ENTITY, id)
    }
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    Ok(Product {
        id: row.get("id")?,
        name: row.get("name")?,
        crop: enum_column(row, "crop", "products", Crop::parse)?,
        description: row.get("description")?,
        specs: document_column(row, "specs", "products")?,
        created_at: row.get("created_at")?,
    })
}
