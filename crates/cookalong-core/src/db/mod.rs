//! Database operations and SQLite management for recipes.
//!
//! This module provides the low-level storage behind the recipe library:
//! the SQLite connection, schema setup, and the recipe and view-history
//! queries. Everything here is synchronous; the async facade in
//! [`crate::library`] runs it on the blocking thread pool.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod recipe_queries;
pub mod view_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
