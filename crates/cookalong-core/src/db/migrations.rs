//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes of ingredients, steps and views rely on this
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Early databases had no ready_minutes column
        let has_ready_minutes: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('recipes') WHERE name = 'ready_minutes'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect recipes table")?;

        if !has_ready_minutes {
            self.connection
                .execute("ALTER TABLE recipes ADD COLUMN ready_minutes INTEGER", [])
                .db_context("Failed to add ready_minutes column to recipes table")?;
        }

        Ok(())
    }
}
