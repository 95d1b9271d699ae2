//! View tracking: which recipes were opened and when.

use jiff::Timestamp;
use rusqlite::params;

use super::recipe_queries::SUMMARY_COLUMNS;
use crate::{
    error::{CookAlongError, DatabaseResultExt, Result},
    models::RecipeSummary,
};

const CHECK_RECIPE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM recipes WHERE id = ?1)";
const INSERT_VIEW_SQL: &str = "INSERT INTO recipe_views (recipe_id, viewed_at) VALUES (?1, ?2)";
const COUNT_VIEWS_SQL: &str = "SELECT COUNT(*) FROM recipe_views WHERE recipe_id = ?1";

impl super::Database {
    /// Records that a recipe was opened.
    pub fn record_view(&mut self, id: u64) -> Result<()> {
        let exists: bool = self
            .connection
            .query_row(CHECK_RECIPE_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check recipe existence")?;
        if !exists {
            return Err(CookAlongError::RecipeNotFound { id });
        }

        self.connection
            .execute(INSERT_VIEW_SQL, params![id as i64, Timestamp::now().to_string()])
            .db_context("Failed to record recipe view")?;
        Ok(())
    }

    /// Number of times a recipe was opened.
    pub fn view_count(&self, id: u64) -> Result<u64> {
        self.connection
            .query_row(COUNT_VIEWS_SQL, params![id as i64], |row| row.get::<_, i64>(0))
            .map(|count| count as u64)
            .db_context("Failed to count recipe views")
    }

    /// Recipes ordered by their most recent view, newest first.
    pub fn recent_views(&self, limit: u32) -> Result<Vec<RecipeSummary>> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM recipes r \
             JOIN (SELECT recipe_id, MAX(id) AS last_view FROM recipe_views GROUP BY recipe_id) v \
               ON v.recipe_id = r.id \
             ORDER BY v.last_view DESC LIMIT ?1"
        );

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare recent views query")?;
        let rows = stmt
            .query_map(params![limit as i64], Self::build_summary_from_row)
            .db_context("Failed to query recent views")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read recent views")
    }
}
