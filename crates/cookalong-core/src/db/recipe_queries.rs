//! Recipe CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Transaction};

use crate::{
    error::{CookAlongError, DatabaseResultExt, Result},
    models::{Ingredient, Recipe, RecipeOrigin, RecipeStep, RecipeSummary},
    params::{CreateRecipe, ListRecipes},
};

const INSERT_RECIPE_SQL: &str = "INSERT INTO recipes (title, summary, origin, external_id, servings, ready_minutes, favorite, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8)";
const UPDATE_CACHED_RECIPE_SQL: &str = "UPDATE recipes SET title = ?1, summary = ?2, servings = ?3, ready_minutes = ?4, updated_at = ?5 WHERE id = ?6";
const SELECT_ID_BY_EXTERNAL_SQL: &str = "SELECT id FROM recipes WHERE external_id = ?1";
const INSERT_INGREDIENT_SQL: &str =
    "INSERT INTO ingredients (recipe_id, position, name, amount) VALUES (?1, ?2, ?3, ?4)";
const INSERT_STEP_SQL: &str =
    "INSERT INTO recipe_steps (recipe_id, step_number, instruction) VALUES (?1, ?2, ?3)";
const DELETE_INGREDIENTS_SQL: &str = "DELETE FROM ingredients WHERE recipe_id = ?1";
const DELETE_STEPS_SQL: &str = "DELETE FROM recipe_steps WHERE recipe_id = ?1";
const SELECT_RECIPE_SQL: &str = "SELECT id, title, summary, origin, external_id, servings, ready_minutes, favorite, created_at, updated_at FROM recipes WHERE id = ?1";
const SELECT_INGREDIENTS_SQL: &str =
    "SELECT name, amount FROM ingredients WHERE recipe_id = ?1 ORDER BY position";
const SELECT_STEPS_SQL: &str =
    "SELECT step_number, instruction FROM recipe_steps WHERE recipe_id = ?1 ORDER BY step_number";
const UPDATE_FAVORITE_SQL: &str = "UPDATE recipes SET favorite = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_RECIPE_SQL: &str = "DELETE FROM recipes WHERE id = ?1";

/// Summary columns shared by list and search queries.
pub(super) const SUMMARY_COLUMNS: &str = "r.id, r.title, r.summary, r.origin, r.favorite, r.ready_minutes, r.updated_at, (SELECT COUNT(*) FROM recipe_steps s WHERE s.recipe_id = r.id)";

fn parse_timestamp(row: &rusqlite::Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn parse_origin(row: &rusqlite::Row, index: usize) -> rusqlite::Result<RecipeOrigin> {
    let origin: String = row.get(index)?;
    origin.parse::<RecipeOrigin>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into())
    })
}

impl super::Database {
    /// Builds a summary from a row selected with [`SUMMARY_COLUMNS`].
    pub(super) fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<RecipeSummary> {
        Ok(RecipeSummary {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            summary: row.get(2)?,
            origin: parse_origin(row, 3)?,
            favorite: row.get(4)?,
            ready_minutes: row.get(5)?,
            updated_at: parse_timestamp(row, 6)?,
            step_count: row.get::<_, i64>(7)? as u32,
        })
    }

    fn build_recipe_from_row(row: &rusqlite::Row) -> rusqlite::Result<Recipe> {
        Ok(Recipe {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            summary: row.get(2)?,
            origin: parse_origin(row, 3)?,
            external_id: row.get(4)?,
            servings: row.get(5)?,
            ready_minutes: row.get(6)?,
            favorite: row.get(7)?,
            ingredients: Vec::new(),
            steps: Vec::new(),
            created_at: parse_timestamp(row, 8)?,
            updated_at: parse_timestamp(row, 9)?,
        })
    }

    fn insert_children(tx: &Transaction<'_>, recipe_id: i64, params: &CreateRecipe) -> Result<()> {
        for (position, ingredient) in params.ingredients.iter().enumerate() {
            tx.execute(
                INSERT_INGREDIENT_SQL,
                params![
                    recipe_id,
                    position as i64,
                    ingredient.name.trim(),
                    ingredient.amount.as_deref()
                ],
            )
            .db_context("Failed to insert ingredient")?;
        }
        for (index, instruction) in params.steps.iter().enumerate() {
            tx.execute(
                INSERT_STEP_SQL,
                params![recipe_id, index as i64 + 1, instruction.trim()],
            )
            .db_context("Failed to insert recipe step")?;
        }
        Ok(())
    }

    /// Stores a new recipe with its ingredients and numbered steps.
    pub fn insert_recipe(&mut self, params: &CreateRecipe, origin: RecipeOrigin) -> Result<Recipe> {
        params.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        tx.execute(
            INSERT_RECIPE_SQL,
            params![
                params.title.trim(),
                params.summary.as_deref(),
                origin.as_str(),
                params.external_id.as_deref(),
                params.servings,
                params.ready_minutes,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert recipe")?;
        let id = tx.last_insert_rowid();

        Self::insert_children(&tx, id, params)?;
        tx.commit().db_context("Failed to commit transaction")?;

        self.get_recipe(id as u64)?
            .ok_or(CookAlongError::RecipeNotFound { id: id as u64 })
    }

    /// Stores or refreshes a recipe fetched from an external provider.
    ///
    /// Recipes are matched by `external_id`; a refresh replaces the header,
    /// ingredients and steps but keeps the id, favorite flag and view history.
    pub fn cache_recipe(&mut self, params: &CreateRecipe) -> Result<Recipe> {
        let Some(external_id) = params.external_id.as_deref() else {
            return Err(CookAlongError::invalid_input("external_id")
                .with_reason("Cached recipes need the provider's recipe id"));
        };
        params.validate()?;

        let existing: Option<i64> = self
            .connection
            .query_row(SELECT_ID_BY_EXTERNAL_SQL, params![external_id], |row| row.get(0))
            .optional()
            .db_context("Failed to look up cached recipe")?;

        let Some(id) = existing else {
            return self.insert_recipe(params, RecipeOrigin::Cached);
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        tx.execute(
            UPDATE_CACHED_RECIPE_SQL,
            params![
                params.title.trim(),
                params.summary.as_deref(),
                params.servings,
                params.ready_minutes,
                Timestamp::now().to_string(),
                id
            ],
        )
        .db_context("Failed to update cached recipe")?;
        tx.execute(DELETE_INGREDIENTS_SQL, params![id])
            .db_context("Failed to clear ingredients")?;
        tx.execute(DELETE_STEPS_SQL, params![id])
            .db_context("Failed to clear recipe steps")?;
        Self::insert_children(&tx, id, params)?;
        tx.commit().db_context("Failed to commit transaction")?;

        self.get_recipe(id as u64)?
            .ok_or(CookAlongError::RecipeNotFound { id: id as u64 })
    }

    /// Loads a recipe with its ingredients and steps.
    pub fn get_recipe(&self, id: u64) -> Result<Option<Recipe>> {
        let recipe = self
            .connection
            .query_row(SELECT_RECIPE_SQL, params![id as i64], Self::build_recipe_from_row)
            .optional()
            .db_context("Failed to load recipe")?;

        let Some(mut recipe) = recipe else {
            return Ok(None);
        };

        let mut stmt = self
            .connection
            .prepare(SELECT_INGREDIENTS_SQL)
            .db_context("Failed to prepare ingredient query")?;
        recipe.ingredients = stmt
            .query_map(params![id as i64], |row| {
                Ok(Ingredient {
                    name: row.get(0)?,
                    amount: row.get(1)?,
                })
            })
            .db_context("Failed to query ingredients")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read ingredients")?;

        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_SQL)
            .db_context("Failed to prepare step query")?;
        recipe.steps = stmt
            .query_map(params![id as i64], |row| {
                Ok(RecipeStep {
                    number: row.get::<_, i64>(0)? as u32,
                    instruction: row.get(1)?,
                })
            })
            .db_context("Failed to query recipe steps")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read recipe steps")?;

        Ok(Some(recipe))
    }

    /// Lists recipe summaries ordered by title.
    pub fn list_recipes(&self, filter: &ListRecipes) -> Result<Vec<RecipeSummary>> {
        let mut sql = format!("SELECT {SUMMARY_COLUMNS} FROM recipes r WHERE 1 = 1");
        if filter.favorites_only {
            sql.push_str(" AND r.favorite = 1");
        }
        if filter.origin.is_some() {
            sql.push_str(" AND r.origin = ?1");
        }
        sql.push_str(" ORDER BY r.title COLLATE NOCASE, r.id");

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare recipe list query")?;
        let rows = match filter.origin {
            Some(origin) => stmt.query_map(params![origin.as_str()], Self::build_summary_from_row),
            None => stmt.query_map([], Self::build_summary_from_row),
        }
        .db_context("Failed to list recipes")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read recipe summaries")
    }

    /// Finds recipes whose title or any ingredient contains the query.
    pub fn search_recipes(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CookAlongError::invalid_input("query")
                .with_reason("Search query cannot be empty"));
        }

        let pattern = format!(
            "%{}%",
            query
                .to_lowercase()
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_")
        );
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM recipes r \
             WHERE lower(r.title) LIKE ?1 ESCAPE '\\' \
                OR EXISTS (SELECT 1 FROM ingredients i WHERE i.recipe_id = r.id AND lower(i.name) LIKE ?1 ESCAPE '\\') \
             ORDER BY r.title COLLATE NOCASE, r.id"
        );

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare recipe search")?;
        let rows = stmt
            .query_map(params![pattern], Self::build_summary_from_row)
            .db_context("Failed to search recipes")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read search results")
    }

    /// Marks or unmarks a recipe as favorite.
    pub fn set_favorite(&mut self, id: u64, favorite: bool) -> Result<()> {
        let changed = self
            .connection
            .execute(
                UPDATE_FAVORITE_SQL,
                params![favorite, Timestamp::now().to_string(), id as i64],
            )
            .db_context("Failed to update favorite flag")?;
        if changed == 0 {
            return Err(CookAlongError::RecipeNotFound { id });
        }
        Ok(())
    }

    /// Deletes a recipe together with its ingredients, steps and views.
    pub fn delete_recipe(&mut self, id: u64) -> Result<()> {
        let changed = self
            .connection
            .execute(DELETE_RECIPE_SQL, params![id as i64])
            .db_context("Failed to delete recipe")?;
        if changed == 0 {
            return Err(CookAlongError::RecipeNotFound { id });
        }
        Ok(())
    }
}
