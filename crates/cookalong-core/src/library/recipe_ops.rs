//! Recipe operations for the RecipeLibrary.

use log::debug;

use super::RecipeLibrary;
use crate::{
    display::RecipeSummaries,
    error::Result,
    models::{Recipe, RecipeOrigin},
    params::{CreateRecipe, Id, ListRecipes, RecentViews, SearchRecipes, SetFavorite},
};

impl RecipeLibrary {
    /// Stores a recipe written by the user.
    pub async fn create_recipe(&self, params: &CreateRecipe) -> Result<Recipe> {
        let params = params.clone();
        let recipe = self
            .run_blocking(move |db| db.insert_recipe(&params, RecipeOrigin::User))
            .await?;
        debug!("Created recipe {} '{}'", recipe.id, recipe.title);
        Ok(recipe)
    }

    /// Stores or refreshes a recipe from an external search provider, keyed
    /// by its `external_id`.
    pub async fn cache_recipe(&self, params: &CreateRecipe) -> Result<Recipe> {
        let params = params.clone();
        self.run_blocking(move |db| db.cache_recipe(&params)).await
    }

    /// Retrieves a recipe with ingredients and steps.
    pub async fn get_recipe(&self, params: &Id) -> Result<Option<Recipe>> {
        let id = params.id;
        self.run_blocking(move |db| db.get_recipe(id)).await
    }

    /// Lists recipes, optionally only favorites or one origin.
    pub async fn list_recipes(&self, params: &ListRecipes) -> Result<RecipeSummaries> {
        let filter = params.clone();
        let recipes = self.run_blocking(move |db| db.list_recipes(&filter)).await?;
        Ok(RecipeSummaries(recipes))
    }

    /// Searches titles and ingredient names.
    pub async fn search_recipes(&self, params: &SearchRecipes) -> Result<RecipeSummaries> {
        let query = params.query.clone();
        let recipes = self.run_blocking(move |db| db.search_recipes(&query)).await?;
        Ok(RecipeSummaries(recipes))
    }

    /// Marks or unmarks a favorite.
    pub async fn set_favorite(&self, params: &SetFavorite) -> Result<()> {
        let (id, favorite) = (params.id, params.favorite);
        self.run_blocking(move |db| db.set_favorite(id, favorite)).await
    }

    /// Records that a recipe was opened.
    pub async fn record_view(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.run_blocking(move |db| db.record_view(id)).await
    }

    /// How often a recipe was opened.
    pub async fn view_count(&self, params: &Id) -> Result<u64> {
        let id = params.id;
        self.run_blocking(move |db| db.view_count(id)).await
    }

    /// Recently opened recipes, newest first.
    pub async fn recent_views(&self, params: &RecentViews) -> Result<RecipeSummaries> {
        let limit = params.limit;
        let recipes = self.run_blocking(move |db| db.recent_views(limit)).await?;
        Ok(RecipeSummaries(recipes))
    }

    /// Deletes a recipe and everything attached to it.
    pub async fn delete_recipe(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.run_blocking(move |db| db.delete_recipe(id)).await
    }
}
