//! Handlers for the `recipe` subcommands.

use std::fs;

use anyhow::{bail, Context, Result};
use cookalong_core::{
    display::{CreateResult, DeleteResult, OperationStatus},
    params::{CreateRecipe, Id, ListRecipes, RecentViews, SearchRecipes, SetFavorite},
    RecipeLibrary,
};
use log::debug;

use crate::{
    args::{ImportRecipeArgs, RecipeCommands},
    renderer::TerminalRenderer,
};

pub struct Cli<'a> {
    library: &'a RecipeLibrary,
    renderer: &'a TerminalRenderer,
}

impl<'a> Cli<'a> {
    pub fn new(library: &'a RecipeLibrary, renderer: &'a TerminalRenderer) -> Self {
        Self { library, renderer }
    }

    pub async fn handle_recipe_command(&self, command: RecipeCommands) -> Result<()> {
        match command {
            RecipeCommands::Add(args) => self.add_recipe(&args.into()).await,
            RecipeCommands::Import(args) => self.import_recipe(args).await,
            RecipeCommands::List(args) => self.list_recipes(&args.into()).await,
            RecipeCommands::Search(args) => self.search_recipes(&args.into()).await,
            RecipeCommands::Show(args) => self.show_recipe(&args.into()).await,
            RecipeCommands::Favorite(args) => self.set_favorite(&args.into()).await,
            RecipeCommands::Recent(args) => self.recent_recipes(&args.into()).await,
            RecipeCommands::Delete(args) => self.delete_recipe(&args.into()).await,
        }
    }

    async fn add_recipe(&self, params: &CreateRecipe) -> Result<()> {
        let recipe = self
            .library
            .create_recipe(params)
            .await
            .context("Failed to add recipe")?;
        self.renderer.show(&CreateResult::new(recipe))
    }

    async fn import_recipe(&self, args: ImportRecipeArgs) -> Result<()> {
        let contents = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let params: CreateRecipe = serde_json::from_str(&contents)
            .with_context(|| format!("{} is not a valid recipe document", args.file.display()))?;
        debug!("Importing '{}' from {}", params.title, args.file.display());

        let recipe = if args.cached {
            self.library.cache_recipe(&params).await
        } else {
            self.library.create_recipe(&params).await
        }
        .context("Failed to import recipe")?;
        self.renderer.show(&CreateResult::new(recipe))
    }

    pub async fn list_recipes(&self, params: &ListRecipes) -> Result<()> {
        let recipes = self
            .library
            .list_recipes(params)
            .await
            .context("Failed to list recipes")?;
        self.renderer.show(&recipes)
    }

    async fn search_recipes(&self, params: &SearchRecipes) -> Result<()> {
        let recipes = self
            .library
            .search_recipes(params)
            .await
            .context("Failed to search recipes")?;
        self.renderer.show(&recipes)
    }

    async fn show_recipe(&self, params: &Id) -> Result<()> {
        let Some(recipe) = self.library.get_recipe(params).await? else {
            bail!("Recipe with ID {} not found", params.id);
        };
        self.library
            .record_view(params)
            .await
            .context("Failed to record recipe view")?;
        self.renderer.show(&recipe)
    }

    async fn set_favorite(&self, params: &SetFavorite) -> Result<()> {
        self.library
            .set_favorite(params)
            .await
            .context("Failed to update favorite")?;
        let message = if params.favorite {
            format!("Recipe {} marked as favorite", params.id)
        } else {
            format!("Recipe {} is no longer a favorite", params.id)
        };
        self.renderer.show(&OperationStatus::success(message))
    }

    async fn recent_recipes(&self, params: &RecentViews) -> Result<()> {
        let recipes = self
            .library
            .recent_views(params)
            .await
            .context("Failed to load recent recipes")?;
        self.renderer.show(&recipes)
    }

    async fn delete_recipe(&self, params: &Id) -> Result<()> {
        let Some(recipe) = self.library.get_recipe(params).await? else {
            bail!("Recipe with ID {} not found", params.id);
        };
        self.library
            .delete_recipe(params)
            .await
            .context("Failed to delete recipe")?;
        self.renderer.show(&DeleteResult::new(recipe))
    }
}
