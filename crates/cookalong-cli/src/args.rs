//! Command-line argument definitions using clap.
//!
//! Each subcommand has a clap-derived argument struct with a `From`
//! conversion into the matching core parameter type:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → RecipeLibrary
//! ```
//!
//! Core parameter types stay free of clap attributes; help text, aliases and
//! argument shapes live here.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use cookalong_core::{
    params::{CreateRecipe, Id, ListRecipes, RecentViews, SearchRecipes, SetFavorite},
    Ingredient, RecipeOrigin,
};

/// Step-by-step cooking in the terminal
///
/// Store recipes, then cook along one step at a time with timers, a cooking
/// assistant, and an optional voice mode.
#[derive(Parser)]
#[command(version, about, name = "cook")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to the configured file or
    /// $XDG_DATA_HOME/cookalong/cookalong.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the configuration file. Defaults to
    /// $XDG_CONFIG_HOME/cookalong/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// - `recipe`: manage stored recipes
/// - `start`: cook along with a recipe
#[derive(Subcommand)]
pub enum Commands {
    /// Manage recipes
    #[command(alias = "r")]
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Cook along with a recipe, one step at a time
    Start(StartArgs),
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Add a recipe written by hand
    Add(AddRecipeArgs),
    /// Import a recipe from a JSON file
    Import(ImportRecipeArgs),
    /// List stored recipes
    #[command(alias = "ls")]
    List(ListRecipesArgs),
    /// Search titles and ingredients
    Search(SearchRecipesArgs),
    /// Show a recipe with its ingredients and steps
    Show(RecipeIdArgs),
    /// Mark or unmark a favorite
    Favorite(FavoriteArgs),
    /// Recently opened recipes
    Recent(RecentArgs),
    /// Delete a recipe
    #[command(alias = "rm")]
    Delete(RecipeIdArgs),
}

/// Add a recipe
#[derive(ClapArgs)]
pub struct AddRecipeArgs {
    /// Title of the recipe
    pub title: String,
    /// A step, in cooking order; repeat for every step
    #[arg(short, long = "step", required = true)]
    pub steps: Vec<String>,
    /// An ingredient as NAME or NAME=AMOUNT; repeat for every ingredient
    #[arg(short, long = "ingredient", value_parser = parse_ingredient)]
    pub ingredients: Vec<Ingredient>,
    /// Short description shown in lists
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long)]
    pub servings: Option<u32>,
    /// Total time in minutes
    #[arg(long)]
    pub minutes: Option<u32>,
}

impl From<AddRecipeArgs> for CreateRecipe {
    fn from(val: AddRecipeArgs) -> Self {
        CreateRecipe {
            title: val.title,
            summary: val.summary,
            external_id: None,
            servings: val.servings,
            ready_minutes: val.minutes,
            ingredients: val.ingredients,
            steps: val.steps,
        }
    }
}

/// Parses `flour=200 g` or `salt`.
fn parse_ingredient(value: &str) -> Result<Ingredient, String> {
    let (name, amount) = match value.split_once('=') {
        Some((name, amount)) => (name.trim(), Some(amount.trim())),
        None => (value.trim(), None),
    };
    if name.is_empty() {
        return Err("ingredient name cannot be empty".to_string());
    }
    Ok(Ingredient {
        name: name.to_string(),
        amount: amount.filter(|a| !a.is_empty()).map(str::to_string),
    })
}

/// Import a recipe document
#[derive(ClapArgs)]
pub struct ImportRecipeArgs {
    /// JSON file with title, steps and optional ingredients
    pub file: PathBuf,
    /// Store as a cached provider recipe, replacing an earlier copy with the
    /// same external_id
    #[arg(long)]
    pub cached: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OriginArg {
    User,
    Cached,
}

impl From<OriginArg> for RecipeOrigin {
    fn from(val: OriginArg) -> Self {
        match val {
            OriginArg::User => RecipeOrigin::User,
            OriginArg::Cached => RecipeOrigin::Cached,
        }
    }
}

/// List recipes
#[derive(ClapArgs)]
pub struct ListRecipesArgs {
    /// Only show favorites
    #[arg(short, long)]
    pub favorites: bool,
    /// Only show recipes of one origin
    #[arg(long, value_enum)]
    pub origin: Option<OriginArg>,
}

impl From<ListRecipesArgs> for ListRecipes {
    fn from(val: ListRecipesArgs) -> Self {
        ListRecipes {
            favorites_only: val.favorites,
            origin: val.origin.map(Into::into),
        }
    }
}

/// Search recipes
#[derive(ClapArgs)]
pub struct SearchRecipesArgs {
    /// Text to look for in titles and ingredient names
    pub query: String,
}

impl From<SearchRecipesArgs> for SearchRecipes {
    fn from(val: SearchRecipesArgs) -> Self {
        SearchRecipes { query: val.query }
    }
}

#[derive(ClapArgs)]
pub struct RecipeIdArgs {
    /// ID of the recipe
    pub id: u64,
}

impl From<RecipeIdArgs> for Id {
    fn from(val: RecipeIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Mark a favorite
#[derive(ClapArgs)]
pub struct FavoriteArgs {
    /// ID of the recipe
    pub id: u64,
    /// Remove the favorite mark instead
    #[arg(long)]
    pub off: bool,
}

impl From<FavoriteArgs> for SetFavorite {
    fn from(val: FavoriteArgs) -> Self {
        SetFavorite {
            id: val.id,
            favorite: !val.off,
        }
    }
}

/// Recently opened recipes
#[derive(ClapArgs)]
pub struct RecentArgs {
    /// How many recipes to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: u32,
}

impl From<RecentArgs> for RecentViews {
    fn from(val: RecentArgs) -> Self {
        RecentViews { limit: val.limit }
    }
}

/// Start cooking
#[derive(ClapArgs)]
pub struct StartArgs {
    /// ID of the recipe to cook
    pub id: u64,
    /// Begin in voice mode
    #[arg(long)]
    pub voice: bool,
}
