//! Cook Along CLI
//!
//! Manages stored recipes and runs interactive cook-along sessions in the
//! terminal.

mod args;
mod cli;
mod console;
mod cook;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use cookalong_core::{params::ListRecipes, CookAlongConfig, RecipeLibraryBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        config,
        no_color,
        command,
    } = Args::parse();

    let config =
        CookAlongConfig::load(config.as_deref()).context("Failed to load configuration")?;

    let library = RecipeLibraryBuilder::new()
        .with_database_path(database_file.or_else(|| config.database_file.clone()))
        .build()
        .await
        .context("Failed to open recipe library")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Cook Along started");

    match command {
        Some(Recipe { command }) => {
            Cli::new(&library, &renderer)
                .handle_recipe_command(command)
                .await
        }
        Some(Start(args)) => cook::run(&library, &config, &renderer, args).await,
        None => {
            Cli::new(&library, &renderer)
                .list_recipes(&ListRecipes::default())
                .await
        }
    }
}
