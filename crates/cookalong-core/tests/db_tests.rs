use cookalong_core::{
    params::{CreateRecipe, ListRecipes},
    CookAlongError, Database, RecipeOrigin,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn omelette() -> CreateRecipe {
    CreateRecipe {
        title: "  Omelette  ".to_string(),
        steps: vec!["Beat the eggs".to_string(), "Cook 3 minutes".to_string()],
        ..Default::default()
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();
    assert!(temp_file.path().exists());
    assert!(db.list_recipes(&ListRecipes::default()).unwrap().is_empty());
}

#[test]
fn test_reopening_keeps_data() {
    let (temp_file, mut db) = create_test_db();
    let recipe = db.insert_recipe(&omelette(), RecipeOrigin::User).unwrap();
    drop(db);

    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    let loaded = db.get_recipe(recipe.id).unwrap().expect("recipe should exist");
    assert_eq!(loaded.title, "Omelette");
}

#[test]
fn test_steps_are_numbered_from_one() {
    let (_temp_file, mut db) = create_test_db();
    let recipe = db.insert_recipe(&omelette(), RecipeOrigin::User).unwrap();

    assert_eq!(recipe.steps.len(), 2);
    assert_eq!(recipe.steps[0].number, 1);
    assert_eq!(recipe.steps[1].number, 2);
    assert_eq!(recipe.steps[1].instruction, "Cook 3 minutes");
}

#[test]
fn test_blank_step_rejected() {
    let (_temp_file, mut db) = create_test_db();
    let mut recipe = omelette();
    recipe.steps.insert(1, "   ".to_string());
    let err = db.insert_recipe(&recipe, RecipeOrigin::User).unwrap_err();
    assert!(matches!(err, CookAlongError::InvalidInput { ref field, .. } if field == "steps"));
    assert!(db.list_recipes(&ListRecipes::default()).unwrap().is_empty());
}

#[test]
fn test_title_required() {
    let (_temp_file, mut db) = create_test_db();
    let mut recipe = omelette();
    recipe.title = " ".to_string();
    let err = db.insert_recipe(&recipe, RecipeOrigin::User).unwrap_err();
    assert!(matches!(err, CookAlongError::InvalidInput { ref field, .. } if field == "title"));
}

#[test]
fn test_favorite_toggle() {
    let (_temp_file, mut db) = create_test_db();
    let recipe = db.insert_recipe(&omelette(), RecipeOrigin::User).unwrap();

    db.set_favorite(recipe.id, true).unwrap();
    assert!(db.get_recipe(recipe.id).unwrap().unwrap().favorite);
    db.set_favorite(recipe.id, false).unwrap();
    assert!(!db.get_recipe(recipe.id).unwrap().unwrap().favorite);

    assert!(matches!(
        db.set_favorite(999, true),
        Err(CookAlongError::RecipeNotFound { id: 999 })
    ));
}

#[test]
fn test_search_escapes_like_wildcards() {
    let (_temp_file, mut db) = create_test_db();
    let mut discount = omelette();
    discount.title = "100% Rye Bread".to_string();
    db.insert_recipe(&discount, RecipeOrigin::User).unwrap();
    db.insert_recipe(&omelette(), RecipeOrigin::User).unwrap();

    let results = db.search_recipes("100%").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "100% Rye Bread");

    assert!(db.search_recipes("_").unwrap().is_empty());
}
