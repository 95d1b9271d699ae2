use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A temporary home for the database and an empty config directory
struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temporary directory"),
        }
    }

    /// `cook --no-color --database-file <tmp>` with no user config or API key
    fn cook(&self) -> Command {
        let mut cmd = Command::cargo_bin("cook").expect("Failed to find cook binary");
        cmd.env("XDG_CONFIG_HOME", self.dir.path())
            .env_remove("COOKALONG_API_KEY")
            .arg("--no-color")
            .arg("--database-file")
            .arg(self.dir.path().join("cli_test.db"));
        cmd
    }

    fn add_pancakes(&self) {
        self.cook()
            .args([
                "recipe",
                "add",
                "Pancakes",
                "--step",
                "Whisk flour, eggs and milk",
                "--step",
                "Rest the batter for 10 minutes",
                "--step",
                "Fry until golden",
                "--ingredient",
                "flour=200 g",
                "--minutes",
                "30",
            ])
            .assert()
            .success();
    }
}

#[test]
fn test_list_empty() {
    let env = TestEnv::new();
    env.cook()
        .args(["recipe", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes found."));
}

#[test]
fn test_add_recipe() {
    let env = TestEnv::new();
    env.cook()
        .args(["recipe", "add", "Toast", "-s", "Toast the bread", "-i", "bread=2 slices"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved recipe with ID: 1"))
        .stdout(predicate::str::contains("# 1. Toast"))
        .stdout(predicate::str::contains("- 2 slices bread"))
        .stdout(predicate::str::contains("1. Toast the bread"));
}

#[test]
fn test_add_recipe_requires_steps() {
    let env = TestEnv::new();
    env.cook().args(["recipe", "add", "Nothing"]).assert().failure();
}

#[test]
fn test_default_command_lists_recipes() {
    let env = TestEnv::new();
    env.add_pancakes();
    env.cook()
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Pancakes"))
        .stdout(predicate::str::contains("3 steps · 30 min · user"));
}

#[test]
fn test_search_and_show() {
    let env = TestEnv::new();
    env.add_pancakes();

    env.cook()
        .args(["recipe", "search", "FLOUR"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pancakes"));

    env.cook()
        .args(["recipe", "search", "lasagne"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes found."));

    env.cook()
        .args(["recipe", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Steps"))
        .stdout(predicate::str::contains("2. Rest the batter for 10 minutes"));

    env.cook()
        .args(["recipe", "recent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Pancakes"));
}

#[test]
fn test_show_missing_recipe() {
    let env = TestEnv::new();
    env.cook()
        .args(["recipe", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recipe with ID 42 not found"));
}

#[test]
fn test_favorites() {
    let env = TestEnv::new();
    env.add_pancakes();

    env.cook()
        .args(["recipe", "favorite", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Recipe 1 marked as favorite"));

    env.cook()
        .args(["recipe", "list", "--favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pancakes ★"));

    env.cook()
        .args(["recipe", "favorite", "1", "--off"])
        .assert()
        .success();

    env.cook()
        .args(["recipe", "list", "--favorites"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes found."));
}

#[test]
fn test_import_cached_recipe() {
    let env = TestEnv::new();
    let file = env.dir.path().join("soup.json");
    fs::write(
        &file,
        r#"{
            "title": "Lentil Soup",
            "external_id": "spoon-42",
            "ingredients": [{"name": "red lentils", "amount": "250 g"}],
            "steps": ["Rinse the lentils", "Simmer 20 minutes"]
        }"#,
    )
    .unwrap();

    for _ in 0..2 {
        env.cook()
            .args(["recipe", "import", "--cached"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("# 1. Lentil Soup"))
            .stdout(predicate::str::contains("Origin: cached"));
    }

    env.cook()
        .args(["recipe", "list", "--origin", "user"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes found."));
}

#[test]
fn test_import_invalid_document() {
    let env = TestEnv::new();
    let file = env.dir.path().join("broken.json");
    fs::write(&file, "{ not json").unwrap();

    env.cook()
        .args(["recipe", "import"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid recipe document"));
}

#[test]
fn test_delete_recipe() {
    let env = TestEnv::new();
    env.add_pancakes();

    env.cook()
        .args(["recipe", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted recipe 'Pancakes' (ID: 1)"));

    env.cook()
        .args(["recipe", "delete", "1"])
        .assert()
        .failure();
}

#[test]
fn test_manual_cook_along() {
    let env = TestEnv::new();
    env.add_pancakes();

    env.cook()
        .args(["start", "1"])
        .write_stdin("next\ntimer\ntimers\nnext\nfinish\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Cooking Pancakes"))
        .stdout(predicate::str::contains("## Step 1 of 3"))
        .stdout(predicate::str::contains("## Step 2 of 3"))
        .stdout(predicate::str::contains("Started timer #1 Step 2 · 10:00"))
        .stdout(predicate::str::contains("## Step 3 of 3"))
        .stdout(predicate::str::contains("# Finished Pancakes"))
        .stdout(predicate::str::contains("🔊").not());
}

#[test]
fn test_cook_along_reports_bad_commands() {
    let env = TestEnv::new();
    env.add_pancakes();

    env.cook()
        .args(["start", "1"])
        .write_stdin("back\nnext\nnext\nnext\nflambé\ntimer 999999999999999999\nstatus\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("is not a duration"))
        .stdout(predicate::str::contains("Cooking since"))
        .stdout(predicate::str::contains("Error: Cannot go past the last step"))
        .stdout(predicate::str::contains("Error: Unknown command `flambé`"))
        .stdout(predicate::str::contains("# Finished").not());
}

#[test]
fn test_question_without_assistant_key() {
    let env = TestEnv::new();
    env.add_pancakes();

    env.cook()
        .args(["start", "1"])
        .write_stdin("ask Can I use oat milk?\nhistory\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Couldn't get an answer right now"))
        .stdout(predicate::str::contains("No questions asked yet."));
}

#[test]
fn test_voice_mode_narrates() {
    let env = TestEnv::new();
    env.add_pancakes();

    env.cook()
        .args(["start", "1", "--voice"])
        .write_stdin("/next\n/exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: **voice**"))
        .stdout(predicate::str::contains("🔊 Step 2 of 3. Rest the batter"))
        .stdout(predicate::str::contains("🔊 Goodbye, and enjoy your meal!"));
}

#[test]
fn test_start_missing_recipe() {
    let env = TestEnv::new();
    env.cook()
        .args(["start", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot start recipe 9"));
}
