use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const CATALOG: &str = r#"[
  {
    "id": "salad",
    "title": "Tomato Salad",
    "description": "Fresh and quick",
    "ingredients": [
      {"name": "Tomato", "quantity": "2"},
      {"name": "Lettuce", "quantity": "1 head"}
    ],
    "instructions": ["Chop", "Toss"],
    "cuisine": "Greek",
    "cookingTime": 0,
    "dietaryRestrictions": ["Vegan"],
    "status": "approved"
  },
  {
    "id": "omelette",
    "title": "Cheese Omelette",
    "description": "Breakfast classic",
    "ingredients": [
      {"name": "Egg", "quantity": "3"},
      {"name": "Cheese", "quantity": "50 g"}
    ],
    "instructions": ["Whisk", "Fry"],
    "cuisine": "French",
    "cookingTime": 10,
    "status": "approved"
  },
  {
    "id": "cake",
    "title": "Butter Cake",
    "description": "Sweet",
    "ingredients": [
      {"name": "Butter", "quantity": "200 g"},
      {"name": "Flour", "quantity": "2 cups"},
      {"name": "Egg", "quantity": "2"}
    ],
    "instructions": ["Bake"],
    "cookingTime": 45,
    "status": "approved"
  },
  {
    "id": "stew",
    "title": "Secret Stew",
    "description": "Not reviewed yet",
    "ingredients": [{"name": "Tomato", "quantity": "1"}],
    "instructions": ["Stew"],
    "status": "pending"
  }
]"#;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("recipes.json"), CATALOG).unwrap();
    dir
}

fn cook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("virtual-cook").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--pantry")
        .arg(dir.path().join("pantry.json"))
        .arg("--catalog")
        .arg(dir.path().join("recipes.json"))
        .arg("--user")
        .arg("alice");
    cmd
}

fn stock(dir: &TempDir, ingredients: &[&str]) {
    for ingredient in ingredients {
        cook(dir).args(["pantry", "add", ingredient, "1"]).assert().success();
    }
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.arg("--format").arg("json").output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn match_ranks_approved_recipes() {
    let dir = workspace();
    stock(&dir, &["tomato", "Lettuce", "EGG"]);

    let out = json_output(cook(&dir).arg("match"));
    let recs = out["recommendations"].as_array().unwrap();

    let ids: Vec<_> = recs.iter().map(|r| r["recipeId"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["salad", "omelette", "cake"]);

    let percentages: Vec<_> = recs.iter().map(|r| r["matchPercentage"].as_u64().unwrap()).collect();
    assert_eq!(percentages, vec![100, 50, 33]);
    assert_eq!(recs[1]["missingIngredients"], serde_json::json!(["Cheese"]));
    assert_eq!(recs[2]["missingIngredients"], serde_json::json!(["Butter", "Flour"]));
    assert_eq!(recs[0]["recipe"]["title"], "Tomato Salad");
}

#[test]
fn match_respects_limit() {
    let dir = workspace();
    stock(&dir, &["tomato", "lettuce", "egg"]);

    let out = json_output(cook(&dir).args(["match", "--limit", "1"]));
    assert_eq!(out["recommendations"].as_array().unwrap().len(), 1);
}

#[test]
fn match_with_empty_pantry_is_empty() {
    let dir = workspace();
    let out = json_output(cook(&dir).arg("match"));
    assert_eq!(out["recommendations"], serde_json::json!([]));
    assert_eq!(out["pantrySize"], 0);
}

#[test]
fn match_text_output() {
    let dir = workspace();
    stock(&dir, &["tomato", "lettuce"]);

    cook(&dir)
        .arg("match")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tomato Salad"))
        .stdout(predicate::str::contains("100%"))
        .stdout(predicate::str::contains("Cheese Omelette").not());
}

#[test]
fn match_uses_config_aliases_and_substitutes() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("virtualcook.toml"),
        "[aliases]\negg = [\"eggs\"]\n\n[substitutes]\nbutter = [\"margarine\"]\n",
    )
    .unwrap();
    stock(&dir, &["margarine", "flour", "eggs"]);

    let out = json_output(cook(&dir).args(["match", "--substitutes"]));
    let recs = out["recommendations"].as_array().unwrap();

    assert_eq!(recs[0]["recipeId"], "cake");
    assert_eq!(recs[0]["matchPercentage"], 67);
    assert_eq!(recs[0]["substitutes"][0]["missing"], "Butter");
    assert_eq!(recs[0]["substitutes"][0]["available"], serde_json::json!(["margarine"]));
    assert_eq!(recs[1]["recipeId"], "omelette");
}

#[test]
fn bad_alias_config_is_a_config_error() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("virtualcook.toml"),
        "[aliases]\negg = [\"eggs\"]\neggs = [\"huevos\"]\n",
    )
    .unwrap();

    cook(&dir).arg("match").assert().code(3);
}

#[test]
fn explicit_missing_config_fails() {
    let dir = workspace();
    cook(&dir)
        .args(["--config", "nope.toml", "match"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn pantry_add_updates_existing_entry() {
    let dir = workspace();
    cook(&dir)
        .args(["pantry", "add", "Flour", "500", "--unit", "g", "--expires", "2030-01-31"])
        .assert()
        .success();
    cook(&dir).args(["pantry", "add", "flour", "250"]).assert().success();

    let entries = json_output(cook(&dir).args(["pantry", "list"]));
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["ingredient"], "Flour");
    assert_eq!(entries[0]["quantity"], 250.0);
    assert_eq!(entries[0]["unit"], "g");
    assert!(entries[0]["expires_at"].as_str().unwrap().starts_with("2030-01-31"));
}

#[test]
fn pantry_set_and_remove() {
    let dir = workspace();
    stock(&dir, &["egg"]);

    let entry = json_output(cook(&dir).args(["pantry", "set", "EGG", "12"]));
    assert_eq!(entry["quantity"], 12.0);

    cook(&dir)
        .args(["pantry", "remove", "egg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed egg"));

    cook(&dir)
        .args(["pantry", "remove", "egg"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Ingredient not in pantry"));
}

#[test]
fn pantry_expiring_lists_soon_items() {
    let dir = workspace();
    let soon = (chrono::Utc::now() + chrono::Duration::hours(12)).to_rfc3339();
    cook(&dir)
        .args(["pantry", "add", "milk", "1", "--expires", &soon])
        .assert()
        .success();
    cook(&dir)
        .args(["pantry", "add", "rice", "1", "--expires", "2099-01-01"])
        .assert()
        .success();

    let out = json_output(cook(&dir).args(["pantry", "expiring", "--days", "2"]));
    let names: Vec<_> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["ingredient"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["milk"]);
}

#[test]
fn pantry_add_rejects_bad_expiry() {
    let dir = workspace();
    cook(&dir)
        .args(["pantry", "add", "milk", "1", "--expires", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn recipes_list_filters_approved() {
    let dir = workspace();
    let out = json_output(cook(&dir).args(["recipes", "list", "--with", "tomato"]));
    let ids: Vec<_> = out.as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["salad"]);

    let out = json_output(cook(&dir).args(["recipes", "list", "--max-time", "15", "--search", "o"]));
    assert_eq!(out.as_array().unwrap().len(), 2);

    let out = json_output(cook(&dir).args(["recipes", "list", "--diet", "vegan", "--cuisine", "greek"]));
    assert_eq!(out[0]["id"], "salad");
}

#[test]
fn recipes_show_unknown_is_not_found() {
    let dir = workspace();
    cook(&dir)
        .args(["recipes", "show", "nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Recipe not found: nope"));
}

#[test]
fn recipes_submit_then_approve() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("new.json"),
        r#"{
            "title": "Tomato Soup",
            "description": "Warming",
            "ingredients": [{"name": "Tomato", "quantity": "6"}],
            "instructions": ["Simmer", "Blend"],
            "cookingTime": 30
        }"#,
    )
    .unwrap();

    let recipe = json_output(cook(&dir).args(["recipes", "submit", "new.json"]));
    assert_eq!(recipe["status"], "pending");
    let id = recipe["id"].as_str().unwrap().to_string();

    stock(&dir, &["tomato"]);
    let before = json_output(cook(&dir).arg("match"));
    assert!(before["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["recipeId"] != id.as_str()));

    cook(&dir).args(["recipes", "approve", &id]).assert().success();
    let after = json_output(cook(&dir).arg("match"));
    assert!(after["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["recipeId"] == id.as_str() && r["matchPercentage"] == 100));
}

#[test]
fn recipes_submit_rejects_invalid() {
    let dir = workspace();
    std::fs::write(dir.path().join("bad.json"), r#"{"title": "No steps"}"#).unwrap();

    cook(&dir)
        .args(["recipes", "submit", "bad.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("instructions"));
}

#[test]
fn recipes_validate_reports_problems() {
    let dir = workspace();
    cook(&dir)
        .args(["recipes", "validate", "recipes.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 recipes valid"));

    std::fs::write(
        dir.path().join("broken.json"),
        r#"[{"id": "x", "title": "", "ingredients": [], "status": "approved"}]"#,
    )
    .unwrap();
    cook(&dir)
        .args(["recipes", "validate", "broken.json"])
        .assert()
        .code(2);
}

#[test]
fn ingredients_suggest_close_names() {
    let dir = workspace();
    let out = json_output(cook(&dir).args(["ingredients", "suggest", "tomatoe"]));
    assert_eq!(out[0]["name"], "tomato");

    cook(&dir)
        .args(["ingredients", "suggest", "chese"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cheese"));
}

#[test]
fn json_errors_are_structured() {
    let dir = workspace();
    let output = cook(&dir)
        .args(["--format", "json", "recipes", "show", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "RECIPE_NOT_FOUND");
}
