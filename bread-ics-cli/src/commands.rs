use std::fs;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use bread_ics_core::{
    catalog::RecipeCatalog,
    ics::IcsGenerator,
    prelude::*,
    schedule::{compute_schedule, parse_target_time},
    store::{FileStore, RecipeStore},
};

const APP_NAME: &str = "bread-ics";

/// Export command parameters
pub struct ExportParams {
    pub recipe: String,
    pub target: String,
    pub output: Option<String>,
    pub calendar_name: Option<String>,
    pub reminder_minutes: Option<u32>,
}

/// Recipe file format accepted by `recipes add`; the total time is
/// derived, not authored.
#[derive(Deserialize)]
struct RecipeFile {
    name: String,
    steps: Vec<Step>,
}

fn open_store() -> Result<FileStore> {
    FileStore::with_default_path(APP_NAME).map_err(|e| anyhow!("{}", e))
}

async fn load_catalog(store: &FileStore) -> Result<RecipeCatalog> {
    let custom = store
        .load()
        .await
        .with_context(|| format!("loading custom recipes from {}", store.path().display()))?;
    Ok(RecipeCatalog::with_custom(custom))
}

fn lookup<'a>(catalog: &'a RecipeCatalog, id: &str) -> Result<&'a Recipe> {
    catalog
        .get(id)
        .ok_or_else(|| anyhow!("unknown recipe: '{}' (try `bread-ics recipes list`)", id))
}

/// Plan command: compute and print the schedule
pub async fn plan_command(recipe_id: String, target: String, output: Option<String>) -> Result<()> {
    let store = open_store()?;
    let catalog = load_catalog(&store).await?;
    let recipe = lookup(&catalog, &recipe_id)?;

    let target_end = parse_target_time(&target)?;
    let schedule = compute_schedule(&recipe.steps, target_end)?;

    if schedule.is_empty() {
        println!("Recipe '{}' has no steps.", recipe.name);
        return Ok(());
    }

    println!("{} - finish at {}", recipe.name, target_end.format("%Y-%m-%d %H:%M"));
    println!(
        "Start at {} (total {} hours)",
        schedule[0].start_time.format("%Y-%m-%d %H:%M"),
        recipe.total_time
    );
    println!();

    for step in &schedule {
        println!(
            "  {} - {}  {:<20} {:>5} h  [{}]",
            step.start_time.format("%H:%M"),
            step.end_time.format("%H:%M"),
            step.name,
            step.duration_hours,
            step.kind
        );
    }

    if let Some(path) = output {
        let generator = IcsGenerator::default();
        let ics_content = generator.generate(&recipe.name, &schedule)?;
        fs::write(&path, ics_content)?;
        println!();
        println!("✓ ICS file saved to: {}", path);
    }

    Ok(())
}

/// Export command: write the schedule as an ICS calendar file
pub async fn export_command(params: ExportParams) -> Result<()> {
    let store = open_store()?;
    let catalog = load_catalog(&store).await?;
    let recipe = lookup(&catalog, &params.recipe)?;

    let target_end = parse_target_time(&params.target)?;
    let schedule = compute_schedule(&recipe.steps, target_end)?;

    tracing::info!(
        recipe = %params.recipe,
        steps = schedule.len(),
        "generating ICS calendar"
    );

    let options = IcsOptions {
        calendar_name: params.calendar_name,
        reminder_minutes: params.reminder_minutes,
    };
    let generator = IcsGenerator::new(options);
    let ics_content = generator.generate(&recipe.name, &schedule)?;

    let output_file = params
        .output
        .unwrap_or_else(|| IcsGenerator::suggested_file_name(&recipe.name));

    fs::write(&output_file, ics_content)?;
    println!("✓ ICS file saved to: {}", output_file);

    Ok(())
}

/// List recipes command
pub async fn recipes_list_command() -> Result<()> {
    let store = open_store()?;
    let catalog = load_catalog(&store).await?;

    println!("Available recipes:");
    for (id, recipe) in catalog.list() {
        let origin = if RecipeCatalog::is_builtin(id) {
            "built-in"
        } else {
            "custom"
        };
        println!(
            "  {:<20} {} ({} steps, {} hours, {})",
            id,
            recipe.name,
            recipe.steps.len(),
            recipe.total_time,
            origin
        );
    }

    Ok(())
}

/// Show recipe command
pub async fn recipes_show_command(recipe_id: String) -> Result<()> {
    let store = open_store()?;
    let catalog = load_catalog(&store).await?;
    let recipe = lookup(&catalog, &recipe_id)?;

    println!("{} - {} hours total", recipe.name, recipe.total_time);
    for (index, step) in recipe.steps.iter().enumerate() {
        println!(
            "  {}. {:<20} {:>5} h  [{}]",
            index + 1,
            step.name,
            step.duration_hours,
            step.kind
        );
    }

    Ok(())
}

/// Add recipe command
pub async fn recipes_add_command(file: String) -> Result<()> {
    let content = fs::read_to_string(&file).with_context(|| format!("reading {}", file))?;
    let recipe_file: RecipeFile =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", file))?;
    let recipe = Recipe::new(recipe_file.name, recipe_file.steps);

    let store = open_store()?;
    let mut catalog = load_catalog(&store).await?;

    let id = catalog.save(recipe)?;
    store.persist(catalog.custom()).await?;

    println!("✓ Recipe saved as '{}'", id);
    Ok(())
}

/// Remove recipe command
pub async fn recipes_remove_command(recipe_id: String) -> Result<()> {
    let store = open_store()?;
    let mut catalog = load_catalog(&store).await?;

    let removed = catalog.remove(&recipe_id)?;
    store.persist(catalog.custom()).await?;

    println!("✓ Removed custom recipe '{}'", removed.name);
    Ok(())
}
