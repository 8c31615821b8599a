use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, Recipe, Result, Step, StepKind};


/// Derives the storage key for a recipe name: lowercased, runs of
/// whitespace collapsed to a single hyphen.
pub fn slugify(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
    whitespace
        .replace_all(name.trim().to_lowercase().as_str(), "-")
        .into_owned()
}

/// Built-in recipes, always available and never persisted
pub fn builtin_recipes() -> &'static BTreeMap<String, Recipe> {
    static BUILTINS: OnceLock<BTreeMap<String, Recipe>> = OnceLock::new();
    BUILTINS.get_or_init(|| {
        let mut recipes = BTreeMap::new();

        recipes.insert(
            "sourdough".to_string(),
            Recipe::new(
                "Sourdough Bread",
                vec![
                    Step::new("Feed Starter", 8.0, StepKind::Preparation),
                    Step::new("Autolyse", 1.0, StepKind::Waiting),
                    Step::new("Mixing", 0.5, StepKind::Active),
                    Step::new("Bulk Fermentation", 4.0, StepKind::Waiting),
                    Step::new("Shaping", 0.5, StepKind::Active),
                    Step::new("Proofing", 8.0, StepKind::Waiting),
                    Step::new("Baking", 1.0, StepKind::Active),
                ],
            ),
        );

        recipes.insert(
            "baguette".to_string(),
            Recipe::new(
                "Baguette",
                vec![
                    Step::new("Mixing", 0.5, StepKind::Active),
                    Step::new("First Rise", 2.0, StepKind::Waiting),
                    Step::new("Shaping", 0.5, StepKind::Active),
                    Step::new("Second Rise", 1.0, StepKind::Waiting),
                    Step::new("Baking", 0.5, StepKind::Active),
                ],
            ),
        );

        recipes.insert(
            "wholewheat".to_string(),
            Recipe::new(
                "Whole Wheat Bread",
                vec![
                    Step::new("Mixing", 0.33, StepKind::Active),
                    Step::new("Kneading", 0.25, StepKind::Active),
                    Step::new("First Rise", 1.5, StepKind::Waiting),
                    Step::new("Shaping", 0.25, StepKind::Active),
                    Step::new("Second Rise", 1.0, StepKind::Waiting),
                    Step::new("Baking", 0.66, StepKind::Active),
                ],
            ),
        );

        recipes
    })
}

/// Recipe catalog: the union of the immutable built-in recipes and the
/// user's custom recipes. Only the custom partition is persistable.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    custom: BTreeMap<String, Recipe>,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a previously persisted custom partition.
    pub fn with_custom(custom: BTreeMap<String, Recipe>) -> Self {
        Self { custom }
    }

    /// Looks up a recipe by id, custom recipes first.
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.custom.get(id).or_else(|| builtin_recipes().get(id))
    }

    pub fn is_builtin(id: &str) -> bool {
        builtin_recipes().contains_key(id)
    }

    /// Iterates the union, built-ins first, then custom recipes.
    pub fn list(&self) -> impl Iterator<Item = (&str, &Recipe)> {
        builtin_recipes()
            .iter()
            .chain(self.custom.iter())
            .map(|(id, recipe)| (id.as_str(), recipe))
    }

    /// The persistable subset
    pub fn custom(&self) -> &BTreeMap<String, Recipe> {
        &self.custom
    }

    /// Validates and saves a custom recipe, returning its assigned id.
    ///
    /// The id is derived from the name via [`slugify`]. Ids of built-in
    /// recipes are reserved; saving under an existing custom id replaces
    /// that recipe.
    pub fn save(&mut self, recipe: Recipe) -> Result<String> {
        recipe.validate()?;

        let id = slugify(&recipe.name);
        if Self::is_builtin(&id) {
            return Err(Error::Validation(format!(
                "'{}' collides with a built-in recipe",
                recipe.name
            )));
        }

        tracing::info!(id = %id, name = %recipe.name, "saving custom recipe");
        self.custom.insert(id.clone(), recipe);
        Ok(id)
    }

    /// Removes a custom recipe. Built-in recipes cannot be removed.
    pub fn remove(&mut self, id: &str) -> Result<Recipe> {
        if Self::is_builtin(id) {
            return Err(Error::InvalidInput(format!(
                "built-in recipe '{}' cannot be removed",
                id
            )));
        }

        self.custom
            .remove(id)
            .ok_or_else(|| Error::InvalidInput(format!("unknown recipe: '{}'", id)))
    }
}
