use std::{env, path::PathBuf, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use bread_ics_core::{
    catalog::RecipeCatalog,
    ics::IcsGenerator,
    prelude::*,
    schedule::{compute_schedule, parse_target_time},
    store::{FileStore, RecipeStore},
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const STORE_ENV_VAR: &str = "BREAD_ICS_STORE";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<RecipeCatalog>>,
    /// Optional file store; custom recipes live only in memory without it
    pub store: Option<Arc<FileStore>>,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

/// Recipe listing entry
#[derive(Serialize)]
struct RecipeSummary {
    id: String,
    name: String,
    #[serde(rename = "totalTime")]
    total_time: f64,
    steps: usize,
    builtin: bool,
}

/// Schedule request parameters
#[derive(Deserialize)]
struct ScheduleQuery {
    recipe: String,
    target: String,          // format: YYYY-MM-DDTHH:MM (datetime-local)
    format: Option<String>,  // "json" or "ics", default "ics"
    calendar_name: Option<String>,
    reminder_minutes: Option<u32>,
}

/// Recipe creation body; total time is derived from the steps
#[derive(Deserialize)]
struct RecipePayload {
    name: String,
    steps: Vec<Step>,
}

pub async fn create_app() -> Result<Router, bread_ics_core::Error> {
    let store = match env::var(STORE_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => {
            tracing::info!("using recipe store at {}", path);
            Some(Arc::new(FileStore::new(PathBuf::from(path))))
        }
        _ => {
            tracing::info!("no recipe store configured, custom recipes are in-memory only");
            None
        }
    };

    let custom = match &store {
        Some(store) => store.load().await?,
        None => Default::default(),
    };

    let state = AppState {
        catalog: Arc::new(RwLock::new(RecipeCatalog::with_custom(custom))),
        store,
    };

    Ok(app(state))
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/recipes", get(list_recipes_handler))
        .route("/recipes", post(create_recipe_handler))
        .route("/recipes/{id}", get(get_recipe_handler))
        .route("/recipes/{id}", delete(delete_recipe_handler))
        .route("/schedule", get(get_schedule_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Root handler
async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Bread ICS Schedule Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Backward-chained bread preparation schedules with ICS export",
        "endpoints": {
            "health": "/health",
            "recipes": "/recipes",
            "schedule": "/schedule?recipe=<id>&target=<YYYY-MM-DDTHH:MM>&format=json|ics"
        }
    }))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Lists built-in and custom recipes
async fn list_recipes_handler(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.read().await;
    let recipes: Vec<_> = catalog
        .list()
        .map(|(id, recipe)| RecipeSummary {
            id: id.to_string(),
            name: recipe.name.clone(),
            total_time: recipe.total_time,
            steps: recipe.steps.len(),
            builtin: RecipeCatalog::is_builtin(id),
        })
        .collect();

    Json(serde_json::json!({ "recipes": recipes }))
}

/// Returns a single recipe with its steps
async fn get_recipe_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Recipe>, AppError> {
    let catalog = state.catalog.read().await;
    let recipe = catalog
        .get(&id)
        .ok_or_else(|| bread_ics_core::Error::InvalidInput(format!("unknown recipe: '{}'", id)))?;

    Ok(Json(recipe.clone()))
}

/// Saves a custom recipe
async fn create_recipe_handler(
    State(state): State<AppState>,
    Json(payload): Json<RecipePayload>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = Recipe::new(payload.name, payload.steps);

    let mut catalog = state.catalog.write().await;
    let id = catalog.save(recipe)?;
    persist_custom(&state, &catalog).await?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// Removes a custom recipe
async fn delete_recipe_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut catalog = state.catalog.write().await;
    let removed = catalog.remove(&id)?;
    persist_custom(&state, &catalog).await?;

    Ok(Json(serde_json::json!({ "removed": removed.name })))
}

/// Computes the schedule for a recipe and target completion time
async fn get_schedule_handler(
    Query(params): Query<ScheduleQuery>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let catalog = state.catalog.read().await;
    let recipe = catalog.get(&params.recipe).ok_or_else(|| {
        bread_ics_core::Error::InvalidInput(format!("unknown recipe: '{}'", params.recipe))
    })?;

    let target_end = parse_target_time(&params.target)?;
    let schedule = compute_schedule(&recipe.steps, target_end)?;

    // Default format is ics
    match params.format.as_deref() {
        Some("json") => Ok(Json(schedule).into_response()),
        _ => {
            let options = IcsOptions {
                calendar_name: params.calendar_name,
                reminder_minutes: params.reminder_minutes,
            };
            let generator = IcsGenerator::new(options);
            let ics_content = generator.generate(&recipe.name, &schedule)?;
            let file_name = IcsGenerator::suggested_file_name(&recipe.name);

            Ok((
                StatusCode::OK,
                [
                    ("Content-Type", "text/calendar; charset=utf-8".to_string()),
                    (
                        "Content-Disposition",
                        format!("attachment; filename=\"{}\"", file_name),
                    ),
                ],
                ics_content,
            )
                .into_response())
        }
    }
}

async fn persist_custom(state: &AppState, catalog: &RecipeCatalog) -> Result<(), AppError> {
    if let Some(store) = &state.store {
        store.persist(catalog.custom()).await?;
    }
    Ok(())
}

/// Application error type
#[derive(Debug)]
struct AppError(bread_ics_core::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self.0 {
            bread_ics_core::Error::InvalidInput(_) | bread_ics_core::Error::DateTime(_) => {
                (StatusCode::BAD_REQUEST, "invalid input")
            }
            bread_ics_core::Error::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation failed")
            }
            bread_ics_core::Error::IcsGeneration(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ICS generation failed")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            message: self.0.to_string(),
        });

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<bread_ics_core::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
