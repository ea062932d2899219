//! Search TheMealDB by name and open recipes with their ingredients and steps.
//!
//! The interesting parts are the [`SearchCoordinator`], which debounces and
//! deduplicates keystrokes and never lets a stale response overwrite a newer
//! one, and the normalization helpers [`ingredients::extract`] and
//! [`instructions::segment`].

pub mod config;
pub mod detail;
pub mod error;
pub mod gateway;
pub mod ingredients;
pub mod instructions;
pub mod model;
pub mod routes;
pub mod search;

pub use config::ExplorerConfig;
pub use detail::{DetailLoader, DetailPhase, DetailState, RecipeDetail};
pub use error::ExplorerError;
pub use gateway::{MealDbGateway, MealDbGatewayBuilder, RecipeGateway};
pub use model::{Ingredient, IngredientSlot, RecipeRecord, MAX_INGREDIENT_SLOTS};
pub use routes::Route;
pub use search::{summarize, SearchCoordinator, SearchState};

/// Search recipes by name against the API named in `config`.
///
/// Unlike the [`RecipeGateway`] methods, failures are returned to the caller.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use recipe_explorer::ExplorerConfig;
///
/// let config = ExplorerConfig::load()?;
/// let meals = recipe_explorer::search_recipes(&config, "chicken").await?;
/// for meal in &meals {
///     println!("{}: {}", meal.name, recipe_explorer::summarize(meal));
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(
    config: &ExplorerConfig,
    query: &str,
) -> Result<Vec<RecipeRecord>, ExplorerError> {
    MealDbGateway::from_config(config)?.search_meals(query).await
}

/// Fetch one recipe by id and prepare it for display.
///
/// Returns `Ok(None)` when no recipe has this id.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use recipe_explorer::ExplorerConfig;
///
/// let config = ExplorerConfig::default();
/// if let Some(detail) = recipe_explorer::fetch_recipe(&config, "52772").await? {
///     for (n, step) in detail.steps.iter().enumerate() {
///         println!("{}. {}", n + 1, step);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_recipe(
    config: &ExplorerConfig,
    id: &str,
) -> Result<Option<RecipeDetail>, ExplorerError> {
    let meal = MealDbGateway::from_config(config)?.lookup_meal(id).await?;
    Ok(meal.map(RecipeDetail::from))
}
