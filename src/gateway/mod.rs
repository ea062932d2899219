mod meal_db;

pub use meal_db::{MealDbGateway, MealDbGatewayBuilder};

use crate::model::RecipeRecord;
use async_trait::async_trait;

/// Read-only access to the remote recipe database.
///
/// Implementations recover from their own failures: a transport or parse
/// error looks exactly like "no matches" (`search`) or "not found"
/// (`fetch_by_id`) to the caller, and is logged by the implementation.
#[async_trait]
pub trait RecipeGateway: Send + Sync {
    /// Recipes whose name matches `query` (trimmed, non-empty).
    async fn search(&self, query: &str) -> Vec<RecipeRecord>;

    /// The recipe with the given identifier, if any.
    async fn fetch_by_id(&self, id: &str) -> Option<RecipeRecord>;
}
