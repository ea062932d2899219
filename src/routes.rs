/// The two views of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Search box and result list
    Home,
    /// Single recipe, `recipe/:id`
    RecipeDetail { id: String },
}

impl Route {
    /// Resolve a path such as `/recipe/52772`. Unknown paths fall back to
    /// [`Route::Home`].
    pub fn resolve(path: &str) -> Route {
        let path = path.trim().trim_matches('/');
        let mut segments = path.split('/');

        match (segments.next(), segments.next(), segments.next()) {
            (Some("recipe"), Some(id), None) if !id.is_empty() => Route::RecipeDetail {
                id: id.to_string(),
            },
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::RecipeDetail { id } => format!("/recipe/{}", id),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Recipe Explorer - Find Delicious Recipes",
            Route::RecipeDetail { .. } => "Recipe Details",
        }
    }
}
