use crate::config::{ExplorerConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::gateway::RecipeGateway;
use crate::model::{MealResponse, RecipeRecord};
use crate::ExplorerError;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;

/// HTTP gateway for TheMealDB's `search.php` and `lookup.php` endpoints
#[derive(Debug, Clone)]
pub struct MealDbGateway {
    client: Client,
    base_url: String,
}

impl MealDbGateway {
    /// Creates a new builder for the gateway
    ///
    /// # Example
    /// ```
    /// use recipe_explorer::MealDbGateway;
    /// use std::time::Duration;
    ///
    /// let gateway = MealDbGateway::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    /// assert!(gateway.base_url().starts_with("https://"));
    /// ```
    pub fn builder() -> MealDbGatewayBuilder {
        MealDbGatewayBuilder::default()
    }

    /// Create a gateway from the `[api]` section of the configuration
    pub fn from_config(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
        Self::builder()
            .base_url(config.api.base_url.clone())
            .timeout(config.api.timeout())
            .user_agent(config.api.user_agent.clone())
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search meals by name, surfacing failures
    ///
    /// A blank query returns no meals without contacting the API.
    pub async fn search_meals(&self, query: &str) -> Result<Vec<RecipeRecord>, ExplorerError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response = self.get_meals("search.php", &[("s", query)]).await?;
        Ok(response.into_records())
    }

    /// Look up a single meal by id, surfacing failures
    ///
    /// `Ok(None)` means the API has no meal with this id.
    pub async fn lookup_meal(&self, id: &str) -> Result<Option<RecipeRecord>, ExplorerError> {
        if id.is_empty() {
            return Ok(None);
        }

        let response = self.get_meals("lookup.php", &[("i", id)]).await?;
        Ok(response.into_records().into_iter().next())
    }

    async fn get_meals(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<MealResponse, ExplorerError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::StatusError(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RecipeGateway for MealDbGateway {
    async fn search(&self, query: &str) -> Vec<RecipeRecord> {
        match self.search_meals(query).await {
            Ok(meals) => meals,
            Err(e) => {
                error!("Error searching meals: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_by_id(&self, id: &str) -> Option<RecipeRecord> {
        match self.lookup_meal(id).await {
            Ok(meal) => meal,
            Err(e) => {
                error!("Error fetching meal details: {}", e);
                None
            }
        }
    }
}

/// Builder for configuring a [`MealDbGateway`]
#[derive(Debug, Default)]
pub struct MealDbGatewayBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MealDbGatewayBuilder {
    /// Point the gateway at another host, e.g. a mock server
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the gateway
    ///
    /// # Errors
    /// Returns `ExplorerError::BuilderError` if the base URL is blank or the
    /// HTTP client cannot be created.
    pub fn build(self) -> Result<MealDbGateway, ExplorerError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if base_url.trim().is_empty() {
            return Err(ExplorerError::BuilderError(
                "Base URL cannot be empty".to_string(),
            ));
        }

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let mut client = Client::builder().timeout(timeout);
        if let Some(user_agent) = self.user_agent {
            client = client.user_agent(user_agent);
        }
        let client = client.build().map_err(|e| {
            ExplorerError::BuilderError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(MealDbGateway { client, base_url })
    }
}
