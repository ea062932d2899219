use crate::gateway::RecipeGateway;
use crate::model::{Ingredient, RecipeRecord};
use crate::{ingredients, instructions};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Everything the detail view renders for one recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    pub record: RecipeRecord,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

impl From<RecipeRecord> for RecipeDetail {
    fn from(record: RecipeRecord) -> Self {
        let ingredients = ingredients::extract(&record);
        let steps = instructions::segment(record.instructions.as_deref());
        Self {
            record,
            ingredients,
            steps,
        }
    }
}

/// Exactly one of loading, failed or showing a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailPhase {
    #[default]
    Loading,
    /// Not found, or the lookup failed
    Failed,
    Loaded(RecipeDetail),
}

#[derive(Debug, Clone, Default)]
pub struct DetailState {
    /// Identifier of the latest requested recipe
    pub id: Option<String>,
    pub phase: DetailPhase,
    generation: u64,
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, DetailPhase::Loading)
    }

    pub fn has_error(&self) -> bool {
        matches!(self.phase, DetailPhase::Failed)
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        match &self.phase {
            DetailPhase::Loaded(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Loads the recipe named by the current route. When ids change quickly only
/// the latest one is rendered.
pub struct DetailLoader {
    gateway: Arc<dyn RecipeGateway>,
    state: Arc<watch::Sender<DetailState>>,
    in_flight: Option<JoinHandle<()>>,
}

impl DetailLoader {
    pub fn new(gateway: Arc<dyn RecipeGateway>) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            gateway,
            state: Arc::new(state),
            in_flight: None,
        }
    }

    /// Start fetching `id`, superseding any earlier load.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load(&mut self, id: &str) {
        let mut token = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            token = state.generation;
            state.id = Some(id.to_string());
            state.phase = DetailPhase::Loading;
        });
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        info!("Loading recipe '{}'", id);
        let id = id.to_string();
        let gateway = Arc::clone(&self.gateway);
        let state = Arc::clone(&self.state);
        self.in_flight = Some(tokio::spawn(async move {
            let phase = match gateway.fetch_by_id(&id).await {
                Some(record) => DetailPhase::Loaded(RecipeDetail::from(record)),
                None => {
                    debug!("Recipe '{}' unavailable", id);
                    DetailPhase::Failed
                }
            };

            let applied = state.send_if_modified(|state| {
                if state.generation != token {
                    return false;
                }
                state.phase = phase;
                true
            });
            if !applied {
                warn!("Discarding superseded recipe '{}'", id);
            }
        }));
    }

    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }
}

impl Drop for DetailLoader {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
