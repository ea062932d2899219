use crate::gateway::RecipeGateway;
use crate::ingredients;
use crate::model::RecipeRecord;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Quiet period a query must survive before it is sent to the gateway.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

const SUMMARY_INGREDIENTS: usize = 3;

/// Observable state of a search view.
///
/// `meals` is never absent: "nothing typed yet" and "nothing matched" are
/// told apart by `has_searched`.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Latest text entered by the user, untrimmed
    pub query: String,
    pub meals: Vec<RecipeRecord>,
    pub is_loading: bool,
    pub has_searched: bool,
    /// Token of the latest accepted dispatch or reset. Results carrying an
    /// older token are dropped.
    generation: u64,
}

impl SearchState {
    fn clear(&mut self) {
        self.generation += 1;
        self.meals.clear();
        self.is_loading = false;
        self.has_searched = false;
    }
}

enum Command {
    Query(String),
    Reset,
}

/// Drives incremental search: debounces query changes, collapses repeats and
/// makes sure only the most recently dispatched query's results are shown.
///
/// Owns a background task on the current tokio runtime; dropping the
/// coordinator stops it and abandons any outstanding gateway call.
pub struct SearchCoordinator {
    commands: mpsc::UnboundedSender<Command>,
    state: Arc<watch::Sender<SearchState>>,
    worker: JoinHandle<()>,
}

impl SearchCoordinator {
    /// Must be called from within a tokio runtime.
    pub fn new(gateway: Arc<dyn RecipeGateway>) -> Self {
        Self::with_debounce(gateway, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(gateway: Arc<dyn RecipeGateway>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        let state = Arc::new(state);
        let (commands, receiver) = mpsc::unbounded_channel();

        let worker = QueryWorker {
            gateway,
            state: Arc::clone(&state),
            debounce,
            pending: None,
            last_dispatched: None,
            in_flight: None,
        };
        let worker = tokio::spawn(worker.run(receiver));

        Self {
            commands,
            state,
            worker,
        }
    }

    /// Feed the current contents of the search box.
    ///
    /// A blank query clears the results at once and never reaches the
    /// gateway; anything else is searched once it has been stable for the
    /// debounce period.
    pub fn on_query_changed(&self, new_query: &str) {
        let trimmed = new_query.trim();

        if trimmed.is_empty() {
            self.state.send_modify(|state| {
                state.query = new_query.to_string();
                state.clear();
            });
            self.send(Command::Reset);
        } else {
            self.state
                .send_modify(|state| state.query = new_query.to_string());
            self.send(Command::Query(trimmed.to_string()));
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("Search worker has stopped; query change ignored");
        }
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// Comma separated names of the first three ingredients, for list previews.
pub fn summarize(record: &RecipeRecord) -> String {
    ingredients::extract(record)
        .into_iter()
        .take(SUMMARY_INGREDIENTS)
        .map(|ingredient| ingredient.name)
        .collect::<Vec<_>>()
        .join(", ")
}

struct QueryWorker {
    gateway: Arc<dyn RecipeGateway>,
    state: Arc<watch::Sender<SearchState>>,
    debounce: Duration,
    /// Query waiting out its quiet period, with the instant it becomes due
    pending: Option<(String, Instant)>,
    last_dispatched: Option<String>,
    in_flight: Option<JoinHandle<()>>,
}

impl QueryWorker {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            let deadline = self.pending.as_ref().map(|(_, due)| *due);

            tokio::select! {
                // commands first, so a reset already queued beats a due query
                biased;

                command = commands.recv() => match command {
                    Some(Command::Query(query)) => {
                        debug!("Query '{}' pending for {:?}", query, self.debounce);
                        self.pending = Some((query, Instant::now() + self.debounce));
                    }
                    Some(Command::Reset) => self.reset(),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((query, _)) = self.pending.take() {
                        self.settle(query);
                    }
                }
            }
        }
    }

    fn settle(&mut self, query: String) {
        if self.last_dispatched.as_deref() == Some(query.as_str()) {
            debug!("Query '{}' unchanged since last search, skipping", query);
            return;
        }
        self.dispatch(query);
    }

    fn dispatch(&mut self, query: String) {
        let mut token = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            token = state.generation;
            state.is_loading = true;
            state.has_searched = true;
        });
        self.abort_in_flight();
        self.last_dispatched = Some(query.clone());

        info!("Searching recipes for '{}'", query);
        let gateway = Arc::clone(&self.gateway);
        let state = Arc::clone(&self.state);
        self.in_flight = Some(tokio::spawn(async move {
            let meals = gateway.search(&query).await;
            let found = meals.len();

            let applied = state.send_if_modified(|state| {
                if state.generation != token {
                    return false;
                }
                state.meals = meals;
                state.is_loading = false;
                true
            });

            if applied {
                debug!("Search '{}' returned {} recipes", query, found);
            } else {
                warn!("Discarding superseded results for '{}'", query);
            }
        }));
    }

    fn reset(&mut self) {
        self.pending = None;
        self.last_dispatched = None;
        self.abort_in_flight();
        // a dispatch may have slipped in after the caller cleared
        self.state.send_if_modified(|state| {
            if !state.is_loading && !state.has_searched && state.meals.is_empty() {
                return false;
            }
            state.clear();
            true
        });
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl Drop for QueryWorker {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}
