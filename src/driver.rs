//! PopulationDriver: re-populates the whole schema on every session
//!
//! Runs are serialized on one task. Session notifications that arrive
//! while a run is in flight are coalesced: once the run finishes, exactly
//! one follow-up run uses the latest session.

use crate::populate::{Populator, ResolvedTree};
use crate::schema::Schema;
use crate::session::{Session, SessionGate, SessionState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Callback invoked after each authenticated population completes
pub type LoggedInHook = Arc<dyn Fn() + Send + Sync>;

/// Driver behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Populate once at start even without a session
    pub populate_on_start: bool,
    /// Publish an empty tree when the session is cleared
    pub clear_on_logout: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            populate_on_start: true,
            clear_on_logout: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// One published population run
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    /// Increments with every published tree, starting at 1
    pub generation: u64,
    /// The session the run was performed under
    pub session: Option<Session>,
    pub tree: ResolvedTree,
}

pub struct PopulationDriver {
    populator: Populator,
    schema: Arc<Schema>,
    gate: Arc<dyn SessionGate>,
    config: DriverConfig,
    logged_in: Option<LoggedInHook>,
}

impl PopulationDriver {
    pub fn new(populator: Populator, schema: Arc<Schema>, gate: Arc<dyn SessionGate>) -> Self {
        Self {
            populator,
            schema,
            gate,
            config: DriverConfig::default(),
            logged_in: None,
        }
    }

    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Invoke `hook` once after every authenticated population, after the
    /// tree has been published
    pub fn on_logged_in(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.logged_in = Some(Arc::new(hook));
        self
    }

    /// Start the driver on the current tokio runtime.
    ///
    /// Dropping the returned handle stops the driver.
    pub fn spawn(self) -> DriverHandle {
        let (populations_tx, populations) = watch::channel(None);
        let (state_tx, state) = watch::channel(DriverState::Unauthenticated);
        let (shutdown, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut runner = Runner {
                driver: self,
                populations: populations_tx,
                state: state_tx,
                generation: 0,
            };
            runner.run(shutdown_rx).await;
        });

        DriverHandle {
            populations,
            state,
            shutdown,
            task,
        }
    }
}

struct Runner {
    driver: PopulationDriver,
    populations: watch::Sender<Option<Arc<Population>>>,
    state: watch::Sender<DriverState>,
    generation: u64,
}

impl Runner {
    async fn run(&mut self, mut shutdown: oneshot::Receiver<()>) {
        let mut sessions = self.driver.gate.subscribe();

        // Current state first, then transitions
        let initial = sessions.borrow_and_update().clone();
        match initial {
            SessionState::Active(session) => self.populate(Some(session)).await,
            _ if self.driver.config.populate_on_start => self.populate(None).await,
            _ => {}
        }

        loop {
            tokio::select! {
                changed = sessions.changed() => {
                    if changed.is_err() {
                        debug!("session gate closed, driver stopping");
                        break;
                    }
                }
                _ = &mut shutdown => {
                    debug!("driver shutdown requested");
                    break;
                }
            }

            let current = sessions.borrow_and_update().clone();
            match current {
                SessionState::Active(session) => self.populate(Some(session)).await,
                SessionState::Anonymous => self.logged_out(),
                SessionState::Initializing => {}
            }
        }
    }

    async fn populate(&mut self, session: Option<Session>) {
        let authenticated = session.is_some();
        let tree = self.driver.populator.populate_schema(&self.driver.schema).await;
        if authenticated {
            self.state.send_replace(DriverState::Authenticated);
        }
        self.publish(session, tree);

        if authenticated {
            if let Some(hook) = &self.driver.logged_in {
                hook();
            }
        }
    }

    fn logged_out(&mut self) {
        let was_authenticated = *self.state.borrow() == DriverState::Authenticated;
        self.state.send_replace(DriverState::Unauthenticated);
        if was_authenticated && self.driver.config.clear_on_logout {
            info!("session cleared, dropping resolved tree");
            self.publish(None, ResolvedTree::new());
        } else {
            debug!("session cleared, keeping resolved tree");
        }
    }

    fn publish(&mut self, session: Option<Session>, tree: ResolvedTree) {
        self.generation += 1;
        info!(
            generation = self.generation,
            fields = tree.len(),
            authenticated = session.is_some(),
            "population published"
        );
        self.populations.send_replace(Some(Arc::new(Population {
            generation: self.generation,
            session,
            tree,
        })));
    }
}

/// Handle to a running driver
pub struct DriverHandle {
    populations: watch::Receiver<Option<Arc<Population>>>,
    state: watch::Receiver<DriverState>,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl DriverHandle {
    /// The most recently published population
    pub fn latest(&self) -> Option<Arc<Population>> {
        self.populations.borrow().clone()
    }

    /// Observe published populations
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Population>>> {
        self.populations.clone()
    }

    pub fn state(&self) -> DriverState {
        *self.state.borrow()
    }

    /// Wait for a population of at least `generation`. `None` if the
    /// driver stops before publishing one.
    pub async fn wait_for_generation(&self, generation: u64) -> Option<Arc<Population>> {
        let mut populations = self.populations.clone();
        loop {
            let current = populations.borrow_and_update().clone();
            if let Some(population) = current {
                if population.generation >= generation {
                    return Some(population);
                }
            }
            if populations.changed().await.is_err() {
                return None;
            }
        }
    }

    /// Stop the driver and wait for its task to finish. A run in flight
    /// completes first.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        let _ = self.task.await;
    }
}
