//! Presentation-facing owner of the pipeline and its state streams.
//!
//! Operations are fire-and-forget: they spawn a task on the current tokio
//! runtime and return immediately; results arrive on the subscribed
//! streams. Dropping the view model aborts in-flight tasks at their next
//! await point and, once those tasks are gone, closes both streams. A
//! refresh aborted between clearing and inserting leaves the store empty.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::pipeline::RefreshPipeline;
use crate::state::{MovesState, PokemonState, StatePublisher, Subscription};

pub struct PokemonViewModel {
    pipeline: Arc<RefreshPipeline>,
    pokemon: StatePublisher<PokemonState>,
    moves: StatePublisher<MovesState>,
    tasks: Mutex<JoinSet<()>>,
    /// Number of spawned operations that have not finished or been dropped.
    in_flight: watch::Sender<usize>,
}

/// Decrements the in-flight count when the task future goes away, whether
/// it completed, panicked or was aborted.
struct InFlightGuard(watch::Sender<usize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

impl PokemonViewModel {
    pub fn new(pipeline: Arc<RefreshPipeline>) -> Self {
        Self {
            pipeline,
            pokemon: StatePublisher::new("pokemon"),
            moves: StatePublisher::new("moves"),
            tasks: Mutex::new(JoinSet::new()),
            in_flight: watch::Sender::new(0),
        }
    }

    pub fn subscribe_pokemon(&self) -> Subscription<PokemonState> {
        self.pokemon.subscribe()
    }

    pub fn subscribe_moves(&self) -> Subscription<MovesState> {
        self.moves.subscribe()
    }

    pub fn current_pokemon(&self) -> Option<PokemonState> {
        self.pokemon.current()
    }

    pub fn current_moves(&self) -> Option<MovesState> {
        self.moves.current()
    }

    /// Fetch a new random pokemon.
    pub fn refresh(&self) {
        let pipeline = Arc::clone(&self.pipeline);
        let publisher = self.pokemon.clone();
        self.spawn("refresh", async move {
            pipeline.refresh(&publisher).await;
        });
    }

    /// Publish the stored pokemon.
    pub fn load_from_local_store(&self) {
        let pipeline = Arc::clone(&self.pipeline);
        let publisher = self.pokemon.clone();
        self.spawn("load_pokemon", async move {
            pipeline.load_from_local_store(&publisher).await;
        });
    }

    /// Publish the stored move list.
    pub fn load_moves_from_local_store(&self) {
        let pipeline = Arc::clone(&self.pipeline);
        let publisher = self.moves.clone();
        self.spawn("load_moves", async move {
            pipeline.load_moves_from_local_store(&publisher).await;
        });
    }

    /// Wait until no operation is in flight.
    ///
    /// The tasks stay owned by the view model, so `shutdown` still reaches
    /// them while a caller waits, and dropping this future cancels nothing.
    pub async fn wait_idle(&self) {
        let mut idle = self.in_flight.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = idle.wait_for(|n| *n == 0).await;
    }

    /// Abort every in-flight operation.
    pub fn shutdown(&self) {
        let mut tasks = self.tasks.lock();
        if !tasks.is_empty() {
            tracing::debug!(in_flight = tasks.len(), "Aborting view model tasks");
        }
        tasks.abort_all();
    }

    fn spawn<F>(&self, operation: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock();
        // Reap finished tasks so the set does not grow without bound.
        while let Some(result) = tasks.try_join_next() {
            if let Err(e) = result {
                if e.is_panic() {
                    tracing::error!(error = %e, "View model task panicked");
                }
            }
        }

        self.in_flight.send_modify(|n| *n += 1);
        let guard = InFlightGuard(self.in_flight.clone());
        tracing::debug!(operation, "Spawning view model task");
        tasks.spawn(async move {
            let _guard = guard;
            task.await;
        });
    }
}

impl Drop for PokemonViewModel {
    fn drop(&mut self) {
        self.shutdown();
    }
}
