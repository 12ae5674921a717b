use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::RefreshConfig;
use crate::model::Pokemon;
use crate::pipeline::{IndexPicker, RandomPicker, RefreshError};
use crate::remote::RemoteClient;
use crate::result::ResultState;
use crate::state::{MovesState, PokemonState, StatePublisher};
use crate::store::{mapper, LocalStore, StoreError};

/// Message published when the stored move list is empty.
pub const EMPTY_MOVES_MESSAGE: &str = "Something went wrong when reading data from database";

/// Fetch a random pokemon, replace the stored copy and publish the outcome.
///
/// Collaborators are passed in explicitly. Refreshes on one pipeline are
/// serialized: a second `refresh` publishes `Loading` at once but waits for
/// the first to finish before touching the network or the store.
pub struct RefreshPipeline {
    remote: Arc<dyn RemoteClient>,
    store: Arc<dyn LocalStore>,
    picker: Box<dyn IndexPicker>,
    config: RefreshConfig,
    in_flight: AsyncMutex<()>,
}

impl RefreshPipeline {
    pub fn new(
        remote: Arc<dyn RemoteClient>,
        store: Arc<dyn LocalStore>,
        config: RefreshConfig,
    ) -> Self {
        Self::with_picker(remote, store, config, Box::new(RandomPicker))
    }

    pub fn with_picker(
        remote: Arc<dyn RemoteClient>,
        store: Arc<dyn LocalStore>,
        config: RefreshConfig,
        picker: Box<dyn IndexPicker>,
    ) -> Self {
        Self {
            remote,
            store,
            picker,
            config,
            in_flight: AsyncMutex::new(()),
        }
    }

    /// Run one refresh, publishing `Loading` and then the terminal state.
    ///
    /// Returns the terminal state that was published.
    pub async fn refresh(&self, publisher: &StatePublisher<PokemonState>) -> PokemonState {
        let span = tracing::info_span!("refresh", refresh_id = %Uuid::new_v4());
        async {
            publisher.set(ResultState::Loading);

            let _guard = self.in_flight.lock().await;
            let terminal = self.fetch_and_replace().await;
            match &terminal {
                ResultState::Success(pokemon) => {
                    tracing::info!(pokemon = %pokemon.name, "Refresh complete")
                }
                ResultState::Error { message, .. } => {
                    tracing::warn!(reason = %message, "Refresh failed")
                }
                ResultState::Loading => {}
            }

            publisher.set(terminal.clone());
            terminal
        }
        .instrument(span)
        .await
    }

    async fn fetch_and_replace(&self) -> PokemonState {
        let listing = match self
            .remote
            .list(self.config.list_limit, self.config.list_offset)
            .await
        {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(error_type = e.error_type(), error = %e, "Listing request failed");
                return ResultState::from_error(e);
            }
        };

        // Empty page: empty message, no cause.
        if listing.is_empty() {
            tracing::warn!(total = listing.count, "Listing returned no entries");
            return ResultState::error("", None);
        }

        let index = self.picker.pick(listing.results.len());
        let Some(reference) = listing.results.get(index) else {
            let len = listing.results.len();
            tracing::warn!(index, len, "Picker returned out-of-range index");
            return ResultState::from_error(RefreshError::IndexOutOfRange { index, len });
        };

        let id = match reference.id() {
            Ok(id) => id,
            Err(source) => {
                tracing::warn!(url = %reference.url, error = %source, "Malformed reference");
                return ResultState::from_error(RefreshError::InvalidReference { source });
            }
        };
        tracing::debug!(id, pokemon = %reference.name, "Selected pokemon");

        let pokemon = match self.remote.fetch_detail(id).await {
            Ok(pokemon) => pokemon,
            Err(e) => {
                tracing::warn!(id, error_type = e.error_type(), error = %e, "Detail request failed");
                return ResultState::from_error(e);
            }
        };

        if let Err(source) = self.replace_stored(&pokemon).await {
            tracing::error!(error = %source, "Replacing stored pokemon failed");
            return ResultState::from_error(RefreshError::Replace { source });
        }

        ResultState::Success(pokemon)
    }

    /// Clear all three tables, then insert the new rows.
    ///
    /// Each half runs its three operations concurrently and waits for all of
    /// them; no insert starts before every clear has finished. If any insert
    /// fails the tables are cleared again, so the store never holds part of
    /// a pokemon.
    async fn replace_stored(&self, pokemon: &Pokemon) -> Result<(), StoreError> {
        self.clear_stored().await?;
        tracing::debug!("Stored pokemon cleared");

        let store = &self.store;
        let inserted = tokio::join!(
            store.insert_pokemon(mapper::pokemon_to_record(pokemon)),
            store.insert_stats(mapper::stats_to_records(&pokemon.stats)),
            store.insert_moves(mapper::moves_to_records(&pokemon.moves))
        );
        if let Err(source) = first_error([inserted.0, inserted.1, inserted.2]) {
            if let Err(e) = self.clear_stored().await {
                tracing::error!(error = %e, "Clearing partially inserted pokemon failed");
            } else {
                tracing::debug!("Partially inserted pokemon cleared");
            }
            return Err(source);
        }
        tracing::debug!(
            stats = pokemon.stats.len(),
            moves = pokemon.moves.len(),
            "Stored pokemon inserted"
        );

        Ok(())
    }

    async fn clear_stored(&self) -> Result<(), StoreError> {
        let store = &self.store;
        let cleared = tokio::join!(
            store.clear_pokemon(),
            store.clear_stats(),
            store.clear_moves()
        );
        first_error([cleared.0, cleared.1, cleared.2])
    }

    /// Publish the stored pokemon without touching the network.
    ///
    /// No `Loading` is published first. Empty tables produce a pokemon with
    /// empty fields rather than an error; only store failures are errors.
    pub async fn load_from_local_store(
        &self,
        publisher: &StatePublisher<PokemonState>,
    ) -> PokemonState {
        let store = &self.store;
        let (main, stats, moves) = tokio::join!(
            store.get_selected_pokemon(),
            store.get_selected_stats(),
            store.get_selected_moves()
        );

        let state = match (main, stats, moves) {
            (Ok(main), Ok(stats), Ok(moves)) => {
                ResultState::Success(mapper::records_to_pokemon(main, stats, moves))
            }
            (Err(source), _, _) | (_, Err(source), _) | (_, _, Err(source)) => {
                tracing::warn!(error = %source, "Reading stored pokemon failed");
                ResultState::from_error(RefreshError::Read { source })
            }
        };

        publisher.set(state.clone());
        state
    }

    /// Publish `Loading`, then the stored move list.
    pub async fn load_moves_from_local_store(
        &self,
        publisher: &StatePublisher<MovesState>,
    ) -> MovesState {
        publisher.set(ResultState::Loading);

        let state = match self.store.get_selected_moves().await {
            Ok(records) if records.is_empty() => ResultState::error(EMPTY_MOVES_MESSAGE, None),
            Ok(records) => ResultState::Success(mapper::records_to_moves(records)),
            Err(source) => {
                tracing::warn!(error = %source, "Reading stored moves failed");
                ResultState::from_error(RefreshError::Read { source })
            }
        };

        publisher.set(state.clone());
        state
    }
}

fn first_error<const N: usize>(results: [Result<(), StoreError>; N]) -> Result<(), StoreError> {
    results.into_iter().collect()
}
