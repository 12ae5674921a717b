use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::store::{LocalStore, MoveRecord, PokemonRecord, StatRecord, StoreError};

/// In-memory store. Clone-friendly via Arc; clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Tables>,
}

#[derive(Default)]
struct Tables {
    pokemon: Mutex<Vec<PokemonRecord>>,
    stats: Mutex<Vec<StatRecord>>,
    moves: Mutex<Vec<MoveRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in the main table.
    pub fn pokemon_count(&self) -> usize {
        self.inner.pokemon.lock().len()
    }

    pub fn stats_snapshot(&self) -> Vec<StatRecord> {
        self.inner.stats.lock().clone()
    }

    pub fn moves_snapshot(&self) -> Vec<MoveRecord> {
        self.inner.moves.lock().clone()
    }
}

#[async_trait]
impl LocalStore for InMemoryStore {
    async fn get_selected_pokemon(&self) -> Result<Option<PokemonRecord>, StoreError> {
        Ok(self.inner.pokemon.lock().first().cloned())
    }

    async fn get_selected_stats(&self) -> Result<Vec<StatRecord>, StoreError> {
        Ok(self.inner.stats.lock().clone())
    }

    async fn get_selected_moves(&self) -> Result<Vec<MoveRecord>, StoreError> {
        Ok(self.inner.moves.lock().clone())
    }

    async fn insert_pokemon(&self, record: PokemonRecord) -> Result<(), StoreError> {
        self.inner.pokemon.lock().push(record);
        Ok(())
    }

    async fn insert_stats(&self, records: Vec<StatRecord>) -> Result<(), StoreError> {
        self.inner.stats.lock().extend(records);
        Ok(())
    }

    async fn insert_moves(&self, records: Vec<MoveRecord>) -> Result<(), StoreError> {
        self.inner.moves.lock().extend(records);
        Ok(())
    }

    async fn clear_pokemon(&self) -> Result<(), StoreError> {
        self.inner.pokemon.lock().clear();
        Ok(())
    }

    async fn clear_stats(&self) -> Result<(), StoreError> {
        self.inner.stats.lock().clear();
        Ok(())
    }

    async fn clear_moves(&self) -> Result<(), StoreError> {
        self.inner.moves.lock().clear();
        Ok(())
    }
}
