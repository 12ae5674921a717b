//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_catalog;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use pokesync::config::RefreshConfig;
use pokesync::model::{NamedResource, Sprites};
use pokesync::pipeline::{FixedPicker, RefreshPipeline};
use pokesync::remote::{RemoteClient, RemoteError};
use pokesync::store::{
    mapper, InMemoryStore, LocalStore, MoveRecord, PokemonRecord, StatRecord, StoreError,
};
use pokesync::{Pokemon, PokemonListing, PokemonMove, PokemonRef, PokemonStat};

// -- Fixtures -----------------------------------------------------------------

pub fn listing(urls: &[&str]) -> PokemonListing {
    PokemonListing {
        count: urls.len() as u64,
        next: None,
        previous: None,
        results: urls
            .iter()
            .enumerate()
            .map(|(i, url)| PokemonRef::new(format!("entry-{}", i), *url))
            .collect(),
    }
}

pub fn pikachu() -> Pokemon {
    Pokemon {
        name: "pikachu".to_string(),
        sprites: Sprites {
            front_default: "https://img.example/25.png".to_string(),
            back_default: "https://img.example/back/25.png".to_string(),
        },
        stats: vec![stat("hp", 35, 1), stat("attack", 55, 2), stat("speed", 90, 6)],
        moves: vec![
            PokemonMove {
                move_: NamedResource::new("thunder-shock", "https://pokeapi.co/api/v2/move/84/"),
            },
            PokemonMove {
                move_: NamedResource::new("quick-attack", "https://pokeapi.co/api/v2/move/98/"),
            },
        ],
    }
}

pub fn bulbasaur() -> Pokemon {
    Pokemon {
        name: "bulbasaur".to_string(),
        sprites: Sprites {
            front_default: "https://img.example/1.png".to_string(),
            back_default: "https://img.example/back/1.png".to_string(),
        },
        stats: vec![stat("hp", 45, 1)],
        moves: vec![
            PokemonMove::new("razor-wind"),
            PokemonMove::new("swords-dance"),
            PokemonMove::new("cut"),
        ],
    }
}

/// A stat carrying the catalog's reference URL.
pub fn stat(name: &str, base_stat: i64, id: u32) -> PokemonStat {
    PokemonStat {
        base_stat,
        effort: 0,
        stat: NamedResource::new(name, format!("https://pokeapi.co/api/v2/stat/{}/", id)),
    }
}

pub fn unavailable() -> RemoteError {
    RemoteError::Status {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

/// Write `pokemon` into `store` the way a completed refresh would.
pub async fn seed(store: &dyn LocalStore, pokemon: &Pokemon) {
    store
        .insert_pokemon(mapper::pokemon_to_record(pokemon))
        .await
        .unwrap();
    store
        .insert_stats(mapper::stats_to_records(&pokemon.stats))
        .await
        .unwrap();
    store
        .insert_moves(mapper::moves_to_records(&pokemon.moves))
        .await
        .unwrap();
}

pub fn pipeline(
    remote: Arc<ScriptedRemote>,
    store: Arc<dyn LocalStore>,
    index: usize,
) -> RefreshPipeline {
    RefreshPipeline::with_picker(
        remote,
        store,
        RefreshConfig::default(),
        Box::new(FixedPicker(index)),
    )
}

// -- Remote mock --------------------------------------------------------------

/// Remote client answering from pre-loaded queues.
#[derive(Default)]
pub struct ScriptedRemote {
    lists: Mutex<VecDeque<Result<PokemonListing, RemoteError>>>,
    details: Mutex<VecDeque<Result<Pokemon, RemoteError>>>,
    list_calls: Mutex<Vec<(u32, u32)>>,
    detail_calls: Mutex<Vec<u32>>,
    detail_delay: Mutex<Option<Duration>>,
}

impl ScriptedRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_list(&self, result: Result<PokemonListing, RemoteError>) {
        self.lists.lock().push_back(result);
    }

    pub fn push_detail(&self, result: Result<Pokemon, RemoteError>) {
        self.details.lock().push_back(result);
    }

    pub fn set_detail_delay(&self, delay: Duration) {
        *self.detail_delay.lock() = Some(delay);
    }

    pub fn list_calls(&self) -> Vec<(u32, u32)> {
        self.list_calls.lock().clone()
    }

    pub fn detail_calls(&self) -> Vec<u32> {
        self.detail_calls.lock().clone()
    }
}

#[async_trait]
impl RemoteClient for ScriptedRemote {
    async fn list(&self, limit: u32, offset: u32) -> Result<PokemonListing, RemoteError> {
        self.list_calls.lock().push((limit, offset));
        tokio::task::yield_now().await;
        self.lists.lock().pop_front().unwrap_or_else(|| Err(unavailable()))
    }

    async fn fetch_detail(&self, id: u32) -> Result<Pokemon, RemoteError> {
        self.detail_calls.lock().push(id);
        let delay = *self.detail_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.details.lock().pop_front().unwrap_or_else(|| Err(unavailable()))
    }
}

// -- Store mock ---------------------------------------------------------------

/// In-memory store that logs the start and end of every write and can be
/// told to fail one operation.
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inner: InMemoryStore,
    log: Arc<Mutex<Vec<String>>>,
    fail_on: Arc<Mutex<Option<&'static str>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, operation: &'static str) {
        *self.fail_on.lock() = Some(operation);
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn clear_log(&self) {
        self.log.lock().clear();
    }

    async fn record(&self, operation: &'static str) -> Result<(), StoreError> {
        self.log.lock().push(format!("{}:start", operation));
        // Give sibling operations a chance to start before this one ends.
        tokio::task::yield_now().await;
        self.log.lock().push(format!("{}:end", operation));

        if *self.fail_on.lock() == Some(operation) {
            return Err(StoreError::Task(format!("{} failed", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl LocalStore for RecordingStore {
    async fn get_selected_pokemon(&self) -> Result<Option<PokemonRecord>, StoreError> {
        if *self.fail_on.lock() == Some("get_selected_pokemon") {
            return Err(StoreError::Task("get_selected_pokemon failed".to_string()));
        }
        self.inner.get_selected_pokemon().await
    }

    async fn get_selected_stats(&self) -> Result<Vec<StatRecord>, StoreError> {
        self.inner.get_selected_stats().await
    }

    async fn get_selected_moves(&self) -> Result<Vec<MoveRecord>, StoreError> {
        if *self.fail_on.lock() == Some("get_selected_moves") {
            return Err(StoreError::Task("get_selected_moves failed".to_string()));
        }
        self.inner.get_selected_moves().await
    }

    async fn insert_pokemon(&self, record: PokemonRecord) -> Result<(), StoreError> {
        self.record("insert_pokemon").await?;
        self.inner.insert_pokemon(record).await
    }

    async fn insert_stats(&self, records: Vec<StatRecord>) -> Result<(), StoreError> {
        self.record("insert_stats").await?;
        self.inner.insert_stats(records).await
    }

    async fn insert_moves(&self, records: Vec<MoveRecord>) -> Result<(), StoreError> {
        self.record("insert_moves").await?;
        self.inner.insert_moves(records).await
    }

    async fn clear_pokemon(&self) -> Result<(), StoreError> {
        self.record("clear_pokemon").await?;
        self.inner.clear_pokemon().await
    }

    async fn clear_stats(&self) -> Result<(), StoreError> {
        self.record("clear_stats").await?;
        self.inner.clear_stats().await
    }

    async fn clear_moves(&self) -> Result<(), StoreError> {
        self.record("clear_moves").await?;
        self.inner.clear_moves().await
    }
}

/// Position of `entry` in `log`.
pub fn position(log: &[String], entry: &str) -> usize {
    log.iter()
        .position(|e| e == entry)
        .unwrap_or_else(|| panic!("'{}' missing from log {:?}", entry, log))
}
