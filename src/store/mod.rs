//! Local persistence for the most recently fetched pokemon.
//!
//! The store holds three tables (main record, stats, moves). Each table
//! supports read-all, insert and clear; the refresh pipeline decides how
//! those operations are ordered.

mod error;
mod file;
pub mod mapper;
mod memory;
mod records;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use records::{MoveRecord, PokemonRecord, StatRecord};

use async_trait::async_trait;

/// Table-level operations on the local store.
#[async_trait]
pub trait LocalStore: Send + Sync {
    async fn get_selected_pokemon(&self) -> Result<Option<PokemonRecord>, StoreError>;
    async fn get_selected_stats(&self) -> Result<Vec<StatRecord>, StoreError>;
    async fn get_selected_moves(&self) -> Result<Vec<MoveRecord>, StoreError>;

    async fn insert_pokemon(&self, record: PokemonRecord) -> Result<(), StoreError>;
    async fn insert_stats(&self, records: Vec<StatRecord>) -> Result<(), StoreError>;
    async fn insert_moves(&self, records: Vec<MoveRecord>) -> Result<(), StoreError>;

    async fn clear_pokemon(&self) -> Result<(), StoreError>;
    async fn clear_stats(&self) -> Result<(), StoreError>;
    async fn clear_moves(&self) -> Result<(), StoreError>;
}
