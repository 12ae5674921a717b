//! Remote catalog access.
//!
//! The refresh pipeline only depends on [`RemoteClient`]; [`PokeApiClient`]
//! is the HTTP implementation used by the binary.

mod client;
mod error;

pub use client::PokeApiClient;
pub use error::RemoteError;

use async_trait::async_trait;

use crate::model::{Pokemon, PokemonListing};

/// Read operations against the remote catalog.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Fetch one page of references.
    async fn list(&self, limit: u32, offset: u32) -> Result<PokemonListing, RemoteError>;

    /// Fetch one full pokemon by identifier.
    async fn fetch_detail(&self, id: u32) -> Result<Pokemon, RemoteError>;
}
