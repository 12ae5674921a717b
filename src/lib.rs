//! Fetch a random pokemon from a remote catalog, keep it in a local store
//! and publish the outcome to observers.

pub mod config;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod remote;
pub mod result;
pub mod state;
pub mod store;
pub mod viewmodel;

pub use model::{Pokemon, PokemonListing, PokemonMove, PokemonRef, PokemonStat};
pub use pipeline::RefreshPipeline;
pub use result::ResultState;
pub use viewmodel::PokemonViewModel;
