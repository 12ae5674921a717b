//! Observable state streams.
//!
//! ```text
//! pipeline ──set──→ StatePublisher ──→ Subscription (presentation layer)
//!                        │
//!                        └── current()
//! ```

mod publisher;

pub use publisher::{StatePublisher, Subscription};

use crate::model::{Pokemon, PokemonMove};
use crate::result::ResultState;

/// Stream of the selected pokemon.
pub type PokemonState = ResultState<Pokemon>;

/// Stream of the stored move list.
pub type MovesState = ResultState<Vec<PokemonMove>>;
