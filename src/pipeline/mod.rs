//! The data-refresh pipeline.
//!
//! ```text
//! list(limit, offset) ──→ pick one ──→ fetch_detail(id)
//!                                            │
//!        publish ←── insert ×3 ←── clear ×3 ←┘
//! ```

mod error;
mod picker;
mod refresh;

pub use error::RefreshError;
pub use picker::{FixedPicker, IndexPicker, RandomPicker};
pub use refresh::{RefreshPipeline, EMPTY_MOVES_MESSAGE};
