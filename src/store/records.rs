//! Row types persisted by the local store, one per table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub name: String,
    pub front_default: String,
    pub back_default: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    /// Index of the stat in the fetched pokemon's stat list.
    pub position: u32,
    pub stat_name: String,
    pub base_stat: i64,
    #[serde(default)]
    pub effort: i64,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Index of the move in the fetched pokemon's move list.
    pub position: u32,
    pub move_name: String,
    #[serde(default)]
    pub url: String,
}
