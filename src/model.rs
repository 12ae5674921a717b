//! Domain types for the pokemon catalog.
//!
//! These mirror the shape the remote catalog returns, trimmed to the fields
//! the refresh flow and the local store care about.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `{ name, url }` pair pointing at another catalog resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Errors raised when a reference URL does not carry a usable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("reference url '{url}' has no identifier segment")]
    MissingSegment { url: String },

    #[error("reference url '{url}' has non-numeric identifier '{segment}'")]
    NotNumeric { url: String, segment: String },

    #[error("reference url '{url}' has non-positive identifier {id}")]
    NotPositive { url: String, id: i64 },
}

/// One row of a paged listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRef {
    #[serde(default)]
    pub name: String,
    pub url: String,
}

impl PokemonRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Identifier embedded in the reference URL.
    ///
    /// The URL is split on `/` and the second-to-last segment is taken, so
    /// `https://pokeapi.co/api/v2/pokemon/25/` yields `25`. The segment must
    /// parse as a positive integer.
    pub fn id(&self) -> Result<u32, ReferenceError> {
        let segments: Vec<&str> = self.url.split('/').collect();
        if segments.len() < 2 {
            return Err(ReferenceError::MissingSegment {
                url: self.url.clone(),
            });
        }

        let segment = segments[segments.len() - 2];
        let id: i64 = segment.parse().map_err(|_| ReferenceError::NotNumeric {
            url: self.url.clone(),
            segment: segment.to_string(),
        })?;

        if id <= 0 || id > i64::from(u32::MAX) {
            return Err(ReferenceError::NotPositive {
                url: self.url.clone(),
                id,
            });
        }

        Ok(id as u32)
    }
}

/// A page of references. Immutable once fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonListing {
    /// Total number of entries in the remote catalog.
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<PokemonRef>,
}

impl PokemonListing {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub front_default: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub back_default: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: i64,
    #[serde(default)]
    pub effort: i64,
    pub stat: NamedResource,
}

impl PokemonStat {
    pub fn new(stat_name: impl Into<String>, base_stat: i64) -> Self {
        Self {
            base_stat,
            effort: 0,
            stat: NamedResource::new(stat_name, ""),
        }
    }

    pub fn stat_name(&self) -> &str {
        &self.stat.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonMove {
    #[serde(rename = "move")]
    pub move_: NamedResource,
}

impl PokemonMove {
    pub fn new(move_name: impl Into<String>) -> Self {
        Self {
            move_: NamedResource::new(move_name, ""),
        }
    }

    pub fn move_name(&self) -> &str {
        &self.move_.name
    }
}

/// The fully detailed entity for one selected pokemon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
