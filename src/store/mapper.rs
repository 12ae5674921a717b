//! Conversions between domain types and store records.

use crate::model::{NamedResource, Pokemon, PokemonMove, PokemonStat, Sprites};
use crate::store::records::{MoveRecord, PokemonRecord, StatRecord};

pub fn pokemon_to_record(pokemon: &Pokemon) -> PokemonRecord {
    PokemonRecord {
        name: pokemon.name.clone(),
        front_default: pokemon.sprites.front_default.clone(),
        back_default: pokemon.sprites.back_default.clone(),
    }
}

pub fn stats_to_records(stats: &[PokemonStat]) -> Vec<StatRecord> {
    stats
        .iter()
        .enumerate()
        .map(|(i, s)| StatRecord {
            position: i as u32,
            stat_name: s.stat.name.clone(),
            base_stat: s.base_stat,
            effort: s.effort,
            url: s.stat.url.clone(),
        })
        .collect()
}

pub fn moves_to_records(moves: &[PokemonMove]) -> Vec<MoveRecord> {
    moves
        .iter()
        .enumerate()
        .map(|(i, m)| MoveRecord {
            position: i as u32,
            move_name: m.move_.name.clone(),
            url: m.move_.url.clone(),
        })
        .collect()
}

pub fn records_to_stats(mut records: Vec<StatRecord>) -> Vec<PokemonStat> {
    records.sort_by_key(|r| r.position);
    records
        .into_iter()
        .map(|r| PokemonStat {
            base_stat: r.base_stat,
            effort: r.effort,
            stat: NamedResource::new(r.stat_name, r.url),
        })
        .collect()
}

pub fn records_to_moves(mut records: Vec<MoveRecord>) -> Vec<PokemonMove> {
    records.sort_by_key(|r| r.position);
    records
        .into_iter()
        .map(|r| PokemonMove {
            move_: NamedResource::new(r.move_name, r.url),
        })
        .collect()
}

/// Reassemble a pokemon from the three tables.
///
/// A missing main record yields empty name and sprites.
pub fn records_to_pokemon(
    main: Option<PokemonRecord>,
    stats: Vec<StatRecord>,
    moves: Vec<MoveRecord>,
) -> Pokemon {
    let main = main.unwrap_or_default();
    Pokemon {
        name: main.name,
        sprites: Sprites {
            front_default: main.front_default,
            back_default: main.back_default,
        },
        stats: records_to_stats(stats),
        moves: records_to_moves(moves),
    }
}
