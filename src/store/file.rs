//! Durable store keeping one JSON file per table.
//!
//! Every write takes an exclusive `fs2` lock on the table's lock file, so
//! two processes sharing a data directory never interleave writes to the
//! same table. Files are replaced via temp file + rename.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{LocalStore, MoveRecord, PokemonRecord, StatRecord, StoreError};

const POKEMON_TABLE: &str = "pokemon";
const STATS_TABLE: &str = "stats";
const MOVES_TABLE: &str = "moves";

#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            path: dir.clone(),
            source: e,
        })?;
        tracing::debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read<T>(&self, table: &'static str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let dir = self.dir.clone();
        run_blocking(move || read_table(&dir, table)).await
    }

    async fn append<T>(&self, table: &'static str, rows: Vec<T>) -> Result<(), StoreError>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        let dir = self.dir.clone();
        run_blocking(move || {
            let _guard = lock_table(&dir, table)?;
            let mut existing: Vec<T> = read_table(&dir, table)?;
            existing.extend(rows);
            write_table(&dir, table, &existing)
        })
        .await
    }

    async fn clear(&self, table: &'static str) -> Result<(), StoreError> {
        let dir = self.dir.clone();
        run_blocking(move || {
            let _guard = lock_table(&dir, table)?;
            write_table::<serde_json::Value>(&dir, table, &[])
        })
        .await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
}

fn table_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{}.json", table))
}

fn lock_table(dir: &Path, table: &str) -> Result<File, StoreError> {
    let path = dir.join(format!("{}.lock", table));
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)
        .map_err(|e| StoreError::Lock {
            path: path.clone(),
            source: e,
        })?;
    file.lock_exclusive()
        .map_err(|e| StoreError::Lock { path, source: e })?;
    Ok(file)
}

fn read_table<T: DeserializeOwned>(dir: &Path, table: &str) -> Result<Vec<T>, StoreError> {
    let path = table_path(dir, table);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read(&path).map_err(|e| StoreError::Io {
        path: path.clone(),
        source: e,
    })?;
    if content.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&content).map_err(|e| StoreError::Serde { path, source: e })
}

fn write_table<T: Serialize>(dir: &Path, table: &str, rows: &[T]) -> Result<(), StoreError> {
    let path = table_path(dir, table);
    let tmp = dir.join(format!("{}.json.tmp", table));

    let bytes = serde_json::to_vec_pretty(rows).map_err(|e| StoreError::Serde {
        path: path.clone(),
        source: e,
    })?;

    let io_err = |source| StoreError::Io {
        path: tmp.clone(),
        source,
    };
    let mut file = File::create(&tmp).map_err(io_err)?;
    file.write_all(&bytes).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;

    fs::rename(&tmp, &path).map_err(|e| StoreError::Io { path, source: e })
}

#[async_trait]
impl LocalStore for JsonFileStore {
    async fn get_selected_pokemon(&self) -> Result<Option<PokemonRecord>, StoreError> {
        let rows: Vec<PokemonRecord> = self.read(POKEMON_TABLE).await?;
        Ok(rows.into_iter().next())
    }

    async fn get_selected_stats(&self) -> Result<Vec<StatRecord>, StoreError> {
        self.read(STATS_TABLE).await
    }

    async fn get_selected_moves(&self) -> Result<Vec<MoveRecord>, StoreError> {
        self.read(MOVES_TABLE).await
    }

    async fn insert_pokemon(&self, record: PokemonRecord) -> Result<(), StoreError> {
        self.append(POKEMON_TABLE, vec![record]).await
    }

    async fn insert_stats(&self, records: Vec<StatRecord>) -> Result<(), StoreError> {
        self.append(STATS_TABLE, records).await
    }

    async fn insert_moves(&self, records: Vec<MoveRecord>) -> Result<(), StoreError> {
        self.append(MOVES_TABLE, records).await
    }

    async fn clear_pokemon(&self) -> Result<(), StoreError> {
        self.clear(POKEMON_TABLE).await
    }

    async fn clear_stats(&self) -> Result<(), StoreError> {
        self.clear(STATS_TABLE).await
    }

    async fn clear_moves(&self) -> Result<(), StoreError> {
        self.clear(MOVES_TABLE).await
    }
}
