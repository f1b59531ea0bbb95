use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

use super::types::{Giveaway, Record, Task};

pub const TASKS_FILE: &str = "tasks.json";
pub const GIVEAWAYS_FILE: &str = "giveaways.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid collection: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} has no record id left to assign")]
    IdsExhausted { path: PathBuf },
    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Appended {
    pub index: usize,
    pub id: u64,
}

/// A JSON array on disk, rewritten whole on every append. Appends are
/// serialized through `write_lock`, so concurrent creations never drop records.
pub struct JsonCollection<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let exists = fs::try_exists(&path).await.map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        if !exists {
            write_records::<T>(&path, &[]).await?;
            log::info!("Initialized empty collection at {}", path.display());
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> StoreResult<Vec<T>> {
        read_records(&self.path).await
    }

    /// Read, push, rewrite. A corrupt file aborts before anything is written.
    pub async fn append(&self, mut record: T) -> StoreResult<Appended> {
        let _guard = self.write_lock.lock().await;

        let mut records: Vec<T> = read_records(&self.path).await?;
        let id = next_id(&records).ok_or_else(|| StoreError::IdsExhausted {
            path: self.path.clone(),
        })?;
        record.assign_id(id);
        records.push(record);
        write_records(&self.path, &records).await?;

        Ok(Appended {
            index: records.len() - 1,
            id,
        })
    }
}

/// `None` once the highest id is `u64::MAX`.
fn next_id<T: Record>(records: &[T]) -> Option<u64> {
    match records
        .iter()
        .enumerate()
        .map(|(position, record)| record.id().unwrap_or(position as u64))
        .max()
    {
        Some(highest) => highest.checked_add(1),
        None => Some(0),
    }
}

async fn read_records<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let raw = fs::read(path).await.map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

async fn write_records<T: Serialize>(path: &Path, records: &[T]) -> StoreResult<()> {
    let encoded = serde_json::to_vec_pretty(records)?;
    fs::write(path, encoded).await.map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub struct Stores {
    pub tasks: JsonCollection<Task>,
    pub giveaways: JsonCollection<Giveaway>,
}

impl Stores {
    pub async fn open(data_dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            tasks: JsonCollection::open(data_dir.join(TASKS_FILE)).await?,
            giveaways: JsonCollection::open(data_dir.join(GIVEAWAYS_FILE)).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn open_initializes_missing_files_to_empty_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let stores = Stores::open(&data_dir).await.unwrap();

        assert_eq!(std::fs::read_to_string(data_dir.join(TASKS_FILE)).unwrap(), "[]");
        assert_eq!(std::fs::read_to_string(data_dir.join(GIVEAWAYS_FILE)).unwrap(), "[]");
        assert!(stores.tasks.load().await.unwrap().is_empty());
        assert!(stores.giveaways.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn open_keeps_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TASKS_FILE);
        std::fs::write(&path, r#"[{"title":"Old","description":"d","reward":1.0}]"#).unwrap();

        let tasks = JsonCollection::<Task>::open(&path).await.unwrap();

        assert_eq!(tasks.load().await.unwrap(), vec![Task::new("Old", "d", 1.0)]);
    }

    #[tokio::test]
    async fn append_returns_prior_length_and_grows_by_one() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = JsonCollection::<Task>::open(dir.path().join(TASKS_FILE))
            .await
            .unwrap();

        for expected in 0..3usize {
            let before = tasks.load().await.unwrap().len();
            let appended = tasks
                .append(Task::new(format!("Task {expected}"), "desc", 0.1))
                .await
                .unwrap();
            let after = tasks.load().await.unwrap().len();

            assert_eq!(before, expected);
            assert_eq!(appended.index, before);
            assert_eq!(appended.id, expected as u64);
            assert_eq!(after, before + 1);
        }
    }

    #[tokio::test]
    async fn reload_preserves_order_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let giveaways = JsonCollection::<Giveaway>::open(dir.path().join(GIVEAWAYS_FILE))
            .await
            .unwrap();
        let written = vec![
            Giveaway::new("First", 1, 2.0),
            Giveaway::new("Second", 5, 0.01),
            Giveaway::new("Third", 10, 0.0),
        ];

        for giveaway in written.clone() {
            giveaways.append(giveaway).await.unwrap();
        }
        let reopened = JsonCollection::<Giveaway>::open(giveaways.path().to_path_buf())
            .await
            .unwrap();
        let loaded = reopened.load().await.unwrap();

        assert_eq!(loaded.len(), written.len());
        for (position, (loaded, written)) in loaded.iter().zip(&written).enumerate() {
            assert_eq!(loaded.id, Some(position as u64));
            assert_eq!(loaded.title, written.title);
            assert_eq!(loaded.winner_count, written.winner_count);
            assert_eq!(loaded.reward_per_winner, written.reward_per_winner);
        }
    }

    #[tokio::test]
    async fn ids_continue_after_legacy_records_without_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TASKS_FILE);
        std::fs::write(
            &path,
            r#"[{"title":"a","description":"","reward":1},{"title":"b","description":"","reward":2}]"#,
        )
        .unwrap();
        let tasks = JsonCollection::<Task>::open(&path).await.unwrap();

        let appended = tasks.append(Task::new("c", "", 3.0)).await.unwrap();

        assert_eq!(appended, Appended { index: 2, id: 2 });
    }

    #[tokio::test]
    async fn corrupt_file_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TASKS_FILE);
        let tasks = JsonCollection::<Task>::open(&path).await.unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let result = tasks.append(Task::new("t", "d", 1.0)).await;

        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn exhausted_ids_fail_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TASKS_FILE);
        let existing = format!(
            r#"[{{"id":{},"title":"a","description":"","reward":1}}]"#,
            u64::MAX
        );
        std::fs::write(&path, &existing).unwrap();
        let tasks = JsonCollection::<Task>::open(&path).await.unwrap();

        let result = tasks.append(Task::new("b", "", 1.0)).await;

        assert!(matches!(result, Err(StoreError::IdsExhausted { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), existing);
    }

    #[tokio::test]
    async fn concurrent_appends_keep_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = Arc::new(
            JsonCollection::<Task>::open(dir.path().join(TASKS_FILE))
                .await
                .unwrap(),
        );

        let mut appends = tokio::task::JoinSet::new();
        for n in 0..20 {
            let tasks = Arc::clone(&tasks);
            appends.spawn(async move { tasks.append(Task::new(format!("t{n}"), "", 1.0)).await });
        }

        let mut indices = Vec::new();
        while let Some(joined) = appends.join_next().await {
            indices.push(joined.unwrap().unwrap().index);
        }
        indices.sort_unstable();
        assert_eq!(indices, (0..20).collect::<Vec<_>>());
        assert_eq!(tasks.load().await.unwrap().len(), 20);
    }
}
