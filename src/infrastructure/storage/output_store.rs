use moka::future::Cache;
use moka::notification::{ListenerFuture, RemovalCause};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const OUTPUT_PREFIX: &str = "generated_";
const MAX_TRACKED_OUTPUTS: u64 = 1_000;

/// Generated audio kept on disk for a limited time so it can be fetched by name.
///
/// Entries expire after the configured TTL (or when capacity is exceeded);
/// expiry deletes the backing file.
pub struct OutputStore {
    dir: PathBuf,
    entries: Cache<String, PathBuf>,
}

impl OutputStore {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_TRACKED_OUTPUTS)
            .time_to_live(ttl)
            .async_eviction_listener(|name: Arc<String>, path: PathBuf, cause| -> ListenerFuture {
                Box::pin(async move {
                    if cause == RemovalCause::Replaced {
                        return;
                    }
                    match tokio::fs::remove_file(&path).await {
                        Ok(()) => {
                            tracing::debug!(output = %name, ?cause, "Generated audio removed")
                        }
                        Err(e) => tracing::warn!(
                            output = %name,
                            error = %e,
                            "Failed to remove generated audio"
                        ),
                    }
                })
            })
            .build();

        Self {
            dir: dir.into(),
            entries,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory and delete files left over from a previous run
    pub async fn prepare(&self) -> io::Result<usize> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let is_output = entry
                .file_name()
                .to_str()
                .map(|name| name.starts_with(OUTPUT_PREFIX))
                .unwrap_or(false);
            if is_output && tokio::fs::remove_file(entry.path()).await.is_ok() {
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Persist WAV bytes and return the name they can be fetched under
    pub async fn save(&self, wav_bytes: &[u8]) -> io::Result<String> {
        let name = format!("{}{}.wav", OUTPUT_PREFIX, Uuid::new_v4().simple());
        let path = self.dir.join(&name);
        tokio::fs::write(&path, wav_bytes).await?;
        self.entries.insert(name.clone(), path).await;
        Ok(name)
    }

    /// Read a live output; expired or unknown names yield `None`
    pub async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match self.entries.get(name).await {
            Some(path) => match tokio::fs::read(&path).await {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e),
            },
            None => Ok(None),
        }
    }

    /// Apply pending expirations, deleting their files
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Drop every tracked output
    pub async fn purge(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
    }
}
