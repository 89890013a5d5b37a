use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory holding the reference clips behind stored audio examples
pub struct ExampleFileStore {
    dir: PathBuf,
}

impl ExampleFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write a new clip under a fresh unique name and return that name
    pub async fn save(&self, bytes: &[u8]) -> io::Result<String> {
        let filename = format!("example_{}.wav", Uuid::new_v4().simple());
        tokio::fs::write(self.dir.join(&filename), bytes).await?;
        Ok(filename)
    }

    pub async fn read(&self, filename: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(filename)?).await
    }

    pub async fn remove(&self, filename: &str) -> io::Result<()> {
        tokio::fs::remove_file(self.resolve(filename)?).await
    }

    /// Stored names are bare file names; anything with a path component is refused
    fn resolve(&self, filename: &str) -> io::Result<PathBuf> {
        let is_bare = Path::new(filename)
            .file_name()
            .map(|name| name == filename)
            .unwrap_or(false);
        if !is_bare {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid example filename '{}'", filename),
            ));
        }
        Ok(self.dir.join(filename))
    }
}
