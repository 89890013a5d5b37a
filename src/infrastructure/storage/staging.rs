use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

/// Uploaded audio staged on disk for the lifetime of one request.
///
/// The backing file has a random name and is removed when the value is
/// dropped, whichever way the request ends.
pub struct StagedUpload {
    // Declared first so the handle closes before the file is unlinked
    writer: tokio::fs::File,
    file: NamedTempFile,
    len: usize,
}

impl StagedUpload {
    pub fn create(scratch_dir: &Path, prefix: &str) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(".wav")
            .tempfile_in(scratch_dir)?;
        let writer = tokio::fs::File::from_std(file.reopen()?);

        Ok(Self {
            writer,
            file,
            len: 0,
        })
    }

    pub async fn append(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.writer.write_all(chunk).await?;
        self.len += chunk.len();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    pub async fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.writer.flush().await?;
        tokio::fs::read(self.file.path()).await
    }
}
