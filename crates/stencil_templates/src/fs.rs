//! File-system collaborators.
//!
//! Prompt generation touches the file system at exactly two points: loading
//! a template and persisting the output. Both are single-shot async calls
//! behind a trait so the pipeline can run against the local disk or a fake.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::FsError;

/// Reads template text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Read a text file given as a relative path.
    async fn read_text(&self, path: &str) -> Result<String, FsError>;

    /// Whether a relative path exists.
    async fn exists(&self, path: &str) -> bool;
}

/// Persists generated output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Write `content` to a relative destination, returning the final path.
    async fn write_text(&self, path: &str, content: &str) -> Result<PathBuf, FsError>;
}

/// A directory on the local file system.
///
/// Relative paths are resolved against `root`. Each write goes to its own
/// temporary sibling file that is renamed over the destination, so a reader
/// never observes partial output and concurrent writers never collide.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
    create_dirs: bool,
}

impl LocalFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_dirs: true,
        }
    }

    /// Whether missing parent directories are created on write.
    pub fn create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    async fn ensure_parent(&self, target: &Path) -> Result<(), FsError> {
        let Some(parent) = target.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() || fs::try_exists(parent).await.unwrap_or(false) {
            return Ok(());
        }
        if !self.create_dirs {
            return Err(FsError::ParentMissing(parent.to_path_buf()));
        }

        debug!("Creating output directory {:?}", parent);
        fs::create_dir_all(parent)
            .await
            .map_err(|e| FsError::from_write(parent, e))
    }
}

#[async_trait]
impl TemplateSource for LocalFs {
    async fn read_text(&self, path: &str) -> Result<String, FsError> {
        let full = self.resolve(path);
        debug!("Reading template from {:?}", full);
        fs::read_to_string(&full)
            .await
            .map_err(|e| FsError::from_read(full, e))
    }

    async fn exists(&self, path: &str) -> bool {
        fs::try_exists(self.resolve(path)).await.unwrap_or(false)
    }
}

#[async_trait]
impl OutputSink for LocalFs {
    async fn write_text(&self, path: &str, content: &str) -> Result<PathBuf, FsError> {
        let target = self.resolve(path);
        self.ensure_parent(&target).await?;

        let destination = target.clone();
        let len = content.len();
        let content = content.to_owned();
        tokio::task::spawn_blocking(move || write_atomic(&destination, &content))
            .await
            .map_err(|e| FsError::from_write(&target, std::io::Error::other(e)))??;

        debug!("Wrote {} bytes to {:?}", len, target);
        Ok(target)
    }
}

/// Write through a uniquely named sibling, synced and then renamed over
/// `target`. The temporary file is removed if any step fails.
fn write_atomic(target: &Path, content: &str) -> Result<(), FsError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(&temp_prefix(target))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| FsError::from_write(target, e))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| FsError::from_write(target, e))?;
    temp.as_file().sync_all().map_err(|e| FsError::from_write(target, e))?;
    temp.persist(target).map_err(|e| FsError::from_write(target, e.error))?;
    Ok(())
}

/// The `.{name}.` prefix of temporary siblings; a random part follows.
fn temp_prefix(target: &Path) -> String {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(".{}.", name)
}
