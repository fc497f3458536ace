use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{EngineError, NewEntry, RawEntry, ResultEngine};

use super::FuelGateway;

/// Gateway keeping every entry in a single JSON file.
///
/// A missing file is an empty log. A file that cannot be read or parsed loads
/// as an empty log too, but is left untouched: adding or deleting fails.
#[derive(Debug, Clone)]
pub struct LocalFileGateway {
    path: PathBuf,
}

impl LocalFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Err` carries the reason the file could not be used.
    async fn read_entries(&self) -> Result<Vec<RawEntry>, String> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(format!("failed to read {}: {err}", self.path.display())),
        };
        serde_json::from_str(&content)
            .map_err(|err| format!("failed to parse {}: {err}", self.path.display()))
    }

    /// Entries to rewrite; an unusable file is never overwritten.
    async fn entries_for_update(&self) -> ResultEngine<Vec<RawEntry>> {
        self.read_entries().await.map_err(|reason| {
            tracing::error!("{reason}");
            EngineError::Persistence(reason)
        })
    }

    async fn write_entries(&self, entries: &[RawEntry]) -> ResultEngine<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.write_error(err))?;
        }
        let payload = serde_json::to_string_pretty(entries).map_err(|err| self.write_error(err))?;
        tokio::fs::write(&self.path, payload)
            .await
            .map_err(|err| self.write_error(err))
    }

    fn write_error(&self, err: impl std::fmt::Display) -> EngineError {
        tracing::error!("failed to write {}: {err}", self.path.display());
        EngineError::Persistence(format!("failed to write {}", self.path.display()))
    }
}

#[async_trait]
impl FuelGateway for LocalFileGateway {
    async fn load(&self) -> ResultEngine<Vec<RawEntry>> {
        match self.read_entries().await {
            Ok(entries) => Ok(entries),
            Err(reason) => {
                tracing::error!("{reason}");
                Ok(Vec::new())
            }
        }
    }

    async fn add(&self, entry: NewEntry) -> ResultEngine<RawEntry> {
        let mut entries = self.entries_for_update().await?;
        let raw = entry.with_id(Uuid::new_v4());
        entries.push(raw.clone());
        self.write_entries(&entries).await?;
        Ok(raw)
    }

    async fn delete(&self, id: Uuid) -> ResultEngine<()> {
        let mut entries = self.entries_for_update().await?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Err(EngineError::KeyNotFound(id.to_string()));
        }
        self.write_entries(&entries).await
    }
}
