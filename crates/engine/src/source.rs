//! Movement sources.
//!
//! A [`MovementSource`] answers a single question: "which movements exist?".
//! The engine never writes through it. Implementations live wherever their
//! transport lives: [`InMemorySource`] and [`JsonFileSource`] here, the HTTP
//! client in the TUI crate.
use std::{future::Future, path::PathBuf};

use api_types::movement::MovementDocument;
use thiserror::Error;

use crate::Movement;

/// Failure while listing movements.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("movements not found")]
    NotFound,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Read-only access to the list of movements.
pub trait MovementSource {
    /// Returns every movement, in the order chosen by the source.
    fn list_movements(&self) -> impl Future<Output = Result<Vec<Movement>, SourceError>> + Send;
}

/// Source backed by a fixed list, handed out as-is on every call.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    movements: Vec<Movement>,
}

impl InMemorySource {
    pub fn new(movements: Vec<Movement>) -> Self {
        Self { movements }
    }
}

impl MovementSource for InMemorySource {
    async fn list_movements(&self) -> Result<Vec<Movement>, SourceError> {
        Ok(self.movements.clone())
    }
}

/// Source reading a JSON document from disk on every call.
///
/// The file holds either a bare array of movements or a page document as
/// returned by the movement service.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl MovementSource for JsonFileSource {
    async fn list_movements(&self) -> Result<Vec<Movement>, SourceError> {
        tracing::debug!("reading movements from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let document: MovementDocument = serde_json::from_str(&raw)?;
        Ok(document
            .into_movements()
            .into_iter()
            .map(Movement::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_file_source_reads_bare_list_in_order() {
        let dir = std::env::temp_dir().join("engine_source_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("list_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[
                {"id": 2, "description": "Rent", "amount_minor": 90000,
                 "category": "EXPENSE", "tag": "Home", "date": "2025-11-01"},
                {"id": 1, "description": "Salary", "amount_minor": 250000,
                 "category": "INCOME", "date": "2025-11-05"}
            ]"#,
        )
        .unwrap();

        let movements = JsonFileSource::new(&path).list_movements().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].description, "Rent");
        assert_eq!(movements[0].tag.as_deref(), Some("Home"));
        assert_eq!(movements[1].amount.cents(), 250_000);
    }

    #[tokio::test]
    async fn json_file_source_reports_missing_file() {
        let source = JsonFileSource::new("/definitely/not/here/movements.json");
        let err = source.list_movements().await.unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[tokio::test]
    async fn json_file_source_reports_malformed_records() {
        let dir = std::env::temp_dir().join("engine_source_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("bad_{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"description": "no amount", "category": "INCOME"}]"#).unwrap();

        let err = JsonFileSource::new(&path).list_movements().await.unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, SourceError::Decode(_)));
    }
}
