use engine::{JsonFileSource, Movement, MovementSource, SourceError};

use crate::{
    client::Client,
    config::{AppConfig, SourceKind},
    error::Result,
};

/// The movement source selected by configuration.
#[derive(Debug, Clone)]
pub enum AppSource {
    Http(Client),
    File(JsonFileSource),
}

impl AppSource {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(match config.source {
            SourceKind::Http => Self::Http(Client::new(&config.base_url, config.page_size)?),
            SourceKind::File => Self::File(JsonFileSource::new(&config.file)),
        })
    }

    /// Short human description for the info bar.
    pub fn describe(&self) -> String {
        match self {
            Self::Http(client) => client.base_url().to_string(),
            Self::File(source) => source.path().display().to_string(),
        }
    }
}

impl MovementSource for AppSource {
    async fn list_movements(&self) -> std::result::Result<Vec<Movement>, SourceError> {
        match self {
            Self::Http(client) => client.list_movements().await,
            Self::File(source) => source.list_movements().await,
        }
    }
}
