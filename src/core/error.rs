use thiserror::Error;

use crate::core::types::{AlertLevelId, ResourceCategory};

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alert level not found: {0}")]
    MissingLevelEntry(AlertLevelId),

    #[error("Missing a default policy in {0} for the Emergency feature")]
    MissingCategoryDefault(ResourceCategory),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AlertError>;
