use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    #[error("Class hierarchy cycle detected at {0}")]
    CircularHierarchy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AssetError>;
