use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Geometry partition error: {0}")]
    GeometryError(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
