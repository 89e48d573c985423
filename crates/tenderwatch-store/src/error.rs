use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialisation error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not replace cache file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
