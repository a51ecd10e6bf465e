pub type TransformResult<T> = Result<T, TransformError>;

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("invalid data view payload: {0}")]
    InvalidDataView(#[source] serde_json::Error),

    #[error("invalid transform options: {0}")]
    InvalidOptions(#[source] serde_json::Error),

    #[error("invalid settings payload: {0}")]
    InvalidSettings(#[source] serde_json::Error),

    #[error("failed to serialize settings: {0}")]
    SerializeSettings(#[source] serde_json::Error),
}
