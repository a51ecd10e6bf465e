#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown chart kind: {0}")]
    UnknownChartKind(String),
}
