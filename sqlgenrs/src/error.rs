use thiserror::Error;

pub type Result<T> = std::result::Result<T, SqlgenError>;

/// Message carried by every composability rejection. Callers may match on it.
pub const NON_COMPOSABLE_SQL: &str = "raw SQL is not composable: a fragment used as a subquery must begin with a bare SELECT";

#[derive(Debug, Error)]
pub enum SqlgenError {
    #[error("{}", NON_COMPOSABLE_SQL)]
    NonComposableSql,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
