use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsrootError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
