use crate::domain::{AccountId, TransferId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Store failed with: {0}")]
    Store(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    #[error("Transfer {0:?} already has a final status")]
    TransferFinalized(Option<TransferId>),
}
