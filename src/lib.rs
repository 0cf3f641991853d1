pub mod config;
pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod repository;
pub mod service;

pub use engine::{
    Reconciliation, ResolvedTransfer, TransferEngine, TransferOutcome, TransferRejection,
    UnresolvedReference,
};
pub use service::{TransferReceipt, TransferService};
