pub mod account;
pub mod error;
pub mod money;
pub mod traits;
pub mod transfer;

pub use account::{Account, AccountId};
pub use error::Error;
pub use traits::{AccountLedger, DeadLetterQueue, TransferRequestStream, TransferStore};
pub use transfer::{
    CurrencyType, RawTransfer, Transfer, TransferId, TransferRequest, TransferStatus,
};
