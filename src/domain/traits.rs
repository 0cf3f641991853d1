use futures::Stream;

use crate::domain::{Account, AccountId, Error, Transfer, TransferRequest};

pub trait TransferRequestStream {
    type RequestStream: Stream<Item = Result<TransferRequest, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::RequestStream;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

/// Owner of account records and of the rule deciding when an account is in debt.
pub trait AccountLedger {
    fn find_by_id(&self, account_id: AccountId) -> Result<Option<Account>, Error>;

    fn check_in_debt(&self, account: &Account) -> Result<bool, Error>;

    fn save(&mut self, account: Account) -> Result<(), Error>;
}

pub trait TransferStore {
    /// Persists a transfer, assigning an id if it has none, and returns the stored record.
    fn save(&mut self, transfer: Transfer) -> Result<Transfer, Error>;

    fn find_by_origin(&self, account_id: AccountId) -> Result<Vec<Transfer>, Error>;

    fn find_by_receiver(&self, account_id: AccountId) -> Result<Vec<Transfer>, Error>;

    /// Removes every transfer sent from `account_id`, all or nothing.
    fn delete_all_by_origin(&mut self, account_id: AccountId) -> Result<usize, Error>;

    /// Removes every transfer received by `account_id`, all or nothing.
    fn delete_all_by_receiver(&mut self, account_id: AccountId) -> Result<usize, Error>;
}
