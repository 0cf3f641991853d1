use chrono::Utc;
use futures::StreamExt;
use tracing::{info, warn};

use crate::domain::{
    AccountId, AccountLedger, DeadLetterQueue, Error, RawTransfer, Transfer, TransferRequest,
    TransferRequestStream, TransferStore,
};
use crate::engine::{Reconciliation, TransferEngine, TransferOutcome};

/// A persisted transfer and the outcome that decided its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub transfer: Transfer,
    pub outcome: TransferOutcome,
}

/// Drives transfer requests through the engine and persists what it decides.
#[derive(Debug)]
pub struct TransferService<I, L, S, D>
where
    I: TransferRequestStream,
    L: AccountLedger,
    S: TransferStore,
    D: DeadLetterQueue,
{
    ingestion: I,
    engine: TransferEngine<L>,
    store: S,
    dlq: D,
}

impl<I, L, S, D> TransferService<I, L, S, D>
where
    I: TransferRequestStream,
    L: AccountLedger,
    S: TransferStore,
    D: DeadLetterQueue,
{
    pub fn new(ingestion: I, ledger: L, store: S, dlq: D) -> Self {
        Self {
            ingestion,
            engine: TransferEngine::new(ledger),
            store,
            dlq,
        }
    }

    pub fn ledger(&self) -> &L {
        self.engine.ledger()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (L, S) {
        (self.engine.into_ledger(), self.store)
    }

    pub async fn process(&mut self) -> Result<(), Error> {
        let mut res = self.ingestion.stream();

        while let Some(request) = res.next().await {
            match request {
                Ok(request) => match self.transfer(request) {
                    Ok(receipt) => info!(transfer = %receipt.transfer, "processed"),
                    Err(e) => self.dlq.report(&e),
                },
                Err(e) => self.dlq.report(&e),
            }
        }

        Ok(())
    }

    /// Executes one request end to end.
    ///
    /// Rejections still persist the FAILED transfer and come back as `Ok`;
    /// only missing accounts and collaborator faults are errors. When origin
    /// and receiver are the same account the debit and credit cancel out:
    /// the account keeps its balance, has its debt flag re-derived, and is
    /// saved once.
    pub fn transfer(&mut self, request: TransferRequest) -> Result<TransferReceipt, Error> {
        let to_self = request.origin_account_id == request.receiving_account_id;

        let ledger = self.engine.ledger();
        let mut sender = ledger
            .find_by_id(request.origin_account_id)?
            .ok_or(Error::AccountNotFound(request.origin_account_id))?;
        let mut receiver = if to_self {
            sender.clone()
        } else {
            ledger
                .find_by_id(request.receiving_account_id)?
                .ok_or(Error::AccountNotFound(request.receiving_account_id))?
        };

        let mut transfer = Transfer::pending(sender.account_id, receiver.account_id, Utc::now());
        let amount = self.engine.set_amount_and_currency(&request, &mut transfer);
        let outcome = self
            .engine
            .execute(&mut sender, &mut receiver, amount, &mut transfer)?;

        if outcome.is_completed() {
            let ledger = self.engine.ledger_mut();
            if to_self {
                let mut account = sender;
                account.balance += amount;
                account.is_in_debt = ledger.check_in_debt(&account)?;
                ledger.save(account)?;
            } else {
                ledger.save(sender)?;
                ledger.save(receiver)?;
            }
        }

        let transfer = self.store.save(transfer)?;
        Ok(TransferReceipt { transfer, outcome })
    }

    /// Reconciles a raw transfer and stores the canonical record if every
    /// reference resolved.
    pub fn record(&mut self, raw: &RawTransfer) -> Result<Option<Transfer>, Error> {
        match self.engine.reconcile(raw)? {
            Reconciliation::Resolved(resolved) => self.store.save(resolved.transfer).map(Some),
            Reconciliation::Unresolved(reference) => {
                warn!(?reference, "raw transfer not recorded");
                Ok(None)
            }
        }
    }

    pub fn find_by_receiving_account(&self, account_id: AccountId) -> Result<Vec<Transfer>, Error> {
        self.store.find_by_receiver(account_id)
    }

    pub fn find_by_origin_account(&self, account_id: AccountId) -> Result<Vec<Transfer>, Error> {
        self.store.find_by_origin(account_id)
    }

    pub fn delete_all_by_origin(&mut self, account_id: AccountId) -> Result<usize, Error> {
        let removed = self.store.delete_all_by_origin(account_id)?;
        info!(account = account_id, removed, "deleted outgoing transfers");
        Ok(removed)
    }

    pub fn delete_all_by_receiving(&mut self, account_id: AccountId) -> Result<usize, Error> {
        let removed = self.store.delete_all_by_receiver(account_id)?;
        info!(account = account_id, removed, "deleted incoming transfers");
        Ok(removed)
    }
}
