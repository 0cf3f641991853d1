use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{
    Account, AccountId, AccountLedger, CurrencyType, Error, RawTransfer, Transfer,
    TransferRequest, TransferStatus,
};

/// Business reasons a transfer ends up FAILED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransferRejection {
    /// Blocked receiver, sender in debt, or sender balance below the amount.
    #[error("Transfer cannot be completed. Not enough money or blocked receiver.")]
    Rejected,

    #[error("Money to transfer must be greater than 0")]
    InvalidAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Completed,
    Rejected(TransferRejection),
}

impl TransferOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferOutcome::Completed)
    }
}

impl core::fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransferOutcome::Completed => f.write_str("Transfer made successfully"),
            TransferOutcome::Rejected(reason) => write!(f, "{}", reason),
        }
    }
}

/// Why a raw transfer could not be turned into a canonical record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReference {
    UnknownCurrency(String),
    OriginAccount(AccountId),
    ReceivingAccount(AccountId),
}

/// A canonical transfer together with the accounts its references resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTransfer {
    pub transfer: Transfer,
    pub origin_account: Account,
    pub receiving_account: Account,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    Resolved(ResolvedTransfer),
    Unresolved(UnresolvedReference),
}

impl Reconciliation {
    pub fn into_transfer(self) -> Option<Transfer> {
        match self {
            Reconciliation::Resolved(resolved) => Some(resolved.transfer),
            Reconciliation::Unresolved(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct TransferEngine<L>
where
    L: AccountLedger,
{
    ledger: L,
}

impl<L> TransferEngine<L>
where
    L: AccountLedger,
{
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    /// Copies the requested currency and amount onto a draft transfer and
    /// returns the amount to move.
    pub fn set_amount_and_currency(
        &self,
        request: &TransferRequest,
        transfer: &mut Transfer,
    ) -> Decimal {
        transfer.currency_type = request.currency_type;
        transfer.transfer_amount = request.transfer_amount;
        request.transfer_amount
    }

    /// Validates and applies one transfer to caller-owned snapshots.
    ///
    /// Rules are checked in order and the first failure wins: blocked
    /// receiver, sender in debt, insufficient funds, then non-positive
    /// amount. A non-positive amount that also trips one of the first three
    /// rules is reported as [`TransferRejection::Rejected`].
    ///
    /// On rejection the transfer is marked FAILED and neither account is
    /// touched. On success balances move, both debt flags are re-derived via
    /// the ledger, and the transfer is marked SUCCESSFUL. Errors from the
    /// debt check leave all three values unchanged.
    pub fn execute(
        &self,
        sender: &mut Account,
        receiver: &mut Account,
        transfer_amount: Decimal,
        transfer: &mut Transfer,
    ) -> Result<TransferOutcome, Error> {
        if transfer.transfer_status.is_terminal() {
            return Err(Error::TransferFinalized(transfer.transfer_id));
        }

        if let Some(reason) = Self::validate(sender, receiver, transfer_amount) {
            transfer.transfer_status = TransferStatus::Failed;
            warn!(
                sender = sender.account_id,
                receiver = receiver.account_id,
                amount = %transfer_amount,
                %reason,
                "transfer rejected"
            );
            return Ok(TransferOutcome::Rejected(reason));
        }

        let mut debited = sender.clone();
        let mut credited = receiver.clone();
        debited.balance -= transfer_amount;
        credited.balance += transfer_amount;
        debited.is_in_debt = self.ledger.check_in_debt(&debited)?;
        credited.is_in_debt = self.ledger.check_in_debt(&credited)?;

        *sender = debited;
        *receiver = credited;
        transfer.transfer_status = TransferStatus::Successful;

        info!(
            sender = sender.account_id,
            receiver = receiver.account_id,
            amount = %transfer_amount,
            currency = %transfer.currency_type,
            "transfer completed"
        );
        Ok(TransferOutcome::Completed)
    }

    fn validate(
        sender: &Account,
        receiver: &Account,
        transfer_amount: Decimal,
    ) -> Option<TransferRejection> {
        if receiver.is_blocked || sender.is_in_debt || sender.balance < transfer_amount {
            Some(TransferRejection::Rejected)
        } else if transfer_amount <= Decimal::ZERO {
            Some(TransferRejection::InvalidAmount)
        } else {
            None
        }
    }

    /// Rebuilds a canonical transfer from raw input.
    ///
    /// Id, amount and date are copied as-is and the status goes through
    /// [`TransferStatus::from_raw`]. The currency must name USD or EUR and
    /// both account ids must exist in the ledger; the first reference that
    /// fails to resolve is returned as [`Reconciliation::Unresolved`].
    pub fn reconcile(&self, raw: &RawTransfer) -> Result<Reconciliation, Error> {
        let currency_type = match raw.currency_type.parse::<CurrencyType>() {
            Ok(currency) => currency,
            Err(_) => {
                return Ok(self.unresolved(UnresolvedReference::UnknownCurrency(
                    raw.currency_type.clone(),
                )));
            }
        };

        let Some(origin_account) = self.ledger.find_by_id(raw.origin_account_id)? else {
            return Ok(self.unresolved(UnresolvedReference::OriginAccount(
                raw.origin_account_id,
            )));
        };

        let Some(receiving_account) = self.ledger.find_by_id(raw.receiving_account_id)? else {
            return Ok(self.unresolved(UnresolvedReference::ReceivingAccount(
                raw.receiving_account_id,
            )));
        };

        let transfer = Transfer {
            transfer_id: raw.transfer_id,
            origin_account: origin_account.account_id,
            receiving_account: receiving_account.account_id,
            transfer_amount: raw.transfer_amount,
            currency_type,
            transfer_date: raw.transfer_date,
            transfer_status: TransferStatus::from_raw(&raw.transfer_status),
        };

        Ok(Reconciliation::Resolved(ResolvedTransfer {
            transfer,
            origin_account,
            receiving_account,
        }))
    }

    fn unresolved(&self, reference: UnresolvedReference) -> Reconciliation {
        debug!(?reference, "transfer reconciliation found no record");
        Reconciliation::Unresolved(reference)
    }
}
