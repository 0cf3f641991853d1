use std::collections::BTreeMap;
use std::io::Write;

use rust_decimal::Decimal;

use crate::domain::money::format_amount;
use crate::domain::{
    Account, AccountId, AccountLedger, Error, Transfer, TransferId, TransferStore,
};

#[derive(Default, Debug)]
pub struct InMemoryLedger {
    accounts: BTreeMap<AccountId, Account>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    /// Inserts an account, deriving its debt flag from the balance.
    pub fn seed(&mut self, mut account: Account) {
        account.is_in_debt = in_debt(&account);
        self.accounts.insert(account.account_id, account);
    }

    pub fn write_report<W: Write>(&self, mut out: W) -> Result<(), Error> {
        writeln!(out, "account,balance,blocked,in_debt")?;
        for account in self.accounts.values() {
            writeln!(
                out,
                "{},{},{},{}",
                account.account_id,
                format_amount(account.balance),
                account.is_blocked,
                account.is_in_debt
            )?;
        }
        Ok(())
    }
}

fn journal_id(transfer_id: Option<TransferId>) -> String {
    match transfer_id {
        Some(id) => id.to_string(),
        None => "unsaved".to_string(),
    }
}

fn in_debt(account: &Account) -> bool {
    account.balance < Decimal::ZERO
}

impl AccountLedger for InMemoryLedger {
    fn find_by_id(&self, account_id: AccountId) -> Result<Option<Account>, Error> {
        Ok(self.accounts.get(&account_id).cloned())
    }

    fn check_in_debt(&self, account: &Account) -> Result<bool, Error> {
        Ok(in_debt(account))
    }

    fn save(&mut self, account: Account) -> Result<(), Error> {
        self.accounts.insert(account.account_id, account);
        Ok(())
    }
}

#[derive(Debug)]
pub struct InMemoryTransferStore {
    journal: Vec<Transfer>,
    next_id: Option<TransferId>, // None once u64::MAX has been handed out
}

impl Default for InMemoryTransferStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTransferStore {
    pub fn new() -> Self {
        Self {
            journal: Vec::new(),
            next_id: Some(1),
        }
    }

    pub fn len(&self) -> usize {
        self.journal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }

    pub fn write_report<W: Write>(&self, mut out: W) -> Result<(), Error> {
        writeln!(out, "transfer,origin,receiver,amount,currency,status")?;
        for transfer in &self.journal {
            writeln!(
                out,
                "{},{},{},{},{},{}",
                journal_id(transfer.transfer_id),
                transfer.origin_account,
                transfer.receiving_account,
                format_amount(transfer.transfer_amount),
                transfer.currency_type,
                transfer.transfer_status
            )?;
        }
        Ok(())
    }

    fn matching<F>(&self, predicate: F) -> Vec<Transfer>
    where
        F: Fn(&Transfer) -> bool,
    {
        self.journal.iter().filter(|t| predicate(t)).cloned().collect()
    }

    fn remove_where<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&Transfer) -> bool,
    {
        let before = self.journal.len();
        self.journal.retain(|t| !predicate(t));
        before - self.journal.len()
    }
}

impl TransferStore for InMemoryTransferStore {
    fn save(&mut self, mut transfer: Transfer) -> Result<Transfer, Error> {
        match transfer.transfer_id {
            Some(id) => match self.journal.iter_mut().find(|t| t.transfer_id == Some(id)) {
                Some(existing) => *existing = transfer.clone(),
                None => {
                    if self.next_id.is_some_and(|next| next <= id) {
                        self.next_id = id.checked_add(1);
                    }
                    self.journal.push(transfer.clone());
                }
            },
            None => {
                let id = self
                    .next_id
                    .ok_or_else(|| Error::Store("transfer id space exhausted".to_string()))?;
                transfer.transfer_id = Some(id);
                self.next_id = id.checked_add(1);
                self.journal.push(transfer.clone());
            }
        }
        Ok(transfer)
    }

    fn find_by_origin(&self, account_id: AccountId) -> Result<Vec<Transfer>, Error> {
        Ok(self.matching(|t| t.origin_account == account_id))
    }

    fn find_by_receiver(&self, account_id: AccountId) -> Result<Vec<Transfer>, Error> {
        Ok(self.matching(|t| t.receiving_account == account_id))
    }

    fn delete_all_by_origin(&mut self, account_id: AccountId) -> Result<usize, Error> {
        Ok(self.remove_where(|t| t.origin_account == account_id))
    }

    fn delete_all_by_receiver(&mut self, account_id: AccountId) -> Result<usize, Error> {
        Ok(self.remove_where(|t| t.receiving_account == account_id))
    }
}
