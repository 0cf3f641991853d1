use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{AccountId, Error};

pub type TransferId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyType {
    Usd,
    Eur,
}

impl CurrencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyType::Usd => "USD",
            CurrencyType::Eur => "EUR",
        }
    }
}

impl FromStr for CurrencyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("usd") {
            Ok(CurrencyType::Usd)
        } else if s.eq_ignore_ascii_case("eur") {
            Ok(CurrencyType::Eur)
        } else {
            Err(Error::Ingestion(format!("Invalid currency type: {}", s)))
        }
    }
}

impl core::fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Pending,
    Successful,
    Failed,
}

impl TransferStatus {
    /// Maps a loosely-typed status onto the canonical set.
    ///
    /// `PENDING` and `SUCCESSFUL` keep their meaning (case-insensitively);
    /// every other value, `FAILED` and garbage alike, becomes `Failed`.
    pub fn from_raw(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("pending") {
            TransferStatus::Pending
        } else if raw.eq_ignore_ascii_case("successful") {
            TransferStatus::Successful
        } else {
            TransferStatus::Failed
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransferStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "PENDING",
            TransferStatus::Successful => "SUCCESSFUL",
            TransferStatus::Failed => "FAILED",
        }
    }
}

impl core::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub transfer_id: Option<TransferId>, // assigned by the store on first save
    pub origin_account: AccountId,
    pub receiving_account: AccountId,
    pub transfer_amount: Decimal,
    pub currency_type: CurrencyType,
    pub transfer_date: DateTime<Utc>,
    pub transfer_status: TransferStatus,
}

impl Transfer {
    /// Drafts an unsaved PENDING transfer between two accounts.
    pub fn pending(
        origin_account: AccountId,
        receiving_account: AccountId,
        transfer_date: DateTime<Utc>,
    ) -> Self {
        Self {
            transfer_id: None,
            origin_account,
            receiving_account,
            transfer_amount: Decimal::ZERO,
            currency_type: CurrencyType::Usd,
            transfer_date,
            transfer_status: TransferStatus::Pending,
        }
    }
}

impl core::fmt::Display for Transfer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.transfer_id {
            Some(id) => write!(f, "tx={},", id)?,
            None => write!(f, "tx=unsaved,")?,
        }
        write!(
            f,
            "origin={},receiver={},amount={} {},status={}",
            self.origin_account,
            self.receiving_account,
            self.transfer_amount,
            self.currency_type,
            self.transfer_status
        )
    }
}

/// A transfer as handed over by an outer layer, before any validation.
#[derive(Debug, Clone)]
pub struct RawTransfer {
    pub transfer_id: Option<TransferId>,
    pub transfer_status: String,
    pub currency_type: String,
    pub transfer_amount: Decimal,
    pub transfer_date: DateTime<Utc>,
    pub origin_account_id: AccountId,
    pub receiving_account_id: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub origin_account_id: AccountId,
    pub receiving_account_id: AccountId,
    pub transfer_amount: Decimal,
    pub currency_type: CurrencyType,
}
