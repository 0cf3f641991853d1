use rust_decimal::Decimal;

pub type AccountId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: AccountId,
    pub balance: Decimal, // may go negative
    pub is_blocked: bool, // refuses incoming transfers
    pub is_in_debt: bool, // derived by the ledger's debt check
}

impl Account {
    pub fn new(account_id: AccountId, balance: Decimal) -> Self {
        Self {
            account_id,
            balance,
            is_blocked: false,
            is_in_debt: false,
        }
    }

    pub fn blocked(mut self) -> Self {
        self.is_blocked = true;
        self
    }

    pub fn in_debt(mut self) -> Self {
        self.is_in_debt = true;
        self
    }
}
