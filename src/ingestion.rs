use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::money::deserialize_amount;
use crate::domain::traits::TransferRequestStream;
use crate::domain::{Account, AccountId, CurrencyType, Error, TransferRequest};

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn csv_error(e: csv::Error) -> Error {
    Error::Ingestion(format!("CSV deserialization error: {}", e))
}

/// Internal shape used only for CSV deserialization of account seeds.
#[derive(Debug, Deserialize)]
struct AccountRow {
    account: AccountId,
    #[serde(deserialize_with = "deserialize_amount")]
    balance: Decimal,
    blocked: Option<bool>,
}

/// Reads the opening account table. Any malformed row aborts the load.
pub fn load_accounts<R: Read>(reader: R) -> Result<Vec<Account>, Error> {
    csv_reader(reader)
        .into_deserialize::<AccountRow>()
        .map(|row| -> Result<Account, Error> {
            let row = row.map_err(csv_error)?;
            let account = Account::new(row.account, row.balance);
            Ok(if row.blocked.unwrap_or(false) {
                account.blocked()
            } else {
                account
            })
        })
        .collect()
}

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(csv_reader(reader)),
        }
    }
}

/// Internal shape used only for CSV deserialization of transfer requests.
#[derive(Debug, Deserialize)]
struct TransferRow {
    origin: AccountId,
    receiver: AccountId,
    #[serde(deserialize_with = "deserialize_amount")]
    amount: Decimal,
    currency: String,
}

impl TryFrom<TransferRow> for TransferRequest {
    type Error = Error;

    fn try_from(row: TransferRow) -> Result<Self, Self::Error> {
        Ok(TransferRequest {
            origin_account_id: row.origin,
            receiving_account_id: row.receiver,
            transfer_amount: row.amount,
            currency_type: row.currency.parse::<CurrencyType>()?,
        })
    }
}

fn parse_request(row: csv::Result<TransferRow>) -> Result<TransferRequest, Error> {
    TransferRequest::try_from(row.map_err(csv_error)?)
}

impl<R: Read + Send + 'static> TransferRequestStream for CsvReader<R> {
    type RequestStream = Pin<Box<dyn Stream<Item = Result<TransferRequest, Error>> + Send>>;

    /// Hands the whole file to the stream; later calls yield nothing.
    fn stream(&mut self) -> Self::RequestStream {
        let Some(reader) = self.reader.take() else {
            return Box::pin(stream::empty());
        };

        Box::pin(stream::iter(
            reader.into_deserialize::<TransferRow>().map(parse_request),
        ))
    }
}
