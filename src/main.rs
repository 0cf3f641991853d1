use std::{env, fs::File, io};

use transfer_ledger::config::Config;
use transfer_ledger::dlq::LogDLQ;
use transfer_ledger::ingestion::{CsvReader, load_accounts};
use transfer_ledger::repository::{InMemoryLedger, InMemoryTransferStore};
use transfer_ledger::service::TransferService;

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, the report goes to stdout
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = Config::from_args(env::args())?;

    let mut ledger = InMemoryLedger::new();
    for account in load_accounts(File::open(&config.accounts_path)?)? {
        ledger.seed(account);
    }

    let ingestion = CsvReader::new(File::open(&config.transfers_path)?);
    let mut service = TransferService::new(
        ingestion,
        ledger,
        InMemoryTransferStore::new(),
        LogDLQ::default(),
    );
    service.process().await?;

    let (ledger, store) = service.into_parts();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ledger.write_report(&mut out)?;
    store.write_report(&mut out)?;

    Ok(())
}
