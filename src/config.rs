use std::path::PathBuf;

use crate::domain::Error;

const USAGE: &str = "usage: transfer_ledger <accounts.csv> <transfers.csv>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub accounts_path: PathBuf,
    pub transfers_path: PathBuf,
}

impl Config {
    /// Builds the configuration from `std::env::args`-style input, program name first.
    pub fn from_args<A>(args: A) -> Result<Self, Error>
    where
        A: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().skip(1);
        let (Some(accounts), Some(transfers)) = (args.next(), args.next()) else {
            return Err(Error::Config(USAGE.to_string()));
        };
        if args.next().is_some() {
            return Err(Error::Config(USAGE.to_string()));
        }

        Ok(Self {
            accounts_path: PathBuf::from(accounts),
            transfers_path: PathBuf::from(transfers),
        })
    }
}
