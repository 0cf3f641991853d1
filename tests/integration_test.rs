use std::io::Write;

use assert_cmd::Command;
use predicates as pred;
use predicates::prelude::PredicateBooleanExt;
use tempfile::NamedTempFile;

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn end_to_end_outputs_expected_ledger_and_journal() {
    let accounts = csv_file(
        "account, balance, blocked\n\
    1, 100, false\n\
    2, 0, false\n\
    3, 50, true\n\
    4, -20, false\n",
    );

    // tx 1 and 6 succeed; 2 is short on funds, 3 moves nothing, 4 hits a
    // blocked receiver, 5 comes from an account in debt. The GBP row and the
    // unknown account 9 are dead-lettered and leave no record.
    let transfers = csv_file(
        "origin, receiver, amount, currency\n\
    1, 2, 40, usd\n\
    1, 2, 150, EUR\n\
    2, 1, 0, usd\n\
    1, 3, 10, USD\n\
    4, 1, 5, usd\n\
    1, 4, 30, eur\n\
    1, 2, 5, GBP\n\
    1, 9, 5, usd\n\
    2, 1, 12.34567, usd\n",
    );

    let exe = env!("CARGO_BIN_EXE_transfer_ledger");
    let mut cmd = Command::new(exe);
    cmd.arg(accounts.path()).arg(transfers.path());

    cmd.assert()
        .success()
        .stdout(pred::str::contains(
            "account,balance,blocked,in_debt\n\
             1,42.3457,false,false\n\
             2,27.6543,false,false\n\
             3,50.0000,true,false\n\
             4,10.0000,false,false\n",
        ))
        .stdout(pred::str::contains(
            "transfer,origin,receiver,amount,currency,status\n\
             1,1,2,40.0000,USD,SUCCESSFUL\n\
             2,1,2,150.0000,EUR,FAILED\n\
             3,2,1,0.0000,USD,FAILED\n\
             4,1,3,10.0000,USD,FAILED\n\
             5,4,1,5.0000,USD,FAILED\n\
             6,1,4,30.0000,EUR,SUCCESSFUL\n\
             7,2,1,12.3457,USD,SUCCESSFUL\n",
        ))
        .stdout(pred::str::contains("GBP").not());
}

#[test]
fn missing_arguments_fail_with_usage() {
    let exe = env!("CARGO_BIN_EXE_transfer_ledger");
    let mut cmd = Command::new(exe);

    cmd.assert()
        .failure()
        .stderr(pred::str::contains("usage: transfer_ledger"));
}
