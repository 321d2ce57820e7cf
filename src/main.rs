use std::{fs::File, io, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use csv::{ReaderBuilder, Trim};
use tokio::{
    io::{BufReader, stdin, stdout},
    sync::mpsc,
};
use tracing::{error, info, warn};

use crate::{bank::Account, config::Config};

mod bank;
mod config;
mod menu;
mod telemetry;

/// The size of the channel for processing transactions.
const CHANNEL_SIZE: usize = 100;

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();

    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let result = match config.account() {
        Ok(account) => match &config.script {
            Some(path) => match File::open(path) {
                Ok(file) => replay(account, file, io::stdout()).await,
                Err(err) => Err(anyhow::Error::new(err)
                    .context(format!("Failed to read CSV file {}", path.display()))),
            },
            None => interactive(account).await,
        },
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "fatal error");
            eprintln!("Fatal error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn interactive(mut account: Account) -> anyhow::Result<()> {
    menu::run(&mut account, BufReader::new(stdin()), stdout())
        .await
        .context("Interactive session failed")
}

/// Applies every operation read as CSV from `input` and writes the final balance as CSV.
async fn replay<R, W>(account: Account, input: R, output: W) -> anyhow::Result<()>
where
    R: io::Read,
    W: io::Write,
{
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
    let mut state = bank::State::new(account, receiver);

    let handle = tokio::spawn(async move {
        state.run().await;
        state
    });

    for record in reader.deserialize::<bank::Transaction>() {
        match record {
            Ok(transaction) => sender
                .send(transaction)
                .await
                .context("Ledger stopped accepting transactions")?,
            Err(err) => warn!(error = %err, "skipping malformed row"),
        }
    }

    drop(sender); // Close the sender to signal no more transactions will be sent
    let state = handle
        .await
        .context("Failed to join the state handling task")?;
    info!(rejected = state.get_rejected(), "replay finished");

    let mut writer = csv::Writer::from_writer(output);
    writer
        .serialize(state.get_account())
        .context("Failed to write balance")?;
    writer.flush().context("Failed to write balance")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::replay;
    use crate::bank::Account;

    async fn report(account: Account, input: &str) -> String {
        let mut output = Vec::new();
        replay(account, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_replay_reports_balance() {
        let input = "type,amount\ncredit, 500.25\ndebit,200.25\n";
        assert_eq!(report(Account::new(), input).await, "balance\n001300.00\n");
    }

    #[tokio::test]
    async fn test_replay_skips_bad_rows() {
        let input = "type,amount\n\
                     debit,200\n\
                     transfer,5\n\
                     credit,ten\n\
                     credit,1,5\n\
                     debit,25.50\n";
        let account = Account::with_balance(10_000).unwrap();
        assert_eq!(report(account, input).await, "balance\n000074.50\n");
    }

    #[tokio::test]
    async fn test_replay_empty_input() {
        assert_eq!(report(Account::new(), "").await, "balance\n001000.00\n");
    }
}
