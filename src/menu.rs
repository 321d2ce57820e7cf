//! Interactive account menu.
use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::bank::{
    Account, Money, Operation,
    amount::{format_balance, parse_amount_to_cents},
};

const MENU: &str = "\
--------------------------------
Account Management System
1. View Balance
2. Credit Account
3. Debit Account
4. Exit
--------------------------------
";

/// A menu entry picked by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    ViewBalance,
    Change(Operation),
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::ViewBalance),
            "2" => Some(Choice::Change(Operation::Credit)),
            "3" => Some(Choice::Change(Operation::Debit)),
            "4" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Line-oriented prompt over an async reader and writer.
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await
    }

    /// Prints `question` and reads one line. Returns `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 become replacement characters, so such a
    /// line is rejected by the caller like any other bad text.
    async fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.output.write_all(question.as_bytes()).await?;
        self.output.flush().await?;
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    async fn ask_choice(&mut self) -> io::Result<Option<Choice>> {
        loop {
            let Some(answer) = self.ask("Enter your choice (1-4): ").await? else {
                return Ok(None);
            };
            match Choice::parse(&answer) {
                Some(choice) => return Ok(Some(choice)),
                None => self.say("Please enter a number between 1 and 4").await?,
            }
        }
    }

    /// Asks until a positive amount is entered.
    async fn ask_amount(&mut self, verb: &str) -> io::Result<Option<Money>> {
        let question = format!("Enter amount to {verb} (e.g. 100.50): ");
        loop {
            let Some(answer) = self.ask(&question).await? else {
                return Ok(None);
            };
            match parse_amount_to_cents(answer.as_str()) {
                Some(cents) if cents > 0 => return Ok(Some(cents)),
                _ => self.say("Enter a positive decimal amount (e.g. 50.00)").await?,
            }
        }
    }
}

/// Runs the menu against `account` until the user exits or input ends.
pub async fn run<R, W>(account: &mut Account, input: R, output: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut console = Console { input, output };
    info!(balance = %format_balance(account.read_balance()), "session started");

    loop {
        console.output.write_all(MENU.as_bytes()).await?;
        let Some(choice) = console.ask_choice().await? else {
            break;
        };

        match choice {
            Choice::ViewBalance => {
                let balance = format_balance(account.read_balance());
                console.say(&format!("Current balance: {balance}")).await?;
            }
            Choice::Change(operation) => {
                let verb = match operation {
                    Operation::Credit => "credit",
                    Operation::Debit => "debit",
                };
                let Some(cents) = console.ask_amount(verb).await? else {
                    break;
                };
                match account.apply(operation, cents) {
                    Ok(balance) => {
                        let balance = format_balance(balance);
                        info!(%operation, %balance, "balance changed");
                        console
                            .say(&format!("Balance after {verb}: {balance}"))
                            .await?;
                    }
                    Err(err) => {
                        warn!(%operation, error = %err, "operation rejected");
                        console.say(&format!("Error: {err}")).await?;
                    }
                }
            }
            Choice::Exit => break,
        }
        console.say("").await?;
    }

    console.say("Exiting the program. Goodbye!").await?;
    console.output.flush().await?;
    info!(balance = %format_balance(account.read_balance()), "session ended");
    Ok(())
}
