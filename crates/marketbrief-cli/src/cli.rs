//! CLI argument definitions.
//!
//! The binary takes no operational flags: every run fetches, renders and sends
//! one brief. Configuration comes from the environment (see
//! [`marketbrief_core::config`]); logging verbosity follows `RUST_LOG`.
//!
//! ```bash
//! TELEGRAM_BOT_TOKEN=... TELEGRAM_CHAT_ID=... marketbrief
//! ```

use clap::Parser;

/// Daily crypto market brief delivered to Telegram.
#[derive(Debug, Parser)]
#[command(
    name = "marketbrief",
    author,
    version,
    about = "Build the daily market brief and send it to Telegram",
    long_about = "Fetches prices, market totals, the Fear & Greed index and news headlines, \
renders a five-section brief and posts it once to the configured Telegram chat.\n\
\n\
Required environment:\n\
  TELEGRAM_BOT_TOKEN   bot credential\n\
  TELEGRAM_CHAT_ID     destination chat\n\
\n\
A .env file in the working directory is loaded when present."
)]
pub struct Cli {}
