mod cli;
mod error;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::debug;
use marketbrief_core::{
    BriefBuilder, CoinGeckoAdapter, FearGreedAdapter, HttpClient, ReferenceData,
    ReqwestHttpClient, RssNewsAdapter, Settings, TelegramNotifier,
};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _cli = Cli::parse();

    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("warning: ignoring unreadable .env file: {error}");
        }
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let settings = Settings::from_env()?;
    let reference = ReferenceData::builtin()?;
    debug!("endpoints: {:?}", settings.endpoints);

    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let endpoints = &settings.endpoints;
    let market = CoinGeckoAdapter::new(http_client.clone(), &endpoints.coingecko);
    let sentiment = FearGreedAdapter::new(http_client.clone(), &endpoints.sentiment);
    let news = RssNewsAdapter::new(
        http_client.clone(),
        &endpoints.news_feed,
        &endpoints.news_publisher,
    );

    let report = BriefBuilder::new(&reference, &market, &sentiment, &news)
        .build()
        .await?;

    let notifier = TelegramNotifier::new(http_client, endpoints.telegram.clone(), settings.delivery);
    let receipt = notifier.send(&report).await?;
    println!("Telegram: {} {}", receipt.status, receipt.body);

    Ok(())
}
