//! Runtime configuration.
//!
//! Credentials are required and read once at startup. Endpoint bases have
//! public defaults and can be redirected, e.g. at a local stub.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `TELEGRAM_BOT_TOKEN` | yes | |
//! | `TELEGRAM_CHAT_ID` | yes | |
//! | `MARKETBRIEF_COINGECKO_URL` | no | `https://api.coingecko.com/api/v3` |
//! | `MARKETBRIEF_SENTIMENT_URL` | no | `https://api.alternative.me/fng/` |
//! | `MARKETBRIEF_NEWS_FEED_URL` | no | `https://www.coindesk.com/arc/outboundfeeds/rss/` |
//! | `MARKETBRIEF_TELEGRAM_URL` | no | `https://api.telegram.org` |

use secrecy::SecretString;

use crate::ConfigError;

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
pub const COINGECKO_URL_VAR: &str = "MARKETBRIEF_COINGECKO_URL";
pub const SENTIMENT_URL_VAR: &str = "MARKETBRIEF_SENTIMENT_URL";
pub const NEWS_FEED_URL_VAR: &str = "MARKETBRIEF_NEWS_FEED_URL";
pub const TELEGRAM_URL_VAR: &str = "MARKETBRIEF_TELEGRAM_URL";

const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
const DEFAULT_SENTIMENT_URL: &str = "https://api.alternative.me/fng/";
const DEFAULT_NEWS_FEED_URL: &str = "https://www.coindesk.com/arc/outboundfeeds/rss/";
const DEFAULT_NEWS_PUBLISHER: &str = "CoinDesk";
const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";

/// Base URLs of every upstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub coingecko: String,
    pub sentiment: String,
    pub news_feed: String,
    /// Headlines mentioning the publisher are dropped from the news section.
    pub news_publisher: String,
    pub telegram: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            coingecko: String::from(DEFAULT_COINGECKO_URL),
            sentiment: String::from(DEFAULT_SENTIMENT_URL),
            news_feed: String::from(DEFAULT_NEWS_FEED_URL),
            news_publisher: String::from(DEFAULT_NEWS_PUBLISHER),
            telegram: String::from(DEFAULT_TELEGRAM_URL),
        }
    }
}

impl Endpoints {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |name: &str, default: String| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
        };

        Self {
            coingecko: pick(COINGECKO_URL_VAR, defaults.coingecko),
            sentiment: pick(SENTIMENT_URL_VAR, defaults.sentiment),
            news_feed: pick(NEWS_FEED_URL_VAR, defaults.news_feed),
            news_publisher: defaults.news_publisher,
            telegram: pick(TELEGRAM_URL_VAR, defaults.telegram),
        }
    }
}

/// Destination and credential for the delivered brief.
#[derive(Debug)]
pub struct DeliveryConfig {
    pub bot_token: SecretString,
    pub chat_id: String,
}

impl DeliveryConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: SecretString::from(bot_token.into()),
            chat_id: chat_id.into(),
        }
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = required(lookup, BOT_TOKEN_VAR)?;
        let chat_id = required(lookup, CHAT_ID_VAR)?;
        Ok(Self::new(token, chat_id))
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, ConfigError> {
    let value = lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_owned()))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::BlankEnvVar(name.to_owned()));
    }
    Ok(trimmed.to_owned())
}

/// Complete runtime configuration.
#[derive(Debug)]
pub struct Settings {
    pub endpoints: Endpoints,
    pub delivery: DeliveryConfig,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            delivery: DeliveryConfig::from_lookup(&lookup)?,
            endpoints: Endpoints::from_lookup(&lookup),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn credentials_and_defaults_are_loaded() {
        let settings = Settings::from_lookup(lookup(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (CHAT_ID_VAR, "-1001"),
        ]))
        .expect("complete config");

        assert_eq!(settings.delivery.bot_token.expose_secret(), "123:abc");
        assert_eq!(settings.delivery.chat_id, "-1001");
        assert_eq!(settings.endpoints, Endpoints::default());
    }

    #[test]
    fn missing_token_fails_fast_with_variable_name() {
        let error = Settings::from_lookup(lookup(&[(CHAT_ID_VAR, "-1001")]))
            .expect_err("token is required");

        assert_eq!(error, ConfigError::MissingEnvVar(BOT_TOKEN_VAR.to_owned()));
    }

    #[test]
    fn blank_chat_id_is_rejected() {
        let error = Settings::from_lookup(lookup(&[(BOT_TOKEN_VAR, "t"), (CHAT_ID_VAR, "  ")]))
            .expect_err("chat id is required");

        assert_eq!(error, ConfigError::BlankEnvVar(CHAT_ID_VAR.to_owned()));
    }

    #[test]
    fn endpoint_overrides_replace_defaults_unless_blank() {
        let settings = Settings::from_lookup(lookup(&[
            (BOT_TOKEN_VAR, "t"),
            (CHAT_ID_VAR, "c"),
            (COINGECKO_URL_VAR, "http://127.0.0.1:9000/api/v3/"),
            (TELEGRAM_URL_VAR, ""),
        ]))
        .expect("complete config");

        assert_eq!(settings.endpoints.coingecko, "http://127.0.0.1:9000/api/v3/");
        assert_eq!(settings.endpoints.telegram, DEFAULT_TELEGRAM_URL);
    }

    #[test]
    fn debug_output_never_shows_the_token() {
        let config = DeliveryConfig::new("123:super-secret", "-1001");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
