use std::sync::{Arc, LazyLock};

use log::{debug, warn};
use regex::Regex;

use crate::data_source::{NewsSource, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest};
use crate::Headline;

const PROVIDER: &str = "rss";
const TIMEOUT_MS: u64 = 20_000;
pub const MAX_HEADLINES: usize = 3;

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<title>(?:\s*<!\[CDATA\[(.*?)\]\]>\s*|([^<]*))</title>")
        .expect("title pattern is valid")
});

/// RSS feed headline adapter.
#[derive(Clone)]
pub struct RssNewsAdapter {
    http_client: Arc<dyn HttpClient>,
    feed_url: String,
    publisher: String,
}

impl RssNewsAdapter {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        feed_url: impl Into<String>,
        publisher: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            feed_url: feed_url.into(),
            publisher: publisher.into(),
        }
    }

    async fn fetch_headlines(&self) -> Vec<Headline> {
        let request = HttpRequest::get(&self.feed_url).with_timeout_ms(TIMEOUT_MS);
        debug!("{PROVIDER} request: {}", request.full_url());

        match self.http_client.execute(request).await {
            Ok(response) if response.is_success() => {
                extract_headlines(&response.body, &self.publisher)
            }
            Ok(response) => {
                warn!("{PROVIDER} feed returned status {}", response.status);
                Vec::new()
            }
            Err(error) => {
                warn!("{PROVIDER} transport error: {}", error.message());
                Vec::new()
            }
        }
    }
}

impl NewsSource for RssNewsAdapter {
    fn headlines<'a>(&'a self) -> SourceFuture<'a, Vec<Headline>> {
        Box::pin(self.fetch_headlines())
    }
}

/// Item titles from a feed document.
///
/// Empty titles are ignored. The first remaining `<title>` belongs to the
/// channel and is skipped. Only the next [`MAX_HEADLINES`] titles are
/// considered; those naming the publisher are dropped, so fewer than three
/// may come back.
pub fn extract_headlines(feed: &str, publisher: &str) -> Vec<Headline> {
    TITLE
        .captures_iter(feed)
        .filter_map(|captures| captures.get(1).or_else(|| captures.get(2)))
        .map(|text| text.as_str().trim())
        .filter(|text| !text.is_empty())
        .skip(1)
        .take(MAX_HEADLINES)
        .map(decode_entities)
        .filter(|text| publisher.is_empty() || !text.contains(publisher))
        .map(Headline::new)
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
