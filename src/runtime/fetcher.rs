use async_trait::async_trait;
use reqwest::Client;

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, String>;
}

/// Fetches documents over HTTP and decodes them to UTF-8.
///
/// A charset declared in the `Content-Type` header always wins. Pages that
/// declare nothing are decoded with `fallback_encoding`, which institutions
/// serving GBK without saying so override through `sources.json`.
pub struct HttpFetcher {
    client: Client,
    fallback_encoding: String,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            fallback_encoding: "utf-8".to_string(),
        }
    }

    pub fn with_encoding(mut self, encoding: Option<&str>) -> Self {
        if let Some(label) = encoding.map(str::trim).filter(|label| !label.is_empty()) {
            self.fallback_encoding = label.to_ascii_lowercase();
        }
        self
    }

    pub fn fallback_encoding(&self) -> &str {
        &self.fallback_encoding
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Network error fetching {url}: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP error {} fetching {url}", status.as_u16()));
        }

        response
            .text_with_charset(&self.fallback_encoding)
            .await
            .map_err(|e| {
                format!(
                    "Error decoding response body from {url} as {}: {e}",
                    self.fallback_encoding
                )
            })
    }
}
