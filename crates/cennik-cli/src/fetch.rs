//! HTTP source retrieval for the pipelines.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use cennik_core::{FetchError, RawSource, SourceFetcher, SourceSpec};

/// Fetcher backed by a reqwest client with a per-request deadline.
///
/// Retrieval is the only externally controlled operation in a run, so
/// the timeout lives here; on timeout the owning pipeline proceeds to
/// its fallback instead of blocking.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cennik/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url).await?;
        let bytes = response.bytes().await.map_err(|e| map_error(url, e))?;
        Ok(bytes.to_vec())
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        response.text().await.map_err(|e| map_error(url, e))
    }
}

fn map_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Unavailable(format!("{}: {}", url, err))
    }
}

impl SourceFetcher for HttpFetcher {
    fn fetch(
        &self,
        source: &SourceSpec,
    ) -> impl Future<Output = Result<RawSource, FetchError>> + Send {
        async move {
            match source {
                SourceSpec::Pdf { url } => Ok(RawSource::Pdf(self.get_bytes(url).await?)),
                SourceSpec::Web {
                    standard_url,
                    promo_url,
                } => {
                    // The promotional page is optional; a miss there is
                    // routine (no promotion running right now)
                    let promo = match promo_url {
                        Some(url) => match self.get_text(url).await {
                            Ok(html) => Some(html),
                            Err(err) => {
                                debug!(url, error = %err, "no promotional page");
                                None
                            }
                        },
                        None => None,
                    };

                    let standard = match self.get_text(standard_url).await {
                        Ok(html) => Some(html),
                        Err(err) => {
                            warn!(url = standard_url, error = %err, "standard page fetch failed");
                            None
                        }
                    };

                    if standard.is_none() && promo.is_none() {
                        return Err(FetchError::Unavailable(format!(
                            "no page retrieved for {}",
                            standard_url
                        )));
                    }

                    Ok(RawSource::Pages { standard, promo })
                }
            }
        }
    }
}
