use std::{future::Future, sync::Arc, time::Duration};

use crate::{config::Config, dates::DateRange, error::RateError};

pub const TOKEN_HEADER: &str = "Bmx-Token";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can hand back the raw SIE payload for a date range.
pub trait RateSource {
    fn fetch_rates(&self, range: &DateRange) -> impl Future<Output = Result<String, RateError>> + Send;
}

/// HTTP client used for SIE calls. Sends `Accept-Encoding: gzip` and
/// decompresses the body.
pub fn http_client() -> Result<reqwest::Client, RateError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .gzip(true)
        .build()
        .map_err(|e| RateError::UpstreamRequestFailed(format!("could not build http client: {e}")))
}

#[derive(Debug, Clone)]
pub struct BanxicoClient {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl BanxicoClient {
    pub fn new_w_client(client: reqwest::Client, config: Config) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn new(config: Config) -> Result<Self, RateError> {
        Ok(Self::new_w_client(http_client()?, config))
    }

    pub fn url_for(&self, range: &DateRange) -> String {
        format!("{}/{}/{}", self.config.base_url, range.start, range.end)
    }
}

impl RateSource for BanxicoClient {
    async fn fetch_rates(&self, range: &DateRange) -> Result<String, RateError> {
        let url = self.url_for(range);
        tracing::info!(%url, "requesting USD/MXN series");

        let response = self.client
            .get(&url)
            .header(TOKEN_HEADER, self.config.api_token.as_str())
            .send()
            .await
            .map_err(|e| RateError::UpstreamRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "SIE answered with an error status");
            return Err(RateError::UpstreamRequestFailed(format!("status {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RateError::ResponseDecodeFailed(e.to_string()))?;

        String::from_utf8(bytes.to_vec()).map_err(|e| RateError::ResponseDecodeFailed(e.to_string()))
    }
}
