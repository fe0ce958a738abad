//! Blocking HTTP transport for PUMAPI
//!
//! PUMAPI takes every action as a `POST` with form-encoded parameters and
//! answers with plain text. The whole client is synchronous, so the
//! blocking reqwest API is used with the timeout from the configuration.

use std::time::Duration;

use tracing::debug;

use crate::app::services::connection::Transport;
use crate::config::PumapiConfig;
use crate::{Error, Result};

/// Transport submitting PUMAPI actions over HTTP
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Build a transport for the configured endpoint
    pub fn new(config: &PumapiConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| Error::Transport {
                message: "failed to build HTTP client".to_string(),
                source: Some(err),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn request(&self, action: &str, params: &[(&str, String)]) -> Result<String> {
        let mut form: Vec<(&str, String)> = vec![
            ("action", action.to_string()),
            ("apikey", self.api_key.clone()),
        ];
        form.extend(params.iter().map(|(key, value)| (*key, value.clone())));

        debug!("POST {} action={}", self.base_url, action);
        let response = self.client.post(&self.base_url).form(&form).send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(Error::transport(format!(
                "action `{}` answered with HTTP status {}",
                action, status
            )));
        }

        Ok(text)
    }
}
