use anyhow::Context;
use reqwest::Client;
use std::env;
use std::time::Duration;

use crate::error::HoroscopeError;

pub fn get_env_variable(key: &str) -> anyhow::Result<String> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(e) => match e {
            env::VarError::NotPresent => Err(anyhow::anyhow!("Environment variable {key} not found.")),
            env::VarError::NotUnicode(oss) => Err(anyhow::anyhow!(
                "Environment variable {key} contains invalid data: {oss:?}"
            )),
        },
    }
}

/// Build the shared http client, every request through it is bounded by `timeout`
pub fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build http client")
}

/// Get a page as text, any non success status is an error
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, HoroscopeError> {
    tracing::debug!(url, "fetching page");
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}
