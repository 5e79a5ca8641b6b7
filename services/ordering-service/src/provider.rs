use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::PaymentConfig;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("payment provider timed out")]
    Timeout,
    #[error("payment provider request failed: {0}")]
    Request(String),
    #[error("payment provider returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("payment provider response malformed: {0}")]
    Decode(String),
}

/// A created charge intent, as the client needs it: the secret it hands to
/// the provider's browser SDK to confirm the charge.
#[derive(Debug, Clone)]
pub struct ChargeIntent {
    pub client_secret: String,
}

/// Opaque payment-provider dependency: create a charge intent, return a
/// client secret. Capture and confirmation happen provider-side.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<ChargeIntent, ProviderError>;
}

/// Stripe-style HTTP implementation.
pub struct StripeProvider {
    client: reqwest::Client,
    api_url: String,
    secret_key: String,
}

#[derive(Deserialize)]
struct IntentResponse {
    client_secret: String,
}

impl StripeProvider {
    pub fn new(config: &PaymentConfig) -> anyhow::Result<Self> {
        // Explicit request timeout: a hung provider must not hold the
        // checkout path open indefinitely (and timeouts on this path are
        // surfaced as non-retryable upstream failures, never auto-retried).
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("failed to build payment provider client")?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<ChargeIntent, ProviderError> {
        let amount = amount_minor.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_url))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Request(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let intent: IntentResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))?;

        debug!(amount_minor, currency, "created provider charge intent");
        Ok(ChargeIntent {
            client_secret: intent.client_secret,
        })
    }
}

/// In-process stand-in for tests and local development.
pub struct StubProvider;

impl StubProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProvider for StubProvider {
    async fn create_intent(
        &self,
        amount_minor: i64,
        _currency: &str,
    ) -> Result<ChargeIntent, ProviderError> {
        Ok(ChargeIntent {
            client_secret: format!("stub_secret_{amount_minor}"),
        })
    }
}
