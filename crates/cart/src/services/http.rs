//! HTTP client for the pricing & coupons service.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use common::{Money, Sku};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::coupons::{CouponValidator, CouponVerdict};
use super::pricing::PricingLookup;
use crate::error::UpstreamError;

#[derive(Deserialize)]
struct PriceResponse {
    price: Money,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest<'a> {
    code: &'a str,
    items_total: Money,
}

#[derive(Deserialize)]
struct ValidateResponse {
    valid: bool,
    #[serde(default)]
    discount: Option<Money>,
    #[serde(default, rename = "final")]
    final_total: Option<Money>,
    #[serde(default)]
    reason: Option<String>,
}

/// Talks to the pricing service over HTTP.
///
/// Every call is bounded by `timeout`; running out of time is reported as
/// [`UpstreamError::Timeout`], never as "not found".
#[derive(Debug, Clone)]
pub struct HttpPricingClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpPricingClient {
    /// Creates a client for the pricing service at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        call: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, UpstreamError> {
        let started = Instant::now();
        let result = request.timeout(self.timeout).send().await;
        metrics::histogram!("downstream_request_duration_seconds", "call" => call)
            .record(started.elapsed().as_secs_f64());

        result.map_err(|e| {
            if e.is_timeout() {
                warn!(call, timeout = ?self.timeout, "upstream call timed out");
                UpstreamError::Timeout(self.timeout)
            } else {
                warn!(call, error = %e, "upstream call failed");
                UpstreamError::Transport(e.to_string())
            }
        })
    }
}

#[async_trait]
impl PricingLookup for HttpPricingClient {
    #[instrument(skip(self), fields(sku = %sku))]
    async fn price(&self, sku: &Sku) -> Result<Money, UpstreamError> {
        let request = self
            .client
            .get(format!("{}/api/pricing/price", self.base_url))
            .query(&[("sku", sku.as_str())]);

        let response = self.send("price_lookup", request).await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "no price returned");
            return Err(UpstreamError::NotFound);
        }

        let body: PriceResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(self.timeout)
            } else {
                UpstreamError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(body.price)
    }
}

#[async_trait]
impl CouponValidator for HttpPricingClient {
    #[instrument(skip(self))]
    async fn validate(
        &self,
        code: &str,
        items_total: Money,
    ) -> Result<CouponVerdict, UpstreamError> {
        let request = self
            .client
            .post(format!("{}/api/pricing/coupons/validate", self.base_url))
            .json(&ValidateRequest { code, items_total });

        let response = self.send("coupon_validation", request).await?;

        if !response.status().is_success() {
            return Err(UpstreamError::InvalidResponse(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body: ValidateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(self.timeout)
            } else {
                UpstreamError::InvalidResponse(e.to_string())
            }
        })?;

        if !body.valid {
            return Ok(CouponVerdict::Invalid {
                reason: body.reason.unwrap_or_else(|| "invalid".to_string()),
            });
        }

        match (body.discount, body.final_total) {
            (Some(discount), Some(final_total)) => Ok(CouponVerdict::Valid {
                discount,
                final_total,
            }),
            _ => Err(UpstreamError::InvalidResponse(
                "valid coupon without discount or final".to_string(),
            )),
        }
    }
}
