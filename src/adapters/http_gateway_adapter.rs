//! HTTP gateway adapter.

use crate::domain::error::WealthdeskError;
use crate::domain::gateway::{self, GatewayCredential, GatewayReply, HoldingRow, PositionRow};
use crate::ports::gateway_port::GatewayPort;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Auth body every gateway call carries.
#[derive(Serialize)]
struct AuthBody<'a> {
    apikey: &'a str,
}

pub struct HttpGatewayAdapter {
    client: reqwest::Client,
}

impl HttpGatewayAdapter {
    /// Builds the shared HTTP client. No request timeout is set: an
    /// unresponsive gateway stalls that one command rather than failing it.
    pub fn new() -> Result<Self, WealthdeskError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| WealthdeskError::ConnectionFailed {
                reason: format!("could not build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    async fn post_resource(
        &self,
        credential: &GatewayCredential,
        resource: &str,
    ) -> Result<reqwest::Response, WealthdeskError> {
        let url = credential.api_url(resource);
        debug!("POST {url}");

        self.client
            .post(&url)
            .json(&AuthBody {
                apikey: &credential.api_key,
            })
            .send()
            .await
            .map_err(|e| WealthdeskError::ConnectionFailed {
                reason: format!("request to {url} failed: {e}"),
            })
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        credential: &GatewayCredential,
        resource: &str,
    ) -> Result<GatewayReply<T>, WealthdeskError> {
        let response = self.post_resource(credential, resource).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WealthdeskError::ConnectionFailed {
                reason: format!("{resource} endpoint returned HTTP {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WealthdeskError::ConnectionFailed {
                reason: format!("could not read {resource} response: {e}"),
            })?;
        Ok(gateway::parse_reply(&body))
    }
}

#[async_trait]
impl GatewayPort for HttpGatewayAdapter {
    async fn probe_funds(&self, credential: &GatewayCredential) -> Result<(), WealthdeskError> {
        let response = self.post_resource(credential, "funds").await?;
        let status = response.status();
        // Any HTTP success status counts; the body is not inspected.
        if status.is_success() {
            Ok(())
        } else {
            Err(WealthdeskError::ConnectionFailed {
                reason: format!("funds endpoint returned HTTP {status}"),
            })
        }
    }

    async fn fetch_holdings(
        &self,
        credential: &GatewayCredential,
    ) -> Result<GatewayReply<HoldingRow>, WealthdeskError> {
        self.fetch_rows(credential, "holdings").await
    }

    async fn fetch_positions(
        &self,
        credential: &GatewayCredential,
    ) -> Result<GatewayReply<PositionRow>, WealthdeskError> {
        self.fetch_rows(credential, "positionbook").await
    }
}
