//! Content retrieval through the configured dedicated gateway.
//!
//! Gateway requests carry no SDK auth headers. Access control is the
//! optional `pinataGatewayToken` query parameter from the config.

use crate::client::Client;
use crate::error::Error;
use crate::types_rs::Network;
use crate::utils::{gateway_base, require_non_empty};
use bytes::Bytes;
use pinata_sdk_common::helper::into_request_failed_error;
use reqwest::header::CONTENT_TYPE;

#[derive(Debug)]
pub struct GatewayResponse {
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Gateway operations
impl Client {
    /// Fetch the content behind a CID. Public content resolves under
    /// `/ipfs/{cid}`, private content under `/files/{cid}` and needs either
    /// a gateway key or a temporary access link.
    pub async fn get_file_content(
        &self,
        network: Network,
        cid: &str,
    ) -> Result<GatewayResponse, Error> {
        require_non_empty(cid, "cid")?;

        let resp = self
            .http_client
            .get(self.content_url(network, cid))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(into_request_failed_error(resp).await.into());
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let data = resp.bytes().await?;
        Ok(GatewayResponse { content_type, data })
    }

    /// Public retrieval URL for a CID on the configured gateway. No request
    /// is made.
    pub fn gateway_url(&self, cid: &str) -> String {
        self.content_url(Network::Public, cid)
    }

    fn content_url(&self, network: Network, cid: &str) -> String {
        let base = gateway_base(&self.config.pinata_gateway);
        let path = match network {
            Network::Public => "ipfs",
            Network::Private => "files",
        };
        let mut request_url = url::Url::parse(&format!("{}/{}/{}", base, path, cid)).unwrap();
        if let Some(key) = &self.config.pinata_gateway_key {
            request_url
                .query_pairs_mut()
                .append_pair("pinataGatewayToken", key);
        }
        request_url.to_string()
    }
}
