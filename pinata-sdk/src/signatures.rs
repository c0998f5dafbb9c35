//! EIP-712 signatures attached to a CID. The signature is produced off-SDK
//! by the content creator's wallet; these calls only store and retrieve it.

use crate::client::Client;
use crate::error::Error;
use crate::types_rs::*;
use crate::utils::{auth_headers, require_non_empty};
use pinata_sdk_common::helper::{into_request_failed_error, parse_data_response};

/// Signature operations
impl Client {
    pub async fn add_signature(
        &self,
        network: Network,
        cid: &str,
        signature: &str,
        address: &str,
    ) -> Result<SignatureResponse, Error> {
        require_non_empty(cid, "cid")?;
        require_non_empty(signature, "signature")?;
        require_non_empty(address, "address")?;

        let resp = self
            .http_client
            .post(format!(
                "{}/files/{}/signature/{}",
                self.config.api_url, network, cid
            ))
            .headers(auth_headers(&self.config))
            .json(&serde_json::json!({
                "signature": signature,
                "address": address,
            }))
            .send()
            .await?;

        let data = parse_data_response::<SignatureResponse>(resp).await?;
        Ok(data)
    }

    pub async fn get_signature(
        &self,
        network: Network,
        cid: &str,
    ) -> Result<SignatureResponse, Error> {
        require_non_empty(cid, "cid")?;

        let resp = self
            .http_client
            .get(format!(
                "{}/files/{}/signature/{}",
                self.config.api_url, network, cid
            ))
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        let data = parse_data_response::<SignatureResponse>(resp).await?;
        Ok(data)
    }

    pub async fn remove_signature(&self, network: Network, cid: &str) -> Result<(), Error> {
        require_non_empty(cid, "cid")?;

        let resp = self
            .http_client
            .delete(format!(
                "{}/files/{}/signature/{}",
                self.config.api_url, network, cid
            ))
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(into_request_failed_error(resp).await.into());
        }
        Ok(())
    }
}
