//! API key administration. Requires an admin credential; responses on this
//! endpoint family are not wrapped in a `data` envelope.

use crate::client::Client;
use crate::error::Error;
use crate::types_rs::*;
use crate::utils::{auth_headers, require_non_empty};
use bon::Builder;
use pinata_sdk_common::helper::{into_request_failed_error, parse_json_response};
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};
use std::collections::HashMap;

//region create_key

/// Create a scoped or admin API key. The returned `JWT` is only shown once.
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKey<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    key_name: &'a str,
    permissions: KeyPermissions,
    /// Number of requests the key may serve before it is exhausted.
    max_uses: Option<i64>,
}

impl CreateKey<'_> {
    pub async fn send(&self) -> Result<CreateKeyResponse, Error> {
        require_non_empty(self.key_name, "key name")?;

        let client = self.client;
        let resp = client
            .http_client
            .post(format!("{}/pinata/keys", client.config.api_url))
            .headers(auth_headers(&client.config))
            .json(self)
            .send()
            .await?;

        let data = parse_json_response::<CreateKeyResponse>(resp).await?;
        Ok(data)
    }
}

//endregion

//region list_keys

#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListKeys<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    name: Option<&'a str>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    revoked: Option<bool>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    limited_use: Option<bool>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    exhausted: Option<bool>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    offset: Option<u32>,
}

impl ListKeys<'_> {
    pub async fn send(&self) -> Result<KeyListResponse, Error> {
        let client = self.client;
        let mut request_url =
            url::Url::parse(&format!("{}/pinata/keys", client.config.api_url)).unwrap();

        let query_map: HashMap<String, String> =
            serde_json::from_value(serde_json::to_value(self).unwrap()).unwrap();
        for (k, v) in query_map.iter() {
            request_url.query_pairs_mut().append_pair(k, v);
        }

        let resp = client
            .http_client
            .get(request_url)
            .headers(auth_headers(&client.config))
            .send()
            .await?;

        let data = parse_json_response::<KeyListResponse>(resp).await?;
        Ok(data)
    }
}

//endregion

/// Key operations
impl Client {
    pub fn create_key(&self) -> CreateKeyBuilder<'_> {
        CreateKey::builder(self)
    }

    pub fn list_keys(&self) -> ListKeysBuilder<'_> {
        ListKeys::builder(self)
    }

    /// Revoke by the key string itself, not the key id.
    pub async fn revoke_key(&self, key: &str) -> Result<(), Error> {
        require_non_empty(key, "key")?;

        let resp = self
            .http_client
            .put(format!("{}/pinata/keys/{}/revoke", self.config.api_url, key))
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(into_request_failed_error(resp).await.into());
        }
        Ok(())
    }
}
