//! File metadata and pinning operations.
//!
//! API docs: <https://docs.pinata.cloud/api-reference/introduction>

use crate::client::Client;
use crate::error::Error;
use crate::types_rs::*;
use crate::utils::{auth_headers, gateway_base, require_non_empty, serialize_keyvalues};
use bon::Builder;
use pinata_sdk_common::helper::{into_request_failed_error, parse_data_response};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};
use std::collections::HashMap;
use time::OffsetDateTime;

//region list_files

#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFiles<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[builder(field)]
    #[serde(skip_serializing)]
    keyvalues: Vec<(&'a str, &'a str)>,
    #[builder(default = Network::Public)]
    #[serde(skip_serializing)]
    network: Network,
    name: Option<&'a str>,
    group: Option<&'a str>,
    /// Only files that belong to no group. Overrides `group`.
    #[builder(default = false)]
    #[serde(skip_serializing)]
    no_group: bool,
    cid: Option<&'a str>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    cid_pending: Option<bool>,
    mime_type: Option<&'a str>,
    order: Option<&'a str>, // ASC or DESC
    #[serde_as(as = "Option<DisplayFromStr>")]
    limit: Option<u16>,
    page_token: Option<&'a str>,
}

impl<'a, S: list_files_builder::State> ListFilesBuilder<'a, S> {
    /// Filter by one metadata pair, sent as `keyvalues[<key>]=<value>`.
    /// May be called multiple times.
    pub fn keyvalue(mut self, key: &'a str, value: &'a str) -> Self {
        self.keyvalues.push((key, value));
        self
    }
}

impl ListFiles<'_> {
    /// [API docs](https://docs.pinata.cloud/api-reference/endpoint/list-files)
    pub async fn send(&self) -> Result<FileListResponse, Error> {
        let client = self.client;
        let mut request_url = url::Url::parse(&format!(
            "{}/files/{}",
            client.config.api_url, self.network
        ))
        .unwrap();

        let mut query_map: HashMap<String, String> =
            serde_json::from_value(serde_json::to_value(self).unwrap()).unwrap();
        if self.no_group {
            query_map.insert("group".to_owned(), "null".to_owned());
        }
        for (k, v) in query_map.iter() {
            request_url.query_pairs_mut().append_pair(k, v);
        }
        for (key, value) in self.keyvalues.iter() {
            request_url
                .query_pairs_mut()
                .append_pair(&format!("keyvalues[{}]", key), value);
        }

        let resp = client
            .http_client
            .get(request_url)
            .headers(auth_headers(&client.config))
            .send()
            .await?;

        let data = parse_data_response::<FileListResponse>(resp).await?;
        Ok(data)
    }
}

//endregion

//region update_file

#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
pub struct UpdateFile<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[builder(field)]
    #[serde(serialize_with = "serialize_keyvalues", skip_serializing_if = "Vec::is_empty")]
    keyvalues: Vec<(&'a str, &'a str)>,
    #[builder(default = Network::Public)]
    #[serde(skip_serializing)]
    network: Network,
    name: Option<&'a str>,
}

impl<'a, S: update_file_builder::State> UpdateFileBuilder<'a, S> {
    /// Replace or add one metadata pair. May be called multiple times.
    pub fn keyvalue(mut self, key: &'a str, value: &'a str) -> Self {
        self.keyvalues.push((key, value));
        self
    }
}

impl UpdateFile<'_> {
    pub async fn send(&self, file_id: &str) -> Result<FileItem, Error> {
        require_non_empty(file_id, "file id")?;

        let client = self.client;
        let resp = client
            .http_client
            .put(format!(
                "{}/files/{}/{}",
                client.config.api_url, self.network, file_id
            ))
            .headers(auth_headers(&client.config))
            .json(self)
            .send()
            .await?;

        let data = parse_data_response::<FileItem>(resp).await?;
        Ok(data)
    }
}

//endregion

//region delete_files

#[derive(Builder)]
pub struct DeleteFiles<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    #[builder(field)]
    file_ids: Vec<&'a str>,
    #[builder(default = Network::Public)]
    network: Network,
}

impl<'a, S: delete_files_builder::State> DeleteFilesBuilder<'a, S> {
    pub fn file_id(mut self, file_id: &'a str) -> Self {
        self.file_ids.push(file_id);
        self
    }

    pub fn file_ids(mut self, file_ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.file_ids.extend(file_ids);
        self
    }
}

impl DeleteFiles<'_> {
    /// One DELETE round trip per collected id, stopping at the first failure.
    /// At least one id is required.
    pub async fn send(&self) -> Result<Vec<DeleteResponse>, Error> {
        if self.file_ids.is_empty() {
            return Err(Error::Common("at least one file id is required".to_owned()));
        }

        let client = self.client;
        let mut results = Vec::with_capacity(self.file_ids.len());
        for file_id in self.file_ids.iter() {
            let resp = client
                .http_client
                .delete(format!(
                    "{}/files/{}/{}",
                    client.config.api_url, self.network, file_id
                ))
                .headers(auth_headers(&client.config))
                .send()
                .await?;

            if !resp.status().is_success() {
                return Err(into_request_failed_error(resp).await.into());
            }
            results.push(DeleteResponse {
                id: (*file_id).to_owned(),
                status: "deleted".to_owned(),
            });
        }

        Ok(results)
    }
}

//endregion

//region pin_by_cid

/// Pin a CID that already exists on the public IPFS network.
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
pub struct PinByCid<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[builder(field)]
    #[serde(serialize_with = "serialize_keyvalues", skip_serializing_if = "Vec::is_empty")]
    keyvalues: Vec<(&'a str, &'a str)>,
    #[builder(field)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    host_nodes: Vec<&'a str>,
    cid: &'a str,
    name: Option<&'a str>,
    group_id: Option<&'a str>,
}

impl<'a, S: pin_by_cid_builder::State> PinByCidBuilder<'a, S> {
    pub fn keyvalue(mut self, key: &'a str, value: &'a str) -> Self {
        self.keyvalues.push((key, value));
        self
    }

    /// Multiaddr of a node already providing the content.
    pub fn host_node(mut self, host_node: &'a str) -> Self {
        self.host_nodes.push(host_node);
        self
    }
}

impl PinByCid<'_> {
    pub async fn send(&self) -> Result<PinByCidResponse, Error> {
        require_non_empty(self.cid, "cid")?;

        let client = self.client;
        let resp = client
            .http_client
            .post(format!("{}/files/public/pin_by_cid", client.config.api_url))
            .headers(auth_headers(&client.config))
            .json(self)
            .send()
            .await?;

        let data = parse_data_response::<PinByCidResponse>(resp).await?;
        Ok(data)
    }
}

//endregion

//region pin_queue

#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinQueue<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    order: Option<&'a str>, // ASC or DESC
    /// prechecking, retrieving, expired, over_free_limit, over_max_size,
    /// invalid_object or bad_host_node
    status: Option<&'a str>,
    cid: Option<&'a str>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    limit: Option<u16>,
    page_token: Option<&'a str>,
}

impl PinQueue<'_> {
    pub async fn send(&self) -> Result<PinQueueResponse, Error> {
        let client = self.client;
        let mut request_url = url::Url::parse(&format!(
            "{}/files/public/pin_by_cid",
            client.config.api_url
        ))
        .unwrap();

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

        let data = parse_data_response::<PinQueueResponse>(resp).await?;
        Ok(data)
    }
}

//endregion

//region create_access_link

/// Temporary download link for a private file.
///
/// The signed link grants access to `https://{gateway}/files/{cid}` from
/// `date` until `date + expires` seconds. The server performs the signing.
#[derive(Builder)]
pub struct CreateAccessLink<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    cid: &'a str,
    /// Validity window in seconds.
    expires: i32,
    /// Unix timestamp the window starts at. Defaults to now.
    #[builder(default = OffsetDateTime::now_utc().unix_timestamp())]
    date: i64,
    /// Gateway domain to build the link for. Defaults to the configured one.
    gateway: Option<&'a str>,
}

impl CreateAccessLink<'_> {
    /// [API docs](https://docs.pinata.cloud/api-reference/endpoint/create-private-download-link)
    pub async fn send(&self) -> Result<String, Error> {
        require_non_empty(self.cid, "cid")?;
        if self.expires <= 0 {
            return Err(Error::Common("expires must be positive".to_owned()));
        }

        let client = self.client;
        let gateway = self.gateway.unwrap_or(&client.config.pinata_gateway);
        let download_url = format!("{}/files/{}", gateway_base(gateway), self.cid);
        let body = serde_json::json!({
            "url": download_url,
            "date": self.date,
            "expires": self.expires,
            "method": "GET",
        });

        let resp = client
            .http_client
            .post(format!(
                "{}/files/private/download_link",
                client.config.api_url
            ))
            .headers(auth_headers(&client.config))
            .json(&body)
            .send()
            .await?;

        let data = parse_data_response::<String>(resp).await?;
        Ok(data)
    }
}

//endregion

//region query_vectors

/// Similarity search over a vectorized private group.
#[derive(Builder, Serialize)]
pub struct QueryVectors<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[serde(skip_serializing)]
    group_id: &'a str,
    text: &'a str,
}

impl QueryVectors<'_> {
    /// Match list for the query text.
    pub async fn send(&self) -> Result<VectorQueryResponse, Error> {
        let resp = self.request().await?;
        let data = parse_data_response::<VectorQueryResponse>(resp).await?;
        Ok(data)
    }

    /// Contents of the top match instead of the match list.
    pub async fn send_with_file(&self) -> Result<VectorFileResponse, Error> {
        let resp = self.request().await?;
        if !resp.status().is_success() {
            return Err(into_request_failed_error(resp).await.into());
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let data = resp.bytes().await?.to_vec();
        Ok(VectorFileResponse { content_type, data })
    }

    async fn request(&self) -> Result<reqwest::Response, Error> {
        require_non_empty(self.group_id, "group id")?;
        require_non_empty(self.text, "query text")?;

        let client = self.client;
        let resp = client
            .http_client
            .post(format!(
                "{}/vectorize/groups/{}/query",
                client.config.api_url, self.group_id
            ))
            .headers(auth_headers(&client.config))
            .json(self)
            .send()
            .await?;
        Ok(resp)
    }
}

//endregion

/// File operations
impl Client {
    pub async fn get_file(&self, network: Network, file_id: &str) -> Result<FileItem, Error> {
        require_non_empty(file_id, "file id")?;

        let resp = self
            .http_client
            .get(format!(
                "{}/files/{}/{}",
                self.config.api_url, network, file_id
            ))
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        let data = parse_data_response::<FileItem>(resp).await?;
        Ok(data)
    }

    pub fn list_files(&self) -> ListFilesBuilder<'_> {
        ListFiles::builder(self)
    }

    pub fn update_file(&self) -> UpdateFileBuilder<'_> {
        UpdateFile::builder(self)
    }

    pub fn delete_files(&self) -> DeleteFilesBuilder<'_> {
        DeleteFiles::builder(self)
    }

    /// Point `cid` at the content of `swap_cid`. Both CIDs must be pinned to
    /// the account.
    pub async fn add_swap(
        &self,
        network: Network,
        cid: &str,
        swap_cid: &str,
    ) -> Result<SwapResponse, Error> {
        require_non_empty(cid, "cid")?;
        require_non_empty(swap_cid, "swap cid")?;

        let resp = self
            .http_client
            .put(format!(
                "{}/files/{}/swap/{}",
                self.config.api_url, network, cid
            ))
            .headers(auth_headers(&self.config))
            .json(&serde_json::json!({ "swap_cid": swap_cid }))
            .send()
            .await?;

        let data = parse_data_response::<SwapResponse>(resp).await?;
        Ok(data)
    }

    /// Swap history of a CID as served through `domain`.
    pub async fn swap_history(
        &self,
        network: Network,
        cid: &str,
        domain: &str,
    ) -> Result<Vec<SwapResponse>, Error> {
        require_non_empty(cid, "cid")?;
        require_non_empty(domain, "domain")?;

        let request_url = url::Url::parse_with_params(
            &format!("{}/files/{}/swap/{}", self.config.api_url, network, cid),
            [("domain", domain)],
        )
        .unwrap();

        let resp = self
            .http_client
            .get(request_url)
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        // the API reports an empty history as `"data": null`
        let data = parse_data_response::<Option<Vec<SwapResponse>>>(resp).await?;
        Ok(data.unwrap_or_default())
    }

    pub async fn remove_swap(&self, network: Network, cid: &str) -> Result<(), Error> {
        require_non_empty(cid, "cid")?;

        let resp = self
            .http_client
            .delete(format!(
                "{}/files/{}/swap/{}",
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

    pub fn pin_by_cid(&self) -> PinByCidBuilder<'_> {
        PinByCid::builder(self)
    }

    pub fn pin_queue(&self) -> PinQueueBuilder<'_> {
        PinQueue::builder(self)
    }

    pub async fn cancel_pin_request(&self, request_id: &str) -> Result<(), Error> {
        require_non_empty(request_id, "request id")?;

        let resp = self
            .http_client
            .delete(format!(
                "{}/files/public/pin_by_cid/{}",
                self.config.api_url, request_id
            ))
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(into_request_failed_error(resp).await.into());
        }
        Ok(())
    }

    pub fn create_access_link(&self) -> CreateAccessLinkBuilder<'_> {
        CreateAccessLink::builder(self)
    }

    /// Create vector embeddings for a private file that belongs to a group.
    pub async fn vectorize_file(&self, file_id: &str) -> Result<VectorizeResponse, Error> {
        require_non_empty(file_id, "file id")?;

        let resp = self
            .http_client
            .post(format!(
                "{}/vectorize/files/{}",
                self.config.api_url, file_id
            ))
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        let data = parse_data_response::<VectorizeResponse>(resp).await?;
        Ok(data)
    }

    pub async fn remove_file_vectors(&self, file_id: &str) -> Result<VectorizeResponse, Error> {
        require_non_empty(file_id, "file id")?;

        let resp = self
            .http_client
            .delete(format!(
                "{}/vectorize/files/{}",
                self.config.api_url, file_id
            ))
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        let data = parse_data_response::<VectorizeResponse>(resp).await?;
        Ok(data)
    }

    pub fn query_vectors(&self) -> QueryVectorsBuilder<'_> {
        QueryVectors::builder(self)
    }
}
