//! Group management. Groups collect files on one network and, for public
//! groups, expose them together.

use crate::client::Client;
use crate::error::Error;
use crate::types_rs::*;
use crate::utils::{auth_headers, require_non_empty};
use bon::Builder;
use pinata_sdk_common::helper::{into_request_failed_error, parse_data_response};
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};
use std::collections::HashMap;

//region create_group

#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
pub struct CreateGroup<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[builder(default = Network::Public)]
    #[serde(skip_serializing)]
    network: Network,
    name: &'a str,
    is_public: Option<bool>,
}

impl CreateGroup<'_> {
    pub async fn send(&self) -> Result<Group, Error> {
        require_non_empty(self.name, "group name")?;

        let client = self.client;
        let resp = client
            .http_client
            .post(format!("{}/groups/{}", client.config.api_url, self.network))
            .headers(auth_headers(&client.config))
            .json(self)
            .send()
            .await?;

        let data = parse_data_response::<Group>(resp).await?;
        Ok(data)
    }
}

//endregion

//region list_groups

#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGroups<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[builder(default = Network::Public)]
    #[serde(skip_serializing)]
    network: Network,
    name: Option<&'a str>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    is_public: Option<bool>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    limit: Option<u16>,
    page_token: Option<&'a str>,
}

impl ListGroups<'_> {
    pub async fn send(&self) -> Result<GroupListResponse, Error> {
        let client = self.client;
        let mut request_url = url::Url::parse(&format!(
            "{}/groups/{}",
            client.config.api_url, self.network
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

        let data = parse_data_response::<GroupListResponse>(resp).await?;
        Ok(data)
    }
}

//endregion

/// Group operations
impl Client {
    pub fn create_group(&self) -> CreateGroupBuilder<'_> {
        CreateGroup::builder(self)
    }

    pub async fn get_group(&self, network: Network, group_id: &str) -> Result<Group, Error> {
        require_non_empty(group_id, "group id")?;

        let resp = self
            .http_client
            .get(format!(
                "{}/groups/{}/{}",
                self.config.api_url, network, group_id
            ))
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        let data = parse_data_response::<Group>(resp).await?;
        Ok(data)
    }

    pub fn list_groups(&self) -> ListGroupsBuilder<'_> {
        ListGroups::builder(self)
    }

    pub async fn update_group(
        &self,
        network: Network,
        group_id: &str,
        name: &str,
    ) -> Result<Group, Error> {
        require_non_empty(group_id, "group id")?;
        require_non_empty(name, "group name")?;

        let resp = self
            .http_client
            .put(format!(
                "{}/groups/{}/{}",
                self.config.api_url, network, group_id
            ))
            .headers(auth_headers(&self.config))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;

        let data = parse_data_response::<Group>(resp).await?;
        Ok(data)
    }

    pub async fn delete_group(&self, network: Network, group_id: &str) -> Result<(), Error> {
        require_non_empty(group_id, "group id")?;

        let resp = self
            .http_client
            .delete(format!(
                "{}/groups/{}/{}",
                self.config.api_url, network, group_id
            ))
            .headers(auth_headers(&self.config))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(into_request_failed_error(resp).await.into());
        }
        Ok(())
    }

    /// One PUT round trip per file id, stopping at the first failure.
    pub async fn add_files_to_group(
        &self,
        network: Network,
        group_id: &str,
        file_ids: &[&str],
    ) -> Result<(), Error> {
        self.change_group_membership(network, group_id, file_ids, true)
            .await
    }

    /// One DELETE round trip per file id, stopping at the first failure.
    pub async fn remove_files_from_group(
        &self,
        network: Network,
        group_id: &str,
        file_ids: &[&str],
    ) -> Result<(), Error> {
        self.change_group_membership(network, group_id, file_ids, false)
            .await
    }

    async fn change_group_membership(
        &self,
        network: Network,
        group_id: &str,
        file_ids: &[&str],
        add: bool,
    ) -> Result<(), Error> {
        require_non_empty(group_id, "group id")?;
        if file_ids.is_empty() {
            return Err(Error::Common("at least one file id is required".to_owned()));
        }

        for file_id in file_ids {
            require_non_empty(file_id, "file id")?;
            let request_url = format!(
                "{}/groups/{}/{}/ids/{}",
                self.config.api_url, network, group_id, file_id
            );
            let request = if add {
                self.http_client.put(request_url)
            } else {
                self.http_client.delete(request_url)
            };
            let resp = request
                .headers(auth_headers(&self.config))
                .send()
                .await?;

            if !resp.status().is_success() {
                return Err(into_request_failed_error(resp).await.into());
            }
        }
        Ok(())
    }
}
