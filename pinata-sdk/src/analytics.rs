//! Gateway usage reporting. Dates are `YYYY-MM-DD` strings; the range is
//! inclusive on both ends.

use crate::client::Client;
use crate::error::Error;
use crate::types_rs::*;
use crate::utils::auth_headers;
use bon::Builder;
use pinata_sdk_common::helper::{parse_data_response, parse_json_response};
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};
use std::collections::HashMap;

//region top_usage

/// Usage ranked by an attribute of the request, e.g. the most requested
/// CIDs or the countries generating the most traffic.
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
pub struct TopUsageAnalytics<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    gateway_domain: &'a str,
    start_date: &'a str,
    end_date: &'a str,
    sort_by: Option<&'a str>, // requests or bandwidth
    /// cid, country, region, user_agent, referer or file_name
    attribute: Option<&'a str>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    limit: Option<u16>,
}

impl TopUsageAnalytics<'_> {
    pub async fn send(&self) -> Result<AnalyticsResponse, Error> {
        let resp = analytics_request(self.client, "top_usage", self).await?;
        let data = parse_json_response::<AnalyticsResponse>(resp).await?;
        Ok(data)
    }
}

//endregion

//region time_series

/// Usage over time, bucketed by `date_interval`.
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
pub struct TimeSeriesAnalytics<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    gateway_domain: &'a str,
    start_date: &'a str,
    end_date: &'a str,
    date_interval: &'a str, // day or week
    sort_by: Option<&'a str>,
}

impl TimeSeriesAnalytics<'_> {
    pub async fn send(&self) -> Result<TimeSeriesResponse, Error> {
        let resp = analytics_request(self.client, "time_series", self).await?;
        let data = parse_data_response::<TimeSeriesResponse>(resp).await?;
        Ok(data)
    }
}

//endregion

async fn analytics_request<T: Serialize>(
    client: &Client,
    report: &str,
    query: &T,
) -> Result<reqwest::Response, Error> {
    let mut request_url = url::Url::parse(&format!(
        "{}/analytics/gateways/{}",
        client.config.api_url, report
    ))
    .unwrap();

    let query_map: HashMap<String, String> =
        serde_json::from_value(serde_json::to_value(query).unwrap()).unwrap();
    for (k, v) in query_map.iter() {
        request_url.query_pairs_mut().append_pair(k, v);
    }

    let resp = client
        .http_client
        .get(request_url)
        .headers(auth_headers(&client.config))
        .send()
        .await?;
    Ok(resp)
}

/// Analytics operations
impl Client {
    pub fn top_usage_analytics(&self) -> TopUsageAnalyticsBuilder<'_> {
        TopUsageAnalytics::builder(self)
    }

    pub fn time_series_analytics(&self) -> TimeSeriesAnalyticsBuilder<'_> {
        TimeSeriesAnalytics::builder(self)
    }
}
