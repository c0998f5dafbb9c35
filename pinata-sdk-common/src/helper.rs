use crate::Error;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::collections::HashMap;

pub fn into_header_map(map: HashMap<String, String>) -> HeaderMap {
    map.iter()
        .map(|(k, v)| {
            let name = HeaderName::from_bytes(k.as_bytes()).unwrap();
            let value = HeaderValue::from_bytes(v.as_bytes()).unwrap();
            (name, value)
        })
        .collect()
}

pub async fn into_request_failed_error(resp: reqwest::Response) -> Error {
    let status = resp.status();
    let body = resp.text().await;
    match body {
        Ok(message) => Error::RequestAPIFailed {
            status: status.to_string(),
            message,
        },
        Err(e) => Error::Reqwest(e),
    }
}

pub async fn parse_json_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        return Err(into_request_failed_error(resp).await);
    }

    let text = resp.text().await?;
    let data = serde_json::from_str(&text).map_err(|e| {
        Error::Common(format!(
            "parse response json error: {}, response text: {}",
            e, text
        ))
    })?;
    Ok(data)
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Same as [`parse_json_response`], but for endpoints that wrap the payload
/// in a `{"data": ...}` envelope.
pub async fn parse_data_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let envelope: DataEnvelope<T> = parse_json_response(resp).await?;
    Ok(envelope.data)
}

#[test]
fn data_envelope_unwraps() {
    let envelope =
        serde_json::from_str::<DataEnvelope<Vec<String>>>(r#"{"data": ["a", "b"]}"#).unwrap();
    assert_eq!(envelope.data, vec!["a", "b"]);

    let envelope = serde_json::from_str::<DataEnvelope<Option<String>>>(r#"{"data": null}"#).unwrap();
    assert!(envelope.data.is_none());
}
