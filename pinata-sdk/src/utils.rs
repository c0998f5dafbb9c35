use crate::config::Config;
#[cfg(any(
    feature = "files",
    feature = "groups",
    feature = "keys",
    feature = "signatures",
    feature = "gateways"
))]
use crate::error::Error;
use pinata_sdk_common::helper::into_header_map;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// Request headers for the REST and upload APIs: custom headers from the
/// config plus the `Bearer` credential.
pub(crate) fn auth_headers(config: &Config) -> HeaderMap {
    let mut header_map = into_header_map(config.custom_headers.clone());
    let mut auth_val = HeaderValue::from_str(&format!("Bearer {}", config.pinata_jwt)).unwrap();
    auth_val.set_sensitive(true);
    header_map.insert(AUTHORIZATION, auth_val);
    header_map
}

/// Normalize the configured gateway domain into a base URL. A scheme prefix
/// and a trailing slash are tolerated, `https` is assumed when absent.
#[cfg(any(feature = "files", feature = "gateways"))]
pub(crate) fn gateway_base(gateway: &str) -> String {
    let base = gateway.trim_end_matches('/');
    if base.starts_with("http://") || base.starts_with("https://") {
        base.to_owned()
    } else {
        format!("https://{}", base)
    }
}

/// Rejects empty path and body parameters before any request goes out.
#[cfg(any(
    feature = "files",
    feature = "groups",
    feature = "keys",
    feature = "signatures",
    feature = "gateways"
))]
pub(crate) fn require_non_empty(value: &str, name: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Common(format!("{} must not be empty", name)));
    }
    Ok(())
}

/// Serializes collected `(key, value)` pairs as a JSON object.
#[cfg(any(feature = "files", feature = "upload"))]
pub(crate) fn serialize_keyvalues<K, V, S>(
    keyvalues: &[(K, V)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    K: serde::Serialize,
    V: serde::Serialize,
    S: serde::Serializer,
{
    serializer.collect_map(keyvalues.iter().map(|(k, v)| (k, v)))
}

/// Last non-empty path segment of the URL, ignoring the query string.
#[cfg(feature = "upload")]
pub(crate) fn file_name_from_url(target_url: &str) -> Option<String> {
    let parsed = url::Url::parse(target_url).ok()?;
    parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_owned())
}

#[cfg(any(
    feature = "files",
    feature = "groups",
    feature = "keys",
    feature = "signatures",
    feature = "gateways"
))]
#[test]
fn require_non_empty_rejects_blank() {
    assert!(require_non_empty("bafybeih5a", "cid").is_ok());
    assert!(require_non_empty("   ", "cid").is_err());
    assert!(require_non_empty("", "cid").is_err());
}

#[cfg(any(feature = "files", feature = "gateways"))]
#[test]
fn gateway_base_tolerates_scheme_and_slash() {
    assert_eq!(
        gateway_base("example.mypinata.cloud"),
        "https://example.mypinata.cloud"
    );
    assert_eq!(
        gateway_base("https://example.mypinata.cloud/"),
        "https://example.mypinata.cloud"
    );
    assert_eq!(
        gateway_base("http://localhost:8080"),
        "http://localhost:8080"
    );
}

#[cfg(feature = "upload")]
#[test]
fn file_name_from_url_takes_last_segment() {
    assert_eq!(
        file_name_from_url("https://example.com/images/pinnie.png").as_deref(),
        Some("pinnie.png")
    );
    assert_eq!(
        file_name_from_url("https://example.com/download?id=1").as_deref(),
        Some("download")
    );
    assert_eq!(file_name_from_url("https://example.com/images/"), None);
    assert_eq!(file_name_from_url("https://example.com"), None);
    assert_eq!(file_name_from_url("not a url"), None);
}
