use bon::Builder;
use std::collections::HashMap;

/// Default base URL for the REST API.
pub const DEFAULT_API_URL: &str = "https://api.pinata.cloud/v3";
/// Default base URL for the upload API.
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.pinata.cloud/v3";

/// Configuration for [`Client`](crate::Client).
///
/// `api_url` and `upload_url` can be overridden to point the whole SDK at a
/// different host, e.g. a local mock server in tests.
#[derive(Builder, Clone, Debug)]
#[builder(on(String, into))]
pub struct Config {
    /// JWT used as the `Bearer` credential on every API request
    pub pinata_jwt: String,
    /// Dedicated gateway domain, e.g. `example-sub.mypinata.cloud`.
    /// A scheme prefix is allowed and `https` is assumed when absent.
    pub pinata_gateway: String,
    /// Access token appended to gateway retrieval URLs as `pinataGatewayToken`
    pub pinata_gateway_key: Option<String>,
    /// Extra headers set on every API request
    #[builder(default)]
    pub custom_headers: HashMap<String, String>,
    #[builder(default = DEFAULT_API_URL.to_owned())]
    pub api_url: String,
    #[builder(default = DEFAULT_UPLOAD_URL.to_owned())]
    pub upload_url: String,
}

impl Config {
    /// Configuration with the production endpoints and no extras.
    pub fn new(pinata_jwt: impl Into<String>, pinata_gateway: impl Into<String>) -> Self {
        Self {
            pinata_jwt: pinata_jwt.into(),
            pinata_gateway: pinata_gateway.into(),
            pinata_gateway_key: None,
            custom_headers: HashMap::new(),
            api_url: DEFAULT_API_URL.to_owned(),
            upload_url: DEFAULT_UPLOAD_URL.to_owned(),
        }
    }
}

#[test]
fn config_defaults() {
    let conf = Config::new("jwt", "example.mypinata.cloud");
    assert_eq!(conf.api_url, DEFAULT_API_URL);
    assert_eq!(conf.upload_url, DEFAULT_UPLOAD_URL);
    assert!(conf.pinata_gateway_key.is_none());
    assert!(conf.custom_headers.is_empty());

    let built = Config::builder()
        .pinata_jwt("jwt")
        .pinata_gateway("example.mypinata.cloud")
        .pinata_gateway_key("gw-key")
        .build();
    assert_eq!(built.api_url, DEFAULT_API_URL);
    assert_eq!(built.pinata_gateway_key.as_deref(), Some("gw-key"));
}
