use crate::config::Config;
use crate::error::Error;
use crate::types_rs::AuthTestResponse;
use crate::utils;
use bon::bon;
use pinata_sdk_common::helper::parse_json_response;

/// Entry point for every API call.
///
/// Holds the [`Config`] and a shared `reqwest::Client`, cloning it is cheap.
///
/// ```rust,no_run
/// use pinata_sdk::{Client, Config};
///
/// let config = Config::new("<jwt>", "example.mypinata.cloud");
/// let client = Client::builder().config(config).build();
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) config: Config,
    pub(crate) http_client: reqwest::Client,
}

#[bon]
impl Client {
    #[builder]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

impl Client {
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check that the configured credential is accepted by the API.
    ///
    /// The endpoint lives outside the versioned API root, its URL is derived
    /// by stripping the `/v3` suffix from `api_url`.
    pub async fn test_authentication(&self) -> Result<AuthTestResponse, Error> {
        let root = self
            .config
            .api_url
            .trim_end_matches('/')
            .trim_end_matches("/v3");
        let url = format!("{}/data/testAuthentication", root);

        let resp = self
            .http_client
            .get(url)
            .headers(utils::auth_headers(&self.config))
            .send()
            .await?;
        let data = parse_json_response::<AuthTestResponse>(resp).await?;
        Ok(data)
    }
}
