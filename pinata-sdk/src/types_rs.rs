use serde::{Deserialize, Serialize};
use std::collections::HashMap;

//region network

/// IPFS network a file or group lives on.
///
/// Public files are announced to the public IPFS network, private files are
/// only reachable through a dedicated gateway with a valid token or
/// temporary access link.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Public,
    Private,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Public => "public",
            Network::Private => "private",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//endregion

//region files

#[derive(Deserialize, Debug)]
pub struct FileItem {
    pub id: String,
    pub name: Option<String>,
    pub cid: String,
    pub size: i64,
    pub number_of_files: i64,
    pub mime_type: Option<String>,
    pub group_id: Option<String>,
    #[serde(default)]
    pub keyvalues: HashMap<String, String>,
    #[serde(default)]
    pub vectorized: bool,
    #[serde(default)]
    pub network: Option<Network>,
    pub created_at: String,
}

#[derive(Deserialize, Debug)]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileItem>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Per-file outcome of a delete call, reported even when the API answers
/// with an error status.
#[derive(Debug, Clone)]
pub struct DeleteResponse {
    pub id: String,
    pub status: String,
}

#[derive(Deserialize, Debug)]
pub struct SwapResponse {
    pub mapped_cid: String,
    pub created_at: String,
}

#[derive(Deserialize, Debug)]
pub struct PinByCidResponse {
    pub id: String,
    pub cid: String,
    pub status: String,
    pub name: Option<String>,
    #[serde(default)]
    pub keyvalues: HashMap<String, String>,
    #[serde(default)]
    pub host_nodes: Vec<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    pub date_queued: String,
}

#[derive(Deserialize, Debug)]
pub struct PinQueueItem {
    pub id: String,
    pub cid: String,
    pub status: String,
    pub name: Option<String>,
    #[serde(default)]
    pub keyvalues: HashMap<String, String>,
    #[serde(default)]
    pub host_nodes: Vec<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    pub date_queued: String,
}

#[derive(Deserialize, Debug)]
pub struct PinQueueResponse {
    #[serde(default)]
    pub jobs: Vec<PinQueueItem>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct VectorizeResponse {
    pub status: bool,
}

#[derive(Deserialize, Debug)]
pub struct VectorMatch {
    pub file_id: String,
    pub cid: String,
    pub score: f64,
}

#[derive(Deserialize, Debug)]
pub struct VectorQueryResponse {
    pub count: i64,
    #[serde(default)]
    pub matches: Vec<VectorMatch>,
}

/// Raw bytes of the top vector match, returned when a query asks for file
/// contents instead of the match list.
#[derive(Debug)]
pub struct VectorFileResponse {
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

//endregion

//region upload

#[derive(Deserialize, Debug)]
pub struct UploadResponse {
    pub id: String,
    pub name: Option<String>,
    pub cid: String,
    pub size: i64,
    pub number_of_files: i64,
    pub mime_type: Option<String>,
    pub group_id: Option<String>,
    #[serde(default)]
    pub keyvalues: HashMap<String, String>,
    #[serde(default)]
    pub vectorized: bool,
    #[serde(default)]
    pub network: Option<Network>,
    #[serde(default)]
    pub is_duplicate: bool,
    pub created_at: String,
}

//endregion

//region groups

#[derive(Deserialize, Debug)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: String,
}

#[derive(Deserialize, Debug)]
pub struct GroupListResponse {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

//endregion

//region keys

/// Scopes granted to an API key. Admin keys carry `admin: true` and no
/// endpoint list, scoped keys the other way around.
#[derive(Deserialize, Debug, Clone)]
pub struct KeyScopes {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub endpoints: KeyEndpointScopes,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct KeyEndpointScopes {
    #[serde(default)]
    pub pinning: PinningScopes,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct PinningScopes {
    #[serde(rename = "pinFileToIPFS", default)]
    pub pin_file_to_ipfs: bool,
    #[serde(rename = "pinJSONToIPFS", default)]
    pub pin_json_to_ipfs: bool,
}

/// Permission set for a new API key, either full admin or per-endpoint.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Debug, Default, Clone)]
pub struct KeyPermissions {
    pub admin: Option<bool>,
    pub endpoints: Option<KeyEndpointScopes>,
}

#[derive(Deserialize, Debug)]
pub struct Key {
    pub id: String,
    pub name: String,
    pub key: String,
    pub secret: String,
    #[serde(default)]
    pub max_uses: Option<i64>,
    pub uses: i64,
    pub user_id: String,
    pub scopes: KeyScopes,
    pub revoked: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Deserialize, Debug)]
pub struct KeyListResponse {
    #[serde(default)]
    pub keys: Vec<Key>,
    pub count: i64,
}

/// The `JWT` is only returned on creation and cannot be recovered later.
#[derive(Deserialize, Debug)]
pub struct CreateKeyResponse {
    #[serde(rename = "JWT")]
    pub jwt: String,
    pub pinata_api_key: String,
    pub pinata_api_secret: String,
}

//endregion

//region signatures

#[derive(Deserialize, Debug)]
pub struct SignatureResponse {
    pub cid: String,
    pub signature: String,
}

//endregion

//region analytics

#[derive(Deserialize, Debug)]
pub struct AnalyticsItem {
    pub value: String,
    pub requests: i64,
    pub bandwidth: i64,
}

#[derive(Deserialize, Debug)]
pub struct AnalyticsResponse {
    #[serde(default)]
    pub data: Vec<AnalyticsItem>,
}

#[derive(Deserialize, Debug)]
pub struct TimePeriod {
    pub period_start_time: String,
    pub requests: i64,
    pub bandwidth: i64,
}

#[derive(Deserialize, Debug)]
pub struct TimeSeriesResponse {
    pub total_requests: i64,
    pub total_bandwidth: i64,
    #[serde(default)]
    pub time_periods: Vec<TimePeriod>,
}

//endregion

//region auth

#[derive(Deserialize, Debug)]
pub struct AuthTestResponse {
    pub message: String,
}

//endregion

#[test]
fn deserialize_file_item() {
    let json = r#"{
        "id": "b2d7b8ac-e521-4e3f-9f08-fbeb8ba0a1f9",
        "name": "pinnie.png",
        "cid": "bafybeihgxdzljxb26q6nf3r3eifqeedsvt2eubqtskghpme66cgjyw4fra",
        "size": 4861678,
        "number_of_files": 1,
        "mime_type": "image/png",
        "group_id": null,
        "keyvalues": {"env": "prod"},
        "created_at": "2024-07-16T17:11:02.176Z"
    }"#;
    let file = serde_json::from_str::<FileItem>(json).unwrap();
    assert_eq!(file.name.as_deref(), Some("pinnie.png"));
    assert_eq!(file.keyvalues.get("env").map(String::as_str), Some("prod"));
    assert!(file.group_id.is_none());
    assert!(!file.vectorized);
    println!("{:#?}", file);
}

#[test]
fn deserialize_pin_queue() {
    let json = r#"{
        "jobs": [{
            "id": "b4cb2426-8fba-4ec0-ae4e-a19fb8cd9fcd",
            "cid": "QmVLwvmGehsrNEvhcCnnsw5RQNseohgEkFNN1848zNzdng",
            "status": "prechecking",
            "name": null,
            "date_queued": "2024-08-01T17:54:55.131Z"
        }],
        "next_page_token": null
    }"#;
    let queue = serde_json::from_str::<PinQueueResponse>(json).unwrap();
    assert_eq!(queue.jobs.len(), 1);
    assert_eq!(queue.jobs[0].status, "prechecking");
    assert!(queue.jobs[0].host_nodes.is_empty());
}

#[test]
fn deserialize_key_scopes_variants() {
    let admin = r#"{"admin": true}"#;
    let scopes = serde_json::from_str::<KeyScopes>(admin).unwrap();
    assert!(scopes.admin);
    assert!(!scopes.endpoints.pinning.pin_file_to_ipfs);

    let scoped = r#"{"endpoints": {"pinning": {"pinFileToIPFS": true, "pinJSONToIPFS": false}}}"#;
    let scopes = serde_json::from_str::<KeyScopes>(scoped).unwrap();
    assert!(!scopes.admin);
    assert!(scopes.endpoints.pinning.pin_file_to_ipfs);
}

#[test]
fn serialize_key_permissions() {
    let permissions = KeyPermissions {
        admin: Some(true),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_string(&permissions).unwrap(),
        r#"{"admin":true}"#
    );

    let permissions = KeyPermissions {
        endpoints: Some(KeyEndpointScopes {
            pinning: PinningScopes {
                pin_file_to_ipfs: true,
                pin_json_to_ipfs: true,
            },
        }),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_string(&permissions).unwrap(),
        r#"{"endpoints":{"pinning":{"pinFileToIPFS":true,"pinJSONToIPFS":true}}}"#
    );
}

#[test]
fn deserialize_time_series() {
    let json = r#"{
        "total_requests": 1029,
        "total_bandwidth": 320841,
        "time_periods": [
            {"period_start_time": "2024-08-01T00:00:00Z", "requests": 574, "bandwidth": 180200},
            {"period_start_time": "2024-08-02T00:00:00Z", "requests": 455, "bandwidth": 140641}
        ]
    }"#;
    let series = serde_json::from_str::<TimeSeriesResponse>(json).unwrap();
    assert_eq!(series.total_requests, 1029);
    assert_eq!(series.time_periods.len(), 2);
}

#[test]
fn network_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Network::Public).unwrap(), r#""public""#);
    assert_eq!(Network::Private.to_string(), "private");
}
