//! Uploads through the dedicated upload endpoint.
//!
//! Every helper stages its input as a multipart `file` part and shares the
//! form layout of a plain file upload: `network`, optional `group_id`, the
//! resolved `name`, optional `keyvalues` (one JSON object string) and
//! optional `vectorize`, then the part(s).
//!
//! API docs: <https://docs.pinata.cloud/api-reference/endpoint/upload-a-file>

use crate::client::Client;
use crate::error::Error;
use crate::types_rs::*;
use crate::utils::{auth_headers, file_name_from_url, serialize_keyvalues};
use base64::{Engine, engine::general_purpose};
use bon::Builder;
use pinata_sdk_common::helper::{into_request_failed_error, parse_data_response};
use reqwest::Body;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use time::OffsetDateTime;
use tokio_util::io::ReaderStream;

pub enum UploadBody<'a> {
    Bytes(Vec<u8>),
    /// Streamed from disk, not buffered in memory.
    FilePath(&'a Path),
}

//region upload_file

#[derive(Builder)]
#[builder(on(String, into))]
pub struct UploadFile<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    #[builder(field)]
    keyvalues: Vec<(String, String)>,
    #[builder(default = Network::Public)]
    network: Network,
    /// Display name. Defaults to the path basename, or `file` for byte
    /// bodies.
    name: Option<String>,
    group_id: Option<String>,
    #[builder(default = false)]
    vectorize: bool,
}

impl<'a, S: upload_file_builder::State> UploadFileBuilder<'a, S> {
    /// Metadata pair stored with the file. May be called multiple times.
    pub fn keyvalue(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.keyvalues.push((key.into(), value.into()));
        self
    }
}

impl UploadFile<'_> {
    pub async fn send(&self, body: UploadBody<'_>) -> Result<UploadResponse, Error> {
        let (part, name) = match body {
            UploadBody::Bytes(bytes) => {
                let name = self.name.clone().unwrap_or_else(|| "file".to_owned());
                (Part::bytes(bytes).file_name(name.clone()), name)
            }
            UploadBody::FilePath(path) => {
                let file_name = base_name(path)?;
                let name = self.name.clone().unwrap_or_else(|| file_name.clone());
                (file_part(path, file_name).await?, name)
            }
        };

        let form = options_form(
            self.network,
            Some(&name),
            self.group_id.as_deref(),
            &self.keyvalues,
            self.vectorize,
        )
        .part("file", part);
        send_form(self.client, form).await
    }
}

//endregion

//region upload_files

/// Upload several files as one folder, pinned under a single CID.
#[derive(Builder)]
#[builder(on(String, into))]
pub struct UploadFiles<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    #[builder(field)]
    keyvalues: Vec<(String, String)>,
    #[builder(default = Network::Public)]
    network: Network,
    name: Option<String>,
    group_id: Option<String>,
    #[builder(default = false)]
    vectorize: bool,
}

impl<'a, S: upload_files_builder::State> UploadFilesBuilder<'a, S> {
    pub fn keyvalue(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.keyvalues.push((key.into(), value.into()));
        self
    }
}

impl UploadFiles<'_> {
    pub async fn send(&self, paths: &[&Path]) -> Result<UploadResponse, Error> {
        if paths.is_empty() {
            return Err(Error::Common(
                "at least one file path is required".to_owned(),
            ));
        }

        let mut form = options_form(
            self.network,
            self.name.as_deref(),
            self.group_id.as_deref(),
            &self.keyvalues,
            self.vectorize,
        );
        for path in paths {
            let part = file_part(path, base_name(path)?).await?;
            form = form.part("file", part);
        }
        send_form(self.client, form).await
    }
}

//endregion

//region upload_json

/// Serialize any `Serialize` value and upload it as a JSON file.
#[derive(Builder)]
#[builder(on(String, into))]
pub struct UploadJson<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    #[builder(field)]
    keyvalues: Vec<(String, String)>,
    #[builder(default = Network::Public)]
    network: Network,
    /// Defaults to `data.json`.
    name: Option<String>,
    group_id: Option<String>,
    #[builder(default = false)]
    vectorize: bool,
}

impl<'a, S: upload_json_builder::State> UploadJsonBuilder<'a, S> {
    pub fn keyvalue(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.keyvalues.push((key.into(), value.into()));
        self
    }
}

impl UploadJson<'_> {
    pub async fn send<T: Serialize>(&self, data: &T) -> Result<UploadResponse, Error> {
        let bytes = serde_json::to_vec(data)
            .map_err(|e| Error::Common(format!("JSON serialize error: {}", e)))?;
        let name = self.name.clone().unwrap_or_else(|| "data.json".to_owned());
        let part = Part::bytes(bytes)
            .file_name(name.clone())
            .mime_str("application/json")?;

        let form = options_form(
            self.network,
            Some(&name),
            self.group_id.as_deref(),
            &self.keyvalues,
            self.vectorize,
        )
        .part("file", part);
        send_form(self.client, form).await
    }
}

//endregion

//region upload_base64

/// Decode a standard base64 string and upload the bytes.
#[derive(Builder)]
#[builder(on(String, into))]
pub struct UploadBase64<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    #[builder(field)]
    keyvalues: Vec<(String, String)>,
    #[builder(default = Network::Public)]
    network: Network,
    /// Defaults to `file`.
    name: Option<String>,
    group_id: Option<String>,
    #[builder(default = false)]
    vectorize: bool,
}

impl<'a, S: upload_base64_builder::State> UploadBase64Builder<'a, S> {
    pub fn keyvalue(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.keyvalues.push((key.into(), value.into()));
        self
    }
}

impl UploadBase64<'_> {
    pub async fn send(&self, data: &str) -> Result<UploadResponse, Error> {
        let bytes = general_purpose::STANDARD
            .decode(data)
            .map_err(|e| Error::Common(format!("base64 decode error: {}", e)))?;
        let name = self.name.clone().unwrap_or_else(|| "file".to_owned());
        let part = Part::bytes(bytes).file_name(name.clone());

        let form = options_form(
            self.network,
            Some(&name),
            self.group_id.as_deref(),
            &self.keyvalues,
            self.vectorize,
        )
        .part("file", part);
        send_form(self.client, form).await
    }
}

//endregion

//region upload_url

/// Download a remote URL and upload its contents.
#[derive(Builder)]
#[builder(on(String, into))]
pub struct UploadUrl<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    #[builder(field)]
    keyvalues: Vec<(String, String)>,
    #[builder(default = Network::Public)]
    network: Network,
    /// Defaults to the last path segment of the URL, or `file`.
    name: Option<String>,
    group_id: Option<String>,
    #[builder(default = false)]
    vectorize: bool,
}

impl<'a, S: upload_url_builder::State> UploadUrlBuilder<'a, S> {
    pub fn keyvalue(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.keyvalues.push((key.into(), value.into()));
        self
    }
}

impl UploadUrl<'_> {
    pub async fn send(&self, target_url: &str) -> Result<UploadResponse, Error> {
        let client = self.client;
        // the target is an arbitrary remote server, no SDK auth headers
        let resp = client.http_client.get(target_url).send().await?;
        if !resp.status().is_success() {
            return Err(into_request_failed_error(resp).await.into());
        }
        let bytes = resp.bytes().await?;

        let name = self
            .name
            .clone()
            .or_else(|| file_name_from_url(target_url))
            .unwrap_or_else(|| "file".to_owned());
        let part = Part::bytes(bytes.to_vec()).file_name(name.clone());

        let form = options_form(
            self.network,
            Some(&name),
            self.group_id.as_deref(),
            &self.keyvalues,
            self.vectorize,
        )
        .part("file", part);
        send_form(client, form).await
    }
}

//endregion

//region create_signed_upload_url

/// Signed URL a third party can upload one file through without holding the
/// account credential. The server signs the time-bounded payload.
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize)]
#[builder(on(String, into))]
pub struct CreateSignedUploadUrl<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,
    #[builder(field)]
    #[serde(serialize_with = "serialize_keyvalues", skip_serializing_if = "Vec::is_empty")]
    keyvalues: Vec<(String, String)>,
    #[builder(field)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    allow_mime_types: Vec<String>,
    /// Validity window in seconds.
    expires: i32,
    /// Unix timestamp the window starts at. Defaults to now.
    #[builder(default = OffsetDateTime::now_utc().unix_timestamp())]
    date: i64,
    #[builder(default = Network::Public)]
    network: Network,
    group_id: Option<String>,
    /// Name recorded for the uploaded file.
    filename: Option<String>,
    vectorize: Option<bool>,
    max_file_size: Option<i64>,
}

impl<'a, S: create_signed_upload_url_builder::State> CreateSignedUploadUrlBuilder<'a, S> {
    pub fn keyvalue(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.keyvalues.push((key.into(), value.into()));
        self
    }

    /// Restrict what the holder may upload, e.g. `image/png`.
    pub fn allow_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.allow_mime_types.push(mime_type.into());
        self
    }
}

impl CreateSignedUploadUrl<'_> {
    /// [API docs](https://docs.pinata.cloud/api-reference/endpoint/create-signed-upload-url)
    pub async fn send(&self) -> Result<String, Error> {
        if self.expires <= 0 {
            return Err(Error::Common("expires must be positive".to_owned()));
        }

        let client = self.client;
        let resp = client
            .http_client
            .post(format!("{}/files/sign", client.config.upload_url))
            .headers(auth_headers(&client.config))
            .json(self)
            .send()
            .await?;

        let data = parse_data_response::<String>(resp).await?;
        Ok(data)
    }
}

//endregion

fn base_name(path: &Path) -> Result<String, Error> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| Error::Common(format!("invalid file path: {}", path.display())))
}

async fn file_part(path: &Path, file_name: String) -> Result<Part, Error> {
    let file = tokio::fs::File::open(path).await?;
    let size = file.metadata().await?.len();
    let stream = ReaderStream::new(file);
    let part = Part::stream_with_length(Body::wrap_stream(stream), size).file_name(file_name);
    Ok(part)
}

fn options_form(
    network: Network,
    name: Option<&str>,
    group_id: Option<&str>,
    keyvalues: &[(String, String)],
    vectorize: bool,
) -> Form {
    let mut form = Form::new().text("network", network.as_str());
    if let Some(group_id) = group_id {
        form = form.text("group_id", group_id.to_owned());
    }
    if let Some(name) = name {
        form = form.text("name", name.to_owned());
    }
    if !keyvalues.is_empty() {
        let keyvalue_map = keyvalues.iter().cloned().collect::<HashMap<_, _>>();
        form = form.text("keyvalues", serde_json::to_string(&keyvalue_map).unwrap());
    }
    if vectorize {
        form = form.text("vectorize", "true");
    }
    form
}

async fn send_form(client: &Client, form: Form) -> Result<UploadResponse, Error> {
    let resp = client
        .http_client
        .post(format!("{}/files", client.config.upload_url))
        .headers(auth_headers(&client.config))
        .multipart(form)
        .send()
        .await?;

    let data = parse_data_response::<UploadResponse>(resp).await?;
    Ok(data)
}

/// Upload operations
impl Client {
    pub fn upload_file(&self) -> UploadFileBuilder<'_> {
        UploadFile::builder(self)
    }

    pub fn upload_files(&self) -> UploadFilesBuilder<'_> {
        UploadFiles::builder(self)
    }

    pub fn upload_json(&self) -> UploadJsonBuilder<'_> {
        UploadJson::builder(self)
    }

    pub fn upload_base64(&self) -> UploadBase64Builder<'_> {
        UploadBase64::builder(self)
    }

    pub fn upload_url(&self) -> UploadUrlBuilder<'_> {
        UploadUrl::builder(self)
    }

    pub fn create_signed_upload_url(&self) -> CreateSignedUploadUrlBuilder<'_> {
        CreateSignedUploadUrl::builder(self)
    }
}
