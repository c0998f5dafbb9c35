#![cfg(feature = "files")]

use mockito::Matcher;
use pinata_sdk::{Client, Config, Error, Network};
use serde::Deserialize;

fn mock_client(server: &mockito::ServerGuard) -> Client {
    let config = Config::builder()
        .pinata_jwt("test-jwt")
        .pinata_gateway("example.mypinata.cloud")
        .api_url(server.url())
        .upload_url(server.url())
        .build();
    Client::builder().config(config).build()
}

#[derive(Deserialize, Debug)]
pub struct PinataConfig {
    pub jwt: String,
    pub gateway: String,
}

impl PinataConfig {
    pub fn get_conf() -> Self {
        let file_str = std::fs::read_to_string("tests/files/config.toml").unwrap();
        toml::from_str(&file_str).unwrap()
    }
}

fn get_live_client() -> Client {
    let conf = PinataConfig::get_conf();
    Client::builder()
        .config(Config::new(conf.jwt, conf.gateway))
        .build()
}

#[tokio::test]
async fn get_file_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/files/public/a6f8a2de-e63e-46cb-a92d-1f9e2709f7b9")
        .match_header("authorization", "Bearer test-jwt")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {
                "id": "a6f8a2de-e63e-46cb-a92d-1f9e2709f7b9",
                "name": "pinnie.png",
                "cid": "bafybeihgxdzljxb26q6nf3r3eifqeedsvt2eubqtskghpme66cgjyw4fra",
                "size": 4861678,
                "number_of_files": 1,
                "mime_type": "image/png",
                "group_id": null,
                "keyvalues": {"env": "prod"},
                "created_at": "2024-07-16T17:11:02.176Z"
            }}"#,
        )
        .create_async()
        .await;

    let client = mock_client(&server);
    let file = client
        .get_file(Network::Public, "a6f8a2de-e63e-46cb-a92d-1f9e2709f7b9")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        file.cid,
        "bafybeihgxdzljxb26q6nf3r3eifqeedsvt2eubqtskghpme66cgjyw4fra"
    );
    assert_eq!(file.keyvalues.get("env").map(String::as_str), Some("prod"));
}

#[tokio::test]
async fn get_file_rejects_empty_id_test() {
    let server = mockito::Server::new_async().await;
    let client = mock_client(&server);

    let err = client.get_file(Network::Public, "").await.unwrap_err();
    match err {
        Error::Common(msg) => assert!(msg.contains("file id")),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn list_files_query_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/files/private")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("cidPending".into(), "true".into()),
            Matcher::UrlEncoded("group".into(), "null".into()),
            Matcher::UrlEncoded("keyvalues[env]".into(), "prod".into()),
        ]))
        .match_header("authorization", "Bearer test-jwt")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {
                "files": [{
                    "id": "b2d7b8ac-e521-4e3f-9f08-fbeb8ba0a1f9",
                    "name": "notes.txt",
                    "cid": "bafkreigkbo3awganvfbkf4kkthprkjescfcldmcm4rkcba",
                    "size": 120,
                    "number_of_files": 1,
                    "mime_type": "text/plain",
                    "group_id": null,
                    "created_at": "2024-08-01T10:00:00.000Z"
                }],
                "next_page_token": "eyJvZmZzZXQiOiIxIn0"
            }}"#,
        )
        .create_async()
        .await;

    let client = mock_client(&server);
    let listed = client
        .list_files()
        .network(Network::Private)
        .no_group(true)
        .cid_pending(true)
        .limit(10)
        .keyvalue("env", "prod")
        .build()
        .send()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(listed.files.len(), 1);
    assert_eq!(listed.next_page_token.as_deref(), Some("eyJvZmZzZXQiOiIxIn0"));
}

#[tokio::test]
async fn update_file_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/files/public/file-1")
        .match_body(Matcher::Json(serde_json::json!({
            "name": "renamed.txt",
            "keyvalues": {"env": "staging"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {
                "id": "file-1",
                "name": "renamed.txt",
                "cid": "bafkreigkbo3awganvfbkf4kkthprkjesc",
                "size": 120,
                "number_of_files": 1,
                "mime_type": "text/plain",
                "group_id": null,
                "keyvalues": {"env": "staging"},
                "created_at": "2024-08-01T10:00:00.000Z"
            }}"#,
        )
        .create_async()
        .await;

    let client = mock_client(&server);
    let file = client
        .update_file()
        .name("renamed.txt")
        .keyvalue("env", "staging")
        .build()
        .send("file-1")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(file.name.as_deref(), Some("renamed.txt"));
}

#[tokio::test]
async fn delete_files_test() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("DELETE", "/files/public/file-1")
        .with_status(200)
        .with_body(r#"{"data": null}"#)
        .create_async()
        .await;
    let second = server
        .mock("DELETE", "/files/public/file-2")
        .with_status(200)
        .with_body(r#"{"data": null}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    let results = client
        .delete_files()
        .file_ids(["file-1", "file-2"])
        .build()
        .send()
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.status == "deleted"));
}

#[tokio::test]
async fn delete_files_requires_an_id_test() {
    let server = mockito::Server::new_async().await;
    let client = mock_client(&server);

    let err = client.delete_files().build().send().await.unwrap_err();
    match err {
        Error::Common(msg) => assert!(msg.contains("at least one")),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn add_swap_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/files/public/swap/bafyOld")
        .match_body(Matcher::Json(serde_json::json!({"swap_cid": "bafyNew"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {"mapped_cid": "bafyNew", "created_at": "2024-08-02T09:00:00.000Z"}}"#,
        )
        .create_async()
        .await;

    let client = mock_client(&server);
    let swap = client
        .add_swap(Network::Public, "bafyOld", "bafyNew")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(swap.mapped_cid, "bafyNew");
}

#[tokio::test]
async fn swap_history_handles_null_data_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/files/public/swap/bafyOld")
        .match_query(Matcher::UrlEncoded(
            "domain".into(),
            "example.mypinata.cloud".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": null}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    let history = client
        .swap_history(Network::Public, "bafyOld", "example.mypinata.cloud")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(history.is_empty());
}

#[tokio::test]
async fn pin_by_cid_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/files/public/pin_by_cid")
        .match_body(Matcher::Json(serde_json::json!({
            "cid": "QmVLwvmGehsrNEvhcCnnsw5RQNseohgEkFNN1848zNzdng",
            "name": "warm-cache",
            "host_nodes": ["/ip4/203.0.113.4/tcp/4001/p2p/12D3KooW"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {
                "id": "b4cb2426-8fba-4ec0-ae4e-a19fb8cd9fcd",
                "cid": "QmVLwvmGehsrNEvhcCnnsw5RQNseohgEkFNN1848zNzdng",
                "status": "prechecking",
                "name": "warm-cache",
                "date_queued": "2024-08-01T17:54:55.131Z"
            }}"#,
        )
        .create_async()
        .await;

    let client = mock_client(&server);
    let pin = client
        .pin_by_cid()
        .cid("QmVLwvmGehsrNEvhcCnnsw5RQNseohgEkFNN1848zNzdng")
        .name("warm-cache")
        .host_node("/ip4/203.0.113.4/tcp/4001/p2p/12D3KooW")
        .build()
        .send()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(pin.status, "prechecking");
}

#[tokio::test]
async fn pin_queue_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/files/public/pin_by_cid")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("status".into(), "prechecking".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {
                "jobs": [{
                    "id": "b4cb2426-8fba-4ec0-ae4e-a19fb8cd9fcd",
                    "cid": "QmVLwvmGehsrNEvhcCnnsw5RQNseohgEkFNN1848zNzdng",
                    "status": "prechecking",
                    "name": null,
                    "date_queued": "2024-08-01T17:54:55.131Z"
                }],
                "next_page_token": null
            }}"#,
        )
        .create_async()
        .await;

    let client = mock_client(&server);
    let queue = client
        .pin_queue()
        .status("prechecking")
        .limit(5)
        .build()
        .send()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(queue.jobs.len(), 1);
}

#[tokio::test]
async fn cancel_pin_request_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "DELETE",
            "/files/public/pin_by_cid/b4cb2426-8fba-4ec0-ae4e-a19fb8cd9fcd",
        )
        .with_status(200)
        .with_body(r#"{"data": null}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    client
        .cancel_pin_request("b4cb2426-8fba-4ec0-ae4e-a19fb8cd9fcd")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn create_access_link_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/files/private/download_link")
        .match_body(Matcher::Json(serde_json::json!({
            "url": "https://example.mypinata.cloud/files/bafyPrivate",
            "date": 1724000000,
            "expires": 30,
            "method": "GET"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": "https://example.mypinata.cloud/files/bafyPrivate?X-Algorithm=PINATA1&X-Date=1724000000&X-Expires=30&X-Signature=abc"}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    let link = client
        .create_access_link()
        .cid("bafyPrivate")
        .expires(30)
        .date(1724000000)
        .build()
        .send()
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(link.contains("X-Signature=abc"));
}

#[tokio::test]
async fn create_access_link_rejects_non_positive_expires_test() {
    let server = mockito::Server::new_async().await;
    let client = mock_client(&server);

    let err = client
        .create_access_link()
        .cid("bafyPrivate")
        .expires(0)
        .build()
        .send()
        .await
        .unwrap_err();
    match err {
        Error::Common(msg) => assert!(msg.contains("expires")),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn vectorize_file_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/vectorize/files/file-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"status": true}}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    let res = client.vectorize_file("file-1").await.unwrap();

    mock.assert_async().await;
    assert!(res.status);
}

#[tokio::test]
async fn query_vectors_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/vectorize/groups/group-1/query")
        .match_body(Matcher::Json(serde_json::json!({"text": "sunny beach"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {
                "count": 1,
                "matches": [{"file_id": "file-1", "cid": "bafyPic", "score": 0.87}]
            }}"#,
        )
        .create_async()
        .await;

    let client = mock_client(&server);
    let res = client
        .query_vectors()
        .group_id("group-1")
        .text("sunny beach")
        .build()
        .send()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(res.count, 1);
    assert_eq!(res.matches[0].cid, "bafyPic");
}

#[tokio::test]
async fn query_vectors_with_file_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/vectorize/groups/group-1/query")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("top match contents")
        .create_async()
        .await;

    let client = mock_client(&server);
    let res = client
        .query_vectors()
        .group_id("group-1")
        .text("sunny beach")
        .build()
        .send_with_file()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(res.content_type.as_deref(), Some("text/plain"));
    assert_eq!(res.data, b"top match contents");
}

#[tokio::test]
async fn request_failed_carries_status_and_body_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/files/public/missing")
        .with_status(401)
        .with_body(r#"{"error": {"reason": "Invalid API key"}}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    let err = client
        .get_file(Network::Public, "missing")
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        Error::RequestAPIFailed { status, message } => {
            assert!(status.starts_with("401"));
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn decode_error_reports_response_text_test() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/files/public/garbled")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let client = mock_client(&server);
    let err = client
        .get_file(Network::Public, "garbled")
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        Error::Common(msg) => {
            assert!(msg.contains("parse response json error"));
            assert!(msg.contains("not json at all"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_authentication_test() {
    let mut server = mockito::Server::new_async().await;
    // bare response served from the legacy root, outside /v3
    let mock = server
        .mock("GET", "/data/testAuthentication")
        .match_header("authorization", "Bearer test-jwt")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Congratulations! You are communicating with the Pinata API!"}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    let res = client.test_authentication().await.unwrap();

    mock.assert_async().await;
    assert!(res.message.contains("Congratulations"));
}

#[tokio::test]
#[ignore]
async fn live_list_files_test() {
    let client = get_live_client();
    let res = client.list_files().limit(5).build().send().await;
    match res {
        Ok(s) => println!("res:\n{:#?}", s),
        Err(e) => println!("error: {}", e),
    }
}

#[tokio::test]
#[ignore]
async fn live_auth_test() {
    let client = get_live_client();
    let res = client.test_authentication().await;
    match res {
        Ok(s) => println!("res:\n{:#?}", s),
        Err(e) => println!("error: {}", e),
    }
}
