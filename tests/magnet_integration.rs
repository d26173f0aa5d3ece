//! Integration tests for topic page fetching and magnet submission.

use qbt_core::{
    AddTorrentOptions, BROWSER_ACCEPT_LANGUAGE, BROWSER_USER_AGENT, ConnectionConfig,
    MagnetError, TrackerClient, TrackerConfig, parse_topic_id, submit_magnet,
};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

const TOPIC_PATH: &str = "/forum/viewtopic.php";

const TOPIC_PAGE: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head><title>Debian 12 netinst :: RuTracker.org</title></head>
<body>
<div class="post_body">Описание раздачи</div>
<a href="dl.php?t=6673601" class="dl-stub">Скачать .torrent</a>
<a href="magnet:?xt=urn:btih:8C212779B4ABDE7C6BC608063A0D008B7E40CE32&amp;tr=http%3A%2F%2Fbt.t-ru.org%2Fann" class="med magnet-link" title="magnet">Magnet</a>
</body>
</html>
"#;

const EXPECTED_MAGNET: &str = "magnet:?xt=urn:btih:8C212779B4ABDE7C6BC608063A0D008B7E40CE32&tr=http%3A%2F%2Fbt.t-ru.org%2Fann";

fn tracker_for(server: &MockServer) -> TrackerClient {
    TrackerClient::new(TrackerConfig {
        topic_page_url: format!("{}{TOPIC_PATH}", server.uri()),
    })
    .unwrap()
}

async fn mount_topic_page(server: &MockServer, topic: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(TOPIC_PATH))
        .and(query_param("t", topic))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_qbittorrent(server: &MockServer, add_status: u16) {
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Ok."))
        .expect(1)
        .named("login")
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/add"))
        .and(body_string_contains(
            "urls=magnet%3A%3Fxt%3Durn%3Abtih%3A8C212779B4ABDE7C6BC608063A0D008B7E40CE32",
        ))
        .respond_with(ResponseTemplate::new(add_status).set_body_string("Fails."))
        .expect(1)
        .named("add")
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .named("logout")
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_magnet_from_topic_page() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_topic_page(&server, "6673601", 200, TOPIC_PAGE).await;

    let topic = parse_topic_id("https://rutracker.org/forum/viewtopic.php?t=6673601").unwrap();
    let magnet = tracker_for(&server).fetch_magnet(topic).await.unwrap();
    assert_eq!(magnet, EXPECTED_MAGNET);
}

#[tokio::test]
async fn test_fetch_sends_browser_headers() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_topic_page(&server, "42", 200, TOPIC_PAGE).await;

    tracker_for(&server)
        .fetch_magnet(parse_topic_id("42").unwrap())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert_eq!(
        headers.get("user-agent").and_then(|v| v.to_str().ok()),
        Some(BROWSER_USER_AGENT)
    );
    assert_eq!(
        headers.get("accept-language").and_then(|v| v.to_str().ok()),
        Some(BROWSER_ACCEPT_LANGUAGE)
    );
}

#[tokio::test]
async fn test_fetch_error_status_is_http_status() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_topic_page(&server, "404", 404, "not here").await;

    let err = tracker_for(&server)
        .fetch_magnet(parse_topic_id("404").unwrap())
        .await
        .unwrap_err();
    assert!(
        matches!(err, MagnetError::HttpStatus { status: 404, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_page_without_magnet_is_not_found() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let login_wall = r#"<html><body><form action="login.php" method="post">
<input name="login_username"><input name="login_password" type="password">
</form></body></html>"#;
    mount_topic_page(&server, "7", 200, login_wall).await;

    let err = tracker_for(&server)
        .fetch_magnet(parse_topic_id("7").unwrap())
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[tokio::test]
async fn test_fetch_from_dead_tracker_is_fetch_error() {
    let tracker = TrackerClient::new(TrackerConfig {
        topic_page_url: "http://127.0.0.1:1/forum/viewtopic.php".to_string(),
    })
    .unwrap();
    let err = tracker
        .fetch_magnet(parse_topic_id("1").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, MagnetError::Fetch { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_submit_magnet_logs_in_adds_and_logs_out() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_qbittorrent(&server, 200).await;

    let config = ConnectionConfig::new(server.uri(), "admin", "adminadmin");
    submit_magnet(config, EXPECTED_MAGNET, &AddTorrentOptions::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_submit_magnet_logs_out_even_when_add_is_rejected() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_qbittorrent(&server, 415).await;

    let config = ConnectionConfig::new(server.uri(), "admin", "adminadmin");
    let err = submit_magnet(config, EXPECTED_MAGNET, &AddTorrentOptions::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("415"), "{err}");
}

#[tokio::test]
async fn test_submit_magnet_stops_when_login_fails() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Fails."))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/torrents/add"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ConnectionConfig::new(server.uri(), "admin", "wrong");
    let err = submit_magnet(config, EXPECTED_MAGNET, &AddTorrentOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_auth(), "got {err:?}");
}
