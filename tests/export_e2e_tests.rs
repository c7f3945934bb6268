/// E2E 测试：从模拟的 Play 商店接口导出 CSV
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use play_review_export::commands::{completion_message, handle_export};
use play_review_export::config::Config;

fn raw_review(user: &str, score: u8, content: &str) -> Value {
    json!([
        format!("gp:{}", user),
        [user, [null, 2, null, [null, null, "https://play-lh.googleusercontent.com/a/avatar"]]],
        score,
        null,
        content,
        [1700000000, 0],
        0
    ])
}

fn batch_response(reviews: Vec<Value>) -> String {
    let data = json!([reviews, null]);
    let outer = json!([["wrb.fr", "UsvDTd", data.to_string(), null, null, null, "generic"]]);
    format!(")]}}'\n\n{}", outer)
}

/// 指向模拟服务器、输出到临时目录的配置
fn test_config(server: &MockServer, dir: &TempDir) -> Config {
    Config {
        base_url: server.uri(),
        output: dir.path().join("duolingo_reviews.csv"),
        ..Config::default()
    }
}

async fn mount_reviews(server: &MockServer, reviews: Vec<Value>) {
    Mock::given(method("POST"))
        .and(path("/_/PlayStoreUi/data/batchexecute"))
        .respond_with(ResponseTemplate::new(200).set_body_string(batch_response(reviews)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_export_concrete_scenario() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_reviews(
        &server,
        vec![
            raw_review("alice", 5, "great app"),
            raw_review("bob", 1, "crashes, a lot"),
        ],
    )
    .await;

    let config = test_config(&server, &dir);
    config.validate().unwrap();

    let summary = handle_export(&config).await.unwrap();

    assert_eq!(summary.written, 2);
    assert_eq!(summary.requested, 4000);
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        "userName,score,content\nalice,5,great app\nbob,1,\"crashes, a lot\"\n"
    );
    assert!(completion_message(&summary.path).ends_with("duolingo_reviews.csv"));
}

#[tokio::test]
async fn test_export_line_count_matches_records() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let reviews: Vec<Value> = (0..25)
        .map(|i| raw_review(&format!("user{}", i), (i % 5 + 1) as u8, "multi\nline \"quoted\""))
        .collect();
    mount_reviews(&server, reviews).await;

    let config = test_config(&server, &dir);
    let summary = handle_export(&config).await.unwrap();
    assert_eq!(summary.written, 25);

    let written = fs::read_to_string(&config.output).unwrap();
    assert!(written.starts_with("userName,score,content\n"));
    // 内容中含换行，按记录而不是按物理行计数
    assert_eq!(written.matches("\"multi\nline \"\"quoted\"\"\"\n").count(), 25);
    assert!(written.contains("user0,1,\"multi\nline \"\"quoted\"\"\"\n"));
    assert!(written.contains("user24,5,"));
}

#[tokio::test]
async fn test_export_zero_records_writes_header_only() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_reviews(&server, vec![]).await;

    let config = test_config(&server, &dir);
    let summary = handle_export(&config).await.unwrap();

    assert_eq!(summary.written, 0);
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        "userName,score,content\n"
    );
}

#[tokio::test]
async fn test_export_upstream_failure_keeps_previous_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = test_config(&server, &dir);
    fs::write(&config.output, "userName,score,content\nold,2,row\n").unwrap();

    assert!(handle_export(&config).await.is_err());
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        "userName,score,content\nold,2,row\n"
    );
}

#[tokio::test]
async fn test_export_upstream_failure_creates_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server, &dir);
    assert!(handle_export(&config).await.is_err());
    assert!(!config.output.exists());
}

#[tokio::test]
async fn test_export_rerun_overwrites_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_reviews(&server, vec![raw_review("carol", 4, "nice")]).await;

    let config = test_config(&server, &dir);
    fs::write(
        &config.output,
        "userName,score,content\na,1,x\nb,2,y\nc,3,z\n",
    )
    .unwrap();

    handle_export(&config).await.unwrap();
    handle_export(&config).await.unwrap();

    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        "userName,score,content\ncarol,4,nice\n"
    );
}
