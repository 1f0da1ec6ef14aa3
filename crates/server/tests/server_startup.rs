use std::io::Write;
use std::net::TcpListener;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tempfile::{NamedTempFile, TempDir};
use tokio::time::{sleep, timeout};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a config reading the catalog from `catalog_path`
fn file_catalog_config(port: u16, site_dir: &Path, catalog_path: &Path) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}
site_dir = "{}"

[catalog]
backend = "file"

[catalog.file]
path = "{}"
"#,
        port,
        site_dir.display(),
        catalog_path.display()
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn search_url(port: u16, query: &str) -> String {
    format!("http://127.0.0.1:{}/api/v1/search?{}", port, query)
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_quravel"))
        .env("QURAVEL_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/v1/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_serves_search_from_file_catalog() {
    let port = get_available_port();
    let site_dir = TempDir::new().unwrap();
    let catalog_path = site_dir.path().join("posts.json");
    std::fs::write(
        &catalog_path,
        r#"{"posts": [
            {"title": "Inception", "type": "movie", "genres": ["Sci-Fi"], "rating": 8.8},
            {"title": "Interstellar", "type": "movie", "genres": "Sci-Fi, Drama", "rating": "8.6"}
        ]}"#,
    )
    .unwrap();

    let config = write_config(&file_catalog_config(port, site_dir.path(), &catalog_path));
    let mut server = spawn_server(config.path()).await;

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let json: serde_json::Value = client
        .get(search_url(port, "q=incep"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(json["status"], "ok");
    assert_eq!(json["results"][0]["title"], "Inception");

    let json: serde_json::Value = client
        .get(search_url(port, "sort=top-rated"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["results"][1]["rating"], 8.6);

    // Cleanup
    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_catalog_keeps_server_up() {
    let port = get_available_port();
    let site_dir = TempDir::new().unwrap();
    let catalog_path = site_dir.path().join("missing.json");

    let config = write_config(&file_catalog_config(port, site_dir.path(), &catalog_path));
    let mut server = spawn_server(config.path()).await;

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let client = Client::new();
    let json: serde_json::Value = client
        .get(search_url(port, "q=anything"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(json["status"], "unavailable");

    // Cleanup
    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_quravel"))
            .env("QURAVEL_CONFIG", "/nonexistent/config.toml")
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_http_backend_without_section_exits_with_error() {
    let config = write_config(
        r#"
[server]
port = 8080

[catalog]
backend = "http"
"#,
    );

    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_quravel"))
            .env("QURAVEL_CONFIG", config.path())
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}
