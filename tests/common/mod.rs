//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use placeshare::config::ApiConfig;
use placeshare::http::RequestLifecycle;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Smallest PNG the upload sniffer accepts: just the signature.
pub const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Base URL nothing listens on; connecting fails fast.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9/api";

/// API settings pointing at a mock server's `/api` prefix.
pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api", base_url),
        connect_timeout_seconds: 2,
        request_timeout_seconds: 5,
    }
}

pub fn lifecycle() -> RequestLifecycle {
    RequestLifecycle::from_config(&api_config("http://127.0.0.1:9"))
        .expect("Failed to build HTTP client")
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Write a PNG-signed file for signup tests.
pub fn temp_png(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, PNG_SIGNATURE).expect("Failed to write image");
    path
}

/// Poll `check` until it holds or `timeout` elapses.
pub async fn wait_until<F>(timeout: Duration, check: F) -> bool
where
    F: Fn() -> bool,
{
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
