use activity_logger::format::SEPARATOR;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_cli_help_succeeds() {
    let output = cargo_bin_cmd!("activity-logger")
        .arg("--help")
        .output()
        .expect("run activity-logger");
    assert!(output.status.success(), "help should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "help should include usage text");
    assert!(stdout.contains("--level"));
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

async fn demo_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fail"))
        .respond_with(ResponseTemplate::new(500).set_body_string("broken"))
        .mount(&server)
        .await;
    server
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_cli_logs_success_request() {
    if !can_bind_localhost() {
        return;
    }

    let server = demo_server().await;
    let url = format!("{}/ok", server.uri());
    let output = cargo_bin_cmd!("activity-logger")
        .arg("success")
        .arg("--success-url")
        .arg(&url)
        .output()
        .expect("run activity-logger");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(&format!("{}\n[Request] GET '{}':", SEPARATOR, url)));
    assert!(stdout.contains(&format!("[Response] 200 '{}' [", url)));
    assert!(stdout.contains("\"ok\": true"));
    assert_eq!(stdout.matches(SEPARATOR).count(), 4);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_cli_failure_request_at_error_level() {
    if !can_bind_localhost() {
        return;
    }

    let server = demo_server().await;
    let url = format!("{}/fail", server.uri());
    let output = cargo_bin_cmd!("activity-logger")
        .arg("failure")
        .arg("--failure-url")
        .arg(&url)
        .arg("--level")
        .arg("error")
        .arg("--no-separator")
        .output()
        .expect("run activity-logger");

    assert_eq!(output.status.code(), Some(22));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(&format!("[Response Error] GET '{}' [", url)));
    assert!(stdout.contains(" s] s: Response status code was unacceptable: 500"));
    assert!(!stdout.contains("[Request]"));
    assert!(!stdout.contains(SEPARATOR));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_cli_none_level_prints_nothing() {
    if !can_bind_localhost() {
        return;
    }

    let server = demo_server().await;
    let output = cargo_bin_cmd!("activity-logger")
        .arg("--url")
        .arg(format!("{}/ok", server.uri()))
        .arg("--level")
        .arg("none")
        .output()
        .expect("run activity-logger");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_cli_sends_headers_and_writes_output_file() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file"))
        .and(header("x-demo", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("file-body"))
        .mount(&server)
        .await;

    let dir = tempdir().expect("tempdir");
    let output_path = dir.path().join("out.txt");
    let output = cargo_bin_cmd!("activity-logger")
        .arg("--url")
        .arg(format!("{}/file", server.uri()))
        .arg("-H")
        .arg("X-Demo: yes")
        .arg("-o")
        .arg(&output_path)
        .arg("--level")
        .arg("info")
        .output()
        .expect("run activity-logger");

    assert!(output.status.success());
    let written = std::fs::read_to_string(output_path).expect("read output file");
    assert_eq!(written, "file-body");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[Response] 200 "));
    assert!(!stdout.contains("file-body"));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_cli_to_log_writes_blocks_to_stderr() {
    if !can_bind_localhost() {
        return;
    }

    let server = demo_server().await;
    let url = format!("{}/ok", server.uri());
    let output = cargo_bin_cmd!("activity-logger")
        .arg("--url")
        .arg(&url)
        .arg("--level")
        .arg("info")
        .arg("--to-log")
        .env("RUST_LOG", "info")
        .output()
        .expect("run activity-logger");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("[Request] GET '{}'", url)));
    assert!(stderr.contains(&format!("[Response] 200 '{}' [", url)));
}
