//! Integration tests for username-forge

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::time::Duration;
use username_forge::{
    types::DEFAULT_USER_AGENT, BatchRunner, Charset, CheckResult, FragmentProber, ProbeConfig,
    RunConfig, TokioPacer, UsernameGenerator, UsernameProbe,
};

fn probe_config(server: &MockServer) -> ProbeConfig {
    ProbeConfig {
        base_url: server.base_url(),
        ..ProbeConfig::default()
    }
}

#[tokio::test]
async fn test_redirect_to_search_is_available() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/username/abcde");
            then.status(302).header("Location", server.url("/?query=abcde"));
        })
        .await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/").query_param("query", "abcde");
            then.status(200).body("<html>Search results</html>");
        })
        .await;

    let prober = FragmentProber::new(&probe_config(&server)).unwrap();
    let result = prober.check("abcde").await;

    page.assert_async().await;
    search.assert_async().await;
    assert_eq!(result, CheckResult::Available("Username available".to_string()));
}

#[tokio::test]
async fn test_auction_page_is_in_auction() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/username/abcde");
            then.status(200).body("<h1>@abcde</h1><p>Auction ending soon</p>");
        })
        .await;

    let prober = FragmentProber::new(&probe_config(&server)).unwrap();
    let result = prober.check("abcde").await;

    assert_eq!(result, CheckResult::InAuction("Username in auction".to_string()));
    assert_eq!(result.tag(), "TAKEN");
}

#[tokio::test]
async fn test_owned_page_is_taken() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/username/abcde");
            then.status(200).body("<h1>@abcde</h1><p>Sold</p>");
        })
        .await;

    let prober = FragmentProber::new(&probe_config(&server)).unwrap();
    let result = prober.check("abcde").await;

    assert_eq!(result, CheckResult::Taken("Username taken".to_string()));
}

#[tokio::test]
async fn test_server_error_page_falls_back_to_taken() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/username/abcde");
            then.status(302).header("Location", server.url("/maintenance"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/maintenance");
            then.status(503).body("Service unavailable");
        })
        .await;

    let prober = FragmentProber::new(&probe_config(&server)).unwrap();
    let result = prober.check("abcde").await;

    assert_eq!(result, CheckResult::Taken("Username taken".to_string()));
}

#[tokio::test]
async fn test_connection_error_is_unknown() {
    let config = ProbeConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout: Some(Duration::from_secs(5)),
        ..ProbeConfig::default()
    };

    let prober = FragmentProber::new(&config).unwrap();
    let result = prober.check("abcde").await;

    match result {
        CheckResult::Unknown(message) => {
            assert!(message.starts_with("Request error: "), "{}", message);
            assert!(message.contains("error sending request"), "{}", message);
        }
        other => panic!("expected Unknown, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_carries_browser_headers() {
    let server = MockServer::start_async().await;
    let referer = format!("{}/", server.base_url());
    let page = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/username/abcde")
                .header("user-agent", DEFAULT_USER_AGENT)
                .header("accept", "application/json, text/plain, */*")
                .header("accept-language", "en-US,en;q=0.9")
                .header("referer", referer.as_str());
            then.status(200).body("Sold");
        })
        .await;

    let prober = FragmentProber::new(&probe_config(&server)).unwrap();
    prober.check("abcde").await;

    page.assert_async().await;
}

#[tokio::test]
async fn test_session_cookies_are_reused() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/username/aaaaa");
            then.status(200)
                .header("Set-Cookie", "stel_ssid=abc123; Path=/")
                .body("Sold");
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/username/aaaab")
                .header("cookie", "stel_ssid=abc123");
            then.status(200).body("Sold");
        })
        .await;

    let prober = FragmentProber::new(&probe_config(&server)).unwrap();
    prober.check("aaaaa").await;
    prober.check("aaaab").await;

    second.assert_async().await;
}

#[tokio::test]
async fn test_batch_against_stub_server() {
    let server = MockServer::start_async().await;
    let pages = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/username/");
            then.status(200).body("Sold");
        })
        .await;

    let prober = FragmentProber::new(&probe_config(&server)).unwrap();
    let generator = UsernameGenerator::new(5, Charset::Alphanumeric).unwrap();
    let config = RunConfig {
        max_usernames: 3,
        delay: Duration::ZERO,
    };
    let mut runner = BatchRunner::new(generator, prober, TokioPacer, config);
    let mut out = Vec::new();

    let summary = runner.run(&mut out).await.unwrap();

    pages.assert_hits_async(3).await;
    assert_eq!((summary.checked, summary.available, summary.taken), (3, 0, 3));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("[TAKEN] @aaaaa - Username taken"));
    assert!(text.contains("[TAKEN] @aaaac - Username taken"));
    assert!(!text.contains("@aaaad"));
}

#[test]
#[ignore = "walks all 60,466,176 usernames"]
fn test_full_five_character_space() {
    let generator = UsernameGenerator::new(5, Charset::Alphanumeric).unwrap();
    let mut count = 0u64;
    let mut previous: Option<String> = None;

    for username in generator {
        if let Some(prev) = &previous {
            let rank = |s: &str| -> Vec<usize> {
                s.chars()
                    .map(|c| Charset::Alphanumeric.chars().iter().position(|&x| x == c).unwrap())
                    .collect()
            };
            assert!(rank(prev) < rank(&username));
        }
        previous = Some(username);
        count += 1;
    }

    assert_eq!(count, 60_466_176);
    assert_eq!(previous.as_deref(), Some("99999"));
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("username-forge")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"))
        .stdout(predicate::str::contains("USERNAME_FORGE_MAX_USERNAMES"));
}

#[test]
fn test_library_initialization() {
    let result = username_forge::init();
    assert!(result.is_ok());
}
