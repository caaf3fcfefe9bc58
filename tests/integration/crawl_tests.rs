//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and tempfile
//! directories for the page archive, and drive full crawls end-to-end.

use pagecrawl::config::Config;
use pagecrawl::crawler::{extract_text, Coordinator, CrawlPhase};
use pagecrawl::output::StopReason;
use pagecrawl::store::{read_manifest, ManifestEntry};
use pagecrawl::CrawlError;
use std::collections::HashSet;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing into the given directory
fn create_test_config(dir: &TempDir, min_pages: u64, min_words: usize) -> Config {
    let mut config = Config::default();
    config.crawler.min_pages = min_pages;
    config.crawler.min_words = min_words;
    config.crawler.request_delay_ms = 0; // No pacing needed against a mock
    config.output.pages_dir = dir.path().join("downloaded_pages");
    config.output.index_path = dir.path().join("index.txt");
    config
}

/// `n` distinct words separated by single spaces
fn words(n: usize) -> String {
    (0..n)
        .map(|i| format!("word{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

/// An HTML page with a paragraph of `n` words followed by the given links
fn page(n: usize, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>\n", href))
        .collect();
    format!(
        "<html><head><title>Test</title></head><body>\n<nav>Menu</nav>\n<p>{}</p>\n{}</body></html>",
        words(n),
        anchors
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_page_expecting(server: &MockServer, route: &str, body: String, calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(calls)
        .mount(server)
        .await;
}

fn manifest(config: &Config) -> Vec<ManifestEntry> {
    read_manifest(&config.output.index_path).expect("Failed to read manifest")
}

fn manifest_urls(config: &Config) -> Vec<String> {
    manifest(config).into_iter().map(|e| e.url).collect()
}

#[tokio::test]
async fn test_short_page_without_links_saves_nothing() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // Fetched exactly once: rejected pages are not scanned for links
    mount_page_expecting(&mock_server, "/", page(5, &[]), 1).await;

    let config = create_test_config(&dir, 100, 1000);
    let seed = format!("{}/", mock_server.uri());
    let mut coordinator =
        Coordinator::new(vec![seed.clone()], config.clone()).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.pages_downloaded, 0);
    assert_eq!(report.rejected_too_few_words, 1);
    assert_eq!(report.levels_completed, 1);
    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);

    assert!(manifest(&config).is_empty());
    assert_eq!(fs::read_dir(&config.output.pages_dir).unwrap().count(), 0);

    assert!(coordinator.state().is_visited(&seed));
    assert!(coordinator.state().frontier().is_empty());
    assert_eq!(coordinator.phase(), CrawlPhase::Done);
}

#[tokio::test]
async fn test_quota_met_on_seed_stops_before_links() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let seed_body = page(1500, &["/one", "two"]);
    mount_page_expecting(&mock_server, "/", seed_body.clone(), 1).await;
    mount_page_expecting(&mock_server, "/one", page(1500, &[]), 0).await;
    mount_page_expecting(&mock_server, "/two", page(1500, &[]), 0).await;

    let config = create_test_config(&dir, 1, 1000);
    let seed = format!("{}/", mock_server.uri());
    let mut coordinator =
        Coordinator::new(vec![seed.clone()], config.clone()).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.pages_downloaded, 1);
    assert_eq!(report.urls_attempted, 1);
    assert_eq!(report.stop_reason, StopReason::QuotaReached);

    assert_eq!(
        manifest(&config),
        vec![ManifestEntry {
            id: 1,
            url: seed.clone()
        }]
    );
    assert_eq!(
        fs::read_to_string(&config.output.index_path).unwrap(),
        format!("1\t{}\n", seed)
    );

    let saved = fs::read_to_string(config.output.pages_dir.join("page_1.txt")).unwrap();
    assert_eq!(saved, extract_text(&seed_body));
    assert!(!saved.contains("Menu"));
    assert!(!saved.contains("Test"));
}

#[tokio::test]
async fn test_full_crawl_is_breadth_first() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        page(60, &["/a", "/b", "/skip.pdf", "mailto:x@example.com", "#top"]),
    )
    .await;
    mount_page(&mock_server, "/a", page(60, &["/c", "/b", "/"])).await;
    mount_page(&mock_server, "/b", page(60, &["d"])).await;
    mount_page(&mock_server, "/c", page(10, &["/e"])).await;
    mount_page(&mock_server, "/d", page(60, &[])).await;
    mount_page_expecting(&mock_server, "/e", page(60, &[]), 0).await;
    mount_page_expecting(&mock_server, "/skip.pdf", page(60, &[]), 0).await;

    let config = create_test_config(&dir, 100, 50);
    let mut coordinator = Coordinator::new(vec![format!("{}/", base)], config.clone())
        .expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    // Level 0: /, level 1: /a /b, level 2: /c (too short) /d
    assert_eq!(
        manifest_urls(&config),
        vec![
            format!("{}/", base),
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/d", base),
        ]
    );
    let ids: Vec<u64> = manifest(&config).iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    assert_eq!(report.pages_downloaded, 4);
    assert_eq!(report.rejected_too_few_words, 1);
    assert_eq!(report.levels_completed, 3);
    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(coordinator.state().downloaded(), 4);
    assert_eq!(coordinator.state().visited().len(), 5);
}

#[tokio::test]
async fn test_archive_invariants_hold() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", page(30, &["/a", "/b", "/c"])).await;
    mount_page(&mock_server, "/a", page(30, &["/", "/b", "/c"])).await;
    mount_page(&mock_server, "/b", page(5, &["/a"])).await;
    mount_page(&mock_server, "/c", page(40, &["/a", "/"])).await;

    let min_words = 20;
    let config = create_test_config(&dir, 100, min_words);
    let mut coordinator = Coordinator::new(vec![format!("{}/", mock_server.uri())], config.clone())
        .expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    let entries = manifest(&config);

    // One manifest line per downloaded page
    assert_eq!(entries.len() as u64, report.pages_downloaded);
    assert_eq!(entries.len() as u64, coordinator.state().downloaded());

    // No URL listed twice
    let unique: HashSet<&str> = entries.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(unique.len(), entries.len());

    // Every kept page meets the threshold
    for entry in &entries {
        let text =
            fs::read_to_string(config.output.pages_dir.join(format!("page_{}.txt", entry.id)))
                .unwrap();
        let count = text.split([' ', '\t', '\n']).filter(|w| !w.is_empty()).count();
        assert!(count >= min_words, "page {} has {} words", entry.id, count);
    }
}

#[tokio::test]
async fn test_manifest_tracks_downloads_after_every_url() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", page(30, &[])).await;
    mount_page(&mock_server, "/short", page(3, &[])).await;
    mount_page(&mock_server, "/long", page(40, &[])).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&dir, 100, 20);
    let mut coordinator = Coordinator::new(vec![format!("{}/", base)], config.clone())
        .expect("Failed to create coordinator");

    for route in ["/", "/short", "/missing", "/long"] {
        let outcome = coordinator.process_url(&format!("{}{}", base, route)).await;
        assert!(outcome.is_some(), "{} was not attempted", route);
        assert_eq!(manifest(&config).len() as u64, coordinator.state().downloaded());
    }

    // Second attempt at a visited URL changes nothing
    assert!(coordinator.process_url(&format!("{}/", base)).await.is_none());
    assert_eq!(manifest(&config).len() as u64, coordinator.state().downloaded());
    assert_eq!(coordinator.state().downloaded(), 2);
}

#[tokio::test]
async fn test_delay_follows_every_attempted_url() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", page(30, &["/bad", "/short"])).await;
    mount_page(&mock_server, "/short", page(3, &[])).await;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&dir, 100, 20);
    config.crawler.request_delay_ms = 150;

    let mut coordinator = Coordinator::new(vec![format!("{}/", mock_server.uri())], config)
        .expect("Failed to create coordinator");

    let started = Instant::now();
    let report = coordinator.run().await.expect("Crawl failed");
    let elapsed = started.elapsed();

    // One accepted, one failed, one below the threshold
    assert_eq!(report.urls_attempted, 3);
    assert_eq!(report.pages_downloaded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.rejected_too_few_words, 1);
    assert!(
        elapsed >= Duration::from_millis(450),
        "three delays expected, crawl took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_failed_url_is_never_retried() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", page(30, &["/broken", "/ok"])).await;
    mount_page(&mock_server, "/ok", page(30, &["/broken"])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&dir, 100, 20);
    let mut coordinator = Coordinator::new(vec![format!("{}/", base)], config.clone())
        .expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.failed, 1);
    assert_eq!(report.pages_downloaded, 2);
    assert!(coordinator.state().is_visited(&format!("{}/broken", base)));
    assert_eq!(
        manifest_urls(&config),
        vec![format!("{}/", base), format!("{}/ok", base)]
    );
}

#[tokio::test]
async fn test_quota_stops_mid_level() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", page(30, &["/first", "/second", "/third"])).await;
    mount_page(&mock_server, "/first", page(5, &[])).await;
    mount_page(&mock_server, "/second", page(30, &["/fourth"])).await;
    mount_page_expecting(&mock_server, "/third", page(30, &[]), 0).await;
    mount_page_expecting(&mock_server, "/fourth", page(30, &[]), 0).await;

    let config = create_test_config(&dir, 2, 20);
    let mut coordinator = Coordinator::new(vec![format!("{}/", base)], config.clone())
        .expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::QuotaReached);
    assert_eq!(report.urls_attempted, 3);
    assert_eq!(
        manifest_urls(&config),
        vec![format!("{}/", base), format!("{}/second", base)]
    );
}

#[tokio::test]
async fn test_duplicate_and_invalid_seeds() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page_expecting(&mock_server, "/", page(30, &[]), 2).await;

    let config = create_test_config(&dir, 100, 20);
    let seeds = vec![
        base.clone(),
        format!("{}/", base),
        format!("{}/#fragment", base),
        "not a url".to_string(),
        format!("{}/archive.zip", base),
    ];
    let mut coordinator = Coordinator::new(seeds, config.clone()).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    // One fetch for the page, one for its links
    assert_eq!(report.urls_attempted, 1);
    assert_eq!(manifest_urls(&config), vec![format!("{}/", base)]);
}

#[tokio::test]
async fn test_reruns_are_deterministic() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(&mock_server, "/", page(30, &["/x", "/y", "/z"])).await;
    mount_page(&mock_server, "/x", page(30, &["/y", "/w"])).await;
    mount_page(&mock_server, "/y", page(30, &[])).await;
    mount_page(&mock_server, "/z", page(30, &["/w"])).await;
    mount_page(&mock_server, "/w", page(30, &[])).await;

    let mut runs = Vec::new();
    for _ in 0..2 {
        let dir = TempDir::new().unwrap();
        let config = create_test_config(&dir, 100, 20);
        let mut coordinator = Coordinator::new(vec![format!("{}/", base)], config.clone())
            .expect("Failed to create coordinator");
        coordinator.run().await.expect("Crawl failed");

        let index = fs::read_to_string(&config.output.index_path).unwrap();
        let pages: Vec<String> = manifest(&config)
            .iter()
            .map(|e| {
                fs::read_to_string(config.output.pages_dir.join(format!("page_{}.txt", e.id)))
                    .unwrap()
            })
            .collect();
        runs.push((index, pages));
        drop(dir);
    }

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[0].1.len(), 5);
}

#[tokio::test]
async fn test_rerun_in_same_directory_resets_manifest() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", page(30, &[])).await;

    let config = create_test_config(&dir, 100, 20);
    fs::write(
        &config.output.index_path,
        "1\thttps://stale.example/\n2\thttps://stale.example/b\n",
    )
    .unwrap();

    let mut coordinator = Coordinator::new(vec![format!("{}/", mock_server.uri())], config.clone())
        .expect("Failed to create coordinator");

    // Reset happens at construction, before anything is fetched
    assert_eq!(fs::read_to_string(&config.output.index_path).unwrap(), "");

    coordinator.run().await.expect("Crawl failed");
    assert_eq!(manifest(&config).len(), 1);
}

#[tokio::test]
async fn test_unusable_output_directory_is_fatal() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(30, &[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&dir, 100, 20);
    fs::write(&config.output.pages_dir, "a file where the directory should be").unwrap();

    let result = Coordinator::new(vec![format!("{}/", mock_server.uri())], config);
    assert!(matches!(result, Err(CrawlError::Store(_))));
}

#[tokio::test]
async fn test_crawl_with_no_seeds_does_nothing() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir, 100, 20);

    let report = pagecrawl::crawler::crawl(vec![], config.clone())
        .await
        .expect("Crawl failed");

    assert_eq!(report.urls_attempted, 0);
    assert_eq!(report.levels_completed, 0);
    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert!(manifest(&config).is_empty());
}
