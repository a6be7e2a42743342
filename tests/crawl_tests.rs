//! Integration tests for the full crawl-and-generate cycle
//!
//! These tests use wiremock to stand up mock HTTP servers and exercise
//! the whole pipeline end-to-end: crawl, policy handling, visited cache,
//! sitemap output.

use sitemill::config::{
    CacheConfig, Config, CrawlerConfig, DelayMode, FilterConfig, OutputConfig, PingConfig,
};
use sitemill::crawler;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling `base_url` into `dir`
fn create_test_config(base_url: &str, dir: &Path) -> Config {
    Config {
        access_key: "test-key".to_string(),
        crawler: CrawlerConfig {
            domains: vec![format!("{}/", base_url)],
            max_depth: 3,
            thread_count: 5,
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: 5,
            honor_meta_robots: true,
            delay_mode: DelayMode::AfterEach,
        },
        cache: CacheConfig {
            path: dir.join("cache.json").display().to_string(),
            resume: false,
            reset: false,
        },
        output: OutputConfig {
            directory: dir.join("sitemaps").display().to_string(),
            gzip: false,
            pretty: true,
            split_by_site: false,
            url_base: Some(format!("{}/", base_url)),
        },
        filters: FilterConfig::default(),
        ping: PingConfig::default(),
    }
}

async fn mount_robots(server: &MockServer, content: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(content.to_string()))
        .mount(server)
        .await;
}

async fn mount_html(server: &MockServer, at: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(html.to_string()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_generates_sitemap() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="mailto:test@example.com">Mail</a>
        </body></html>"#,
    )
    .await;
    mount_html(&server, "/page1", "<html><body>Content 1</body></html>").await;
    mount_html(&server, "/page2", "<html><body>Content 2</body></html>").await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    let outcome = crawler::run(&config, false).await.unwrap();

    assert_eq!(outcome.log.pages_accepted(), 3);
    assert_eq!(outcome.files.len(), 1);

    let xml = std::fs::read_to_string(&outcome.files[0].path).unwrap();
    assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
    assert!(xml.contains(&format!("<loc>{}/page1</loc>", server.uri())));
    assert!(xml.contains(&format!("<loc>{}/page2</loc>", server.uri())));
    assert!(xml.contains("<changefreq>weekly</changefreq>"));
    assert!(xml.contains("<priority>0.5</priority>"));
    assert!(!xml.contains("mailto"));

    // The visited cache survives for later resumed runs
    assert!(dir.path().join("cache.json").exists());
}

#[tokio::test]
async fn test_robots_and_meta_blocks_respected_end_to_end() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow: /private\nAllow: /").await;
    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/private/secret">S</a>
            <a href="/hidden">H</a>
            <a href="/open">O</a>
        </body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/hidden",
        r#"<html><head><meta name="robots" content="noindex"></head><body>h</body></html>"#,
    )
    .await;
    mount_html(&server, "/open", "<html><body>open</body></html>").await;
    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>secret</html>"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    let outcome = crawler::run(&config, false).await.unwrap();

    let xml = std::fs::read_to_string(&outcome.files[0].path).unwrap();
    assert!(xml.contains("/open"));
    assert!(!xml.contains("/private/secret"));
    assert!(!xml.contains("/hidden"));
    assert_eq!(outcome.log.summary().robots_blocked, 1);
    assert_eq!(outcome.log.summary().meta_blocked, 1);
}

#[tokio::test]
async fn test_filter_rules_exclude_urls_from_crawl_and_sitemap() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/keep">K</a>
            <a href="/tmp/scratch">T</a>
            <a href="/report.pdf">P</a>
        </body></html>"#,
    )
    .await;
    mount_html(&server, "/keep", "<html><body>k</body></html>").await;
    Mock::given(method("GET"))
        .and(path("/tmp/scratch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>t</html>"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let rules_path = dir.path().join("filters.json");
    std::fs::write(
        &rules_path,
        r#"{
            "excludeExtensions": ["pdf"],
            "excludePatterns": ["*/tmp/*"],
            "priorityPatterns": {"high": ["keep"], "low": []}
        }"#,
    )
    .unwrap();

    let mut config = create_test_config(&server.uri(), dir.path());
    config.filters.rules_path = Some(rules_path.display().to_string());

    let outcome = crawler::run(&config, false).await.unwrap();
    let xml = std::fs::read_to_string(&outcome.files[0].path).unwrap();
    assert!(xml.contains("/keep"));
    assert!(!xml.contains("/tmp/scratch"));
    assert!(!xml.contains("report.pdf"));
    // Priority patterns flow through to the generated entries
    assert!(xml.contains("<priority>0.8</priority>"));
}

#[tokio::test]
async fn test_gzip_and_split_by_site_output() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_html(&server, "/", "<html><body>home</body></html>").await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path());
    config.output.gzip = true;
    config.output.split_by_site = true;

    let outcome = crawler::run(&config, false).await.unwrap();
    assert_eq!(outcome.files.len(), 1);
    let filename = outcome.files[0]
        .path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    assert!(filename.starts_with("sitemap-"));
    assert!(filename.ends_with(".xml.gz"));
    assert!(outcome.files[0].path.exists());
}

#[tokio::test]
async fn test_resumed_run_fetches_nothing_and_keeps_sitemap() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_html(
        &server,
        "/",
        r#"<html><body><a href="/a">A</a></body></html>"#,
    )
    .await;
    mount_html(&server, "/a", "<html><body>a</body></html>").await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    let first = crawler::run(&config, false).await.unwrap();
    assert_eq!(first.log.pages_fetched(), 2);
    let first_xml = std::fs::read_to_string(&first.files[0].path).unwrap();

    let mut resumed_config = create_test_config(&server.uri(), dir.path());
    resumed_config.cache.resume = true;
    let second = crawler::run(&resumed_config, false).await.unwrap();

    assert_eq!(second.log.pages_fetched(), 0);
    let second_xml = std::fs::read_to_string(&second.files[0].path).unwrap();
    assert_eq!(first_xml, second_xml);
}

#[tokio::test]
async fn test_ping_announces_generated_sitemap() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_html(&server, "/", "<html><body>home</body></html>").await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&server.uri(), dir.path());
    config.ping.enabled = true;
    config.ping.endpoints = vec![format!("{}/ping?sitemap=", server.uri())];

    let outcome = crawler::run(&config, false).await.unwrap();
    assert_eq!(outcome.log.summary().warnings, 0);
}
