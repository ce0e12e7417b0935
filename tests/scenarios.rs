//! End-to-end scenarios: descriptor files on disk, a local mock server,
//! and the full aggregation pipeline.

use rand::SeedableRng;
use rand::rngs::StdRng;
use samplecmd::{Aggregator, DescriptorStore, HttpFetcher, ResultRecord};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HTML_PAGE: &str = r#"
<html><body>
  <div class="result">
    <h3>Extract a tarball</h3>
    <code>tar -xzf archive.tar.gz</code>
    <p class="note">x extracts</p>
  </div>
  <div class="result">
    <h3>Create a tarball</h3>
    <code>tar -czf archive.tar.gz dir/</code>
  </div>
  <div class="result">
    <h3>List tarball contents</h3>
    <code>tar -tzf archive.tar.gz</code>
  </div>
</body></html>
"#;

const JSON_BODY: &str = r#"[
  {"summary": "show disk usage", "command": "du -sh *"},
  {"summary": "free disk space", "command": "df -h"},
  {"summary": "biggest directories", "command": "du -h | sort -hr | head"}
]"#;

fn write_descriptor(
    dir: &Path,
    file: &str,
    name: &str,
    base: &str,
    enable: bool,
    content_type: &str,
    parent: &str,
    title: &str,
    command: &str,
    description: &str,
) {
    let yaml = format!(
        r#"
general:
  enable: {enable}
site:
  site_name: {name}
  site_url: {base}
  site_search_url: "{base}/search/{{}}"
content:
  site_content_type: {content_type}
  site_content_action: get
pattern:
  parent: "{parent}"
  title: "{title}"
  command: "{command}"
  description: "{description}"
"#
    );
    let mut f = std::fs::File::create(dir.join(file)).unwrap();
    f.write_all(yaml.as_bytes()).unwrap();
}

async fn run(sites_dir: &Path, keyword: &str, limit: usize, seed: u64) -> Vec<ResultRecord> {
    let store = DescriptorStore::load(&[sites_dir.to_path_buf()]).unwrap();
    let aggregator = Aggregator::new(store, HttpFetcher::new().unwrap());
    let mut rng = StdRng::seed_from_u64(seed);
    aggregator.run(keyword, limit, &mut rng).await
}

#[tokio::test]
async fn html_site_with_three_sections_yields_three_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/tar"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HTML_PAGE))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_descriptor(
        dir.path(),
        "html.yaml",
        "htmlsite",
        &server.uri(),
        true,
        "html",
        "div.result",
        "h3",
        "code",
        "p.note",
    );

    let records = run(dir.path(), "tar", 5, 1).await;
    assert_eq!(records.len(), 3);

    let commands: BTreeSet<&str> = records.iter().map(|r| r.command.as_str()).collect();
    assert!(commands.contains("tar -xzf archive.tar.gz"));
    assert!(commands.contains("tar -czf archive.tar.gz dir/"));
    assert!(commands.contains("tar -tzf archive.tar.gz"));
    for record in &records {
        assert_eq!(record.site_name, "htmlsite");
        assert!(!record.title.is_empty());
    }
}

#[tokio::test]
async fn failing_site_contributes_nothing_and_run_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/disk"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let json_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/disk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(JSON_BODY))
        .mount(&json_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_descriptor(
        dir.path(),
        "a_failing.yaml",
        "failing",
        &server.uri(),
        true,
        "json",
        "",
        "summary",
        "command",
        "",
    );
    write_descriptor(
        dir.path(),
        "b_json.yaml",
        "jsonsite",
        &json_server.uri(),
        true,
        "json",
        "",
        "summary",
        "command",
        "",
    );

    let records = run(dir.path(), "disk", 2, 1).await;
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.site_name, "jsonsite");
    }
}

#[tokio::test]
async fn disabled_site_is_never_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(JSON_BODY))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_descriptor(
        dir.path(),
        "disabled.yaml",
        "disabled",
        &server.uri(),
        false,
        "json",
        "",
        "summary",
        "command",
        "",
    );

    let records = run(dir.path(), "disk", 5, 1).await;
    assert!(records.is_empty());
    // MockServer verifies expect(0) on drop.
}

#[tokio::test]
async fn invalid_descriptor_is_skipped_not_fatal() {
    let json_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/disk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(JSON_BODY))
        .mount(&json_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    // Search URL without the keyword placeholder fails validation.
    write_descriptor(
        dir.path(),
        "a_invalid.yaml",
        "invalid",
        &json_server.uri(),
        true,
        "json",
        "",
        "summary",
        "command",
        "",
    );
    let broken = std::fs::read_to_string(dir.path().join("a_invalid.yaml"))
        .unwrap()
        .replace("/search/{}", "/search/fixed");
    std::fs::write(dir.path().join("a_invalid.yaml"), broken).unwrap();
    write_descriptor(
        dir.path(),
        "b_valid.yaml",
        "jsonsite",
        &json_server.uri(),
        true,
        "json",
        "",
        "summary",
        "command",
        "",
    );

    let records = run(dir.path(), "disk", 10, 1).await;
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.site_name, "jsonsite");
    }
}

#[tokio::test]
async fn two_runs_yield_the_same_multiset_of_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/disk"))
        .respond_with(ResponseTemplate::new(200).set_body_string(JSON_BODY))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_descriptor(
        dir.path(),
        "json.yaml",
        "jsonsite",
        &server.uri(),
        true,
        "json",
        "",
        "summary",
        "command",
        "",
    );

    // Different seeds may order results differently, but with a limit above
    // the pool size the multiset of records must be identical.
    let mut first = run(dir.path(), "disk", 10, 1).await;
    let mut second = run(dir.path(), "disk", 10, 99).await;
    first.sort_by(|a, b| a.command.cmp(&b.command));
    second.sort_by(|a, b| a.command.cmp(&b.command));
    assert_eq!(first, second);
}

#[tokio::test]
async fn malformed_response_body_is_a_per_site_skip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/disk"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_descriptor(
        dir.path(),
        "json.yaml",
        "jsonsite",
        &server.uri(),
        true,
        "json",
        "",
        "summary",
        "command",
        "",
    );

    let records = run(dir.path(), "disk", 5, 1).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn post_sites_use_post_and_content_type_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search/disk"))
        .and(wiremock::matchers::header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(JSON_BODY))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let yaml = format!(
        r#"
general:
  enable: true
site:
  site_name: postsite
  site_url: {base}
  site_search_url: "{base}/search/{{}}"
content:
  site_content_type: json
  site_content_action: post
pattern:
  parent: ""
  title: summary
  command: command
  description: ""
"#,
        base = server.uri()
    );
    std::fs::write(dir.path().join("post.yaml"), yaml).unwrap();

    let records = run(dir.path(), "disk", 5, 1).await;
    assert_eq!(records.len(), 3);
}
