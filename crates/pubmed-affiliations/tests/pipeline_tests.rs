//! End-to-end pipeline tests against a mocked E-utilities service.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pubmed_affiliations::client::EntrezClient;
use pubmed_affiliations::config::Config;
use pubmed_affiliations::models::FilteredPaperRecord;
use pubmed_affiliations::pipeline::{self, RunOutcome, SearchRequest};

const ESEARCH: &str = "/entrez/eutils/esearch.fcgi";
const EFETCH: &str = "/entrez/eutils/efetch.fcgi";
const THREE_ARTICLES: &str = include_str!("fixtures/efetch_three_articles.xml");

fn setup_client(mock_server: &MockServer) -> EntrezClient {
    EntrezClient::new(Config::for_testing(&mock_server.uri())).unwrap()
}

async fn mount_search(mock_server: &MockServer, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path(ESEARCH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"esearchresult": {"idlist": ids}})),
        )
        .mount(mock_server)
        .await;
}

async fn mount_fetch(mock_server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET")).and(path(EFETCH)).respond_with(template).mount(mock_server).await;
}

async fn run(client: &EntrezClient, request: &SearchRequest) -> (RunOutcome, String) {
    let mut out = Vec::new();
    let outcome = pipeline::run(client, request, &mut out).await.unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

// =============================================================================
// Happy Paths
// =============================================================================

#[tokio::test]
async fn test_console_output() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["39100001", "39100002", "39100003"]).await;

    Mock::given(method("GET"))
        .and(path(EFETCH))
        .and(query_param("id", "39100001,39100002,39100003"))
        .respond_with(ResponseTemplate::new(200).set_body_string(THREE_ARTICLES))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let (outcome, out) = run(&client, &SearchRequest::new("kras")).await;

    assert_eq!(outcome, RunOutcome::Printed { papers: 1 });
    assert!(out.starts_with("PubmedID: 39100002\n"));
    assert!(out.contains("Publication Date: 2024-Feb\n"));
    assert!(out.contains("Non-academic Author(s): Alice Chen, Carlos Diaz, Dana Evans\n"));
    assert!(out.contains("Corresponding Author Email: N/A\n"));
    assert!(out.ends_with(&format!("{}\n", "-".repeat(50))));
    assert!(!out.contains("39100001"));
    assert!(!out.contains("39100003"));
}

#[tokio::test]
async fn test_csv_output() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["39100001", "39100002", "39100003"]).await;
    mount_fetch(&mock_server, ResponseTemplate::new(200).set_body_string(THREE_ARTICLES)).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");

    let client = setup_client(&mock_server);
    let request = SearchRequest::new("kras").with_csv(&csv_path);
    let (outcome, out) = run(&client, &request).await;

    assert_eq!(outcome, RunOutcome::Saved { path: csv_path.clone(), papers: 1 });
    assert_eq!(out, format!("Results successfully saved to {}\n", csv_path.display()));

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<FilteredPaperRecord> = reader.deserialize().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].pubmed_id, "39100002");
    assert_eq!(
        rows[0].title,
        "A KRASG12C inhibitor in combination with anti-PD-1 therapy."
    );
    assert_eq!(
        rows[0].company_affiliations,
        "Genentech Inc., South San Francisco, CA 94080, USA.; Novartis Pharma AG, Basel, Switzerland."
    );
}

// =============================================================================
// Short Circuits
// =============================================================================

#[tokio::test]
async fn test_no_ids() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &[]).await;

    Mock::given(method("GET"))
        .and(path(EFETCH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");

    let client = setup_client(&mock_server);
    let (outcome, out) = run(&client, &SearchRequest::new("zzzz").with_csv(&csv_path)).await;

    assert_eq!(outcome, RunOutcome::NoIdentifiers);
    assert_eq!(out, "No PubMed IDs found for the given query.\n");
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_search_failure_reads_as_no_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ESEARCH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let (outcome, _) = run(&client, &SearchRequest::new("x")).await;
    assert_eq!(outcome, RunOutcome::NoIdentifiers);
}

#[tokio::test]
async fn test_fetch_failure_reads_as_no_records() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["1", "2"]).await;
    mount_fetch(&mock_server, ResponseTemplate::new(503)).await;

    let client = setup_client(&mock_server);
    let (outcome, out) = run(&client, &SearchRequest::new("x")).await;

    assert_eq!(outcome, RunOutcome::NoRecords);
    assert_eq!(out, "Could not retrieve details for any papers.\n");
}

#[tokio::test]
async fn test_empty_article_set_reads_as_no_records() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["1"]).await;
    mount_fetch(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<PubmedArticleSet></PubmedArticleSet>"),
    )
    .await;

    let client = setup_client(&mock_server);
    let (outcome, _) = run(&client, &SearchRequest::new("x")).await;
    assert_eq!(outcome, RunOutcome::NoRecords);
}

#[tokio::test]
async fn test_no_company_authors() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["39100001"]).await;

    let academic_only = THREE_ARTICLES
        .split("<PubmedArticle>")
        .nth(1)
        .map(|article| format!("<PubmedArticleSet><PubmedArticle>{article}</PubmedArticleSet>"))
        .unwrap();
    mount_fetch(&mock_server, ResponseTemplate::new(200).set_body_string(academic_only)).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");

    let client = setup_client(&mock_server);
    let (outcome, out) = run(&client, &SearchRequest::new("x").with_csv(&csv_path)).await;

    assert_eq!(outcome, RunOutcome::NoMatches);
    assert_eq!(out, "No papers found with authors from pharmaceutical or biotech companies.\n");
    assert!(!csv_path.exists());
}

// =============================================================================
// Recovery
// =============================================================================

#[tokio::test]
async fn test_truncated_document_uses_recovered_records() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["39100001", "39100002", "39100003"]).await;

    let cut = THREE_ARTICLES.split("<PMID Version=\"1\">39100003").next().unwrap();
    mount_fetch(&mock_server, ResponseTemplate::new(200).set_body_string(cut)).await;

    let client = setup_client(&mock_server);
    let (outcome, out) = run(&client, &SearchRequest::new("x")).await;

    assert_eq!(outcome, RunOutcome::Printed { papers: 1 });
    assert!(out.contains("PubmedID: 39100002"));
}

#[tokio::test]
async fn test_unwritable_csv_is_not_fatal() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["39100002"]).await;
    mount_fetch(&mock_server, ResponseTemplate::new(200).set_body_string(THREE_ARTICLES)).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("no-such-dir").join("results.csv");

    let client = setup_client(&mock_server);
    let (outcome, out) = run(&client, &SearchRequest::new("x").with_csv(&csv_path)).await;

    assert_eq!(outcome, RunOutcome::ExportFailed { path: csv_path });
    assert!(out.is_empty());
}

// =============================================================================
// Stage Contracts
// =============================================================================

#[tokio::test]
async fn test_fetch_details_without_ids_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EFETCH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert!(pipeline::fetch_paper_details(&client, &[]).await.is_empty());
}

#[tokio::test]
async fn test_fetch_ids_swallows_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ESEARCH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert!(pipeline::fetch_pubmed_ids(&client, "x", 10).await.is_empty());
}

#[test]
fn test_short_circuit_messages() {
    assert!(RunOutcome::NoIdentifiers.message().is_some());
    assert!(RunOutcome::NoRecords.message().is_some());
    assert!(RunOutcome::NoMatches.message().is_some());
    assert!(RunOutcome::Printed { papers: 3 }.message().is_none());
}
