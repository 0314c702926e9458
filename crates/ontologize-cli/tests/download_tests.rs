//! Download tests against a mock HTTP server

use ontologize_cli::download::{AssociationSource, DownloadOutcome, Downloader};
use ontologize_cli::{CliError, Config};
use ontologize_common::Organism;
use std::fs;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const OBO: &str = "[Term]\nid: GO:0000001\nname: mitochondrion inheritance\n";

fn config(server: &MockServer, data_dir: &TempDir) -> Config {
    Config {
        obo_url: format!("{}/ontology/gene_ontology_edit.obo", server.uri()),
        associations_url: format!("{}/associations/", server.uri()),
        jar_url: format!("{}/Ontologizer.jar", server.uri()),
        ..Config::default()
    }
    .with_data_dir(data_dir.path())
}

#[tokio::test]
async fn test_downloads_all_sources() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/Ontologizer.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04jar".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/associations/gene_association.fb.gz"))
        .and(query_param("rev", "HEAD"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x1f\x8bassoc".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ontology/gene_ontology_edit.obo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OBO))
        .mount(&server)
        .await;

    let downloader = Downloader::new(config(&server, &dir)).unwrap().quiet();

    let (jar, outcome) = downloader.download_jar(false).await.unwrap();
    assert_eq!(outcome, DownloadOutcome::Downloaded(7));
    assert_eq!(fs::read(&jar).unwrap(), b"PK\x03\x04jar");

    let source = AssociationSource::Organism(Organism::Dmelanogaster);
    let (assoc, _) = downloader.download_associations(&source, false).await.unwrap();
    assert_eq!(assoc, dir.path().join("gene_association.fb.gz"));
    assert!(assoc.exists());

    let (obo, _) = downloader.download_obo(false).await.unwrap();
    assert_eq!(fs::read_to_string(obo).unwrap(), OBO);
    assert!(!dir.path().join("gene_ontology_edit.obo.part").exists());
}

#[tokio::test]
async fn test_existing_file_is_skipped_unless_forced() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("gene_ontology_edit.obo"), "old").unwrap();

    Mock::given(method("GET"))
        .and(path("/ontology/gene_ontology_edit.obo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OBO))
        .expect(1)
        .mount(&server)
        .await;

    let downloader = Downloader::new(config(&server, &dir)).unwrap().quiet();

    let (obo, outcome) = downloader.download_obo(false).await.unwrap();
    assert_eq!(outcome, DownloadOutcome::Skipped);
    assert_eq!(fs::read_to_string(&obo).unwrap(), "old");

    let (_, outcome) = downloader.download_obo(true).await.unwrap();
    assert!(matches!(outcome, DownloadOutcome::Downloaded(_)));
    assert_eq!(fs::read_to_string(&obo).unwrap(), OBO);
}

#[tokio::test]
async fn test_http_error_leaves_no_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let downloader = Downloader::new(config(&server, &dir)).unwrap().quiet();
    let source = AssociationSource::File("gene_association.sgd.gz".to_string());

    let err = downloader.download_associations(&source, false).await.unwrap_err();

    assert!(matches!(err, CliError::HttpStatus { status: 404, .. }));
    assert!(!dir.path().join("gene_association.sgd.gz").exists());
}

#[tokio::test]
async fn test_failed_write_removes_partial_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/ontology/gene_ontology_edit.obo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OBO))
        .mount(&server)
        .await;

    // A non-empty directory in the way makes the final rename fail
    let dest = dir.path().join("gene_ontology_edit.obo");
    fs::create_dir(&dest).unwrap();
    fs::write(dest.join("keep"), "x").unwrap();

    let downloader = Downloader::new(config(&server, &dir)).unwrap().quiet();
    let err = downloader.download_obo(true).await.unwrap_err();

    assert!(matches!(err, CliError::Io { .. }));
    assert!(!dir.path().join("gene_ontology_edit.obo.part").exists());
    assert!(dest.join("keep").exists());
}
