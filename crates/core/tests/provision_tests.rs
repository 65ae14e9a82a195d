//! Integration tests for provisioning
//!
//! Downloads are served by an in-process HTTP server so redirect handling,
//! error statuses and the full install flow can be checked offline.

#![cfg(unix)]

mod common;

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use common::{fzf_tarball, serve, Route};
use fzf_harness_core::config::ProvisionConfig;
use fzf_harness_core::error::Error;
use fzf_harness_core::provision::{
    extract, fetch, http_client, provision, Provisioned, ReleaseDescriptor, MAX_REDIRECTS,
};
use tempfile::TempDir;

fn local_config(url: String, install_dir: &Path) -> ProvisionConfig {
    ProvisionConfig {
        version: "0.29.0".to_string(),
        platform: "linux".to_string(),
        arch: "amd64".to_string(),
        url: Some(url),
        install_dir: install_dir.to_path_buf(),
        check_path: false,
    }
}

/// Test that only the final body of a redirect chain is written
#[tokio::test]
async fn test_fetch_follows_redirect_chain() {
    let server = serve(vec![
        ("/start", Route::redirect(302, "/middle")),
        ("/middle", Route::redirect(301, "/final")),
        ("/final", Route::ok("archive bytes")),
    ])
    .await;
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("download.tar.gz");

    let client = http_client().unwrap();
    fetch(&client, &server.url("/start"), &destination)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&destination).unwrap(), b"archive bytes");
    assert_eq!(server.hits(), vec!["/start", "/middle", "/final"]);
}

/// Test that absolute redirect locations are followed as well
#[tokio::test]
async fn test_fetch_follows_absolute_location() {
    let target = serve(vec![("/asset", Route::ok("from elsewhere"))]).await;
    let origin = serve(vec![("/release", Route::redirect(307, &target.url("/asset")))]).await;
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("asset");

    let client = http_client().unwrap();
    fetch(&client, &origin.url("/release"), &destination)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&destination).unwrap(), b"from elsewhere");
}

/// Test that error statuses surface as fetch errors with the status code
#[tokio::test]
async fn test_fetch_error_status() {
    let server = serve(vec![("/broken", Route::status(500))]).await;
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("download");

    let client = http_client().unwrap();
    let missing = fetch(&client, &server.url("/missing"), &destination).await;
    match missing {
        Err(Error::Fetch { status, url, .. }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/missing"));
        }
        other => panic!("Expected Fetch error, got {other:?}"),
    }

    let broken = fetch(&client, &server.url("/broken"), &destination).await;
    assert!(matches!(broken, Err(Error::Fetch { status: 500, .. })));

    assert!(!destination.exists());
}

/// Test that a redirect leading to an error is an error
#[tokio::test]
async fn test_fetch_redirect_to_error() {
    let server = serve(vec![("/start", Route::redirect(302, "/gone"))]).await;
    let dir = TempDir::new().unwrap();

    let client = http_client().unwrap();
    let result = fetch(&client, &server.url("/start"), &dir.path().join("x")).await;

    assert!(matches!(result, Err(Error::Fetch { status: 404, .. })));
}

/// Test that redirect loops terminate
#[tokio::test]
async fn test_fetch_redirect_loop_terminates() {
    let server = serve(vec![("/loop", Route::redirect(302, "/loop"))]).await;
    let dir = TempDir::new().unwrap();

    let client = http_client().unwrap();
    let result = fetch(&client, &server.url("/loop"), &dir.path().join("x")).await;

    assert!(matches!(result, Err(Error::TooManyRedirects { limit, .. }) if limit == MAX_REDIRECTS));
    assert_eq!(server.hits().len(), MAX_REDIRECTS + 1);
}

/// Test extracting an archive into a working directory
#[tokio::test]
async fn test_extract_archive() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("fzf.tar.gz");
    std::fs::write(&archive, fzf_tarball(dir.path())).unwrap();
    let target = dir.path().join("bin");
    std::fs::create_dir(&target).unwrap();

    extract(&archive, &target).await.unwrap();

    assert!(target.join("fzf").is_file());
}

/// Test that a corrupt archive is an extraction error with tar's exit code
#[tokio::test]
async fn test_extract_corrupt_archive() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("fzf.tar.gz");
    std::fs::write(&archive, "definitely not gzip").unwrap();

    let result = extract(&archive, dir.path()).await;

    match result {
        Err(Error::Extraction { code }) => assert_ne!(code, 0),
        other => panic!("Expected Extraction error, got {other:?}"),
    }
}

/// Test the complete install flow: redirect, download, extract, chmod
#[tokio::test]
async fn test_provision_installs_binary() {
    let dir = TempDir::new().unwrap();
    let tarball = fzf_tarball(dir.path());
    let server = serve(vec![
        (
            "/releases/fzf-0.29.0-linux_amd64.tar.gz",
            Route::redirect(302, "/cdn/asset"),
        ),
        ("/cdn/asset", Route::ok(tarball)),
    ])
    .await;

    let install_dir = dir.path().join("install");
    let config = local_config(
        server.url("/releases/fzf-0.29.0-linux_amd64.tar.gz"),
        &install_dir,
    );
    let release = ReleaseDescriptor::resolve(&config).unwrap();

    let outcome = provision(&config).await.unwrap();

    assert_eq!(outcome, Provisioned::Installed(install_dir.join("fzf")));
    let mode = std::fs::metadata(install_dir.join("fzf"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
    assert!(!release.archive_path.exists());
    assert_eq!(
        std::fs::read_to_string(config.version_marker_path()).unwrap(),
        "0.29.0"
    );

    // A second run leaves the existing copy alone.
    let again = provision(&config).await.unwrap();
    assert_eq!(again, Provisioned::AlreadyInstalled(install_dir.join("fzf")));
    assert_eq!(server.hits().len(), 2);
}

/// Test that a failed download leaves nothing behind
#[tokio::test]
async fn test_provision_failure_leaves_no_binary() {
    let server = serve(vec![]).await;
    let dir = TempDir::new().unwrap();
    let install_dir = dir.path().join("install");
    let config = local_config(server.url("/missing.tar.gz"), &install_dir);

    let result = provision(&config).await;

    assert!(matches!(result, Err(Error::Fetch { status: 404, .. })));
    assert!(!install_dir.join("fzf").exists());
    assert!(!install_dir.join("missing.tar.gz").exists());
    assert!(!config.version_marker_path().exists());
}

/// Test that a broken archive aborts the install without leaving files
#[tokio::test]
async fn test_provision_extraction_failure_cleans_up() {
    let server = serve(vec![("/fzf.tar.gz", Route::ok("not a tarball"))]).await;
    let dir = TempDir::new().unwrap();
    let install_dir = dir.path().join("install");
    let config = local_config(server.url("/fzf.tar.gz"), &install_dir);

    let result = provision(&config).await;

    assert!(matches!(result, Err(Error::Extraction { .. })));
    assert!(!install_dir.join("fzf").exists());
    assert!(!install_dir.join("fzf.tar.gz").exists());
}

fn write_mode(path: &Path, contents: &str, mode: u32) {
    std::fs::write(path, contents).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
}

fn mode_of(path: &Path) -> u32 {
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

/// Test that a leftover binary from an unfinished install is replaced
#[tokio::test]
async fn test_provision_replaces_unrecorded_binary() {
    let dir = TempDir::new().unwrap();
    let server = serve(vec![("/fzf.tar.gz", Route::ok(fzf_tarball(dir.path())))]).await;
    let install_dir = dir.path().join("install");
    std::fs::create_dir(&install_dir).unwrap();
    write_mode(&install_dir.join("fzf"), "stale", 0o644);

    let mut config = local_config(server.url("/fzf.tar.gz"), &install_dir);
    config.version = "0.44.1".to_string();

    let outcome = provision(&config).await.unwrap();

    assert_eq!(outcome, Provisioned::Installed(install_dir.join("fzf")));
    assert_eq!(server.hits(), vec!["/fzf.tar.gz"]);
    assert_ne!(std::fs::read_to_string(install_dir.join("fzf")).unwrap(), "stale");
    assert_eq!(mode_of(&install_dir.join("fzf")), 0o755);
}

/// Test that changing the requested version installs the new release
#[tokio::test]
async fn test_provision_replaces_other_version() {
    let dir = TempDir::new().unwrap();
    let server = serve(vec![("/fzf.tar.gz", Route::ok(fzf_tarball(dir.path())))]).await;
    let install_dir = dir.path().join("install");
    std::fs::create_dir(&install_dir).unwrap();
    write_mode(&install_dir.join("fzf"), "old release", 0o755);

    let mut config = local_config(server.url("/fzf.tar.gz"), &install_dir);
    std::fs::write(config.version_marker_path(), "0.29.0").unwrap();
    config.version = "0.44.1".to_string();

    let outcome = provision(&config).await.unwrap();

    assert_eq!(outcome, Provisioned::Installed(install_dir.join("fzf")));
    assert_eq!(server.hits().len(), 1);
    assert_eq!(
        std::fs::read_to_string(config.version_marker_path()).unwrap(),
        "0.44.1"
    );
}

/// Test that a recorded install is kept but made executable again
#[tokio::test]
async fn test_provision_restores_mode_of_recorded_install() {
    let server = serve(vec![]).await;
    let dir = TempDir::new().unwrap();
    let install_dir = dir.path().join("install");
    std::fs::create_dir(&install_dir).unwrap();
    write_mode(&install_dir.join("fzf"), "#!/bin/sh\n", 0o644);

    let config = local_config(server.url("/fzf.tar.gz"), &install_dir);
    std::fs::write(config.version_marker_path(), "0.29.0\n").unwrap();

    let outcome = provision(&config).await.unwrap();

    assert_eq!(outcome, Provisioned::AlreadyInstalled(install_dir.join("fzf")));
    assert!(server.hits().is_empty());
    assert_eq!(mode_of(&install_dir.join("fzf")), 0o755);
}
