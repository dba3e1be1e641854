//! Integration tests for the listing session using MinIO via testcontainers
//!
//! These tests require Docker to be running and use the testcontainers crate
//! to spin up a MinIO instance for realistic S3 testing.
//!
//! Run with: cargo test --test s3_integration
//!
//! Note: Tests are conditionally skipped if Docker is not available.

use aws_config::{BehaviorVersion, Region};
use bucket_browser::s3::{ClientConfig, ListingError, S3ClientFactory};
use bucket_browser::ListingSession;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::minio::MinIO;

/// MinIO default credentials
const MINIO_ACCESS_KEY: &str = "minioadmin";
const MINIO_SECRET_KEY: &str = "minioadmin";

/// Test helper to check if Docker is available
fn docker_available() -> bool {
    std::process::Command::new("docker")
        .arg("info")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Start MinIO and return the container together with its endpoint URL
async fn start_minio() -> (ContainerAsync<MinIO>, String) {
    let container = MinIO::default()
        .with_env_var("MINIO_ROOT_USER", MINIO_ACCESS_KEY)
        .with_env_var("MINIO_ROOT_PASSWORD", MINIO_SECRET_KEY)
        .start()
        .await
        .expect("Failed to start MinIO container");

    let host = container.get_host().await.expect("Failed to get container host");
    let port = container.get_host_port_ipv4(9000).await.expect("Failed to get MinIO port");
    let endpoint = format!("http://{}:{}", host, port);

    // Wait for MinIO to be ready
    tokio::time::sleep(Duration::from_secs(2)).await;

    (container, endpoint)
}

fn minio_session(endpoint: &str) -> ListingSession<S3ClientFactory> {
    ListingSession::with_config(
        ClientConfig::default()
            .with_region("us-east-1")
            .with_endpoint(endpoint)
            .with_timeout(Duration::from_secs(10)),
    )
}

/// Raw SDK client used to seed buckets and objects
fn admin_client(endpoint: &str) -> aws_sdk_s3::Client {
    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .endpoint_url(endpoint)
        .force_path_style(true)
        .credentials_provider(aws_sdk_s3::config::Credentials::new(
            MINIO_ACCESS_KEY,
            MINIO_SECRET_KEY,
            None,
            None,
            "integration-test",
        ))
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

async fn create_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    client
        .create_bucket()
        .bucket(bucket)
        .send()
        .await
        .expect("Failed to create bucket");
}

async fn put_object(client: &aws_sdk_s3::Client, bucket: &str, key: &str, data: &[u8]) {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(data.to_vec().into())
        .send()
        .await
        .expect("Failed to put object");
}

/// Buckets created on the server show up in the listing
#[tokio::test]
async fn test_fetch_buckets() {
    if !docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }

    let (_container, endpoint) = start_minio().await;
    let admin = admin_client(&endpoint);
    create_bucket(&admin, "alpha").await;
    create_bucket(&admin, "beta").await;

    let session = minio_session(&endpoint);
    let buckets = session.fetch_buckets(MINIO_ACCESS_KEY, MINIO_SECRET_KEY).await;

    let names: Vec<&str> = buckets.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert!(buckets.iter().all(|b| b.creation_date.is_some()));
}

/// Rejected credentials collapse into an empty bucket list
#[tokio::test]
async fn test_fetch_buckets_with_bad_credentials() {
    if !docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }

    let (_container, endpoint) = start_minio().await;
    let admin = admin_client(&endpoint);
    create_bucket(&admin, "alpha").await;

    let session = minio_session(&endpoint);
    let buckets = session.fetch_buckets("AK_BAD", "SK_BAD").await;

    assert!(buckets.is_empty());
}

/// Object listing returns keys and sizes; an empty bucket returns nothing
#[tokio::test]
async fn test_fetch_objects() {
    if !docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }

    let (_container, endpoint) = start_minio().await;
    let admin = admin_client(&endpoint);
    create_bucket(&admin, "data-bucket").await;
    create_bucket(&admin, "empty-bucket").await;
    put_object(&admin, "data-bucket", "docs/readme.md", b"# Readme").await;
    put_object(&admin, "data-bucket", "root.txt", b"root file").await;

    let session = minio_session(&endpoint);

    let objects = session
        .fetch_objects(MINIO_ACCESS_KEY, MINIO_SECRET_KEY, "data-bucket")
        .await
        .expect("Failed to list objects");
    let keys: Vec<&str> = objects.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, vec!["docs/readme.md", "root.txt"]);
    assert_eq!(objects[0].size, 8);
    assert_eq!(objects[1].size, 9);

    let empty = session
        .fetch_objects(MINIO_ACCESS_KEY, MINIO_SECRET_KEY, "empty-bucket")
        .await
        .expect("Failed to list empty bucket");
    assert!(empty.is_empty());
}

/// Missing buckets and bad credentials propagate from the object listing
#[tokio::test]
async fn test_fetch_objects_errors() {
    if !docker_available() {
        eprintln!("Skipping test: Docker not available");
        return;
    }

    let (_container, endpoint) = start_minio().await;
    let admin = admin_client(&endpoint);
    create_bucket(&admin, "data-bucket").await;

    let session = minio_session(&endpoint);

    let missing = session
        .fetch_objects(MINIO_ACCESS_KEY, MINIO_SECRET_KEY, "missing-bucket")
        .await
        .unwrap_err();
    assert!(missing.is_not_found(), "unexpected error: {}", missing);

    let rejected = session
        .fetch_objects("AK_BAD", "SK_BAD", "data-bucket")
        .await
        .unwrap_err();
    assert!(rejected.is_authentication(), "unexpected error: {}", rejected);
}

/// An unreachable endpoint is a network error for objects and empty for buckets
#[tokio::test]
async fn test_unreachable_endpoint() {
    let session = ListingSession::with_config(
        ClientConfig::default()
            .with_region("us-east-1")
            .with_endpoint("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(5)),
    );

    assert!(session.fetch_buckets("AK", "SK").await.is_empty());

    let err = session.fetch_objects("AK", "SK", "any").await.unwrap_err();
    assert!(matches!(err, ListingError::Network(_)), "unexpected error: {}", err);
}
