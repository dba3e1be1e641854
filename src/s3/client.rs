//! S3 client construction and listing calls

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::Client;

use crate::s3::credentials::Credentials;
use crate::s3::error::{ErrorScope, ListingError};
use crate::s3::types::{to_utc, BucketDescriptor, ObjectSummary};

/// Region every client is bound to unless configured otherwise
pub const DEFAULT_REGION: &str = "ap-northeast-2";

const PROVIDER_NAME: &str = "bucket-browser";

/// Connection settings shared by every client the factory builds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub region: String,
    /// Custom endpoint (MinIO, LocalStack, other S3-compatible stores)
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    /// Per-operation timeout. `None` leaves the SDK defaults in place.
    pub operation_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            force_path_style: false,
            operation_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Point at a custom endpoint. S3-compatible servers generally need path-style
    /// addressing, so this switches it on as well.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint.into());
        self.force_path_style = true;
        self
    }

    pub fn with_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    fn to_sdk_config(&self, credentials: &Credentials) -> aws_sdk_s3::Config {
        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(credentials.to_sdk(PROVIDER_NAME))
            .force_path_style(self.force_path_style);

        if let Some(endpoint) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        if let Some(timeout) = self.operation_timeout {
            builder = builder.timeout_config(
                TimeoutConfig::builder().operation_timeout(timeout).build(),
            );
        }

        builder.build()
    }
}

/// The two listing calls a client handle must support
#[async_trait]
pub trait ListingClient: Send + Sync {
    /// List every bucket visible to the handle's credentials
    async fn list_buckets(&self) -> Result<Vec<BucketDescriptor>, ListingError>;

    /// List the first page of objects in `bucket`
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>, ListingError>;
}

/// Builds a fresh client handle from a credential pair
///
/// Construction never touches the network and cannot fail. Bad credentials
/// only surface when the returned handle makes its first call.
pub trait ClientFactory: Send + Sync + 'static {
    type Client: ListingClient + 'static;

    fn build(&self, credentials: &Credentials) -> Self::Client;
}

/// Factory for clients backed by the AWS SDK
#[derive(Debug, Clone, Default)]
pub struct S3ClientFactory {
    config: ClientConfig,
}

impl S3ClientFactory {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl ClientFactory for S3ClientFactory {
    type Client = S3Client;

    fn build(&self, credentials: &Credentials) -> S3Client {
        tracing::debug!(
            "Building S3 client: region={}, endpoint={:?}",
            self.config.region,
            self.config.endpoint_url
        );
        S3Client {
            client: Client::from_conf(self.config.to_sdk_config(credentials)),
        }
    }
}

/// Region-bound, authenticated S3 handle
#[derive(Debug, Clone)]
pub struct S3Client {
    client: Client,
}

impl S3Client {
    /// Region this handle signs requests for
    pub fn region(&self) -> Option<&str> {
        self.client.config().region().map(|r| r.as_ref())
    }
}

#[async_trait]
impl ListingClient for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketDescriptor>, ListingError> {
        let response = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| ListingError::from_sdk(ErrorScope::Account, e))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| BucketDescriptor {
                name: b.name().unwrap_or_default().to_string(),
                creation_date: b.creation_date().and_then(to_utc),
            })
            .collect();

        Ok(buckets)
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>, ListingError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| ListingError::from_sdk(ErrorScope::Bucket, e))?;

        if response.is_truncated().unwrap_or(false) {
            tracing::debug!("Listing of {} truncated after {} keys", bucket, response.contents().len());
        }

        let objects = response
            .contents()
            .iter()
            .map(|obj| ObjectSummary {
                key: obj.key().unwrap_or_default().to_string(),
                size: obj.size().unwrap_or(0),
                last_modified: obj.last_modified().and_then(to_utc),
                etag: obj.e_tag().map(|s| s.to_string()),
                storage_class: obj.storage_class().map(|s| s.as_str().to_string()),
            })
            .collect();

        Ok(objects)
    }
}
