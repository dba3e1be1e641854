//! Credential-scoped listing session
//!
//! A [`ListingSession`] holds nothing but the client factory. Every fetch builds
//! its own client, makes exactly one remote call and drops the client again, so
//! concurrent fetches share no mutable state.
//!
//! The two fetches deliberately disagree on failure handling:
//! [`ListingSession::fetch_buckets`] logs the failure and returns an empty list,
//! while [`ListingSession::fetch_objects`] hands the error back to the caller.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::s3::{
    BucketDescriptor, ClientConfig, ClientFactory, Credentials, ListingClient, ListingError,
    ObjectSummary, S3ClientFactory,
};

/// Runs listing requests against clients built per call
pub struct ListingSession<F> {
    factory: Arc<F>,
}

impl<F> Clone for ListingSession<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl ListingSession<S3ClientFactory> {
    /// Session backed by the AWS SDK
    pub fn with_config(config: ClientConfig) -> Self {
        Self::new(S3ClientFactory::new(config))
    }
}

impl<F: ClientFactory> ListingSession<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// List all buckets visible to the credentials
    ///
    /// Never fails. Any provider error is logged and an empty list returned, so
    /// an account without buckets looks the same as a rejected key pair.
    pub async fn fetch_buckets(&self, access_key: &str, secret_key: &str) -> Vec<BucketDescriptor> {
        let credentials = Credentials::new(access_key, secret_key);
        let client = self.factory.build(&credentials);

        match client.list_buckets().await {
            Ok(buckets) => {
                tracing::info!("Listed {} buckets", buckets.len());
                buckets
            }
            Err(e) => {
                tracing::error!("Failed to list buckets: {}", e);
                Vec::new()
            }
        }
    }

    /// List the first page of objects in `bucket`
    pub async fn fetch_objects(
        &self,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
    ) -> Result<Vec<ObjectSummary>, ListingError> {
        let credentials = Credentials::new(access_key, secret_key);
        let client = self.factory.build(&credentials);

        let objects = client.list_objects(bucket).await?;
        tracing::info!("Listed {} objects in {}", objects.len(), bucket);

        Ok(objects)
    }

    /// Run [`Self::fetch_buckets`] on a background task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_fetch_buckets(
        &self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> ListingTask<Vec<BucketDescriptor>> {
        let session = self.clone();
        let access_key = access_key.into();
        let secret_key = secret_key.into();

        ListingTask::spawn(async move { Ok(session.fetch_buckets(&access_key, &secret_key).await) })
    }

    /// Run [`Self::fetch_objects`] on a background task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_fetch_objects(
        &self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> ListingTask<Vec<ObjectSummary>> {
        let session = self.clone();
        let access_key = access_key.into();
        let secret_key = secret_key.into();
        let bucket = bucket.into();

        ListingTask::spawn(async move {
            session
                .fetch_objects(&access_key, &secret_key, &bucket)
                .await
        })
    }
}

/// Handle to a listing request running on the tokio runtime
///
/// Each task is independent: cancelling one leaves any other in-flight request
/// untouched.
pub struct ListingTask<T> {
    handle: JoinHandle<Result<T, ListingError>>,
}

impl<T: Send + 'static> ListingTask<T> {
    fn spawn<Fut>(future: Fut) -> Self
    where
        Fut: std::future::Future<Output = Result<T, ListingError>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// Abort the request. A later [`Self::join`] yields [`ListingError::Cancelled`].
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the request to finish
    pub async fn join(self) -> Result<T, ListingError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ListingError::Cancelled),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

/// Caller-side progress of one user action
///
/// Replaced wholesale on every new action; nothing about it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState<T> {
    #[default]
    Idle,
    Loading,
    Completed(T),
    Failed(ListingError),
}

impl<T> SessionState<T> {
    /// Mark a request as in flight
    pub fn begin(&mut self) {
        *self = SessionState::Loading;
    }

    /// Record the outcome of the in-flight request
    pub fn finish(&mut self, result: Result<T, ListingError>) {
        *self = match result {
            Ok(value) => SessionState::Completed(value),
            Err(e) => SessionState::Failed(e),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn results(&self) -> Option<&T> {
        match self {
            SessionState::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ListingError> {
        match self {
            SessionState::Failed(e) => Some(e),
            _ => None,
        }
    }
}
