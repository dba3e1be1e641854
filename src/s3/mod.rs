//! S3 listing module
//!
//! - [`client::S3ClientFactory`] - builds a region-bound client per credential pair
//! - [`client::ListingClient`] - the bucket and object listing calls
//! - [`error::ListingError`] - provider failures, classified
//! - [`types`] - listing results (BucketDescriptor, ObjectSummary)

pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use client::{ClientConfig, ClientFactory, ListingClient, S3Client, S3ClientFactory, DEFAULT_REGION};
pub use credentials::Credentials;
pub use error::{ErrorScope, ListingError};
pub use types::{BucketDescriptor, ObjectSummary};
