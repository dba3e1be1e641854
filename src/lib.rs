//! Bucket Browser library
//!
//! Lists the buckets, and the objects inside a bucket, visible to a single
//! access-key/secret-key pair. The presentation layer lives in the binary.

pub mod s3;
pub mod session;
pub mod settings;

pub use session::{ListingSession, ListingTask, SessionState};
