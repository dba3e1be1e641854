//! Listing result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bucket as reported by the provider's bucket listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDescriptor {
    pub name: String,
    pub creation_date: Option<DateTime<Utc>>,
}

impl BucketDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creation_date: None,
        }
    }
}

/// A single entry from the first page of an object listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
    pub etag: Option<String>,
    pub storage_class: Option<String>,
}

impl ObjectSummary {
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified: None,
            etag: None,
            storage_class: None,
        }
    }

    /// Get a human-readable size string
    pub fn size_string(&self) -> String {
        const KB: i64 = 1024;
        const MB: i64 = KB * 1024;
        const GB: i64 = MB * 1024;
        const TB: i64 = GB * 1024;

        let units = [(TB, "TB"), (GB, "GB"), (MB, "MB"), (KB, "KB")];
        for (scale, unit) in units {
            if self.size >= scale {
                return format!("{:.2} {}", self.size as f64 / scale as f64, unit);
            }
        }
        format!("{} B", self.size)
    }
}

/// Convert an SDK timestamp into a chrono UTC timestamp
pub(crate) fn to_utc(d: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(d.secs(), d.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_string_bytes() {
        assert_eq!(ObjectSummary::new("a.txt", 100).size_string(), "100 B");
        assert_eq!(ObjectSummary::new("empty", 0).size_string(), "0 B");
    }

    #[test]
    fn test_size_string_kb() {
        assert_eq!(ObjectSummary::new("a.txt", 1536).size_string(), "1.50 KB");
    }

    #[test]
    fn test_size_string_large_units() {
        assert_eq!(
            ObjectSummary::new("a.bin", 5 * 1024 * 1024).size_string(),
            "5.00 MB"
        );
        assert_eq!(
            ObjectSummary::new("a.bin", 2 * 1024 * 1024 * 1024).size_string(),
            "2.00 GB"
        );
        assert_eq!(
            ObjectSummary::new("a.bin", 3 * 1024 * 1024 * 1024 * 1024).size_string(),
            "3.00 TB"
        );
    }

    #[test]
    fn test_bucket_descriptor_new() {
        let bucket = BucketDescriptor::new("alpha");
        assert_eq!(bucket.name, "alpha");
        assert!(bucket.creation_date.is_none());
    }

    #[test]
    fn test_to_utc() {
        let sdk = aws_sdk_s3::primitives::DateTime::from_secs(1_700_000_000);
        let converted = to_utc(&sdk).unwrap();
        assert_eq!(converted.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_bucket_serialization() {
        let bucket = BucketDescriptor::new("data-bucket");
        let json = serde_json::to_string(&bucket).unwrap();
        let parsed: BucketDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bucket);
    }
}
