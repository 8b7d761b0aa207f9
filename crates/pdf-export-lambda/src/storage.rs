//! S3 object storage access
//!
//! Wraps the AWS S3 client behind a narrow read/write boundary so the
//! conversion pipeline can run against any object store in tests.

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use tracing::error;

/// Read/write access to blob storage, addressed by (bucket, key).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full content of an object.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Persist an object with the given content type.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;
}

/// S3-backed object store
pub struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    /// Create a new store from the ambient AWS environment
    pub async fn new() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: S3Client::new(&config),
        }
    }

    /// Create with an existing client (for testing)
    pub fn with_client(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, bucket = %bucket, key = %key, "S3 get failed");
                StorageError::Get {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: e.to_string(),
                }
            })?;

        let data = object.body.collect().await.map_err(|e| StorageError::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: e.to_string(),
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, bucket = %bucket, key = %key, "S3 put failed");
                StorageError::Put {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: e.to_string(),
                }
            })?;

        Ok(())
    }
}

/// Storage operation errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to fetch {bucket}/{key}: {message}")]
    Get {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("failed to store {bucket}/{key}: {message}")]
    Put {
        bucket: String,
        key: String,
        message: String,
    },
}
