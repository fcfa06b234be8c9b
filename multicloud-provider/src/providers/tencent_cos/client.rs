use async_trait::async_trait;

use crate::traits::ClientError;

use super::types::{CosLifecycleConfiguration, CosTag, ListAllMyBucketsResult};

/// Native COS client, one per (profile, region).
///
/// Buckets are addressed by their full `<name>-<appid>` name. Missing tag sets
/// and lifecycle configurations come back as `NoSuchTagSet` and
/// `NoSuchLifecycleConfiguration` API errors.
#[async_trait]
pub trait CosClient: Send + Sync {
    /// `GET Service`
    async fn get_service(
        &self,
        marker: Option<String>,
        max_keys: u32,
    ) -> Result<ListAllMyBucketsResult, ClientError>;

    /// `PUT Bucket`, in the client's region.
    async fn put_bucket(&self, bucket: String) -> Result<(), ClientError>;

    async fn delete_bucket(&self, bucket: String) -> Result<(), ClientError>;

    async fn get_bucket_tagging(&self, bucket: String) -> Result<Vec<CosTag>, ClientError>;

    async fn put_bucket_tagging(&self, bucket: String, tags: Vec<CosTag>)
    -> Result<(), ClientError>;

    async fn put_bucket_lifecycle(
        &self,
        bucket: String,
        config: CosLifecycleConfiguration,
    ) -> Result<(), ClientError>;

    async fn get_bucket_lifecycle(
        &self,
        bucket: String,
    ) -> Result<CosLifecycleConfiguration, ClientError>;
}
