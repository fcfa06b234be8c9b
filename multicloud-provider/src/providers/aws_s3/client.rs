use async_trait::async_trait;

use crate::traits::ClientError;

use super::types::{
    CreateBucketInput, CreateBucketOutput, ListBucketsInput, ListBucketsOutput, PutLifecycleInput,
    S3LifecycleConfiguration, S3Tag,
};

/// Native S3 client, one per (profile, region).
///
/// Missing tag sets and lifecycle configurations are reported as API errors
/// (`NoSuchTagSet`, `NoSuchLifecycleConfiguration`), exactly as S3 does.
#[async_trait]
pub trait S3Client: Send + Sync {
    async fn list_buckets(&self, input: ListBucketsInput) -> Result<ListBucketsOutput, ClientError>;

    async fn create_bucket(&self, input: CreateBucketInput)
    -> Result<CreateBucketOutput, ClientError>;

    async fn delete_bucket(&self, bucket: String) -> Result<(), ClientError>;

    async fn get_bucket_tagging(&self, bucket: String) -> Result<Vec<S3Tag>, ClientError>;

    async fn put_bucket_tagging(&self, bucket: String, tags: Vec<S3Tag>)
    -> Result<(), ClientError>;

    async fn put_bucket_lifecycle_configuration(
        &self,
        input: PutLifecycleInput,
    ) -> Result<(), ClientError>;

    async fn get_bucket_lifecycle_configuration(
        &self,
        bucket: String,
    ) -> Result<S3LifecycleConfiguration, ClientError>;
}
