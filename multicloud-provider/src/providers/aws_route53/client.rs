use async_trait::async_trait;

use crate::traits::ClientError;

use super::types::{
    ChangeResourceRecordSetsInput, ChangeResourceRecordSetsOutput, GetHostedZoneOutput,
    ListHostedZonesInput, ListHostedZonesOutput, ListResourceRecordSetsInput,
    ListResourceRecordSetsOutput,
};

/// Native Route 53 client, one per (profile, region).
#[async_trait]
pub trait Route53Client: Send + Sync {
    async fn list_hosted_zones(
        &self,
        input: ListHostedZonesInput,
    ) -> Result<ListHostedZonesOutput, ClientError>;

    async fn get_hosted_zone(&self, id: String) -> Result<GetHostedZoneOutput, ClientError>;

    async fn list_resource_record_sets(
        &self,
        input: ListResourceRecordSetsInput,
    ) -> Result<ListResourceRecordSetsOutput, ClientError>;

    async fn change_resource_record_sets(
        &self,
        input: ChangeResourceRecordSetsInput,
    ) -> Result<ChangeResourceRecordSetsOutput, ClientError>;
}
