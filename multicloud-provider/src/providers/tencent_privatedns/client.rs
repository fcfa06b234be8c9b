use async_trait::async_trait;

use crate::traits::ClientError;

use super::types::{
    ActionResponse, CreatePrivateZoneRecordRequest, CreatePrivateZoneRecordResponse,
    DeletePrivateZoneRecordRequest, DescribePrivateZoneListRequest,
    DescribePrivateZoneListResponse, DescribePrivateZoneRecordListRequest,
    DescribePrivateZoneRecordListResponse, ModifyPrivateZoneRecordRequest,
};

/// Native Tencent Cloud PrivateDNS client, one per (profile, region).
///
/// Implementations sign and send the actions; API errors come back as
/// [`ClientError::Api`] carrying the Tencent error code.
#[async_trait]
pub trait PrivateDnsClient: Send + Sync {
    async fn describe_private_zone_list(
        &self,
        req: DescribePrivateZoneListRequest,
    ) -> Result<DescribePrivateZoneListResponse, ClientError>;

    async fn describe_private_zone_record_list(
        &self,
        req: DescribePrivateZoneRecordListRequest,
    ) -> Result<DescribePrivateZoneRecordListResponse, ClientError>;

    async fn create_private_zone_record(
        &self,
        req: CreatePrivateZoneRecordRequest,
    ) -> Result<CreatePrivateZoneRecordResponse, ClientError>;

    async fn modify_private_zone_record(
        &self,
        req: ModifyPrivateZoneRecordRequest,
    ) -> Result<ActionResponse, ClientError>;

    async fn delete_private_zone_record(
        &self,
        req: DeletePrivateZoneRecordRequest,
    ) -> Result<ActionResponse, ClientError>;
}
