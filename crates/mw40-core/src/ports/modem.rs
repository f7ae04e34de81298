//! 모뎀 API 포트.
//!
//! 구현: `mw40-network` crate (reqwest, JSON-RPC)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::device::DeviceIdentity;
use crate::models::telemetry::{ConnectionState, SmsStorageState, SystemStatus};

/// 모뎀 읽기 전용 텔레메트리 API
///
/// 구현체는 내부 재시도를 하지 않는다. 재시도 정책은 호출자(스케줄러) 소관.
#[async_trait]
pub trait ModemApi: Send + Sync {
    /// 장치 식별 정보 조회 (끝 개행 정규화 적용)
    async fn fetch_device_identity(&self) -> Result<DeviceIdentity, CoreError>;

    /// 시스템 상태 조회
    async fn fetch_system_status(&self) -> Result<SystemStatus, CoreError>;

    /// 연결 상태 조회
    async fn fetch_connection_state(&self) -> Result<ConnectionState, CoreError>;

    /// SMS 저장소 상태 조회
    async fn fetch_sms_storage_state(&self) -> Result<SmsStorageState, CoreError>;
}
