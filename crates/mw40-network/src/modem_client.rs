//! MW40 모뎀 웹 API 클라이언트.
//!
//! `ModemApi` 포트 구현. 요청당 타임아웃만 적용하며 재시도하지 않는다.

use async_trait::async_trait;
use mw40_core::config::validate_base_url;
use mw40_core::error::CoreError;
use mw40_core::models::device::DeviceIdentity;
use mw40_core::models::telemetry::{ConnectionState, SmsStorageState, SystemStatus};
use mw40_core::ports::modem::ModemApi;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::jsonrpc::{RpcMethod, RpcResponse};

/// 기본 요청 타임아웃
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-RPC 모뎀 클라이언트: `ModemApi` 포트 구현
pub struct ModemClient {
    client: reqwest::Client,
    base_url: String,
}

impl ModemClient {
    /// 새 모뎀 클라이언트 생성
    ///
    /// `base_url`은 여기서 한 번 검증되므로 이후 요청 URL 조립은 실패하지 않는다.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        validate_base_url(base_url)?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| CoreError::Transport(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// JSON-RPC 호출 후 `result` 페이로드 디코딩
    async fn call<T: DeserializeOwned>(&self, method: RpcMethod) -> Result<T, CoreError> {
        let body = self.post(method).await?;
        debug!("[{method}] Body: {}", String::from_utf8_lossy(&body));
        decode_response(method, &body)
    }

    /// 고정 요청 본문 전송 후 응답 본문 전체 수신
    async fn post(&self, method: RpcMethod) -> Result<Vec<u8>, CoreError> {
        let resp = self
            .client
            .post(method.url(&self.base_url))
            .json(&method.request())
            .send()
            .await
            .map_err(|e| transport_error(method, &e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Transport(format!(
                "[{method}] HTTP 상태 {status}"
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| transport_error(method, &e))?;
        Ok(bytes.to_vec())
    }
}

/// reqwest 에러를 전송 에러로 매핑 (타임아웃/연결 실패 구분)
fn transport_error(method: RpcMethod, e: &reqwest::Error) -> CoreError {
    let kind = if e.is_timeout() {
        "타임아웃"
    } else if e.is_connect() {
        "연결 실패"
    } else {
        "요청 실패"
    };
    CoreError::Transport(format!("[{method}] {kind}: {e}"))
}

/// 응답 봉투 디코딩
///
/// `error` 객체가 있으면 RPC 에러, `result`가 없으면 디코딩 에러.
fn decode_response<T: DeserializeOwned>(method: RpcMethod, body: &[u8]) -> Result<T, CoreError> {
    let envelope: RpcResponse<T> =
        serde_json::from_slice(body).map_err(|e| CoreError::Decode {
            method: method.name().to_string(),
            message: e.to_string(),
        })?;

    if let Some(error) = envelope.error {
        return Err(CoreError::Rpc {
            method: method.name().to_string(),
            code: error.code,
            message: error.message,
        });
    }

    if let Some(id) = envelope.id.as_ref() {
        if id.as_str() != Some(method.request_id()) {
            debug!("[{method}] 응답 ID 불일치: expected={}, got={id}", method.request_id());
        }
    }

    envelope.result.ok_or_else(|| CoreError::Decode {
        method: method.name().to_string(),
        message: "응답에 result 없음".to_string(),
    })
}

#[async_trait]
impl ModemApi for ModemClient {
    async fn fetch_device_identity(&self) -> Result<DeviceIdentity, CoreError> {
        let identity: DeviceIdentity = self.call(RpcMethod::GetSystemInfo).await?;
        Ok(identity.normalized())
    }

    async fn fetch_system_status(&self) -> Result<SystemStatus, CoreError> {
        self.call(RpcMethod::GetSystemStatus).await
    }

    async fn fetch_connection_state(&self) -> Result<ConnectionState, CoreError> {
        self.call(RpcMethod::GetConnectionState).await
    }

    async fn fetch_sms_storage_state(&self) -> Result<SmsStorageState, CoreError> {
        self.call(RpcMethod::GetSmsStorageState).await
    }
}
