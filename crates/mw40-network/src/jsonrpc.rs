//! JSON-RPC 봉투(envelope) 타입.
//!
//! 모뎀 웹 API는 `params: null`, 메서드별 고정 `id`를 사용한다.

use serde::{Deserialize, Serialize};

/// JSON-RPC 프로토콜 버전
pub const JSONRPC_VERSION: &str = "2.0";

/// 모뎀 웹 API 경로
pub const WEBAPI_PATH: &str = "/jrd/webapi";

/// 익스포터가 호출하는 RPC 메서드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    GetSystemInfo,
    GetSystemStatus,
    GetConnectionState,
    GetSmsStorageState,
}

impl RpcMethod {
    /// 와이어상의 메서드명 (`api=` 쿼리 값과 동일)
    pub fn name(self) -> &'static str {
        match self {
            RpcMethod::GetSystemInfo => "GetSystemInfo",
            RpcMethod::GetSystemStatus => "GetSystemStatus",
            RpcMethod::GetConnectionState => "GetConnectionState",
            RpcMethod::GetSmsStorageState => "GetSMSStorageState",
        }
    }

    /// 메서드별 고정 요청 ID (모뎀 웹 UI와 동일한 값)
    pub fn request_id(self) -> &'static str {
        match self {
            RpcMethod::GetSystemInfo => "13.1",
            RpcMethod::GetSystemStatus => "13.4",
            RpcMethod::GetConnectionState => "3.1",
            RpcMethod::GetSmsStorageState => "6.4",
        }
    }

    /// 요청 URL (`{base}/jrd/webapi?api={name}`)
    ///
    /// `base_url`은 끝 슬래시가 제거된 상태여야 한다.
    pub fn url(self, base_url: &str) -> String {
        format!("{base_url}{WEBAPI_PATH}?api={}", self.name())
    }

    /// 요청 본문
    pub fn request(self) -> RpcRequest {
        RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            method: self.name(),
            params: None,
            id: self.request_id(),
        }
    }
}

impl std::fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// JSON-RPC 요청 봉투
///
/// 직렬화 결과: `{"jsonrpc":"2.0","method":"...","params":null,"id":"..."}`
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: Option<serde_json::Value>,
    pub id: &'static str,
}

/// JSON-RPC 응답 봉투
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    /// 성공 페이로드 (없으면 `None`)
    pub result: Option<T>,
    /// 에러 객체 (모뎀이 요청을 거부한 경우)
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    /// 요청 ID 에코 (펌웨어에 따라 문자열/숫자)
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 에러 객체
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    /// 에러 코드 (펌웨어에 따라 문자열로 오기도 함)
    #[serde(deserialize_with = "deserialize_code")]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(i64),
        Text(String),
    }

    match Code::deserialize(deserializer)? {
        Code::Number(n) => Ok(n),
        Code::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
