//! MW40 익스포터 핵심 에러 타입.
//!
//! 어댑터 crate(network, web)는 모두 `CoreError`를 그대로 반환한다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 전송 실패 (연결 거부, 타임아웃, 네트워크 도달 불가, 비정상 HTTP 상태)
    #[error("전송 에러: {0}")]
    Transport(String),

    /// 응답 본문 디코딩 실패 (잘못된 JSON, 스키마 불일치)
    #[error("디코딩 에러 [{method}]: {message}")]
    Decode {
        /// 호출한 RPC 메서드명
        method: String,
        /// 실패 사유
        message: String,
    },

    /// 모뎀이 JSON-RPC `error` 객체를 반환함
    #[error("RPC 에러 [{method}] code={code}: {message}")]
    Rpc {
        /// 호출한 RPC 메서드명
        method: String,
        /// 모뎀 에러 코드
        code: i64,
        /// 모뎀 에러 메시지
        message: String,
    },

    /// 설정값 오류 (주기 문자열, 로그 레벨, URL, 바인드 주소)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 메트릭 레지스트리 등록/인코딩 실패
    #[error("메트릭 에러: {0}")]
    Metrics(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 스크레이프 주기 단위로 복구 가능한 에러인지 판별
    ///
    /// 전송/디코딩/RPC 에러는 다음 주기에 자연 해소될 수 있다.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::Transport(_) | CoreError::Decode { .. } | CoreError::Rpc { .. }
        )
    }
}
