//! MW40 도메인 모델.
//!
//! 모뎀 JSON-RPC 응답 페이로드와 메트릭 게이지 정의.
//! 응답 모델은 모뎀 필드명 그대로 `serde` Deserialize를 구현한다.

pub mod device;
pub mod metric;
pub mod telemetry;

use serde::{Deserialize, Deserializer};

/// `null` 또는 누락된 값을 기본값으로 디코딩
///
/// 게이지/라벨로 쓰지 않는 보조 필드는 펌웨어·SIM 상태에 따라 비어 올 수 있다.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
