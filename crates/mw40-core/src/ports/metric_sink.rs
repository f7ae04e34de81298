//! 메트릭 싱크 포트.
//!
//! 구현: `mw40-web` crate (`GaugeRegistry`)

use crate::models::metric::{LabelSet, ModemGauge};

/// 게이지 쓰기 인터페이스
///
/// 같은 (게이지, 라벨) 쌍에 대한 반복 호출은 마지막 값만 남긴다.
/// 각 호출은 독립적으로 원자적이며, 게이지 간 트랜잭션 일관성은 없다.
pub trait MetricSink: Send + Sync {
    /// 게이지 값 설정 (last-write-wins)
    fn set_gauge(&self, gauge: ModemGauge, labels: &LabelSet, value: f64);
}
