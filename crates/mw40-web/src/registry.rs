//! 게이지 레지스트리.
//!
//! `MetricSink` 포트 구현. `ModemGauge`마다 `{IMEI, IMSI, MacAddress}` 라벨을 갖는
//! `prometheus::GaugeVec`를 하나씩 등록하고, 노출은 `TextEncoder`에 맡긴다.
//! 게이지 값 갱신은 계열별로 원자적이며 계열 간 일관성은 보장하지 않는다.
//! 노출 순서는 `Registry::gather`가 정하는 계열 이름순이다.

use mw40_core::error::CoreError;
use mw40_core::models::device::{LABEL_IMEI, LABEL_IMSI, LABEL_MAC_ADDRESS};
use mw40_core::models::metric::{LabelSet, ModemGauge};
use mw40_core::ports::metric_sink::MetricSink;
use prometheus::proto::{LabelPair, MetricFamily};
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tracing::warn;

/// 모든 게이지가 공유하는 라벨 이름
pub const GAUGE_LABELS: [&str; 3] = [LABEL_IMEI, LABEL_IMSI, LABEL_MAC_ADDRESS];

/// Prometheus 게이지 레지스트리
pub struct GaugeRegistry {
    registry: Registry,
    /// `ModemGauge` 선언 순서(= `ModemGauge::ALL`)로 인덱싱
    families: Vec<(ModemGauge, GaugeVec)>,
}

impl GaugeRegistry {
    /// 전체 게이지 계열을 등록한 레지스트리 생성
    pub fn new() -> Result<Self, CoreError> {
        let registry = Registry::new();
        let mut families = Vec::with_capacity(ModemGauge::ALL.len());

        for gauge in ModemGauge::ALL {
            let vec = GaugeVec::new(Opts::new(gauge.name(), gauge.help()), &GAUGE_LABELS)
                .map_err(|e| CoreError::Metrics(format!("{gauge} 생성 실패: {e}")))?;
            registry
                .register(Box::new(vec.clone()))
                .map_err(|e| CoreError::Metrics(format!("{gauge} 등록 실패: {e}")))?;
            families.push((gauge, vec));
        }

        Ok(Self { registry, families })
    }

    fn family(&self, gauge: ModemGauge) -> &GaugeVec {
        &self.families[gauge as usize].1
    }

    /// 현재 게이지 값 조회 (설정된 적 없으면 `None`)
    pub fn get(&self, gauge: ModemGauge, labels: &LabelSet) -> Option<f64> {
        self.registry
            .gather()
            .iter()
            .find(|family| family.get_name() == gauge.name())
            .and_then(|family| {
                family
                    .get_metric()
                    .iter()
                    .find(|metric| labels_match(metric.get_label(), labels))
                    .map(|metric| metric.get_gauge().get_value())
            })
    }

    /// 전체 샘플 수
    pub fn sample_count(&self) -> usize {
        self.gather().iter().map(|f| f.get_metric().len()).sum()
    }

    /// 샘플이 있는 계열만 수집
    fn gather(&self) -> Vec<MetricFamily> {
        self.registry
            .gather()
            .into_iter()
            .filter(|family| !family.get_metric().is_empty())
            .collect()
    }

    /// Prometheus 텍스트 포맷(0.0.4)으로 렌더링
    ///
    /// 샘플이 없는 계열은 생략한다.
    pub fn render(&self) -> Result<String, CoreError> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.gather(), &mut buffer)
            .map_err(|e| CoreError::Metrics(format!("텍스트 인코딩 실패: {e}")))?;
        String::from_utf8(buffer)
            .map_err(|e| CoreError::Metrics(format!("UTF-8 변환 실패: {e}")))
    }
}

impl MetricSink for GaugeRegistry {
    fn set_gauge(&self, gauge: ModemGauge, labels: &LabelSet, value: f64) {
        let values: Option<Vec<&str>> = GAUGE_LABELS.iter().map(|name| labels.get(name)).collect();
        let Some(values) = values.filter(|v| v.len() == labels.len()) else {
            warn!("게이지 라벨 불일치 [{gauge}]: {labels:?}");
            return;
        };
        match self.family(gauge).get_metric_with_label_values(&values) {
            Ok(metric) => metric.set(value),
            Err(e) => warn!("게이지 갱신 실패 [{gauge}]: {e}"),
        }
    }
}

fn labels_match(pairs: &[LabelPair], labels: &LabelSet) -> bool {
    pairs.len() == labels.len()
        && pairs
            .iter()
            .all(|pair| labels.get(pair.get_name()) == Some(pair.get_value()))
}
