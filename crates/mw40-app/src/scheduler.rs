//! 스크레이프 스케줄러.
//!
//! 시작 시 장치 식별 정보를 한 번 조회한 뒤, 고정 주기마다
//! 시스템 상태 → 연결 상태 → SMS 저장소 순으로 순차 조회하여 게이지를 갱신한다.
//! 한 단계가 실패하면 그 주기의 나머지 단계는 건너뛰고 다음 주기를 기다린다.

use mw40_core::error::CoreError;
use mw40_core::models::device::DeviceIdentity;
use mw40_core::models::metric::{LabelSet, ModemGauge, TelemetryCategory};
use mw40_core::ports::metric_sink::MetricSink;
use mw40_core::ports::modem::ModemApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// 연속 실패가 이 횟수에 도달하면 error 레벨로 기록
pub const FAILURE_ESCALATION_THRESHOLD: u32 = 3;

/// 스케줄러 설정
pub struct SchedulerConfig {
    /// 스크레이프 주기
    pub interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
        }
    }
}

/// 주기를 중단시킨 실패
#[derive(Debug)]
pub struct CycleFailure {
    pub category: TelemetryCategory,
    pub error: CoreError,
}

/// 한 스크레이프 주기의 결과
#[derive(Debug, Default)]
pub struct CycleReport {
    /// 게이지를 갱신한 카테고리 (조회 순서)
    pub emitted: Vec<TelemetryCategory>,
    /// 주기를 중단시킨 실패
    pub failure: Option<CycleFailure>,
}

impl CycleReport {
    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// 스크레이프 스케줄러
pub struct ScrapeScheduler {
    config: SchedulerConfig,
    modem: Arc<dyn ModemApi>,
    sink: Arc<dyn MetricSink>,
    identity: DeviceIdentity,
    labels: LabelSet,
    consecutive_failures: u32,
}

impl ScrapeScheduler {
    /// 장치 식별 정보를 조회하여 스케줄러 생성
    ///
    /// 식별 정보 없이는 라벨을 만들 수 없으므로 실패는 호출자에게 치명 에러로 전달된다.
    pub async fn bootstrap(
        config: SchedulerConfig,
        modem: Arc<dyn ModemApi>,
        sink: Arc<dyn MetricSink>,
    ) -> Result<Self, CoreError> {
        let identity = modem.fetch_device_identity().await?;
        info!(
            "모뎀 식별: SwVersion={}, HwVersion={}, IMEI={}, IMSI={}, MacAddress={}, ICCID={}",
            identity.software_version,
            identity.hardware_version,
            identity.imei,
            identity.imsi,
            identity.mac_address,
            identity.iccid
        );

        let labels = identity.labels();
        Ok(Self {
            config,
            modem,
            sink,
            identity,
            labels,
            consecutive_failures: 0,
        })
    }

    /// 시작 시 조회한 장치 식별 정보
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// 현재 연속 실패 횟수
    #[cfg(test)]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// 스크레이프 1회 실행
    ///
    /// 카테고리를 순서대로 조회하며, 첫 실패에서 중단한다.
    /// 실패 이전에 갱신된 게이지는 그대로 유지된다.
    pub async fn scrape_once(&self) -> CycleReport {
        let mut report = CycleReport::default();

        for category in TelemetryCategory::ALL {
            match self.fetch_category(category).await {
                Ok(values) => {
                    for (gauge, value) in values {
                        self.sink.set_gauge(gauge, &self.labels, value);
                    }
                    report.emitted.push(category);
                }
                Err(error) => {
                    report.failure = Some(CycleFailure { category, error });
                    break;
                }
            }
        }

        report
    }

    async fn fetch_category(
        &self,
        category: TelemetryCategory,
    ) -> Result<Vec<(ModemGauge, f64)>, CoreError> {
        match category {
            TelemetryCategory::SystemStatus => {
                Ok(self.modem.fetch_system_status().await?.gauge_values())
            }
            TelemetryCategory::ConnectionState => {
                Ok(self.modem.fetch_connection_state().await?.gauge_values())
            }
            TelemetryCategory::SmsStorage => {
                Ok(self.modem.fetch_sms_storage_state().await?.gauge_values())
            }
        }
    }

    /// 주기 결과 기록 (연속 실패 카운터, 로그 레벨 승격)
    pub fn record(&mut self, report: &CycleReport) {
        let Some(failure) = &report.failure else {
            if self.consecutive_failures > 0 {
                info!(
                    "스크레이프 복구: 연속 {}회 실패 후 성공",
                    self.consecutive_failures
                );
            } else {
                debug!("스크레이프 완료: {}개 카테고리", report.emitted.len());
            }
            self.consecutive_failures = 0;
            return;
        };

        self.consecutive_failures += 1;
        if self.consecutive_failures >= FAILURE_ESCALATION_THRESHOLD {
            error!(
                "스크레이프 실패 (연속 {}회) [{}]: {}",
                self.consecutive_failures, failure.category, failure.error
            );
        } else {
            warn!("스크레이프 실패 [{}]: {}", failure.category, failure.error);
        }
    }

    /// 주기 루프 실행
    ///
    /// 첫 주기는 즉시 실행된다. 종료 신호를 받으면 진행 중인 주기를 버리고 반환한다.
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "스크레이프 스케줄러 시작: 주기={}ms",
            self.config.interval.as_millis()
        );

        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let report = tokio::select! {
                        report = self.scrape_once() => report,
                        _ = shutdown_rx.changed() => {
                            info!("진행 중인 스크레이프 중단");
                            break;
                        }
                    };
                    self.record(&report);
                }
                _ = shutdown_rx.changed() => {
                    info!("스크레이프 루프 종료");
                    break;
                }
            }
        }
    }
}
