//! # mw40-app
//!
//! MW40 익스포터 바이너리 진입점.
//! DI 와이어링, 라이프사이클 관리, 스크레이프 스케줄러 오케스트레이션.

mod lifecycle;
mod scheduler;

use anyhow::{anyhow, Result};
use clap::Parser;
use mw40_core::config::AppConfig;
use mw40_core::error::CoreError;
use mw40_core::ports::metric_sink::MetricSink;
use mw40_core::ports::modem::ModemApi;
use mw40_network::modem_client::ModemClient;
use mw40_web::{GaugeRegistry, MetricsServer};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;
use crate::scheduler::{SchedulerConfig, ScrapeScheduler};

/// 빌드 메타데이터 (컴파일 시 환경변수로 주입)
const GIT_HASH: Option<&str> = option_env!("GIT_HASH");
const GIT_BRANCH: Option<&str> = option_env!("GIT_BRANCH");
const BUILD_DATE: Option<&str> = option_env!("BUILD_DATE");

/// Alcatel MW40 모뎀 Prometheus 익스포터
#[derive(Parser, Debug)]
#[command(name = "mw40-exporter")]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// 빌드 정보 출력 후 종료
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// 모뎀 웹 API 기본 URL
    #[arg(long, env = "MODEM_URL", default_value = "http://192.168.1.1")]
    modem_url: String,

    /// 스크레이프 주기 (예: 10s, 1m30s, 500ms)
    #[arg(long, env = "UPDATE_INTERVAL", default_value = "10s")]
    update_interval: String,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// 메트릭 서버 바인드 주소
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    listen_addr: String,
}

impl Args {
    /// CLI 인자를 기본 설정 위에 덮어쓴다. 빈 값은 기본값 유지.
    fn into_config(self) -> AppConfig {
        let mut config = AppConfig::default_config();
        override_non_blank(&mut config.modem.base_url, self.modem_url);
        override_non_blank(&mut config.scrape.interval, self.update_interval);
        override_non_blank(&mut config.log.level, self.log_level);
        override_non_blank(&mut config.web.listen_addr, self.listen_addr);
        config
    }
}

fn override_non_blank(target: &mut String, value: String) {
    if !value.trim().is_empty() {
        *target = value.trim().to_string();
    }
}

fn build_info(value: Option<&'static str>) -> &'static str {
    value.filter(|v| !v.is_empty()).unwrap_or("Undefined")
}

/// 빌드 정보 출력
fn print_version() {
    println!("Git hash: {}", build_info(GIT_HASH));
    println!("Git branch: {}", build_info(GIT_BRANCH));
    println!("Build date: {}", build_info(BUILD_DATE));
}

/// crate별 로그 필터 문자열
fn log_filter(level: tracing::Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    ["mw40_exporter", "mw40_app", "mw40_core", "mw40_network", "mw40_web", "tower_http"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// 리스너를 먼저 바인드한 뒤 서버 태스크 스폰 (바인드 실패는 호출자에게 반환)
async fn start_metrics_server(
    server: MetricsServer,
    shutdown_rx: watch::Receiver<bool>,
) -> Result<JoinHandle<Result<(), CoreError>>, CoreError> {
    let listener = server.bind().await?;
    Ok(tokio::spawn(server.serve(listener, shutdown_rx)))
}

/// 메트릭 서버 태스크 종료 결과 해석
fn server_outcome(result: Result<Result<(), CoreError>, JoinError>) -> Result<()> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!("메트릭 서버 오류: {e}");
            Err(anyhow!("메트릭 서버 오류: {e}"))
        }
        Err(e) => {
            error!("메트릭 서버 태스크 비정상 종료: {e}");
            Err(anyhow!("메트릭 서버 태스크 비정상 종료: {e}"))
        }
    }
}

/// 스케줄러 태스크 종료 결과 해석
fn scheduler_outcome(result: Result<(), JoinError>) -> Result<()> {
    result.map_err(|e| {
        error!("스크레이프 스케줄러 태스크 비정상 종료: {e}");
        anyhow!("스크레이프 스케줄러 태스크 비정상 종료: {e}")
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 빌드 정보 (설정 검증 이전에 즉시 종료)
    if args.version {
        print_version();
        return Ok(());
    }

    let config = args.into_config();

    // 로그 레벨은 tracing 초기화 전에 해석해야 하므로 검증 실패는 stderr로 보고
    let level = config
        .log_level()
        .map_err(|e| anyhow!("설정 검증 실패: {e}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter(level))),
        )
        .init();

    if let Err(e) = config.validate() {
        error!("설정 검증 실패: {e}");
        return Err(anyhow!("설정 검증 실패: {e}"));
    }
    let interval = config.scrape_interval()?;
    let listen_addr = config.listen_addr()?;

    info!(
        "MW40 익스포터 시작: modem={}, interval={}ms, listen={}",
        config.modem.base_url,
        interval.as_millis(),
        listen_addr
    );

    // ── 어댑터 생성 (DI 와이어링) ──
    let modem: Arc<dyn ModemApi> = Arc::new(ModemClient::new(
        &config.modem.base_url,
        config.request_timeout(),
    )?);
    let registry = Arc::new(GaugeRegistry::new()?);
    let sink: Arc<dyn MetricSink> = registry.clone();

    // 장치 식별 정보 조회 (실패 시 치명)
    let scheduler =
        match ScrapeScheduler::bootstrap(SchedulerConfig { interval }, modem, sink).await {
            Ok(scheduler) => scheduler,
            Err(e) => {
                error!("모뎀 식별 정보 조회 실패: {e}");
                return Err(anyhow!("모뎀 식별 정보 조회 실패: {e}"));
            }
        };

    info!("라벨 식별자: IMEI={}", scheduler.identity().imei);

    let lifecycle = LifecycleManager::new();

    // ── 메트릭 서버 (바인드 실패 시 치명) ──
    let server = MetricsServer::new(registry, listen_addr);
    let mut server_task = match start_metrics_server(server, lifecycle.subscribe()).await {
        Ok(task) => task,
        Err(e) => {
            error!("메트릭 서버 바인드 실패 ({listen_addr}): {e}");
            return Err(anyhow!("메트릭 서버 바인드 실패 ({listen_addr}): {e}"));
        }
    };

    // ── 스크레이프 루프 ──
    let mut scheduler_task = tokio::spawn(scheduler.run(lifecycle.subscribe()));

    info!("MW40 익스포터 실행 중 (Ctrl+C로 종료)");

    // OS 시그널 또는 태스크 조기 종료 대기
    let mut server_result = None;
    let mut scheduler_result = None;
    let mut early_exit = None;
    tokio::select! {
        _ = lifecycle.wait_for_signal() => {}
        result = &mut server_task => {
            early_exit = Some("메트릭 서버");
            server_result = Some(result);
        }
        result = &mut scheduler_task => {
            early_exit = Some("스크레이프 스케줄러");
            scheduler_result = Some(result);
        }
    }
    if early_exit.is_some() {
        lifecycle.shutdown();
    }

    let server_result = match server_result {
        Some(result) => result,
        None => server_task.await,
    };
    let scheduler_result = match scheduler_result {
        Some(result) => result,
        None => scheduler_task.await,
    };

    server_outcome(server_result)?;
    scheduler_outcome(scheduler_result)?;
    if let Some(task) = early_exit {
        error!("{task} 태스크가 종료 신호 없이 끝남");
        return Err(anyhow!("{task} 태스크가 종료 신호 없이 끝남"));
    }

    info!("MW40 익스포터 종료");
    Ok(())
}
