//! 애플리케이션 설정 구조체.
//!
//! 모뎀 URL, 스크레이프 주기, 메트릭 서버 주소, 로그 레벨 등
//! 런타임 설정을 정의한다. 값은 CLI 인자/환경변수에서 채워지며
//! [`AppConfig::validate`]에서 한 번에 검증한다.

use serde::Deserialize;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 모뎀 연결 설정
    pub modem: ModemConfig,
    /// 스크레이프 스케줄 설정
    #[serde(default)]
    pub scrape: ScrapeConfig,
    /// 메트릭 노출 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 로그 설정
    #[serde(default)]
    pub log: LogConfig,
}

/// 모뎀 연결 설정
#[derive(Debug, Clone, Deserialize)]
pub struct ModemConfig {
    /// 모뎀 웹 API 기본 URL
    #[serde(default = "default_modem_url")]
    pub base_url: String,
    /// 요청당 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            base_url: default_modem_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// 스크레이프 스케줄 설정
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// 스크레이프 주기 (Go 스타일 기간 문자열: "10s", "1m30s", "500ms")
    #[serde(default = "default_interval")]
    pub interval: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
        }
    }
}

/// 메트릭 노출 서버 설정
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// `/metrics` 바인드 주소
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// 로그 설정
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            modem: ModemConfig::default(),
            scrape: ScrapeConfig::default(),
            web: WebConfig::default(),
            log: LogConfig::default(),
        }
    }

    /// 모든 설정값 검증
    ///
    /// 하나라도 해석할 수 없으면 `CoreError::Config` 반환 (프로세스 치명 에러).
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_base_url(&self.modem.base_url)?;
        if self.modem.request_timeout_ms == 0 {
            return Err(CoreError::Config(
                "요청 타임아웃은 0보다 커야 함".to_string(),
            ));
        }
        self.scrape_interval()?;
        self.listen_addr()?;
        self.log_level()?;
        Ok(())
    }

    /// 모뎀 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.modem.request_timeout_ms)
    }

    /// 스크레이프 주기 파싱
    pub fn scrape_interval(&self) -> Result<Duration, CoreError> {
        parse_duration(&self.scrape.interval)
    }

    /// 메트릭 서버 바인드 주소 파싱
    pub fn listen_addr(&self) -> Result<SocketAddr, CoreError> {
        self.web.listen_addr.trim().parse().map_err(|e| {
            CoreError::Config(format!(
                "잘못된 바인드 주소 '{}': {e}",
                self.web.listen_addr
            ))
        })
    }

    /// 로그 레벨 파싱
    pub fn log_level(&self) -> Result<tracing::Level, CoreError> {
        let raw = self.log.level.trim();
        let normalized = if raw.eq_ignore_ascii_case("warning") {
            "warn"
        } else {
            raw
        };
        tracing::Level::from_str(normalized)
            .map_err(|_| CoreError::Config(format!("잘못된 로그 레벨: '{raw}'")))
    }
}

/// 모뎀 기본 URL 검증: http/https 스킴과 호스트 필수
pub fn validate_base_url(base_url: &str) -> Result<url::Url, CoreError> {
    let parsed = url::Url::parse(base_url.trim())
        .map_err(|e| CoreError::Config(format!("잘못된 모뎀 URL '{base_url}': {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CoreError::Config(format!(
            "지원하지 않는 URL 스킴: {}",
            parsed.scheme()
        )));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(CoreError::Config(format!("모뎀 URL에 호스트 없음: {base_url}")));
    }
    Ok(parsed)
}

/// Go 스타일 기간 문자열 파싱
///
/// `<숫자><단위>` 항의 연속. 단위: `ns`, `us`(`µs`, `μs`), `ms`, `s`, `m`, `h`.
/// 소수 허용 ("1.5s"). 나노초 단위로 0이 되는 기간은 거부한다.
pub fn parse_duration(input: &str) -> Result<Duration, CoreError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(CoreError::Config("빈 기간 문자열".to_string()));
    }

    let invalid = || CoreError::Config(format!("잘못된 기간 문자열: '{input}'"));

    let mut total_ns = 0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        if num_end == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..num_end].parse().map_err(|_| invalid())?;
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let multiplier = match &rest[..unit_end] {
            "ns" => 1.0,
            // U+00B5 (micro sign), U+03BC (greek mu)
            "us" | "\u{b5}s" | "\u{3bc}s" => 1_000.0,
            "ms" => 1_000_000.0,
            "s" => 1_000_000_000.0,
            "m" => 60_000_000_000.0,
            "h" => 3_600_000_000_000.0,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_end..];
        total_ns += value * multiplier;
    }

    let nanos = total_ns.round() as u64;
    if nanos == 0 {
        return Err(CoreError::Config(format!(
            "기간은 0보다 커야 함: '{input}'"
        )));
    }
    Ok(Duration::from_nanos(nanos))
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_modem_url() -> String {
    "http://192.168.1.1".to_string()
}
fn default_request_timeout_ms() -> u64 {
    10_000
}
fn default_interval() -> String {
    "10s".to_string()
}
fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.scrape_interval().unwrap(), Duration::from_secs(10));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.log_level().unwrap(), tracing::Level::INFO);
        assert_eq!(config.listen_addr().unwrap().port(), 8080);
    }

    #[test]
    fn parse_simple_durations() {
        assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration(" 15s ").unwrap(), Duration::from_secs(15));
    }

    #[test]
    fn parse_compound_and_fractional_durations() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(
            parse_duration("1h2m3s").unwrap(),
            Duration::from_secs(3600 + 120 + 3)
        );
    }

    #[test]
    fn parse_sub_millisecond_durations() {
        assert_eq!(parse_duration("250ns").unwrap(), Duration::from_nanos(250));
        assert_eq!(parse_duration("500us").unwrap(), Duration::from_micros(500));
        assert_eq!(parse_duration("1\u{b5}s").unwrap(), Duration::from_micros(1));
        assert_eq!(parse_duration("1\u{3bc}s").unwrap(), Duration::from_micros(1));
        assert_eq!(
            parse_duration("1s500us").unwrap(),
            Duration::from_micros(1_000_500)
        );
    }

    #[test]
    fn reject_bad_durations() {
        for bad in [
            "", "10", "s", "10x", "abc", "-5s", "0s", "0.1ns", "1..2s", "5s10", "5mus",
        ] {
            let result = parse_duration(bad);
            assert!(
                matches!(result, Err(CoreError::Config(_))),
                "'{bad}'는 거부되어야 함"
            );
        }
    }

    #[test]
    fn reject_bad_log_level() {
        let mut config = AppConfig::default_config();
        config.log.level = "verbose".to_string();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn log_level_accepts_case_and_warning_alias() {
        let mut config = AppConfig::default_config();
        config.log.level = "DEBUG".to_string();
        assert_eq!(config.log_level().unwrap(), tracing::Level::DEBUG);
        config.log.level = "warning".to_string();
        assert_eq!(config.log_level().unwrap(), tracing::Level::WARN);
    }

    #[test]
    fn reject_bad_interval_in_validate() {
        let mut config = AppConfig::default_config();
        config.scrape.interval = "ten seconds".to_string();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn reject_bad_base_url() {
        assert!(validate_base_url("192.168.1.1").is_err());
        assert!(validate_base_url("ftp://192.168.1.1").is_err());
        assert!(validate_base_url("http://192.168.1.1").is_ok());
        assert!(validate_base_url("https://modem.local/").is_ok());
    }

    #[test]
    fn reject_bad_listen_addr() {
        let mut config = AppConfig::default_config();
        config.web.listen_addr = ":8080".to_string();
        assert!(matches!(config.listen_addr(), Err(CoreError::Config(_))));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{"modem":{"base_url":"http://10.0.0.1"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.modem.base_url, "http://10.0.0.1");
        assert_eq!(config.modem.request_timeout_ms, 10_000);
        assert_eq!(config.scrape.interval, "10s");
        assert_eq!(config.log.level, "info");
    }
}
