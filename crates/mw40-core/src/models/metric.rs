//! 메트릭 게이지 정의.
//!
//! 익스포터가 노출하는 게이지 이름/설명과 라벨 집합 타입.

use std::collections::BTreeMap;
use std::fmt;

/// 텔레메트리 카테고리 (스크레이프 주기 내 조회 단위)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TelemetryCategory {
    /// `GetSystemStatus`: 배터리, 접속 단말 수
    SystemStatus,
    /// `GetConnectionState`: 연결 상태, 속도, 트래픽
    ConnectionState,
    /// `GetSMSStorageState`: SMS 저장소
    SmsStorage,
}

impl TelemetryCategory {
    /// 스크레이프 순서대로 나열한 전체 카테고리
    pub const ALL: [TelemetryCategory; 3] = [
        TelemetryCategory::SystemStatus,
        TelemetryCategory::ConnectionState,
        TelemetryCategory::SmsStorage,
    ];
}

impl fmt::Display for TelemetryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryCategory::SystemStatus => write!(f, "system_status"),
            TelemetryCategory::ConnectionState => write!(f, "connection_state"),
            TelemetryCategory::SmsStorage => write!(f, "sms_storage"),
        }
    }
}

/// 익스포터가 노출하는 게이지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModemGauge {
    BatteryCapacityPercent,
    BatteryLevel,
    CurrentConnectionCount,
    TotalConnectionCount,
    ConnectionStatus,
    SpeedDownload,
    SpeedUpload,
    DownloadRate,
    UploadRate,
    DownloadBytes,
    UploadBytes,
    UnreadSmsCount,
}

impl ModemGauge {
    /// 노출 순서대로 나열한 전체 게이지
    pub const ALL: [ModemGauge; 12] = [
        ModemGauge::BatteryCapacityPercent,
        ModemGauge::BatteryLevel,
        ModemGauge::CurrentConnectionCount,
        ModemGauge::TotalConnectionCount,
        ModemGauge::ConnectionStatus,
        ModemGauge::SpeedDownload,
        ModemGauge::SpeedUpload,
        ModemGauge::DownloadRate,
        ModemGauge::UploadRate,
        ModemGauge::DownloadBytes,
        ModemGauge::UploadBytes,
        ModemGauge::UnreadSmsCount,
    ];

    /// 메트릭 이름
    pub fn name(self) -> &'static str {
        match self {
            ModemGauge::BatteryCapacityPercent => "battery_capacity_percent",
            ModemGauge::BatteryLevel => "battery_level",
            ModemGauge::CurrentConnectionCount => "current_connection_count",
            ModemGauge::TotalConnectionCount => "total_connection_count",
            ModemGauge::ConnectionStatus => "connection_status",
            ModemGauge::SpeedDownload => "speed_download",
            ModemGauge::SpeedUpload => "speed_upload",
            ModemGauge::DownloadRate => "download_rate",
            ModemGauge::UploadRate => "upload_rate",
            ModemGauge::DownloadBytes => "download_bytes",
            ModemGauge::UploadBytes => "upload_bytes",
            ModemGauge::UnreadSmsCount => "unread_sms_count",
        }
    }

    /// `# HELP` 설명
    pub fn help(self) -> &'static str {
        match self {
            ModemGauge::BatteryCapacityPercent => "Battery capacity",
            ModemGauge::BatteryLevel => "Battery level",
            ModemGauge::CurrentConnectionCount => "Current connection(s)",
            ModemGauge::TotalConnectionCount => "total connection(s)",
            ModemGauge::ConnectionStatus => "Connection status",
            ModemGauge::SpeedDownload => "Max speed download",
            ModemGauge::SpeedUpload => "Max speed upload",
            ModemGauge::DownloadRate => "Download rate",
            ModemGauge::UploadRate => "Upload rate",
            ModemGauge::DownloadBytes => "Download bytes",
            ModemGauge::UploadBytes => "Upload bytes",
            ModemGauge::UnreadSmsCount => "Unread SMS",
        }
    }

    /// 게이지 값을 제공하는 텔레메트리 카테고리
    pub fn category(self) -> TelemetryCategory {
        match self {
            ModemGauge::BatteryCapacityPercent
            | ModemGauge::BatteryLevel
            | ModemGauge::CurrentConnectionCount
            | ModemGauge::TotalConnectionCount => TelemetryCategory::SystemStatus,
            ModemGauge::ConnectionStatus
            | ModemGauge::SpeedDownload
            | ModemGauge::SpeedUpload
            | ModemGauge::DownloadRate
            | ModemGauge::UploadRate
            | ModemGauge::DownloadBytes
            | ModemGauge::UploadBytes => TelemetryCategory::ConnectionState,
            ModemGauge::UnreadSmsCount => TelemetryCategory::SmsStorage,
        }
    }
}

impl fmt::Display for ModemGauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 메트릭 라벨 집합 (키 정렬 보장)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    /// (키, 값) 쌍으로 라벨 집합 생성
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// 키 순서로 (키, 값) 순회
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 라벨 값 조회
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
