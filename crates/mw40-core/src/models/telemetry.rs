//! 모뎀 텔레메트리 스냅샷 모델.
//!
//! 스크레이프 주기마다 통째로 교체되는 일회성 값이다.
//! 모뎀은 숫자 필드를 정수/실수 구분 없이 보내므로 모두 `f64`로 디코딩하고,
//! 열거형 코드(연결 상태, 로밍 플래그 등)는 해석하지 않고 그대로 전달한다.

use serde::Deserialize;

use crate::models::metric::ModemGauge;
use crate::models::null_as_default;

/// 시스템 상태 (`GetSystemStatus`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemStatus {
    /// 배터리 용량 (%)
    #[serde(rename = "bat_cap")]
    pub battery_capacity: f64,
    /// 배터리 레벨 (단계)
    #[serde(rename = "bat_level")]
    pub battery_level: f64,
    /// 로밍 플래그 코드
    #[serde(rename = "Roaming", default, deserialize_with = "null_as_default")]
    pub roaming: f64,
    /// 국내 로밍 플래그 코드
    #[serde(rename = "Domestic_Roaming", default, deserialize_with = "null_as_default")]
    pub domestic_roaming: f64,
    /// 신호 세기 (단계)
    #[serde(rename = "SignalStrength", default, deserialize_with = "null_as_default")]
    pub signal_strength: f64,
    /// 현재 접속 단말 수
    #[serde(rename = "curr_num")]
    pub current_connection: f64,
    /// 최대 접속 단말 수
    #[serde(rename = "TotalConnNum")]
    pub total_connection: f64,
}

impl SystemStatus {
    /// 노출할 게이지 값
    pub fn gauge_values(&self) -> Vec<(ModemGauge, f64)> {
        vec![
            (ModemGauge::BatteryCapacityPercent, self.battery_capacity),
            (ModemGauge::BatteryLevel, self.battery_level),
            (ModemGauge::CurrentConnectionCount, self.current_connection),
            (ModemGauge::TotalConnectionCount, self.total_connection),
        ]
    }
}

/// 연결 상태 (`GetConnectionState`)
///
/// 주소 필드명의 `Adrress` 오타는 모뎀 펌웨어 그대로다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectionState {
    /// 연결 상태 코드
    #[serde(rename = "ConnectionStatus")]
    pub connection_status: f64,
    /// 연결 프로파일 에러 코드
    #[serde(rename = "Conprofileerror", default, deserialize_with = "null_as_default")]
    pub con_profile_error: f64,
    #[serde(rename = "IPv4Adrress", default, deserialize_with = "null_as_default")]
    pub ipv4_address: String,
    #[serde(rename = "IPv6Adrress", default, deserialize_with = "null_as_default")]
    pub ipv6_address: String,
    /// 최대 다운로드 속도
    #[serde(rename = "Speed_Dl")]
    pub speed_download: f64,
    /// 최대 업로드 속도
    #[serde(rename = "Speed_Ul")]
    pub speed_upload: f64,
    #[serde(rename = "DlRate")]
    pub download_rate: f64,
    #[serde(rename = "UlRate")]
    pub upload_rate: f64,
    /// 연결 유지 시간 (초)
    #[serde(rename = "ConnectionTime", default, deserialize_with = "null_as_default")]
    pub connection_time: f64,
    #[serde(rename = "UlBytes")]
    pub upload_bytes: f64,
    #[serde(rename = "DlBytes")]
    pub download_bytes: f64,
}

impl ConnectionState {
    /// 노출할 게이지 값
    pub fn gauge_values(&self) -> Vec<(ModemGauge, f64)> {
        vec![
            (ModemGauge::ConnectionStatus, self.connection_status),
            (ModemGauge::SpeedDownload, self.speed_download),
            (ModemGauge::SpeedUpload, self.speed_upload),
            (ModemGauge::DownloadRate, self.download_rate),
            (ModemGauge::UploadRate, self.upload_rate),
            (ModemGauge::DownloadBytes, self.download_bytes),
            (ModemGauge::UploadBytes, self.upload_bytes),
        ]
    }
}

/// SMS 저장소 상태 (`GetSMSStorageState`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SmsStorageState {
    /// 읽지 않은 수신 확인 보고 수
    #[serde(rename = "UnreadReport", default, deserialize_with = "null_as_default")]
    pub unread_report: f64,
    /// 남은 저장 공간
    #[serde(rename = "LeftCount", default, deserialize_with = "null_as_default")]
    pub left_count: f64,
    /// 최대 저장 개수
    #[serde(rename = "MaxCount", default, deserialize_with = "null_as_default")]
    pub max_count: f64,
    /// 사용 중인 저장 개수
    #[serde(rename = "TUseCount", default, deserialize_with = "null_as_default")]
    pub total_used_count: f64,
    #[serde(rename = "UnreadSMSCount")]
    pub unread_sms_count: f64,
}

impl SmsStorageState {
    /// 노출할 게이지 값
    pub fn gauge_values(&self) -> Vec<(ModemGauge, f64)> {
        vec![(ModemGauge::UnreadSmsCount, self.unread_sms_count)]
    }
}
