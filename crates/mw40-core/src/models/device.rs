//! 장치 식별 정보 모델.
//!
//! `GetSystemInfo` 응답. 프로세스 시작 시 한 번만 조회되어
//! 모든 메트릭의 라벨로 재사용된다.

use serde::Deserialize;

use crate::models::metric::LabelSet;
use crate::models::null_as_default;

/// 라벨 키: IMEI
pub const LABEL_IMEI: &str = "IMEI";
/// 라벨 키: IMSI
pub const LABEL_IMSI: &str = "IMSI";
/// 라벨 키: MAC 주소
pub const LABEL_MAC_ADDRESS: &str = "MacAddress";

/// 모뎀 식별 정보 (소프트웨어/하드웨어 버전, MAC, IMEI, IMSI, ICCID)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceIdentity {
    /// 펌웨어 버전
    #[serde(rename = "SwVersion", default, deserialize_with = "null_as_default")]
    pub software_version: String,
    /// 하드웨어 버전
    #[serde(rename = "HwVersion", default, deserialize_with = "null_as_default")]
    pub hardware_version: String,
    /// MAC 주소
    #[serde(rename = "MacAddress")]
    pub mac_address: String,
    #[serde(rename = "IMEI")]
    pub imei: String,
    #[serde(rename = "IMSI", default, deserialize_with = "null_as_default")]
    pub imsi: String,
    #[serde(rename = "ICCID", default, deserialize_with = "null_as_default")]
    pub iccid: String,
}

impl DeviceIdentity {
    /// 모뎀 텍스트 인코딩이 남긴 끝 개행 제거
    ///
    /// `SwVersion`, `MacAddress` 두 필드에만 적용된다.
    pub fn normalized(mut self) -> Self {
        self.software_version = strip_trailing_newlines(&self.software_version);
        self.mac_address = strip_trailing_newlines(&self.mac_address);
        self
    }

    /// 메트릭 라벨 집합 `{IMEI, IMSI, MacAddress}`
    pub fn labels(&self) -> LabelSet {
        LabelSet::from_pairs([
            (LABEL_IMEI, self.imei.as_str()),
            (LABEL_IMSI, self.imsi.as_str()),
            (LABEL_MAC_ADDRESS, self.mac_address.as_str()),
        ])
    }
}

fn strip_trailing_newlines(value: &str) -> String {
    value.trim_end_matches(['\n', '\r']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_identity() -> DeviceIdentity {
        DeviceIdentity {
            software_version: "MW40_E6_02.00_05\n".to_string(),
            hardware_version: "MW40-V-V1.0".to_string(),
            mac_address: "c4:43:13:c5:12:34\n".to_string(),
            imei: "123456789012345".to_string(),
            imsi: "987654321098765".to_string(),
            iccid: "0123456789012345678p".to_string(),
        }
    }

    #[test]
    fn normalized_strips_only_version_and_mac() {
        let identity = raw_identity().normalized();
        assert_eq!(identity.software_version, "MW40_E6_02.00_05");
        assert_eq!(identity.mac_address, "c4:43:13:c5:12:34");
        assert_eq!(identity.imei, "123456789012345");
        assert_eq!(identity.hardware_version, "MW40-V-V1.0");
    }

    #[test]
    fn normalized_handles_crlf_and_repeated_newlines() {
        let mut raw = raw_identity();
        raw.software_version = "MW40_E6_02.00_05\r\n\n".to_string();
        let identity = raw.normalized();
        assert_eq!(identity.software_version, "MW40_E6_02.00_05");
    }

    #[test]
    fn normalized_is_idempotent() {
        let once = raw_identity().normalized();
        let twice = once.clone().normalized();
        assert_eq!(once, twice);
    }

    #[test]
    fn labels_use_imei_imsi_mac() {
        let labels = raw_identity().normalized().labels();
        let pairs: Vec<(&str, &str)> = labels.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("IMEI", "123456789012345"),
                ("IMSI", "987654321098765"),
                ("MacAddress", "c4:43:13:c5:12:34"),
            ]
        );
    }

    #[test]
    fn deserialize_modem_field_names() {
        let json = r#"{
            "SwVersion": "MW40_E6_02.00_05\n",
            "HwVersion": "MW40-V-V1.0",
            "MacAddress": "c4:43:13:c5:12:34\n",
            "IMEI": "123456789012345",
            "IMSI": "987654321098765",
            "ICCID": "0123456789012345678p"
        }"#;
        let identity: DeviceIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity, raw_identity());
    }

    #[test]
    fn missing_sim_fields_become_empty() {
        let json = r#"{
            "SwVersion": "MW40_E6_02.00_05\n",
            "MacAddress": "c4:43:13:c5:12:34",
            "IMEI": "123456789012345",
            "IMSI": null
        }"#;
        let identity: DeviceIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.imsi, "");
        assert_eq!(identity.iccid, "");
        assert_eq!(identity.hardware_version, "");
        assert_eq!(identity.labels().get(LABEL_IMSI), Some(""));
    }

    #[test]
    fn imei_and_mac_are_required() {
        let json = r#"{"SwVersion": "x", "MacAddress": "c4:43:13:c5:12:34", "IMEI": null}"#;
        assert!(serde_json::from_str::<DeviceIdentity>(json).is_err());

        let json = r#"{"SwVersion": "x", "IMEI": "123456789012345"}"#;
        assert!(serde_json::from_str::<DeviceIdentity>(json).is_err());
    }
}
