//! # mw40-core
//!
//! MW40 모뎀 익스포터 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 모뎀 텔레메트리 스냅샷, 장치 식별 정보, 게이지 정의
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (모뎀 API, 메트릭 싱크)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체 및 검증

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
