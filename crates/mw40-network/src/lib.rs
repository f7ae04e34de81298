//! # mw40-network
//!
//! MW40 모뎀 웹 API(JSON-RPC over HTTP) 어댑터.
//! `ModemApi` 포트를 구현하며, 요청마다 고정된 JSON-RPC 본문을
//! `POST {base}/jrd/webapi?api={Method}`로 전송한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use mw40_network::modem_client::ModemClient;
//! use std::time::Duration;
//!
//! let client = ModemClient::new("http://192.168.1.1", Duration::from_secs(10))?;
//! let identity = client.fetch_device_identity().await?;
//! ```

pub mod jsonrpc;
pub mod modem_client;
