//! # mw40-web
//!
//! 게이지 레지스트리와 Prometheus 노출 서버.
//!
//! ## 기능
//! - `MetricSink` 포트 구현 ([`registry::GaugeRegistry`])
//! - `GET /metrics` 텍스트 노출 (Axum)

pub mod registry;
pub mod routes;

use mw40_core::error::CoreError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

pub use registry::GaugeRegistry;

/// `/metrics` 노출 서버
pub struct MetricsServer {
    registry: Arc<GaugeRegistry>,
    addr: SocketAddr,
}

impl MetricsServer {
    /// 새 노출 서버 생성
    pub fn new(registry: Arc<GaugeRegistry>, addr: SocketAddr) -> Self {
        Self { registry, addr }
    }

    /// 라우터 반환
    pub fn router(&self) -> axum::Router {
        routes::metrics_routes(self.registry.clone())
    }

    /// 설정된 주소에 리스너 바인드 (실패 시 `CoreError::Io`)
    pub async fn bind(&self) -> Result<TcpListener, CoreError> {
        Ok(TcpListener::bind(self.addr).await?)
    }

    /// 서버 실행
    ///
    /// 바인드 실패 시 `CoreError::Io` 반환. 종료 신호를 받으면 graceful shutdown.
    pub async fn run(self, shutdown_rx: watch::Receiver<bool>) -> Result<(), CoreError> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_rx).await
    }

    /// 이미 바인드된 리스너로 서버 실행
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), CoreError> {
        let app = self.router();
        info!("메트릭 서버 시작: http://{}/metrics", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("메트릭 서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("메트릭 서버 종료");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn server_stops_on_shutdown_signal() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let server = MetricsServer::new(Arc::new(GaugeRegistry::new().unwrap()), addr);
        let handle = tokio::spawn(server.serve(listener, shutdown_rx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("서버가 종료되지 않음")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn bind_conflict_is_io_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let result = MetricsServer::new(Arc::new(GaugeRegistry::new().unwrap()), addr)
            .run(shutdown_rx)
            .await;
        assert!(matches!(result, Err(CoreError::Io(_))));
        drop(listener);
    }
}
