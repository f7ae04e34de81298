//! `/metrics` 라우트 정의.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::registry::GaugeRegistry;

/// Prometheus 텍스트 노출 포맷 Content-Type
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// 라우터 생성
pub fn metrics_routes(registry: Arc<GaugeRegistry>) -> Router {
    Router::new()
        .route("/metrics", get(get_metrics))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

/// GET /metrics: 현재 게이지 테이블
async fn get_metrics(State(registry): State<Arc<GaugeRegistry>>) -> Response {
    match registry.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("메트릭 렌더링 실패: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}
