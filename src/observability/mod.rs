//! 可观测性模块
//!
//! 提供 Prometheus 文本格式指标、结构化日志初始化和运维端点。

use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
};

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "seizureguard.log";

// ===== Simple Metrics =====

/// 应用指标
#[derive(Clone, Default)]
pub struct AppMetrics {
    pub http_requests_total: Arc<AtomicU64>,
    pub http_request_duration_sum: Arc<AtomicU64>,
    pub predictions_total: Arc<AtomicU64>,
    pub uploads_total: Arc<AtomicU64>,
    pub symptom_checks_total: Arc<AtomicU64>,
    pub chat_messages_total: Arc<AtomicU64>,
    pub errors_total: Arc<AtomicU64>,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::SeqCst);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::SeqCst);
    }

    /// 记录预测次数（批量预测按样本计）
    pub fn record_predictions(&self, count: u64) {
        self.predictions_total.fetch_add(count, Ordering::SeqCst);
    }

    pub fn record_upload(&self) {
        self.uploads_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_symptom_check(&self) {
        self.symptom_checks_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_chat_message(&self) {
        self.chat_messages_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录错误
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds summary
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP predictions_total Total classifier predictions
# TYPE predictions_total counter
predictions_total {}
# HELP uploads_total Total processed uploads
# TYPE uploads_total counter
uploads_total {}
# HELP symptom_checks_total Total symptom analyses
# TYPE symptom_checks_total counter
symptom_checks_total {}
# HELP chat_messages_total Total chat messages
# TYPE chat_messages_total counter
chat_messages_total {}
# HELP errors_total Total error responses
# TYPE errors_total counter
errors_total {}
"#,
            self.http_requests_total.load(Ordering::SeqCst),
            self.http_request_duration_sum.load(Ordering::SeqCst) as f64 / 1000.0,
            self.http_requests_total.load(Ordering::SeqCst),
            self.predictions_total.load(Ordering::SeqCst),
            self.uploads_total.load(Ordering::SeqCst),
            self.symptom_checks_total.load(Ordering::SeqCst),
            self.chat_messages_total.load(Ordering::SeqCst),
            self.errors_total.load(Ordering::SeqCst),
        )
    }
}

// ===== Operational Endpoints =====

/// 运维端点状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(metrics: Arc<AppMetrics>, version: impl Into<String>) -> Self {
        Self {
            metrics,
            start_time: Utc::now(),
            version: version.into(),
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (axum::http::StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health/live", get(liveness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Request Metrics Middleware =====

/// 记录请求数、耗时和错误响应
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    metrics.record_http_request(start.elapsed().as_millis() as u64);
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        metrics.record_error();
    }

    response
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于配置的级别。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 必须在进程退出前保持存活。
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.level)));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(writer);

    let result = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_metrics_gather() {
        let metrics = AppMetrics::default();
        metrics.record_http_request(100);
        metrics.record_predictions(3);
        metrics.record_upload();
        metrics.record_chat_message();
        metrics.record_error();

        let output = metrics.gather();
        assert!(output.contains("http_requests_total 1"));
        assert!(output.contains("http_request_duration_seconds_sum 0.1"));
        assert!(output.contains("predictions_total 3"));
        assert!(output.contains("uploads_total 1"));
        assert!(output.contains("symptom_checks_total 0"));
        assert!(output.contains("chat_messages_total 1"));
        assert!(output.contains("errors_total 1"));
    }

    #[tokio::test]
    async fn test_metrics_endpoint_serves_counters() {
        let metrics = Arc::new(AppMetrics::default());
        metrics.record_symptom_check();
        let app = create_observability_router(Arc::new(ObservabilityState::new(
            metrics, "0.1.0",
        )));

        let response = app
            .oneshot(Request::get("/metrics").body(axum::body::Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("symptom_checks_total 1"));
    }

    #[tokio::test]
    async fn test_liveness() {
        let app = create_observability_router(Arc::new(ObservabilityState::new(
            Arc::new(AppMetrics::default()),
            "0.1.0",
        )));

        let response = app
            .oneshot(Request::get("/health/live").body(axum::body::Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
