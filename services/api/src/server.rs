use crate::cli::ServeArgs;
use crate::infra::{AppState, RankingHistory, RankingState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use resume_ranker::config::AppConfig;
use resume_ranker::error::AppError;
use resume_ranker::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let ranker = config.ranking.build_ranker()?;
    info!(
        model = ranker.normalizer().model(),
        remove_stopwords = config.ranking.normalization.remove_stopwords,
        "tokenizer model loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let ranking_state = RankingState {
        ranker: Arc::new(ranker),
        history: Arc::new(RankingHistory::with_limit(config.ranking.history_limit)),
        max_documents: config.ranking.max_documents,
    };

    let app = with_service_routes(ranking_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "resume ranking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
