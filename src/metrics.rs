//! Prometheus metrics & middleware helper.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use once_cell::sync::Lazy;
use prometheus::{opts, IntCounterVec};

/// Global Prometheus handle reused in tests.
pub static METRICS: Lazy<PrometheusMetrics> = Lazy::new(|| {
    PrometheusMetricsBuilder::new("actions")
        .endpoint("/metrics") // exposed URL
        .build()
        .expect("metrics builder")
});

/// Unsigned transactions built, labelled by action kind.
pub static TX_BUILT: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        opts!(
            "actions_transactions_built_total",
            "Unsigned transactions built, by action kind"
        ),
        &["action"],
    )
    .expect("tx counter");
    METRICS
        .registry
        .register(Box::new(counter.clone()))
        .expect("register tx counter");
    counter
});
