//! Prometheus metrics for the Moorage server.
//!
//! Counts lifecycle operations and the orphaned pins partial failures
//! leave behind. The `/metrics` endpoint is unauthenticated for scraping;
//! restrict it to authorized scraper IPs at the infrastructure level.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static FILES_UPLOADED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "moorage_files_uploaded_total",
        "Total number of files uploaded",
    )
    .expect("metric creation failed")
});

pub static FILES_SOFT_DELETED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "moorage_files_soft_deleted_total",
        "Total number of files soft-deleted",
    )
    .expect("metric creation failed")
});

pub static FILES_RECOVERED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "moorage_files_recovered_total",
        "Total number of files recovered from soft-delete",
    )
    .expect("metric creation failed")
});

pub static FILES_PURGED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "moorage_files_purged_total",
        "Total number of files permanently purged",
    )
    .expect("metric creation failed")
});

pub static UPLOAD_ORPHANS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "moorage_upload_orphans_total",
        "Total number of uploads that pinned bytes but failed to register them",
    )
    .expect("metric creation failed")
});

static REGISTER: Once = Once::new();

/// Register all metrics with the global registry exactly once.
pub fn ensure_registered() {
    REGISTER.call_once(|| {
        REGISTRY
            .register(Box::new(FILES_UPLOADED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FILES_SOFT_DELETED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FILES_RECOVERED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FILES_PURGED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(UPLOAD_ORPHANS.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    ensure_registered();
    let encoder = TextEncoder::new();
    let families = REGISTRY.gather();
    let mut buffer = Vec::new();
    match encoder.encode(&families, &mut buffer) {
        Ok(()) => (StatusCode::OK, buffer).into_response(),
        Err(error) => {
            tracing::error!(%error, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "encode error").into_response()
        }
    }
}
