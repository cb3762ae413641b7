use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level_filter().into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

pub(crate) fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "scorta_cache_hit_total",
            Unit::Count,
            "Fresh cache hits served without a network call."
        );
        describe_counter!(
            "scorta_cache_stale_hit_total",
            Unit::Count,
            "Stale entries served while a revalidation ran in the background."
        );
        describe_counter!(
            "scorta_cache_miss_total",
            Unit::Count,
            "Cold fetches for keys with no cached data."
        );
        describe_counter!(
            "scorta_cache_dedup_total",
            Unit::Count,
            "Fetch calls that attached to an already in-flight request."
        );
        describe_counter!(
            "scorta_cache_evict_total",
            Unit::Count,
            "Entries evicted due to the configured capacity bound."
        );
        describe_counter!(
            "scorta_cache_invalidate_total",
            Unit::Count,
            "Entries marked stale by mutation-triggered invalidation."
        );
        describe_histogram!(
            "scorta_api_request_ms",
            Unit::Milliseconds,
            "Remote API request latency in milliseconds."
        );
    });
}
