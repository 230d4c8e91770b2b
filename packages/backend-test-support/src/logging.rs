//! Unified test logging initialization
//!
//! Installed once per test binary, usually from a `ctor` hook.

use once_cell::sync::OnceCell;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Filter used when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_TEST_FILTER: &str = "warn";

fn filter_from_env() -> EnvFilter {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER))
}

fn flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Initialize logging for tests.
///
/// Idempotent and race-safe. Level precedence: `TEST_LOG`, then `RUST_LOG`,
/// then `"warn"`. `TEST_LOG_JSON=1` switches to JSON lines (matching the
/// production layer) and `TEST_LOG_SPANS=1` logs span close events with
/// timings, which helps when chasing slow retries.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let spans = if flag("TEST_LOG_SPANS") {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let builder = fmt()
            .with_env_filter(filter_from_env())
            .with_span_events(spans)
            .with_test_writer()
            .without_time();

        if flag("TEST_LOG_JSON") {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
