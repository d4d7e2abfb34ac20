//! Shared fixtures for `specscope` tests: workspace builders, a scripted
//! change source and a reporter that records pass outcomes.

pub mod builders;
pub mod fake_change_source;
pub mod reporter;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use specscope::logging::LOG_ENV_VAR;
use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for any single awaited step in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

static TRACING: Once = Once::new();

/// Install a capturing tracing subscriber once per test binary.
///
/// Output shows up only for failing tests (or with `--nocapture`). The filter
/// is read from `SPECSCOPE_LOG`, e.g. `SPECSCOPE_LOG=specscope=debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("specscope=info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, panicking if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("test step did not finish within {TEST_TIMEOUT:?}"),
    }
}
