use std::{future::Future, time::Duration};

use stratus_api::error::{ErrorCode, ServiceError};
use tokio::time::Instant;
use tracing::debug;

const INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Call `op` until it succeeds, fails with a code outside `codes`, or
/// `timeout` elapses.
///
/// Sleeps between attempts back off exponentially and never extend past the
/// deadline, so the last attempt happens at the deadline and its result is
/// what the caller sees.
pub async fn retry_when_error_code<T, F, Fut>(
    timeout: Duration,
    codes: &[ErrorCode],
    mut op: F,
) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let deadline = Instant::now() + timeout;
    let mut backoff = INITIAL_BACKOFF;
    let mut attempt = 1u32;
    loop {
        match op().await {
            Err(e) if codes.contains(&e.code) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(e);
                }
                let delay = backoff.min(deadline - now);
                debug!(attempt, code = %e.code, ?delay, "retrying");
                tokio::time::sleep(delay).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
                attempt += 1;
            }
            result => return result,
        }
    }
}
