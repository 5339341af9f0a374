// Readiness probe: the only place individual requests are retried.

use crate::api_client::ApiClient;
use crate::error::HarnessError;
use std::time::Duration;
use tracing::{info, warn};

/// Polls GET /status until it answers, up to `attempts` tries with a fixed
/// backoff between them. Any response (whatever the code) counts as up.
pub async fn wait_for_server(
    client: &ApiClient,
    attempts: u32,
    backoff: Duration,
) -> Result<(), HarnessError> {
    for attempt in 1..=attempts {
        match client.status().await {
            Ok(outcome) => {
                info!(attempt, status = outcome.status, "server is up");
                return Ok(());
            }
            Err(e) => {
                warn!(attempt, attempts, error = %e, "status probe failed");
                if attempt < attempts {
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
    Err(HarnessError::ServerNotReady { attempts })
}

/// One valid login must succeed before load starts. The original suite placed
/// this check after an unconditional throw, so it never ran; here it is live.
pub async fn login_smoke_check(client: &ApiClient) -> Result<(), HarnessError> {
    let outcome = client.login("test", "test").await?;
    if outcome.status != 200 {
        return Err(HarnessError::UnexpectedStatus {
            endpoint: "/login/",
            status: outcome.status,
            allowed: vec![200],
        });
    }
    info!(elapsed_ms = outcome.elapsed.as_millis() as u64, "login smoke check passed");
    Ok(())
}
